//! Unique identifier generation for new transactions.

use crate::core::transaction::TransactionId;
use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> TransactionId;
}

/// Random v4 UUIDs, the default for real data.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> TransactionId {
        TransactionId::new(Uuid::new_v4().to_string())
    }
}

/// A counter yielding `<prefix>1`, `<prefix>2`, ...
///
/// Only unique within one process; the store skips values that collide with
/// records already loaded.
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    next: u64,
}

impl SequentialGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&mut self) -> TransactionId {
        let id = TransactionId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_distinct() {
        let mut ids = UuidGenerator;
        let generated: HashSet<_> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 100);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialGenerator::new("tx-");
        assert_eq!(ids.next_id().as_str(), "tx-1");
        assert_eq!(ids.next_id().as_str(), "tx-2");
    }
}
