//! The transaction store: single owner of the transaction collection and
//! the bridge between it and the persisted blob.
//!
//! The whole collection lives under one key as a JSON array, newest first.
//! Every mutation rewrites that blob before the in-memory collection is
//! changed, so a failed write leaves both sides as they were.

use crate::core::id::IdGenerator;
use crate::core::transaction::{
    Transaction, TransactionDraft, TransactionId, TransactionPatch, ValidationError,
};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the collection is stored.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Opaque key-value persistence medium.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid transaction: {0}")]
    Invalid(#[from] ValidationError),
    #[error("no transaction with id {0}")]
    NotFound(TransactionId),
    #[error("duplicate transaction id {0}")]
    DuplicateId(TransactionId),
    #[error("stored transactions are corrupt: {0}")]
    Corrupt(String),
    #[error("blob store failure: {0}")]
    Blob(String),
    #[error("failed to serialize transactions: {0}")]
    Serialize(String),
}

pub struct TransactionStore {
    blob: Box<dyn BlobStore>,
    ids: Box<dyn IdGenerator>,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Creates an empty store without reading the blob.
    pub fn new(blob: Box<dyn BlobStore>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            blob,
            ids,
            transactions: Vec::new(),
        }
    }

    /// Creates a store and loads the persisted collection, failing closed to
    /// an empty collection if the blob cannot be read.
    pub fn open(blob: Box<dyn BlobStore>, ids: Box<dyn IdGenerator>) -> Self {
        let mut store = Self::new(blob, ids);
        if let Err(e) = store.load() {
            warn!("Starting with an empty collection: {}", e);
        }
        store
    }

    /// Re-reads the persisted collection.
    ///
    /// A missing blob is an empty collection. On error the store is left
    /// empty and the error says whether the blob was unreadable or corrupt.
    pub fn load(&mut self) -> Result<&[Transaction], StoreError> {
        self.transactions.clear();

        let text = match self.blob.get(TRANSACTIONS_KEY) {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                debug!("No stored transactions yet");
                return Ok(&self.transactions);
            }
            Err(e) => {
                warn!("Failed to read stored transactions: {:#}", e);
                return Err(StoreError::Blob(format!("{e:#}")));
            }
        };

        match parse_collection(&text) {
            Ok(transactions) => {
                debug!("Loaded {} transactions", transactions.len());
                self.transactions = transactions;
                Ok(&self.transactions)
            }
            Err(e) => {
                warn!("Stored transactions are corrupt, ignoring them: {}", e);
                Err(e)
            }
        }
    }

    /// Snapshot of the collection, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Validates the draft, assigns a fresh id and prepends the record.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, StoreError> {
        let id = self.fresh_id();
        let transaction = draft.into_transaction(id)?;

        self.transactions.insert(0, transaction.clone());
        if let Err(e) = self.write() {
            self.transactions.remove(0);
            return Err(e);
        }

        debug!("Added transaction {}", transaction.id);
        Ok(transaction)
    }

    /// Merges the patch into the record with the same id.
    pub fn update(&mut self, patch: TransactionPatch) -> Result<Transaction, StoreError> {
        let index = self
            .position(&patch.id)
            .ok_or_else(|| StoreError::NotFound(patch.id.clone()))?;
        let updated = patch.apply(&self.transactions[index])?;

        let previous = std::mem::replace(&mut self.transactions[index], updated.clone());
        if let Err(e) = self.write() {
            self.transactions[index] = previous;
            return Err(e);
        }

        debug!("Updated transaction {}", updated.id);
        Ok(updated)
    }

    /// Removes the record with the given id and returns it.
    pub fn remove(&mut self, id: &TransactionId) -> Result<Transaction, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let removed = self.transactions.remove(index);
        if let Err(e) = self.write() {
            self.transactions.insert(index, removed);
            return Err(e);
        }

        debug!("Removed transaction {}", removed.id);
        Ok(removed)
    }

    /// Replaces the whole collection and overwrites the blob with it.
    /// Collections with repeated ids or non-finite amounts are rejected.
    pub fn persist(&mut self, transactions: Vec<Transaction>) -> Result<(), StoreError> {
        if let Some(duplicate) = find_duplicate(&transactions) {
            return Err(StoreError::DuplicateId(duplicate.clone()));
        }
        if let Some(bad) = transactions.iter().find(|t| !t.amount.is_finite()) {
            return Err(ValidationError::NonNumericAmount(bad.amount.to_string()).into());
        }

        let previous = std::mem::replace(&mut self.transactions, transactions);
        if let Err(e) = self.write() {
            self.transactions = previous;
            return Err(e);
        }
        Ok(())
    }

    fn write(&mut self) -> Result<(), StoreError> {
        let text = serde_json::to_string(&self.transactions)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.blob
            .set(TRANSACTIONS_KEY, &text)
            .map_err(|e| StoreError::Blob(format!("{e:#}")))?;
        debug!("Persisted {} transactions", self.transactions.len());
        Ok(())
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| &t.id == id)
    }

    fn fresh_id(&mut self) -> TransactionId {
        loop {
            let id = self.ids.next_id();
            if self.position(&id).is_none() {
                return id;
            }
            debug!("Generated id {} is taken, retrying", id);
        }
    }
}

fn find_duplicate(transactions: &[Transaction]) -> Option<&TransactionId> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .map(|t| &t.id)
        .find(|id| !seen.insert(*id))
}

/// Parses the stored JSON array. Entries that cannot be read as a transaction,
/// and entries repeating an earlier id, are skipped.
fn parse_collection(text: &str) -> Result<Vec<Transaction>, StoreError> {
    let records: Vec<Value> =
        serde_json::from_str(text).map_err(|e| StoreError::Corrupt(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(record) {
            Ok(transaction) if seen.insert(transaction.id.clone()) => {
                transactions.push(transaction)
            }
            Ok(transaction) => {
                warn!(
                    "Skipping record {} with duplicate id {}",
                    index, transaction.id
                );
            }
            Err(e) => warn!("Skipping unreadable record {}: {}", index, e),
        }
    }
    Ok(transactions)
}
