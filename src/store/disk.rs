use crate::core::store::BlobStore;
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "blobs";

/// Blob store backed by a fjall keyspace on disk.
pub struct DiskBlobStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskBlobStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open ledger at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open ledger partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl BlobStore for DiskBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.partition.get(key.as_bytes())? {
            Some(bytes) => {
                debug!("Blob HIT for key: {}", key);
                let text = String::from_utf8(bytes.to_vec())
                    .with_context(|| format!("Blob for key {key} is not valid UTF-8"))?;
                Ok(Some(text))
            }
            None => {
                debug!("Blob MISS for key: {}", key);
                Ok(None)
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key.as_bytes(), value.as_bytes())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Blob PUT for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_get_set() {
        let dir = tempdir().unwrap();
        let mut store = DiskBlobStore::open(dir.path()).unwrap();

        // Initially, store is empty
        assert!(store.get("key1").unwrap().is_none());

        store.set("key1", "[]").unwrap();
        assert_eq!(store.get("key1").unwrap().as_deref(), Some("[]"));

        // Get a non-existent key
        assert!(store.get("key2").unwrap().is_none());
    }

    #[test]
    fn test_disk_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = DiskBlobStore::open(dir.path()).unwrap();
            store.set("key1", r#"[{"id":"1"}]"#).unwrap();
        }

        let store = DiskBlobStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("key1").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }
}
