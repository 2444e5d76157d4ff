use crate::core::store::BlobStore;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory blob store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut blobs) = store.inner.write() {
            blobs.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .inner
            .read()
            .map_err(|_| anyhow!("memory blob store lock poisoned"))?;
        let value = blobs.get(key).cloned();
        debug!(
            "Blob {} for key: {}",
            if value.is_some() { "HIT" } else { "MISS" },
            key
        );
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self
            .inner
            .write()
            .map_err(|_| anyhow!("memory blob store lock poisoned"))?;
        debug!("Blob PUT for key: {}", key);
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
