//! Blob store backends for the transaction collection.

pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::store::BlobStore;
use anyhow::Result;
pub use disk::DiskBlobStore;
pub use memory::MemoryBlobStore;
use tracing::debug;

/// Opens the on-disk blob store under the configured data directory.
pub fn open_blob_store(config: &AppConfig) -> Result<Box<dyn BlobStore>> {
    let path = config.default_data_path()?.join("ledger");
    debug!("Opening ledger at {}", path.display());
    Ok(Box::new(DiskBlobStore::open(&path)?))
}
