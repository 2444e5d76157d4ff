//! Core domain: transactions, their store, and the views computed from them.

pub mod analytics;
pub mod category;
pub mod clock;
pub mod config;
pub mod format;
pub mod id;
pub mod log;
pub mod store;
pub mod transaction;
pub mod view;

// Re-export main types for cleaner imports
pub use category::Category;
pub use clock::{Clock, FixedClock, SystemClock};
pub use format::{Formatter, Locale};
pub use id::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use store::{BlobStore, StoreError, TransactionStore};
pub use transaction::{Kind, Transaction, TransactionDraft, TransactionId, TransactionPatch};
pub use view::{CategoryFilter, MonthFilter, SortKey, ViewFilter};
