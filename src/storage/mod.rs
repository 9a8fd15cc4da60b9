mod record_storage;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::models::TransactionRecord;

pub use record_storage::RecordStorage;

/// Shared, immutable view of one parse result.
pub type SnapshotRef = Arc<[TransactionRecord]>;

pub trait Storage: Send + Sync + 'static {
    fn load(&self, source: &str) -> Option<SnapshotRef>;
    fn save(&self, source: &str, records: Vec<TransactionRecord>);
}
