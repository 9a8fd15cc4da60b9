use crate::models::TransactionRecord;
use crate::storage::{SnapshotRef, Storage};
use dashmap::iter::Iter;
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// In-memory cache of the most recent parse result per source.
///
/// Snapshots are replaced by reference, never edited in place. A reader that loaded a
/// snapshot keeps seeing that complete record set even after a newer one is saved.
pub struct RecordStorage {
    cache: Arc<DashMap<String, SnapshotRef>>,
    latest: RwLock<Option<String>>
}

impl RecordStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            latest: RwLock::new(None)
        }
    }

    pub fn iter(&self) -> Iter<'_, String, SnapshotRef> {
        self.cache.iter()
    }

    /// The most recently saved source and its records.
    ///
    /// The marker and the snapshot it names are published under one lock, so the pair is
    /// always what the last `save` to complete stored.
    pub fn latest(&self) -> Option<(String, SnapshotRef)> {
        let latest = self.latest.read().unwrap_or_else(PoisonError::into_inner);
        let source = latest.as_deref()?;

        self.load(source).map(|snapshot| (source.to_string(), snapshot))
    }
}

impl Default for RecordStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for RecordStorage {
    fn load(&self, source: &str) -> Option<SnapshotRef> {
        self.cache.get(source).map(|entry| Arc::clone(entry.value()))
    }

    fn save(&self, source: &str, records: Vec<TransactionRecord>) {
        let snapshot: SnapshotRef = records.into();

        debug!("Storing {} records for [{source}]", snapshot.len());

        // Held across the insert so concurrent saves publish in the same order they land.
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);

        self.cache.insert(source.to_string(), snapshot);
        *latest = Some(source.to_string());
    }
}
