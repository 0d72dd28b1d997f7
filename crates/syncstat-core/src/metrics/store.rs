use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::snapshot::MetricsSnapshot;

/// Shared metrics aggregate for one migration run.
///
/// Construct once at startup, then share via `Arc`. Every field lives behind
/// one lock: the reporter compares several fields against each other, so a
/// reader must never see half of an update batch.
#[derive(Debug, Default)]
pub struct MetricsStore {
    inner: RwLock<MetricsSnapshot>,
}

impl MetricsStore {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(MetricsSnapshot {
                address: address.into(),
                ..MetricsSnapshot::default()
            }),
        }
    }

    // Poisoned guards still hold plain integers; recover instead of panicking.
    fn read(&self) -> RwLockReadGuard<'_, MetricsSnapshot> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MetricsSnapshot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consistent copy of every field at a single instant.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.read().clone()
    }

    // info

    pub fn set_address(&self, addr: impl Into<String>) {
        self.write().address = addr.into();
    }

    // entries

    pub fn update_entry_id(&self, id: u64) {
        self.write().entry_id = id;
    }

    pub fn increment_allow_entries(&self) {
        let mut m = self.write();
        m.allow_entries_count = m.allow_entries_count.saturating_add(1);
    }

    pub fn increment_disallow_entries(&self) {
        let mut m = self.write();
        m.disallow_entries_count = m.disallow_entries_count.saturating_add(1);
    }

    // rdb

    pub fn set_rdb_file_size(&self, size: u64) {
        self.write().rdb_file_size = size;
    }

    pub fn update_rdb_received_size(&self, size: u64) {
        self.write().rdb_received_size = size;
    }

    pub fn update_rdb_send_size(&self, size: u64) {
        self.write().rdb_send_size = size;
    }

    // aof

    pub fn update_aof_received_offset(&self, offset: u64) {
        self.write().aof_received_offset = offset;
    }

    pub fn update_aof_applied_offset(&self, offset: u64) {
        self.write().aof_applied_offset = offset;
    }

    // backpressure

    pub fn update_in_queue_entries_count(&self, count: u64) {
        self.write().in_queue_entries_count = count;
    }

    pub fn update_unanswered_bytes_count(&self, count: u64) {
        self.write().unanswered_bytes_count = count;
    }
}
