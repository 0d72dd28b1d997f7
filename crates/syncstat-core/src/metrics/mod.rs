//! Metrics aggregate shared by migration workers.
//!
//! Workers push counters/gauges into a [`MetricsStore`]; the status endpoint
//! and the reporter read [`MetricsSnapshot`] copies. Updates never fail and
//! never block on I/O.

mod snapshot;
mod store;

pub use snapshot::MetricsSnapshot;
pub use store::MetricsStore;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_carries_every_field_under_its_wire_name() {
        let store = MetricsStore::new("src:6379");
        store.update_entry_id(42);
        store.increment_allow_entries();
        store.increment_allow_entries();
        store.increment_disallow_entries();
        store.set_rdb_file_size(1_000);
        store.update_rdb_received_size(900);
        store.update_rdb_send_size(800);
        store.update_aof_received_offset(77);
        store.update_aof_applied_offset(70);
        store.update_in_queue_entries_count(12);
        store.update_unanswered_bytes_count(4_096);

        let body = store.snapshot().to_json_bytes().unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let obj = v.as_object().unwrap();

        assert_eq!(obj.len(), 11);
        assert_eq!(v["address"], "src:6379");
        assert_eq!(v["entry_id"], 42);
        assert_eq!(v["allow_entries_count"], 2);
        assert_eq!(v["disallow_entries_count"], 1);
        assert_eq!(v["rdb_file_size"], 1_000);
        assert_eq!(v["rdb_received_size"], 900);
        assert_eq!(v["rdb_send_size"], 800);
        assert_eq!(v["aof_received_offset"], 77);
        assert_eq!(v["aof_applied_offset"], 70);
        assert_eq!(v["in_queue_entries_count"], 12);
        assert_eq!(v["unanswered_bytes_count"], 4_096);
    }

    #[test]
    fn json_keeps_full_u64_range() {
        let store = MetricsStore::default();
        store.update_aof_received_offset(u64::MAX);
        let body = store.snapshot().to_json_bytes().unwrap();
        let back: MetricsSnapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(back.aof_received_offset, u64::MAX);
    }

    #[test]
    fn aof_lag_saturates() {
        let snap = MetricsSnapshot {
            aof_received_offset: 10,
            aof_applied_offset: 25,
            ..MetricsSnapshot::default()
        };
        assert_eq!(snap.aof_lag(), 0);

        let snap = MetricsSnapshot {
            aof_received_offset: 25,
            aof_applied_offset: 10,
            ..MetricsSnapshot::default()
        };
        assert_eq!(snap.aof_lag(), 15);
    }
}
