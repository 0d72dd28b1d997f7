use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncStatError};

/// Point-in-time copy of every metric of a migration run.
///
/// Field names are the JSON keys served by the status endpoint; keep them
/// stable, external dashboards scrape them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // info
    pub address: String,

    // entries
    pub entry_id: u64,
    pub allow_entries_count: u64,
    pub disallow_entries_count: u64,

    // rdb
    pub rdb_file_size: u64,
    pub rdb_received_size: u64,
    pub rdb_send_size: u64,

    // aof
    pub aof_received_offset: u64,
    pub aof_applied_offset: u64,

    // backpressure
    pub in_queue_entries_count: u64,
    pub unanswered_bytes_count: u64,
}

impl MetricsSnapshot {
    /// Encode once as a flat JSON object, ready to hand to an HTTP body.
    pub fn to_json_bytes(&self) -> Result<Bytes> {
        let v = serde_json::to_vec(self)
            .map_err(|e| SyncStatError::Encode(format!("snapshot json encode failed: {e}")))?;
        Ok(Bytes::from(v))
    }

    /// Change-log bytes received but not applied yet.
    ///
    /// Saturates at zero if the offsets are momentarily out of order.
    pub fn aof_lag(&self) -> u64 {
        self.aof_received_offset
            .saturating_sub(self.aof_applied_offset)
    }
}
