use std::fmt;

use super::phase::Phase;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

fn gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB
}

/// One rendered progress tick.
///
/// Sinks get the typed value; `Display` yields the log line.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressReport {
    ReceivingRdb {
        percent: f64,
        rdb_file_size: u64,
        rdb_received_size: u64,
    },
    ApplyingRdb {
        percent: f64,
        allow_ops: f64,
        disallow_ops: f64,
        entry_id: u64,
        in_queue_entries_count: u64,
        unanswered_bytes_count: u64,
        rdb_file_size: u64,
        rdb_send_size: u64,
    },
    SyncingAof {
        allow_ops: f64,
        disallow_ops: f64,
        entry_id: u64,
        in_queue_entries_count: u64,
        unanswered_bytes_count: u64,
        aof_lag: u64,
        aof_received_offset: u64,
        aof_applied_offset: u64,
    },
}

impl ProgressReport {
    pub fn phase(&self) -> Phase {
        match self {
            ProgressReport::ReceivingRdb { .. } => Phase::ReceivingRdb,
            ProgressReport::ApplyingRdb { .. } => Phase::ApplyingRdb,
            ProgressReport::SyncingAof { .. } => Phase::SyncingAof,
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressReport::ReceivingRdb {
                percent,
                rdb_file_size,
                rdb_received_size,
            } => write!(
                f,
                "receiving rdb. percent=[{:.2}]%, rdbFileSize=[{:.3}]G, rdbReceivedSize=[{:.3}]G",
                percent,
                gib(*rdb_file_size),
                gib(*rdb_received_size),
            ),
            ProgressReport::ApplyingRdb {
                percent,
                allow_ops,
                disallow_ops,
                entry_id,
                in_queue_entries_count,
                unanswered_bytes_count,
                rdb_file_size,
                rdb_send_size,
            } => write!(
                f,
                "syncing rdb. percent=[{:.2}]%, allowOps=[{:.2}], disallowOps=[{:.2}], entryId=[{}], \
                 InQueueEntriesCount=[{}], unansweredBytesCount=[{}]bytes, rdbFileSize=[{:.3}]G, rdbSendSize=[{:.3}]G",
                percent,
                allow_ops,
                disallow_ops,
                entry_id,
                in_queue_entries_count,
                unanswered_bytes_count,
                gib(*rdb_file_size),
                gib(*rdb_send_size),
            ),
            ProgressReport::SyncingAof {
                allow_ops,
                disallow_ops,
                entry_id,
                in_queue_entries_count,
                unanswered_bytes_count,
                aof_lag,
                aof_received_offset,
                aof_applied_offset,
            } => write!(
                f,
                "syncing aof. allowOps=[{:.2}], disallowOps=[{:.2}], entryId=[{}], InQueueEntriesCount=[{}], \
                 unansweredBytesCount=[{}]bytes, diff=[{}], aofReceivedOffset=[{}], aofAppliedOffset=[{}]",
                allow_ops,
                disallow_ops,
                entry_id,
                in_queue_entries_count,
                unanswered_bytes_count,
                aof_lag,
                aof_received_offset,
                aof_applied_offset,
            ),
        }
    }
}
