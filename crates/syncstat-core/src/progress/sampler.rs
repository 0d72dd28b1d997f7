use std::num::NonZeroU64;

use crate::metrics::MetricsSnapshot;

use super::phase::Phase;
use super::report::ProgressReport;

/// Turns successive snapshots into progress reports.
///
/// Keeps the entry counters of the last emitted tick so the apply phase can
/// report per-second deltas. Ticks skipped because the rdb size is still
/// unknown leave that baseline untouched.
#[derive(Debug, Clone)]
pub struct Sampler {
    interval_secs: NonZeroU64,
    last_allow_entries: u64,
    last_disallow_entries: u64,
}

impl Sampler {
    /// Map a configured interval to a usable one; `<= 0` means disabled.
    pub fn interval_from_secs(seconds: i64) -> Option<NonZeroU64> {
        u64::try_from(seconds).ok().and_then(NonZeroU64::new)
    }

    pub fn new(interval_secs: NonZeroU64, baseline: &MetricsSnapshot) -> Self {
        Self {
            interval_secs,
            last_allow_entries: baseline.allow_entries_count,
            last_disallow_entries: baseline.disallow_entries_count,
        }
    }

    pub fn interval_secs(&self) -> NonZeroU64 {
        self.interval_secs
    }

    fn per_sec(&self, count: u64) -> f64 {
        count as f64 / self.interval_secs.get() as f64
    }

    /// Produce this tick's report, or `None` when nothing should be emitted.
    pub fn sample(&mut self, cur: &MetricsSnapshot) -> Option<ProgressReport> {
        let phase = Phase::of(cur)?;
        let file_size = cur.rdb_file_size as f64;
        let allow_delta = cur.allow_entries_count.saturating_sub(self.last_allow_entries);
        let disallow_delta = cur.disallow_entries_count.saturating_sub(self.last_disallow_entries);

        let report = match phase {
            Phase::ReceivingRdb => ProgressReport::ReceivingRdb {
                percent: cur.rdb_received_size as f64 / file_size * 100.0,
                rdb_file_size: cur.rdb_file_size,
                rdb_received_size: cur.rdb_received_size,
            },
            Phase::ApplyingRdb => ProgressReport::ApplyingRdb {
                percent: cur.rdb_send_size as f64 * 100.0 / file_size,
                allow_ops: self.per_sec(allow_delta),
                disallow_ops: self.per_sec(disallow_delta),
                entry_id: cur.entry_id,
                in_queue_entries_count: cur.in_queue_entries_count,
                unanswered_bytes_count: cur.unanswered_bytes_count,
                rdb_file_size: cur.rdb_file_size,
                rdb_send_size: cur.rdb_send_size,
            },
            // run totals over one interval, not deltas
            Phase::SyncingAof => ProgressReport::SyncingAof {
                allow_ops: self.per_sec(cur.allow_entries_count),
                disallow_ops: self.per_sec(cur.disallow_entries_count),
                entry_id: cur.entry_id,
                in_queue_entries_count: cur.in_queue_entries_count,
                unanswered_bytes_count: cur.unanswered_bytes_count,
                aof_lag: cur.aof_lag(),
                aof_received_offset: cur.aof_received_offset,
                aof_applied_offset: cur.aof_applied_offset,
            },
        };

        self.last_allow_entries = cur.allow_entries_count;
        self.last_disallow_entries = cur.disallow_entries_count;
        Some(report)
    }
}
