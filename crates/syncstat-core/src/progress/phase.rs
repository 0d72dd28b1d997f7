use crate::metrics::MetricsSnapshot;

/// Which stage of the migration a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Snapshot file is still arriving from the source.
    ReceivingRdb,
    /// Snapshot file is being applied to the destination.
    ApplyingRdb,
    /// Snapshot done; streaming the change-log.
    SyncingAof,
}

impl Phase {
    /// Classify from the three rdb byte counters.
    ///
    /// Returns `None` while `rdb_file_size == 0`: no snapshot phase has been
    /// observed yet, so there is nothing to report.
    ///
    /// `send > received` is checked first. Applying faster than receiving is
    /// only possible transiently, and reading it as "still receiving" keeps the
    /// apply percentage from going past 100.
    pub fn classify(
        rdb_file_size: u64,
        rdb_received_size: u64,
        rdb_send_size: u64,
    ) -> Option<Self> {
        if rdb_file_size == 0 {
            return None;
        }
        if rdb_send_size > rdb_received_size {
            Some(Phase::ReceivingRdb)
        } else if rdb_file_size > rdb_send_size {
            Some(Phase::ApplyingRdb)
        } else {
            Some(Phase::SyncingAof)
        }
    }

    pub fn of(snap: &MetricsSnapshot) -> Option<Self> {
        Self::classify(snap.rdb_file_size, snap.rdb_received_size, snap.rdb_send_size)
    }

    /// Stable label used as a structured log field.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::ReceivingRdb => "receiving_rdb",
            Phase::ApplyingRdb => "applying_rdb",
            Phase::SyncingAof => "syncing_aof",
        }
    }
}
