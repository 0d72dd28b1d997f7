//! Periodic progress reporting.
//!
//! A single background task samples the metrics store on a fixed period and
//! hands each tick's [`ProgressReport`] to a [`ProgressSink`]. Sinks are
//! pluggable so tests can capture lines; production uses [`TracingSink`].

mod reporter;

use async_trait::async_trait;
use syncstat_core::error::Result;
use syncstat_core::ProgressReport;

pub use reporter::{spawn_reporter, ReporterHandle};

/// Destination for progress lines.
///
/// An `Err` is terminal: the reporter stops and surfaces it (use
/// `SyncStatError::Sink`).
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn emit(&self, report: &ProgressReport) -> Result<()>;
}

/// Emits progress lines through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl ProgressSink for TracingSink {
    async fn emit(&self, report: &ProgressReport) -> Result<()> {
        tracing::info!(target: "syncstat::progress", phase = report.phase().as_str(), "{report}");
        Ok(())
    }
}
