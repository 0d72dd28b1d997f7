use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};

use syncstat_core::error::{Result, SyncStatError};
use syncstat_core::{MetricsStore, Sampler};

use super::ProgressSink;

/// Longest timer period handed to tokio (about 136 years); larger configured
/// intervals would overflow the first deadline.
const MAX_PERIOD_SECS: u64 = u32::MAX as u64;

/// Owner of the reporter task.
///
/// Dropping the handle also stops the task (the shutdown channel closes).
pub struct ReporterHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<Result<()>>>,
}

impl ReporterHandle {
    /// False when the configured interval disabled reporting.
    pub fn is_enabled(&self) -> bool {
        self.task.is_some()
    }

    /// Ask the task to stop at its next wait point.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Resolves when the task ends on its own, which only happens on a sink
    /// failure. Never resolves for a disabled reporter.
    pub async fn finished(&mut self) -> Result<()> {
        let Some(task) = self.task.as_mut() else {
            return std::future::pending().await;
        };
        let out = task.await;
        self.task = None;
        flatten(out)
    }

    /// Signal shutdown and wait for the task to exit.
    pub async fn stop(mut self) -> Result<()> {
        self.shutdown();
        match self.task.take() {
            Some(task) => flatten(task.await),
            None => Ok(()),
        }
    }
}

fn flatten(out: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    out.map_err(|e| SyncStatError::Internal(format!("reporter task failed: {e}")))?
}

/// Start the periodic reporter for `store`.
///
/// `interval_seconds <= 0` disables reporting: this logs once and returns an
/// idle handle. Otherwise the first line comes one full interval after
/// spawning, never immediately.
pub fn spawn_reporter(
    store: Arc<MetricsStore>,
    interval_seconds: i64,
    sink: Arc<dyn ProgressSink>,
) -> ReporterHandle {
    let (shutdown, shutdown_rx) = watch::channel(false);

    let Some(interval) = Sampler::interval_from_secs(interval_seconds) else {
        tracing::info!(seconds = interval_seconds, "statistics disabled");
        return ReporterHandle { shutdown, task: None };
    };

    let sampler = Sampler::new(interval, &store.snapshot());
    tracing::info!(seconds = interval.get(), "statistics reporter started");

    let task = tokio::spawn(run(store, sampler, sink, shutdown_rx));
    ReporterHandle {
        shutdown,
        task: Some(task),
    }
}

async fn run(
    store: Arc<MetricsStore>,
    mut sampler: Sampler,
    sink: Arc<dyn ProgressSink>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    let period = Duration::from_secs(sampler.interval_secs().get().min(MAX_PERIOD_SECS));
    let mut tick = tokio::time::interval_at(Instant::now() + period, period);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let cur = store.snapshot();
                let Some(report) = sampler.sample(&cur) else {
                    tracing::debug!("rdb size unknown; progress line skipped");
                    continue;
                };
                if let Err(e) = sink.emit(&report).await {
                    tracing::error!(error = %e, "progress sink failed; reporter stopping");
                    return Err(e);
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::info!("statistics reporter stopped");
                    return Ok(());
                }
            }
        }
    }
}
