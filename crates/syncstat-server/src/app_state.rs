//! Shared application state for the status server.
//!
//! Holds the parsed config and the run's metrics store. The store is created
//! by the caller and injected, so tests can run isolated instances side by
//! side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use syncstat_core::MetricsStore;

use crate::config::SyncStatConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<MetricsStore>,
}

struct AppStateInner {
    cfg: SyncStatConfig,
    draining: AtomicBool,
}

impl AppState {
    pub fn new(cfg: SyncStatConfig, store: Arc<MetricsStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                draining: AtomicBool::new(false),
            }),
            store,
        }
    }

    pub fn cfg(&self) -> &SyncStatConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<MetricsStore> {
        Arc::clone(&self.store)
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
