//! syncstat status server
//!
//! - Status endpoint: GET /v1/status (flat JSON snapshot)
//! - Progress line every `advanced.log_interval` seconds
//! - Ctrl-C: readyz flips to draining, server shuts down gracefully

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use syncstat_core::error::{Result, SyncStatError};
use syncstat_core::MetricsStore;
use syncstat_server::report::{self, TracingSink};
use syncstat_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, fatal = e.is_fatal(), "syncstat-server exiting");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "syncstat.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let store = Arc::new(MetricsStore::new(cfg.source.address.clone()));
    let mut reporter = report::spawn_reporter(
        Arc::clone(&store),
        cfg.advanced.log_interval,
        Arc::new(TracingSink),
    );
    let state = AppState::new(cfg, store);

    tokio::select! {
        res = serve_status(state.clone()) => res?,
        res = reporter.finished() => res?,
    }

    reporter.stop().await
}

async fn serve_status(state: AppState) -> Result<()> {
    let status = &state.cfg().status;
    if !status.enabled {
        tracing::info!("status server disabled");
        shutdown_signal(state.clone()).await;
        return Ok(());
    }

    let listen = status.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| SyncStatError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "status server starting");

    let app = router::build_router(state.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| SyncStatError::Internal(format!("status server failed: {e}")))
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c listener failed; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received; draining");
    state.set_draining();
}
