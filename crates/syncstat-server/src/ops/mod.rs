//! Operational HTTP endpoints.
//!
//! - `/v1/status` (and `/`) : metrics snapshot as flat JSON
//! - `/healthz`             : liveness
//! - `/readyz`              : readiness (503 when draining)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use syncstat_core::SyncStatError;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn status(State(state): State<AppState>) -> Response {
    let snap = state.store().snapshot();
    let body = match snap.to_json_bytes() {
        Ok(b) => b,
        Err(e) => fatal(&e),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Stop the process on a broken observability channel.
///
/// Encoding a flat snapshot or writing a log line cannot fail in a healthy
/// process; carrying on would silently hide migration progress.
pub fn fatal(err: &SyncStatError) -> ! {
    tracing::error!(error = %err, "observability channel failed; exiting");
    std::process::exit(1)
}
