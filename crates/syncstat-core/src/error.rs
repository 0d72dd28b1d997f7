//! Shared error type across syncstat crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, SyncStatError>;

/// Unified error type used by core and server.
///
/// Metrics updates never fail; errors only come from the edges (config,
/// encoding a snapshot, writing a progress line).
#[derive(Debug, Error)]
pub enum SyncStatError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("progress sink failed: {0}")]
    Sink(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SyncStatError {
    /// Whether the process must stop when this error surfaces.
    ///
    /// A broken encoder or log sink means the observability channel itself is
    /// unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncStatError::Encode(_) | SyncStatError::Sink(_))
    }
}
