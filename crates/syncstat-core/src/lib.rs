//! syncstat core: metrics aggregate, snapshots, and phase-aware progress
//! reporting for a migration run.
//!
//! This crate holds the state shared by migration workers, the status
//! endpoint, and the periodic reporter. It intentionally carries no transport
//! or runtime dependencies so the pure pieces (phase classification, delta
//! sampling, line formatting) can be tested without a clock or a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Workers call into the store from hot paths; a crash here takes the whole
//! migration down with it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;
pub mod progress;

/// Shared result type.
pub use error::{Result, SyncStatError};
pub use metrics::{MetricsSnapshot, MetricsStore};
pub use progress::{Phase, ProgressReport, Sampler};
