//! Phase-aware progress reporting.
//!
//! - [`Phase`]: which of the three migration stages a snapshot is in.
//! - [`Sampler`]: per-tick delta bookkeeping; snapshot in, report out.
//! - [`ProgressReport`]: typed tick result that renders as the log line.
//!
//! Everything here is pure; the timer and the sink live in the server crate.

mod phase;
mod report;
mod sampler;

pub use phase::Phase;
pub use report::ProgressReport;
pub use sampler::Sampler;
