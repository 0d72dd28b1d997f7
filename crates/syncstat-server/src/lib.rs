//! syncstat server library entry.
//!
//! Wires the metrics store into the status endpoint and the periodic progress
//! reporter. It is consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod report;
pub mod router;
