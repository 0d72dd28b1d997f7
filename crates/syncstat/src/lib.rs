//! Top-level facade crate for syncstat.
//!
//! Re-exports the core metrics types and the server library so users can
//! depend on a single crate.

pub mod core {
    pub use syncstat_core::*;
}

pub mod server {
    pub use syncstat_server::*;
}
