//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use syncstat_core::error::{Result, SyncStatError};

pub use schema::{AdvancedSection, SourceSection, StatusSection, SyncStatConfig};

pub fn load_from_file(path: &str) -> Result<SyncStatConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SyncStatError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<SyncStatConfig> {
    let cfg: SyncStatConfig = serde_yaml::from_str(s)
        .map_err(|e| SyncStatError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
