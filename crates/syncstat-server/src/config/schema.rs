use std::net::SocketAddr;

use serde::Deserialize;
use syncstat_core::error::{Result, SyncStatError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncStatConfig {
    pub version: u32,

    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub status: StatusSection,

    #[serde(default)]
    pub advanced: AdvancedSection,
}

impl SyncStatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SyncStatError::UnsupportedVersion);
        }

        self.status.validate()?;

        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// Remote endpoint being migrated; reported verbatim as `address`.
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            enabled: default_enabled(),
        }
    }
}

impl StatusSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            SyncStatError::BadRequest(format!(
                "status.listen must be a valid SocketAddr ({}): {e}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvancedSection {
    /// Progress line period in seconds; `<= 0` disables the reporter.
    #[serde(default = "default_log_interval")]
    pub log_interval: i64,
}

impl Default for AdvancedSection {
    fn default() -> Self {
        Self {
            log_interval: default_log_interval(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8090".into()
}
fn default_enabled() -> bool {
    true
}
fn default_log_interval() -> i64 {
    5
}
