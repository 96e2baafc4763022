//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Database file path. The file and its parent directory are created on
    /// first run if absent.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// SQLite busy timeout in seconds.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_db_path() -> PathBuf {
    // Matches the original deployment: a single database file at the
    // application root.
    PathBuf::from("./metadata.db")
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

impl MetadataConfig {
    /// Validate metadata configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("metadata.path must not be empty".to_string());
        }
        if self.busy_timeout_secs > i64::MAX as u64 {
            return Err(format!(
                "metadata.busy_timeout_secs {} exceeds maximum value {}",
                self.busy_timeout_secs,
                i64::MAX
            ));
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataConfig,
}

impl AppConfig {
    /// Validate the full configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.metadata.validate()
    }
}
