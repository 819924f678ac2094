//! Engine configuration.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! [world]
//! notification_priority = 50
//! lifecycle_policy = "report"
//!
//! [host]
//! work_cycle_ms = 500
//! sleep_cycle_ms = 250
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tessera_entity::WorldConfig;
use thiserror::Error;
use tracing::debug;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Pacing of the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Time spent solving before control returns to the host.
    pub work_cycle_ms: u64,
    /// Pause between solving batches.
    pub sleep_cycle_ms: u64,
    /// Optional cap on solving batches.
    pub max_batches: Option<usize>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            work_cycle_ms: 500,
            sleep_cycle_ms: 250,
            max_batches: None,
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_work_cycle_ms(mut self, ms: u64) -> Self {
        self.work_cycle_ms = ms;
        self
    }

    pub fn with_sleep_cycle_ms(mut self, ms: u64) -> Self {
        self.sleep_cycle_ms = ms;
        self
    }

    pub fn with_max_batches(mut self, batches: usize) -> Self {
        self.max_batches = Some(batches);
        self
    }

    pub fn work_cycle(&self) -> Duration {
        Duration::from_millis(self.work_cycle_ms)
    }

    pub fn sleep_cycle(&self) -> Duration {
        Duration::from_millis(self.sleep_cycle_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub host: HostConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    pub fn with_host(mut self, host: HostConfig) -> Self {
        self.host = host;
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
