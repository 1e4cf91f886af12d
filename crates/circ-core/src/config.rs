//! Runtime configuration.
//!
//! Hosts usually keep a small TOML file next to their save directory:
//!
//! ```toml
//! save_interval_ticks = 40
//! save_dir            = "saves/circuits"
//! log_filter          = "circ_sim=debug,info"
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Default number of ticks between persistence checks.
pub const DEFAULT_SAVE_INTERVAL_TICKS: u64 = 40;

/// Top-level configuration for a circuit registry and its host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// Check for unsaved topology changes every N ticks.  Must be non-zero.
    pub save_interval_ticks: u64,

    /// Directory holding one save file per region.  Created on first use.
    pub save_dir: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive used by binaries.
    pub log_filter: String,

    /// Number of ticks a standalone run simulates.
    pub total_ticks: u64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            save_interval_ticks: DEFAULT_SAVE_INTERVAL_TICKS,
            save_dir:            PathBuf::from("circuits"),
            log_filter:          "info".to_owned(),
            total_ticks:         600,
        }
    }
}

impl CircuitConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let config: CircuitConfig =
            toml::from_str(text).map_err(|e| CoreError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the registry cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.save_interval_ticks == 0 {
            return Err(CoreError::Config(
                "save_interval_ticks must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
