//! Dashboard configuration.
//!
//! `DashboardConfig` is read from an optional TOML file. Every field has a
//! default, so an empty document (or no file at all) yields a working
//! configuration:
//!
//! ```toml
//! refresh_interval_secs = 10
//! jitter_percent = 5
//!
//! [display]
//! claim_model_accuracy = 94.2
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use wardline_contracts::error::{RegistryError, RegistryResult};

/// Static figures shown on AI panels.
///
/// These are display constants. No model computes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConstants {
    /// "Claim rejection predictor" accuracy, percent.
    pub claim_model_accuracy: f64,
    /// "Discharge timing predictor" confidence, percent.
    pub discharge_model_confidence: f64,
    /// "Missed charge predictor" recovery rate, percent.
    pub charge_recovery_rate: f64,
}

impl Default for DisplayConstants {
    fn default() -> Self {
        Self {
            claim_model_accuracy: 94.2,
            discharge_model_confidence: 87.5,
            charge_recovery_rate: 91.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Cadence of the live-metric refresh.
    pub refresh_interval_secs: u64,
    /// Maximum relative change applied to a metric per refresh, percent.
    pub jitter_percent: u32,
    pub display: DisplayConstants,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 10,
            jitter_percent: 5,
            display: DisplayConstants::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(s: &str) -> RegistryResult<Self> {
        let config: DashboardConfig = toml::from_str(s).map_err(|e| RegistryError::ConfigError {
            reason: format!("failed to parse dashboard TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> RegistryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::ConfigError {
            reason: format!("failed to read dashboard config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    fn validate(&self) -> RegistryResult<()> {
        if self.refresh_interval_secs == 0 {
            return Err(RegistryError::ConfigError {
                reason: "refresh_interval_secs must be at least 1".to_string(),
            });
        }
        if self.jitter_percent > 100 {
            return Err(RegistryError::ConfigError {
                reason: format!("jitter_percent must be 0-100, got {}", self.jitter_percent),
            });
        }
        Ok(())
    }
}
