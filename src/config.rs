//! Validator and application configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{EPOCH_DAY_MAX_EXCLUSIVE, EPOCH_YEAR_BAND_HIGH, EPOCH_YEAR_BAND_LOW};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Which two-digit epoch years are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EpochYearRule {
    /// Accept years strictly below `low` or strictly above `high`.
    OutsideBand { low: u16, high: u16 },
    /// Accept years in `low..=high`.
    InsideBand { low: u16, high: u16 },
}

impl EpochYearRule {
    pub fn accepts(&self, year: u16) -> bool {
        match *self {
            EpochYearRule::OutsideBand { low, high } => year < low || year > high,
            EpochYearRule::InsideBand { low, high } => (low..=high).contains(&year),
        }
    }
}

impl Default for EpochYearRule {
    fn default() -> Self {
        EpochYearRule::OutsideBand {
            low: EPOCH_YEAR_BAND_LOW,
            high: EPOCH_YEAR_BAND_HIGH,
        }
    }
}

impl std::fmt::Display for EpochYearRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EpochYearRule::OutsideBand { low, high } => {
                write!(f, "year must be < {low:02} or > {high:02}")
            }
            EpochYearRule::InsideBand { low, high } => {
                write!(f, "year must be within {low:02}..={high:02}")
            }
        }
    }
}

/// When the field checks of a line are allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGate {
    /// Only when the line passed its length check.
    ExactWidth,
    /// Whenever the field's span lies inside the line.
    SpanInBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub epoch_year_rule: EpochYearRule,
    pub epoch_day_max_exclusive: u16,
    pub line1_gate: FieldGate,
    pub line2_gate: FieldGate,
    /// Also verify the checksum digit at the end of line 2.
    pub verify_line2_checksum: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            epoch_year_rule: EpochYearRule::default(),
            epoch_day_max_exclusive: EPOCH_DAY_MAX_EXCLUSIVE,
            line1_gate: FieldGate::ExactWidth,
            line2_gate: FieldGate::SpanInBounds,
            verify_line2_checksum: false,
        }
    }
}

impl ValidatorConfig {
    /// Skip field checks on either line whose length check failed.
    pub fn strict() -> Self {
        ValidatorConfig {
            line2_gate: FieldGate::ExactWidth,
            verify_line2_checksum: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (low, high) = match self.epoch_year_rule {
            EpochYearRule::OutsideBand { low, high } | EpochYearRule::InsideBand { low, high } => {
                (low, high)
            }
        };
        if low > high {
            return Err(ConfigError::Invalid(format!(
                "epoch year band is empty: low {low} > high {high}"
            )));
        }
        if high > 99 {
            return Err(ConfigError::Invalid(format!(
                "epoch year bound {high} exceeds two digits"
            )));
        }
        if self.epoch_day_max_exclusive < 2 {
            return Err(ConfigError::Invalid(
                "epoch_day_max_exclusive must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration of the `tle-validate` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub validator: ValidatorConfig,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Mirror log output to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// SQLite database for extracted fields; in-memory when absent.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            validator: ValidatorConfig::default(),
            log_level: default_log_level(),
            log_file: None,
            database: None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validator.validate()?;
        Ok(config)
    }
}
