//! Configuration loading and typed config structures for the Tessera
//! simulation.
//!
//! The canonical configuration lives in `tessera-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and provides a loader that reads and validates the file.
//! The defaults are the canonical simulation parameters: growth threshold
//! 5, base draw 1..=100, red multiplier 3, action weights 5/3/1/1, one
//! tick per second.

use std::path::Path;

use serde::Deserialize;
use tessera_types::CellAction;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `tessera-config.yaml`. All fields have
/// defaults, so a missing or partial file is always usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Board and cell-generation settings.
    #[serde(default)]
    pub board: BoardConfig,

    /// Weighted action set for the mutation regime.
    #[serde(default)]
    pub actions: ActionWeightsConfig,

    /// Periodic driver settings.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate that the configuration can drive a simulation.
    ///
    /// Rejects values that would make the engine fail on its first tick
    /// (zero growth threshold, empty draw range, all-zero weights) or make
    /// the driver spin (zero tick interval).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.growth_threshold == 0 {
            return Err(ConfigError::Invalid {
                reason: "board.growth_threshold must be at least 1".to_owned(),
            });
        }
        if self.board.value_draw_max == 0 {
            return Err(ConfigError::Invalid {
                reason: "board.value_draw_max must be at least 1".to_owned(),
            });
        }
        if self.board.red_multiplier == 0 {
            return Err(ConfigError::Invalid {
                reason: "board.red_multiplier must be at least 1".to_owned(),
            });
        }
        if self.actions.total() == 0 {
            return Err(ConfigError::Invalid {
                reason: "actions must carry at least one positive weight".to_owned(),
            });
        }
        if self.driver.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "driver.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Board and cell-generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Board length below which every tick appends a new cell.
    #[serde(default = "default_growth_threshold")]
    pub growth_threshold: usize,

    /// Upper bound (inclusive) of the uniform base-value draw.
    #[serde(default = "default_value_draw_max")]
    pub value_draw_max: u64,

    /// Multiplier applied to the base draw for red cells.
    #[serde(default = "default_red_multiplier")]
    pub red_multiplier: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            growth_threshold: default_growth_threshold(),
            value_draw_max: default_value_draw_max(),
            red_multiplier: default_red_multiplier(),
        }
    }
}

/// Relative weights of the four cell actions.
///
/// Selection probability of an action is its weight divided by the total.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionWeightsConfig {
    /// Weight of the increment action.
    #[serde(default = "default_increment_weight")]
    pub increment: u32,

    /// Weight of the reset action.
    #[serde(default = "default_reset_weight")]
    pub reset: u32,

    /// Weight of the delete action.
    #[serde(default = "default_delete_weight")]
    pub delete: u32,

    /// Weight of the absorb action.
    #[serde(default = "default_absorb_weight")]
    pub absorb: u32,
}

impl Default for ActionWeightsConfig {
    fn default() -> Self {
        Self {
            increment: default_increment_weight(),
            reset: default_reset_weight(),
            delete: default_delete_weight(),
            absorb: default_absorb_weight(),
        }
    }
}

impl ActionWeightsConfig {
    /// The weighted entry table the engine draws from.
    pub const fn weighted_entries(&self) -> [(CellAction, u32); 4] {
        [
            (CellAction::Increment, self.increment),
            (CellAction::Reset, self.reset),
            (CellAction::Delete, self.delete),
            (CellAction::Absorb, self.absorb),
        ]
    }

    /// Sum of all four weights, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        u64::from(self.increment)
            .saturating_add(u64::from(self.reset))
            .saturating_add(u64::from(self.delete))
            .saturating_add(u64::from(self.absorb))
    }
}

/// Periodic driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriverConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of ticks to run (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_growth_threshold() -> usize {
    5
}

const fn default_value_draw_max() -> u64 {
    100
}

const fn default_red_multiplier() -> u64 {
    3
}

const fn default_increment_weight() -> u32 {
    5
}

const fn default_reset_weight() -> u32 {
    3
}

const fn default_delete_weight() -> u32 {
    1
}

const fn default_absorb_weight() -> u32 {
    1
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_owned()
}
