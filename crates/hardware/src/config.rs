//! Configuration system for the branch prediction simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline predictor geometry (table size, history, weight width, threshold).
//! 2. **Structures:** Hierarchical config for general simulation options and each predictor.
//! 3. **Enums:** Branch predictor selection.
//! 4. **Validation:** Construction-time checks shared by `Config::validate` and the predictors.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`) or use
//! `Config::default()` for the CLI.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    MAX_GSHARE_TABLE_BITS, MAX_HISTORY_LENGTH, MAX_WEIGHT_BITS, MIN_WEIGHT_BITS,
};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline predictor when not explicitly
/// overridden in a JSON configuration document.
mod defaults {
    /// Default number of perceptrons (weight vectors) in the table.
    pub const NUM_PERCEPTRONS: usize = 8;

    /// Default global history length in bits.
    pub const HISTORY_LENGTH: usize = 7;

    /// Default signed weight width in bits (range -128..=127).
    pub const WEIGHT_BITS: u32 = 8;

    /// Default training threshold; correct predictions with |sum| at or
    /// below this value still train.
    pub const TRAINING_THRESHOLD: u32 = 15;

    /// Default gshare pattern history table size (log2, 1024 entries).
    pub const GSHARE_TABLE_BITS: usize = 10;

    /// Default gshare global history length.
    pub const GSHARE_HISTORY_BITS: usize = 10;

    /// Default number of younger branches fetched before a branch resolves.
    pub const RESOLVE_LATENCY: usize = 0;
}

/// Branch prediction algorithm types.
///
/// Specifies the direction predictor driven by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Static branch predictor (always predict not-taken).
    Static,
    /// Global history branch predictor (gshare).
    ///
    /// Uses global branch history xor the PC to index 2-bit counters.
    #[serde(alias = "Gshare", alias = "GSHARE")]
    GShare,
    /// Perceptron-based branch predictor.
    ///
    /// Learns a signed weight per history bit and sums them for a prediction.
    #[default]
    Perceptron,
}

impl BranchPredictor {
    /// All selectable predictors, in report order.
    pub const ALL: [Self; 3] = [Self::Perceptron, Self::GShare, Self::Static];

    /// Short lowercase name used by the CLI and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::GShare => "gshare",
            Self::Perceptron => "perceptron",
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use bpsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.predictor.perceptron.num_perceptrons, 8);
/// assert_eq!(config.predictor.perceptron.history_length, 7);
/// assert_eq!(config.general.resolve_latency, 0);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use bpsim_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "general": { "resolve_latency": 4 },
///     "predictor": {
///         "branch_predictor": "GShare",
///         "perceptron": { "num_perceptrons": 64, "history_length": 16 }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.resolve_latency, 4);
/// assert_eq!(config.predictor.branch_predictor, BranchPredictor::GShare);
/// assert_eq!(config.predictor.perceptron.num_perceptrons, 64);
/// assert_eq!(config.predictor.perceptron.weight_bits, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Branch predictor selection and geometry
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation error for out-of-range predictor parameters.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validates every predictor section, including the ones not selected.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.predictor.perceptron.validate()?;
        self.predictor.gshare.validate()
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Log every resolved branch at `trace` level
    #[serde(default)]
    pub trace_branches: bool,

    /// Younger branches fetched (and predicted) before a branch resolves and trains
    #[serde(default = "GeneralConfig::default_resolve_latency")]
    pub resolve_latency: usize,
}

impl GeneralConfig {
    /// Returns the default fetch-to-resolve distance.
    fn default_resolve_latency() -> usize {
        defaults::RESOLVE_LATENCY
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_branches: false,
            resolve_latency: Self::default_resolve_latency(),
        }
    }
}

/// Branch predictor selection and per-predictor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PredictorConfig {
    /// Direction predictor driven by the simulator
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Perceptron predictor configuration
    #[serde(default)]
    pub perceptron: PerceptronConfig,

    /// GShare predictor configuration
    #[serde(default)]
    pub gshare: GShareConfig,
}

/// Perceptron branch predictor configuration.
///
/// Fixed at construction; the predictor keeps its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PerceptronConfig {
    /// Number of weight vectors; must be a power of two
    #[serde(default = "PerceptronConfig::default_num_perceptrons")]
    pub num_perceptrons: usize,

    /// Global history length in bits
    #[serde(default = "PerceptronConfig::default_history")]
    pub history_length: usize,

    /// Signed weight width in bits
    #[serde(default = "PerceptronConfig::default_weight_bits")]
    pub weight_bits: u32,

    /// Output magnitude at or below which correct predictions still train
    #[serde(default = "PerceptronConfig::default_threshold")]
    pub training_threshold: u32,
}

impl PerceptronConfig {
    /// Returns the default perceptron table size.
    fn default_num_perceptrons() -> usize {
        defaults::NUM_PERCEPTRONS
    }

    /// Returns the default global history length.
    fn default_history() -> usize {
        defaults::HISTORY_LENGTH
    }

    /// Returns the default weight width.
    fn default_weight_bits() -> u32 {
        defaults::WEIGHT_BITS
    }

    /// Returns the default training threshold.
    fn default_threshold() -> u32 {
        defaults::TRAINING_THRESHOLD
    }

    /// Checks the table size, history length, and weight width.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotPowerOfTwo`] when `num_perceptrons` is zero or not a power of two.
    /// - [`ConfigError::HistoryLength`] when `history_length` is zero or above 64.
    /// - [`ConfigError::WeightBits`] when `weight_bits` is outside 2..=32.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.num_perceptrons.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo(self.num_perceptrons));
        }
        if self.history_length == 0 || self.history_length > MAX_HISTORY_LENGTH {
            return Err(ConfigError::HistoryLength {
                got: self.history_length,
                max: MAX_HISTORY_LENGTH,
            });
        }
        if !(MIN_WEIGHT_BITS..=MAX_WEIGHT_BITS).contains(&self.weight_bits) {
            return Err(ConfigError::WeightBits {
                got: self.weight_bits,
                min: MIN_WEIGHT_BITS,
                max: MAX_WEIGHT_BITS,
            });
        }
        Ok(())
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            num_perceptrons: Self::default_num_perceptrons(),
            history_length: Self::default_history(),
            weight_bits: Self::default_weight_bits(),
            training_threshold: Self::default_threshold(),
        }
    }
}

/// GShare branch predictor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GShareConfig {
    /// Log2 of the pattern history table size
    #[serde(default = "GShareConfig::default_table_bits")]
    pub table_bits: usize,

    /// Global history length in bits
    #[serde(default = "GShareConfig::default_history_bits")]
    pub history_bits: usize,
}

impl GShareConfig {
    /// Returns the default gshare table size (log2).
    fn default_table_bits() -> usize {
        defaults::GSHARE_TABLE_BITS
    }

    /// Returns the default gshare history length.
    fn default_history_bits() -> usize {
        defaults::GSHARE_HISTORY_BITS
    }

    /// Checks the table size and history length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GShareTableBits`] or [`ConfigError::GShareHistoryBits`]
    /// when a value is zero or above its limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_bits == 0 || self.table_bits > MAX_GSHARE_TABLE_BITS {
            return Err(ConfigError::GShareTableBits {
                got: self.table_bits,
                max: MAX_GSHARE_TABLE_BITS,
            });
        }
        if self.history_bits == 0 || self.history_bits > MAX_HISTORY_LENGTH {
            return Err(ConfigError::GShareHistoryBits {
                got: self.history_bits,
                max: MAX_HISTORY_LENGTH,
            });
        }
        Ok(())
    }
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            table_bits: Self::default_table_bits(),
            history_bits: Self::default_history_bits(),
        }
    }
}
