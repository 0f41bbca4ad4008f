//! Error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Configuration Errors:** Misuse detected once, when a predictor is constructed.
//! 2. **Trace Errors:** I/O and JSON failures while reading or writing trace files.
//! 3. **Workload Errors:** Unknown benchmark names.
//!
//! Predictor operations themselves never fail: all arithmetic saturates.

use thiserror::Error;

/// Configuration misuse rejected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The perceptron table size is not a power of two (or is zero).
    #[error("num_perceptrons must be a non-zero power of two, got {0}")]
    NotPowerOfTwo(usize),

    /// The history length is zero or wider than the history register.
    #[error("history_length must be in 1..={max}, got {got}")]
    HistoryLength {
        /// Requested history length.
        got: usize,
        /// Largest supported history length.
        max: usize,
    },

    /// The weight width cannot hold a signed saturating weight.
    #[error("weight_bits must be in {min}..={max}, got {got}")]
    WeightBits {
        /// Requested weight width.
        got: u32,
        /// Smallest supported weight width.
        min: u32,
        /// Largest supported weight width.
        max: u32,
    },

    /// The gshare table size is out of range.
    #[error("gshare table_bits must be in 1..={max}, got {got}")]
    GShareTableBits {
        /// Requested table size (log2).
        got: usize,
        /// Largest supported table size (log2).
        max: usize,
    },

    /// The gshare history length is out of range.
    #[error("gshare history_bits must be in 1..={max}, got {got}")]
    GShareHistoryBits {
        /// Requested history length.
        got: usize,
        /// Largest supported history length.
        max: usize,
    },

    /// A configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document is not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while reading or writing a branch trace file.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened, read, or written.
    #[error("trace I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The trace file does not contain a JSON array of branch events.
    #[error("malformed trace: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while selecting a benchmark workload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    /// No workload with this name exists.
    #[error("unknown workload '{name}' (expected one of: {expected})")]
    Unknown {
        /// The name that failed to parse.
        name: String,
        /// Comma-separated list of valid names.
        expected: String,
    },
}
