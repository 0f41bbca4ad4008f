//! Common utilities and types used throughout the branch prediction simulator.
//!
//! This module provides fundamental building blocks shared across all components. It includes:
//! 1. **Constants:** Address alignment, storage limits, and counter encodings.
//! 2. **Error Handling:** Configuration, trace, and workload error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, trace files, and workloads.
pub mod error;

pub use constants::{INDEX_ALIGN_SHIFT, MAX_HISTORY_LENGTH, low_mask};
pub use error::{ConfigError, TraceError, WorkloadError};
