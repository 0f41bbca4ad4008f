//! # Unit Components
//!
//! Groups the per-component test modules.

/// Branch prediction unit tests (perceptron, baselines, shared handle, properties).
pub mod bru;
