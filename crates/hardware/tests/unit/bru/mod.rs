//! Branch prediction unit tests.

/// Perceptron learning rule, indexing, and scenarios on the reference configuration.
pub mod perceptron;

/// Property-based invariants of the perceptron predictor.
pub mod properties;
