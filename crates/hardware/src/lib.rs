//! Perceptron branch predictor simulator library.
//!
//! This crate implements a bit-exact perceptron branch predictor and the plumbing to evaluate it:
//! 1. **Predictors:** Perceptron, gshare, and static direction predictors behind one trait.
//! 2. **Sharing:** A mutex-guarded handle for predicting and training from several threads.
//! 3. **Workloads:** Branch streams of the pattern, aliasing, complex, fibonacci, bubblesort, and factorial benchmarks.
//! 4. **Simulation:** Trace files, a fetch-to-resolve window, configuration, and statistics.

/// Branch prediction unit (perceptron, gshare, static, shared handle).
pub mod bru;
/// Common types and constants (limits, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Trace files, workloads, and the simulator driver.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;

/// Direction predictor interface implemented by every predictor.
pub use crate::bru::BranchPredictor;
/// The perceptron predictor.
pub use crate::bru::perceptron::PerceptronPredictor;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Trace-driven simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
