//! Trace-driven simulation.
//!
//! Provides the branch event type and trace files, the benchmark workloads
//! that generate branch streams, and the simulator that feeds a stream
//! through a predictor.

/// Trace-driven simulator with a fetch-to-resolve window.
pub mod simulator;
/// Branch events and JSON trace files.
pub mod trace;
/// Benchmark branch-stream generators.
pub mod workloads;

pub use simulator::Simulator;
pub use trace::{BranchEvent, load_trace, save_trace};
pub use workloads::{Workload, WorkloadRun};
