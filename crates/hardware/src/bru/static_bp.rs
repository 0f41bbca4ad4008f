//! Static Branch Predictor.
//!
//! Implements an "Always Not Taken" prediction policy. It keeps no state and
//! ignores training, which makes it the floor every dynamic predictor is
//! compared against.

use super::BranchPredictor;

/// Static Branch Predictor structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts conditional branches as not taken.
    fn predict_branch(&self, _pc: u64) -> bool {
        false
    }

    /// Does not maintain any direction history.
    fn update_branch(&mut self, _pc: u64, _taken: bool) {}

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "static"
    }
}
