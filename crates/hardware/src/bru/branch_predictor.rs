//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that all direction
//! predictors implement. Prediction is a pure read of predictor state;
//! training is the single mutating entry point and also advances any
//! history the predictor keeps.

/// Trait for branch direction prediction algorithms.
///
/// Callers predict at fetch time and train once the branch resolves. The
/// two calls for one branch are not required to observe identical state:
/// other branches may train in between.
pub trait BranchPredictor {
    /// Predicts whether a conditional branch will be taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    ///
    /// # Returns
    ///
    /// `true` if the branch is predicted taken.
    fn predict_branch(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved outcome of a branch.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn update_branch(&mut self, pc: u64, taken: bool);

    /// Returns the predictor to its freshly constructed state.
    fn reset(&mut self);

    /// Short lowercase name used in logs and reports.
    fn name(&self) -> &'static str;
}
