//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors driven by the simulator:
//! the perceptron predictor, plus static and gshare baselines used for
//! comparison, and a thread-safe handle for sharing any of them.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and common functionality.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Perceptron-based neural branch predictor.
pub mod perceptron;

/// Mutex-guarded predictor handle for multi-threaded callers.
pub mod shared;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, perceptron::PerceptronPredictor, static_bp::StaticPredictor};
use crate::common::error::ConfigError;
use crate::config::{BranchPredictor as BpType, PredictorConfig};

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the per-branch simulation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchPredictorWrapper {
    /// Always not-taken baseline.
    Static(StaticPredictor),
    /// GShare baseline.
    GShare(GSharePredictor),
    /// Perceptron predictor.
    Perceptron(PerceptronPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor selected by `config.branch_predictor`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected predictor's parameters are invalid.
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        Self::with_kind(config.branch_predictor, config)
    }

    /// Creates a predictor of the given kind, using `config` for its geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if that predictor's parameters are invalid.
    pub fn with_kind(kind: BpType, config: &PredictorConfig) -> Result<Self, ConfigError> {
        Ok(match kind {
            BpType::Static => Self::Static(StaticPredictor::new()),
            BpType::GShare => Self::GShare(GSharePredictor::new(&config.gshare)?),
            BpType::Perceptron => Self::Perceptron(PerceptronPredictor::new(&config.perceptron)?),
        })
    }

    /// Returns the perceptron predictor, if that is the active variant.
    pub const fn as_perceptron(&self) -> Option<&PerceptronPredictor> {
        match self {
            Self::Perceptron(bp) => Some(bp),
            _ => None,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict_branch(&self, pc: u64) -> bool {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
            Self::Perceptron(bp) => bp.predict_branch(pc),
        }
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u64, taken: bool) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, taken),
            Self::GShare(bp) => bp.update_branch(pc, taken),
            Self::Perceptron(bp) => bp.update_branch(pc, taken),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(bp) => bp.reset(),
            Self::GShare(bp) => bp.reset(),
            Self::Perceptron(bp) => bp.reset(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::GShare(bp) => bp.name(),
            Self::Perceptron(bp) => bp.name(),
        }
    }
}
