//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Instead of
//! saturating counters, it keeps a table of signed weight vectors indexed by
//! the branch address. The prediction is the dot product of the selected
//! weights with the global history, where a taken history bit contributes
//! `+w` and a not-taken bit contributes `-w`.
//!
//! # Behavior
//!
//! - Index: `(pc >> 2) & (num_perceptrons - 1)`. Higher address bits alias.
//! - Predict: `bias + Σ ±w[i] >= 0`. An all-zero row predicts taken.
//! - Train: on a misprediction or when `|sum| <= training_threshold`, every
//!   weight steps one unit toward agreement with the outcome, saturating at
//!   the signed `weight_bits` range. The outcome is then shifted into the
//!   history register whether or not any weight changed.

use tracing::debug;

use super::BranchPredictor;
use crate::common::constants::{INDEX_ALIGN_SHIFT, low_mask};
use crate::common::error::ConfigError;
use crate::config::PerceptronConfig;

/// Perceptron Predictor structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerceptronPredictor {
    /// Global History Register; bit 0 is the most recent outcome.
    ghr: u64,
    /// Table of weights (flattened, `row_size` entries per perceptron).
    table: Vec<i32>,
    /// Geometry and training parameters.
    config: PerceptronConfig,
    /// Mask keeping `history_length` bits of the GHR.
    history_mask: u64,
    /// Mask for indexing the table.
    table_mask: u64,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Smallest representable weight.
    weight_min: i32,
    /// Largest representable weight.
    weight_max: i32,
}

impl PerceptronPredictor {
    /// Creates a new zero-initialized Perceptron Predictor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `num_perceptrons` is not a power of two,
    /// `history_length` is outside 1..=64, or `weight_bits` is outside 2..=32.
    pub fn new(config: &PerceptronConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let row_size = config.history_length + 1;
        let half = 1i64 << (config.weight_bits - 1);

        debug!(
            num_perceptrons = config.num_perceptrons,
            history_length = config.history_length,
            weight_bits = config.weight_bits,
            training_threshold = config.training_threshold,
            "perceptron predictor created"
        );

        Ok(Self {
            ghr: 0,
            table: vec![0; config.num_perceptrons * row_size],
            config: *config,
            history_mask: low_mask(config.history_length),
            table_mask: (config.num_perceptrons - 1) as u64,
            row_size,
            weight_min: (-half) as i32,
            weight_max: (half - 1) as i32,
        })
    }

    /// Calculates the perceptron index for a branch address.
    ///
    /// Drops the word-alignment bits and keeps `log2(num_perceptrons)` bits.
    #[inline(always)]
    pub fn index(&self, pc: u64) -> usize {
        ((pc >> INDEX_ALIGN_SHIFT) & self.table_mask) as usize
    }

    /// Returns the raw perceptron output (dot product) for a branch address.
    pub fn output(&self, pc: u64) -> i64 {
        self.dot(self.index(pc))
    }

    /// Predicts the branch at `pc`; ties (output 0) predict taken.
    #[inline]
    pub fn predict(&self, pc: u64) -> bool {
        self.output(pc) >= 0
    }

    /// Trains the perceptron selected by `pc` and shifts `taken` into history.
    ///
    /// The output is recomputed from the current weights and history rather
    /// than reusing an earlier prediction for the same branch.
    pub fn train(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let y = self.dot(idx);
        let mispredicted = (y >= 0) != taken;

        if mispredicted || y.unsigned_abs() <= u64::from(self.config.training_threshold) {
            let t: i64 = if taken { 1 } else { -1 };
            let ghr = self.ghr;
            let (min, max) = (self.weight_min, self.weight_max);
            let base = idx * self.row_size;
            let row = &mut self.table[base..base + self.row_size];

            row[0] = clamp_weight(i64::from(row[0]) + t, min, max);

            for (i, w) in row[1..].iter_mut().enumerate() {
                let x: i64 = if (ghr >> i) & 1 != 0 { 1 } else { -1 };
                *w = clamp_weight(i64::from(*w) + t * x, min, max);
            }
        }

        self.ghr = ((self.ghr << 1) | u64::from(taken)) & self.history_mask;
    }

    /// Returns the weight vector of perceptron `idx` (bias first), if it exists.
    pub fn weights(&self, idx: usize) -> Option<&[i32]> {
        let base = idx.checked_mul(self.row_size)?;
        self.table.get(base..base + self.row_size)
    }

    /// Returns the global history register; bit 0 is the most recent outcome.
    #[inline]
    pub const fn history(&self) -> u64 {
        self.ghr
    }

    /// Returns the configuration this predictor was built with.
    pub const fn config(&self) -> &PerceptronConfig {
        &self.config
    }

    /// Returns the inclusive `(min, max)` weight range.
    pub const fn weight_range(&self) -> (i32, i32) {
        (self.weight_min, self.weight_max)
    }

    /// Computes the perceptron output for a table row.
    ///
    /// Sums the bias weight and each history weight signed by its history bit.
    fn dot(&self, idx: usize) -> i64 {
        let base = idx * self.row_size;
        let row = &self.table[base..base + self.row_size];
        let mut y = i64::from(row[0]);

        for (i, &w) in row[1..].iter().enumerate() {
            if (self.ghr >> i) & 1 != 0 {
                y += i64::from(w);
            } else {
                y -= i64::from(w);
            }
        }
        y
    }
}

/// Clamps a weight value to the signed `weight_bits` range.
#[inline(always)]
fn clamp_weight(v: i64, min: i32, max: i32) -> i32 {
    v.clamp(i64::from(min), i64::from(max)) as i32
}

impl BranchPredictor for PerceptronPredictor {
    /// Predicts taken if the perceptron output is non-negative.
    fn predict_branch(&self, pc: u64) -> bool {
        self.predict(pc)
    }

    /// Trains on the resolved outcome and advances the global history.
    fn update_branch(&mut self, pc: u64, taken: bool) {
        self.train(pc, taken);
    }

    /// Re-zeroes the weight table and the history register.
    fn reset(&mut self) {
        self.table.fill(0);
        self.ghr = 0;
        debug!("perceptron predictor reset");
    }

    fn name(&self) -> &'static str {
        "perceptron"
    }
}
