//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) 2-bit counters, where N is `table_bits`
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use tracing::debug;

use super::BranchPredictor;
use crate::common::constants::{
    COUNTER_INIT, COUNTER_MAX, COUNTER_TAKEN_THRESHOLD, INDEX_ALIGN_SHIFT, low_mask,
};
use crate::common::error::ConfigError;
use crate::config::GShareConfig;

/// GShare Predictor structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: u64,
    /// Mask keeping `history_bits` bits of the GHR.
    history_mask: u64,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
    /// Mask for indexing the PHT.
    table_mask: u64,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with every counter weakly not-taken.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `table_bits` or `history_bits` is out of range.
    pub fn new(config: &GShareConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            table_bits = config.table_bits,
            history_bits = config.history_bits,
            "gshare predictor created"
        );
        Ok(Self {
            ghr: 0,
            history_mask: low_mask(config.history_bits),
            pht: vec![COUNTER_INIT; 1 << config.table_bits],
            table_mask: low_mask(config.table_bits),
        })
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Computes the XOR of the PC (shifted) and the Global History Register.
    fn index(&self, pc: u64) -> usize {
        let pc_part = pc >> INDEX_ALIGN_SHIFT;
        ((pc_part ^ self.ghr) & self.table_mask) as usize
    }

    /// Returns the global history register; bit 0 is the most recent outcome.
    pub const fn history(&self) -> u64 {
        self.ghr
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns true if the 2-bit counter at the hashed index is 2 or 3 (Taken).
    fn predict_branch(&self, pc: u64) -> bool {
        self.pht[self.index(pc)] >= COUNTER_TAKEN_THRESHOLD
    }

    /// Updates the predictor with the actual branch outcome.
    ///
    /// Updates the 2-bit saturating counter in the PHT and shifts the new
    /// outcome into the Global History Register.
    fn update_branch(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let counter = self.pht[idx];

        if taken && counter < COUNTER_MAX {
            self.pht[idx] += 1;
        } else if !taken && counter > 0 {
            self.pht[idx] -= 1;
        }

        self.ghr = ((self.ghr << 1) | u64::from(taken)) & self.history_mask;
    }

    fn reset(&mut self) {
        self.pht.fill(COUNTER_INIT);
        self.ghr = 0;
    }

    fn name(&self) -> &'static str {
        "gshare"
    }
}
