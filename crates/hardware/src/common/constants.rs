//! Global Predictor Constants.
//!
//! This module defines constants shared by the predictors and the simulator. It includes:
//! 1. **Addressing:** The word-alignment shift applied before table indexing.
//! 2. **Storage Limits:** Upper bounds imposed by the history register and weight storage types.
//! 3. **Counter Encoding:** Bounds of the 2-bit saturating counters used by gshare.

/// Number of low address bits dropped before indexing (4-byte instruction words).
pub const INDEX_ALIGN_SHIFT: u32 = 2;

/// Maximum global history length; the history register is a single `u64`.
pub const MAX_HISTORY_LENGTH: usize = 64;

/// Minimum weight width in bits (one sign bit plus one magnitude bit).
pub const MIN_WEIGHT_BITS: u32 = 2;

/// Maximum weight width in bits; weights are stored as `i32`.
pub const MAX_WEIGHT_BITS: u32 = 32;

/// Maximum gshare pattern history table size (log2).
pub const MAX_GSHARE_TABLE_BITS: usize = 24;

/// Largest value of a 2-bit saturating counter (strongly taken).
pub const COUNTER_MAX: u8 = 3;

/// Smallest counter value predicted taken.
pub const COUNTER_TAKEN_THRESHOLD: u8 = 2;

/// Initial counter value (weakly not-taken).
pub const COUNTER_INIT: u8 = 1;

/// Returns a mask selecting the low `bits` bits of a `u64`.
///
/// Handles the full-width case, where `1 << 64` would overflow.
#[inline(always)]
pub const fn low_mask(bits: usize) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}
