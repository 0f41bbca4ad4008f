//! Perceptron Predictor Tests.
//!
//! Verifies construction checks, index extraction, the dot-product
//! prediction with its taken-on-tie rule, the thresholded saturating update,
//! and the unconditional history shift. Exact weight values below follow
//! directly from the learning rule on the reference configuration
//! (8 perceptrons, 7 history bits, 8-bit weights, threshold 15).

use bpsim_core::bru::BranchPredictor;
use bpsim_core::bru::perceptron::PerceptronPredictor;
use bpsim_core::common::error::ConfigError;
use bpsim_core::config::PerceptronConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{always_training_perceptron, default_perceptron, reference_config, train};

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(3)]
#[case(6)]
#[case(100)]
fn rejects_non_power_of_two_table(#[case] num_perceptrons: usize) {
    let config = PerceptronConfig {
        num_perceptrons,
        ..reference_config()
    };
    assert!(matches!(
        PerceptronPredictor::new(&config),
        Err(ConfigError::NotPowerOfTwo(n)) if n == num_perceptrons
    ));
}

#[rstest]
#[case(0)]
#[case(65)]
fn rejects_bad_history_length(#[case] history_length: usize) {
    let config = PerceptronConfig {
        history_length,
        ..reference_config()
    };
    assert!(matches!(
        PerceptronPredictor::new(&config),
        Err(ConfigError::HistoryLength { got, .. }) if got == history_length
    ));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(33)]
fn rejects_bad_weight_bits(#[case] weight_bits: u32) {
    let config = PerceptronConfig {
        weight_bits,
        ..reference_config()
    };
    assert!(matches!(
        PerceptronPredictor::new(&config),
        Err(ConfigError::WeightBits { got, .. }) if got == weight_bits
    ));
}

#[test]
fn accepts_boundary_geometry() {
    let config = PerceptronConfig {
        num_perceptrons: 1,
        history_length: 64,
        weight_bits: 32,
        training_threshold: 0,
    };
    let bp = PerceptronPredictor::new(&config).unwrap();
    assert_eq!(bp.weight_range(), (i32::MIN, i32::MAX));
    assert_eq!(bp.weights(0).map(<[i32]>::len), Some(65));
    assert_eq!(bp.weights(1), None);
}

#[rstest]
#[case(2, -2, 1)]
#[case(8, -128, 127)]
#[case(16, -32768, 32767)]
fn weight_range_follows_width(#[case] weight_bits: u32, #[case] min: i32, #[case] max: i32) {
    let bp = PerceptronPredictor::new(&PerceptronConfig {
        weight_bits,
        ..reference_config()
    })
    .unwrap();
    assert_eq!(bp.weight_range(), (min, max));
}

#[test]
fn fresh_state_is_zeroed() {
    let bp = default_perceptron();
    assert_eq!(bp.history(), 0);
    for idx in 0..8 {
        assert_eq!(bp.weights(idx), Some(&[0; 8][..]));
    }
}

// ══════════════════════════════════════════════════════════
// 2. Indexing
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0x1000, 0)]
#[case(0x1003, 0)]
#[case(0x1004, 1)]
#[case(0x1010, 4)]
#[case(0x101C, 7)]
#[case(0x1020, 0)]
#[case(0xFFFF_FFFF_FFFF_FFFC, 7)]
fn index_drops_alignment_bits(#[case] pc: u64, #[case] idx: usize) {
    assert_eq!(default_perceptron().index(pc), idx);
}

#[test]
fn single_entry_table_maps_everything_to_zero() {
    let bp = PerceptronPredictor::new(&PerceptronConfig {
        num_perceptrons: 1,
        ..reference_config()
    })
    .unwrap();
    for pc in [0, 0x4, 0x1000, 0xDEAD_BEEC] {
        assert_eq!(bp.index(pc), 0);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Prediction
// ══════════════════════════════════════════════════════════

/// All weights zero, output = 0 → taken (>= 0).
#[rstest]
#[case(0x0)]
#[case(0x1000)]
#[case(0x1010)]
#[case(0x8000_0000)]
fn fresh_predictor_predicts_taken(#[case] pc: u64) {
    let bp = default_perceptron();
    assert_eq!(bp.output(pc), 0);
    assert!(bp.predict(pc));
    assert!(bp.predict_branch(pc));
}

#[test]
fn prediction_does_not_mutate_state() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, true, 3);
    train(&mut bp, 0x1010, false, 2);
    let before = bp.clone();

    for pc in (0..64).map(|i| i * 4) {
        let _ = bp.predict(pc);
        let _ = bp.output(pc);
    }
    assert_eq!(bp, before);
}

// ══════════════════════════════════════════════════════════
// 4. Training
// ══════════════════════════════════════════════════════════

/// Output 0 is a correct taken prediction within the threshold: bias goes
/// up, and every (not-taken) history bit disagrees, so its weight goes down.
#[test]
fn first_taken_training_step() {
    let mut bp = default_perceptron();
    bp.train(0x1000, true);
    assert_eq!(bp.weights(0), Some(&[1, -1, -1, -1, -1, -1, -1, -1][..]));
    assert_eq!(bp.history(), 0b1);
}

/// Output 0 mispredicts a not-taken branch: bias goes down, and every
/// (not-taken) history bit agrees, so its weight goes up.
#[test]
fn first_not_taken_training_step() {
    let mut bp = default_perceptron();
    bp.train(0x1000, false);
    assert_eq!(bp.weights(0), Some(&[-1, 1, 1, 1, 1, 1, 1, 1][..]));
    assert_eq!(bp.history(), 0);
    assert_eq!(bp.output(0x1000), -8);
}

#[test]
fn training_touches_only_the_indexed_row() {
    let mut bp = default_perceptron();
    bp.train(0x1010, true);
    for idx in (0..8).filter(|&i| i != 4) {
        assert_eq!(bp.weights(idx), Some(&[0; 8][..]));
    }
    assert_ne!(bp.weights(4), Some(&[0; 8][..]));
}

/// A confident correct prediction leaves the weights alone but still
/// shifts the outcome into history.
#[test]
fn history_shifts_without_weight_update() {
    let mut bp = PerceptronPredictor::new(&PerceptronConfig {
        training_threshold: 0,
        ..reference_config()
    })
    .unwrap();

    bp.train(0x1000, true);
    assert_eq!(bp.output(0x1000), 6);
    let weights: Vec<i32> = bp.weights(0).unwrap().to_vec();

    bp.train(0x1000, true);
    assert_eq!(bp.weights(0).unwrap(), &weights[..]);
    assert_eq!(bp.history(), 0b11);
}

#[test]
fn history_keeps_only_configured_length() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, true, 20);
    assert_eq!(bp.history(), 0x7F);

    bp.train(0x1000, false);
    assert_eq!(bp.history(), 0x7E);
}

#[test]
fn full_width_history_register() {
    let mut bp = PerceptronPredictor::new(&PerceptronConfig {
        history_length: 64,
        ..reference_config()
    })
    .unwrap();
    train(&mut bp, 0x1000, true, 70);
    assert_eq!(bp.history(), u64::MAX);
    bp.train(0x1000, false);
    assert_eq!(bp.history(), u64::MAX << 1);
}

#[test]
fn weights_saturate_at_max() {
    let mut bp = always_training_perceptron();
    train(&mut bp, 0x1000, true, 300);
    assert_eq!(bp.weights(0), Some(&[127; 8][..]));
}

#[test]
fn weights_saturate_at_min() {
    let mut bp = always_training_perceptron();
    train(&mut bp, 0x1000, false, 300);
    assert_eq!(
        bp.weights(0),
        Some(&[-128, 127, 127, 127, 127, 127, 127, 127][..])
    );
}

#[test]
fn two_bit_weights_saturate() {
    let mut bp = PerceptronPredictor::new(&PerceptronConfig {
        weight_bits: 2,
        training_threshold: u32::MAX,
        ..reference_config()
    })
    .unwrap();
    train(&mut bp, 0x1000, false, 10);
    assert_eq!(bp.weights(0), Some(&[-2, 1, 1, 1, 1, 1, 1, 1][..]));
}

#[test]
fn reset_restores_fresh_state() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, true, 10);
    train(&mut bp, 0x1014, false, 10);
    bp.reset();
    assert_eq!(bp, default_perceptron());
    assert!(bp.predict(0x1014));
}

// ══════════════════════════════════════════════════════════
// 5. Reference scenarios
// ══════════════════════════════════════════════════════════

#[test]
fn learns_taken() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, true, 10);
    assert!(bp.predict(0x1000));
    assert_eq!(bp.weights(0), Some(&[9, 7, 5, 3, 1, -1, -3, -5][..]));
    assert_eq!(bp.output(0x1000), 16);
}

#[test]
fn learns_not_taken() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, false, 20);
    assert!(!bp.predict(0x1000));
    assert_eq!(bp.weights(0), Some(&[-2, 2, 2, 2, 2, 2, 2, 2][..]));
    assert_eq!(bp.output(0x1000), -16);
}

#[test]
fn adapts_to_pattern_change() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, true, 15);
    assert!(bp.predict(0x1000), "Should have learned taken first");

    train(&mut bp, 0x1000, false, 30);
    assert!(!bp.predict(0x1000), "Should retrain to not-taken");
}

#[test]
fn separate_indices_are_isolated() {
    let mut bp = default_perceptron();
    train(&mut bp, 0x1000, true, 15);
    train(&mut bp, 0x1010, false, 20);
    assert!(bp.predict(0x1000));
    assert!(!bp.predict(0x1010));
}

#[test]
fn aliased_addresses_share_weights() {
    let mut bp = default_perceptron();
    let (a, b) = (0x1000, 0x1020);
    assert_eq!(bp.index(a), bp.index(b));

    train(&mut bp, a, false, 20);
    assert!(!bp.predict(b), "Training 0x1000 must affect its alias");
    assert_eq!(bp.output(a), bp.output(b));
}

#[test]
fn trait_calls_match_inherent_calls() {
    let mut via_trait = default_perceptron();
    let mut direct = default_perceptron();
    for (i, pc) in [0x1000u64, 0x1004, 0x1010, 0x1000].into_iter().enumerate() {
        let taken = i % 3 != 0;
        via_trait.update_branch(pc, taken);
        direct.train(pc, taken);
    }
    assert_eq!(via_trait, direct);
    assert_eq!(via_trait.name(), "perceptron");
}
