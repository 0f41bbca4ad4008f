//! Perceptron invariants checked over random branch streams.

use bpsim_core::bru::perceptron::PerceptronPredictor;
use bpsim_core::common::low_mask;
use bpsim_core::config::PerceptronConfig;
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = PerceptronConfig> {
    (0u32..6, 1usize..=64, 2u32..=12, 0u32..64).prop_map(
        |(log_n, history_length, weight_bits, training_threshold)| PerceptronConfig {
            num_perceptrons: 1 << log_n,
            history_length,
            weight_bits,
            training_threshold,
        },
    )
}

fn arb_stream() -> impl Strategy<Value = Vec<(u64, bool)>> {
    prop::collection::vec((any::<u64>(), any::<bool>()), 0..400)
}

/// Packs the most recent `min(n, len)` outcomes, most recent in bit 0.
fn expected_history(stream: &[(u64, bool)], len: usize) -> u64 {
    stream
        .iter()
        .rev()
        .take(len)
        .enumerate()
        .fold(0, |acc, (i, &(_, taken))| acc | (u64::from(taken) << i))
}

proptest! {
    #[test]
    fn weights_stay_in_range(config in arb_config(), stream in arb_stream()) {
        let mut bp = PerceptronPredictor::new(&config).unwrap();
        for &(pc, taken) in &stream {
            bp.train(pc, taken);
        }
        let (min, max) = bp.weight_range();
        for idx in 0..config.num_perceptrons {
            for &w in bp.weights(idx).unwrap() {
                prop_assert!((min..=max).contains(&w), "weight {} outside [{}, {}]", w, min, max);
            }
        }
    }

    #[test]
    fn history_holds_most_recent_outcomes(config in arb_config(), stream in arb_stream()) {
        let mut bp = PerceptronPredictor::new(&config).unwrap();
        for &(pc, taken) in &stream {
            bp.train(pc, taken);
        }
        let expected = expected_history(&stream, config.history_length);
        prop_assert_eq!(bp.history(), expected & low_mask(config.history_length));
    }

    #[test]
    fn training_is_deterministic(
        config in arb_config(),
        stream in arb_stream(),
        probes in prop::collection::vec(any::<u64>(), 1..32),
    ) {
        let mut a = PerceptronPredictor::new(&config).unwrap();
        let mut b = PerceptronPredictor::new(&config).unwrap();
        for &(pc, taken) in &stream {
            a.train(pc, taken);
            b.train(pc, taken);
        }
        prop_assert_eq!(&a, &b);
        for pc in probes {
            prop_assert_eq!(a.predict(pc), b.predict(pc));
        }
    }

    #[test]
    fn aliases_read_the_same_row(
        stream in arb_stream(),
        pc in any::<u64>(),
        upper in 1u64..1 << 20,
    ) {
        let mut bp = PerceptronPredictor::new(&PerceptronConfig::default()).unwrap();
        for &(p, taken) in &stream {
            bp.train(p, taken);
        }
        // Same index bits, different upper bits.
        let alias = pc ^ (upper << 5);
        prop_assert_eq!(bp.index(pc), bp.index(alias));
        prop_assert_eq!(bp.output(pc), bp.output(alias));
    }

    #[test]
    fn prediction_is_output_sign(config in arb_config(), stream in arb_stream(), pc in any::<u64>()) {
        let mut bp = PerceptronPredictor::new(&config).unwrap();
        for &(p, taken) in &stream {
            bp.train(p, taken);
        }
        prop_assert_eq!(bp.predict(pc), bp.output(pc) >= 0);
    }
}
