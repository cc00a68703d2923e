//! Property-based tests for the decay model and curve sampling.

use decaysim_core::decay::{compute, plot_window};
use decaysim_core::plot::curve::{MAX_SAMPLES, MIN_SAMPLES, Y_AXIS_CAP};
use decaysim_core::DecayCurve;
use proptest::prelude::*;

proptest! {
    /// Remaining quantity never exceeds the initial quantity or drops below zero.
    #[test]
    fn remaining_stays_within_initial_quantity(
        n0 in 0.0f64..1e9,
        t in 0.0f64..1e6,
        half_life in 1e-3f64..1e10,
    ) {
        let decay = compute(n0, t, half_life).unwrap();
        prop_assert!(decay.nt >= 0.0);
        prop_assert!(decay.nt <= n0);
        prop_assert!(decay.lambda > 0.0);
    }

    /// More elapsed time never leaves more material.
    #[test]
    fn remaining_is_monotonic_in_time(
        n0 in 0.0f64..1e6,
        t in 0.0f64..1e4,
        dt in 0.0f64..1e4,
        half_life in 1e-2f64..1e6,
    ) {
        let earlier = compute(n0, t, half_life).unwrap();
        let later = compute(n0, t + dt, half_life).unwrap();
        prop_assert!(later.nt <= earlier.nt);
    }

    /// Identical inputs give bit-identical outputs.
    #[test]
    fn compute_is_deterministic(
        n0 in 0.0f64..1e6,
        t in 0.0f64..1e4,
        half_life in 1e-2f64..1e6,
    ) {
        let first = compute(n0, t, half_life).unwrap();
        let second = compute(n0, t, half_life).unwrap();
        prop_assert_eq!(first.lambda.to_bits(), second.lambda.to_bits());
        prop_assert_eq!(first.nt.to_bits(), second.nt.to_bits());
    }

    /// Non-positive half-lives are always rejected.
    #[test]
    fn non_positive_half_life_is_rejected(half_life in -1e6f64..=0.0) {
        prop_assert!(compute(1.0, 1.0, half_life).is_err());
    }

    /// Sampled curves stay within their clamped sizes and axis ranges.
    #[test]
    fn curve_samples_are_bounded(
        n0 in 0.0f64..1e8,
        t in 0.0f64..1e5,
        half_life in 1e-2f64..1e6,
    ) {
        let decay = compute(n0, t, half_life).unwrap();
        let curve = DecayCurve::sample(n0, decay.lambda, plot_window(t)).unwrap();

        prop_assert!(curve.len() >= MIN_SAMPLES);
        prop_assert!(curve.len() <= MAX_SAMPLES);
        prop_assert_eq!(curve.times.first().copied(), Some(0.0));
        prop_assert!(curve.y_max > 0.0);
        prop_assert!(curve.y_max <= Y_AXIS_CAP.max(1.0));
        for (time, value) in curve.points() {
            prop_assert!(time >= 0.0 && time <= curve.t_max);
            prop_assert!(value >= 0.0 && value <= n0);
        }
    }
}
