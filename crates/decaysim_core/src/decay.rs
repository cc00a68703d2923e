//! First-order exponential decay model.
//!
//! # Responsibility
//! - Compute the decay constant `λ = ln(2) / t½`.
//! - Compute the remaining quantity `N(t) = N₀ · e^(−λt)`.
//! - Own the plot window policy derived from elapsed time.
//!
//! # Invariants
//! - `0 <= nt <= n0` for every accepted input.
//! - Functions are pure; identical inputs give bit-identical outputs.

use std::error::Error;
use std::f64::consts::LN_2;
use std::fmt::{Display, Formatter};

/// Plotted time span relative to the elapsed time.
const PLOT_WINDOW_FACTOR: f64 = 1.5;

/// Validation failure for decay inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayError {
    /// `n0` or `t` is negative, not finite, or out of plottable range.
    InvalidParameter { name: &'static str, value: f64 },
    /// Half-life is zero, negative or not finite.
    InvalidHalfLife(f64),
}

impl Display for DecayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(
                    f,
                    "invalid parameter `{name}`: {value} (expected finite value >= 0 within plottable range)"
                )
            }
            Self::InvalidHalfLife(value) => {
                write!(f, "invalid half-life: {value} (expected finite value > 0)")
            }
        }
    }
}

impl Error for DecayError {}

/// Output of one decay computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    /// Decay constant in inverse time units.
    pub lambda: f64,
    /// Remaining quantity after the elapsed time.
    pub nt: f64,
}

/// Computes `(λ, N(t))` for the given initial quantity, elapsed time and
/// half-life.
///
/// # Errors
/// - `InvalidHalfLife` when `half_life <= 0` or is not finite.
/// - `InvalidParameter` when `n0` or `t` is negative or not finite, or when
///   `t` is so large that its plot window would overflow.
pub fn compute(n0: f64, t: f64, half_life: f64) -> Result<Decay, DecayError> {
    let lambda = decay_constant(half_life)?;
    check_non_negative("n0", n0)?;
    check_non_negative("t", t)?;
    if !(t * PLOT_WINDOW_FACTOR).is_finite() {
        return Err(DecayError::InvalidParameter { name: "t", value: t });
    }

    Ok(Decay {
        lambda,
        nt: remaining(n0, lambda, t),
    })
}

/// Returns `ln(2) / half_life`.
pub fn decay_constant(half_life: f64) -> Result<f64, DecayError> {
    if !half_life.is_finite() || half_life <= 0.0 {
        return Err(DecayError::InvalidHalfLife(half_life));
    }
    Ok(LN_2 / half_life)
}

/// Evaluates `n0 · e^(−λt)` without validation.
///
/// Shared by [`compute`] and curve sampling so both use the same arithmetic.
pub fn remaining(n0: f64, lambda: f64, t: f64) -> f64 {
    n0 * (-lambda * t).exp()
}

/// Time window shown for a simulation with elapsed time `t`.
///
/// The window is `t * 1.5` truncated toward zero to a whole time unit, so
/// short simulations (`t < 2/3`) collapse to `0` and rely on the renderer's
/// minimum window.
pub fn plot_window(t: f64) -> f64 {
    (t * PLOT_WINDOW_FACTOR).trunc()
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), DecayError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DecayError::InvalidParameter { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{compute, decay_constant, plot_window, DecayError};

    #[test]
    fn carbon_14_one_half_life_leaves_half() {
        let decay = compute(100.0, 5730.0, 5730.0).expect("valid inputs");
        assert!((decay.lambda - 1.20968e-4).abs() < 1e-9);
        assert!((decay.nt - 50.0).abs() < 1e-3);
    }

    #[test]
    fn zero_half_life_is_rejected() {
        let err = compute(100.0, 1.0, 0.0).expect_err("zero half-life must fail");
        assert_eq!(err, DecayError::InvalidHalfLife(0.0));
    }

    #[test]
    fn negative_inputs_are_invalid_parameters() {
        assert!(matches!(
            compute(-1.0, 1.0, 2.0),
            Err(DecayError::InvalidParameter { name: "n0", .. })
        ));
        assert!(matches!(
            compute(1.0, -0.5, 2.0),
            Err(DecayError::InvalidParameter { name: "t", .. })
        ));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(matches!(
            decay_constant(f64::INFINITY),
            Err(DecayError::InvalidHalfLife(_))
        ));
        assert!(matches!(
            compute(f64::NAN, 1.0, 2.0),
            Err(DecayError::InvalidParameter { name: "n0", .. })
        ));
    }

    #[test]
    fn zero_elapsed_time_keeps_initial_quantity() {
        let decay = compute(42.0, 0.0, 8.02).expect("valid inputs");
        assert_eq!(decay.nt, 42.0);
    }

    #[test]
    fn elapsed_time_must_keep_plot_window_finite() {
        assert!(matches!(
            compute(10.0, 1.5e308, 5730.0),
            Err(DecayError::InvalidParameter { name: "t", .. })
        ));
        let largest = compute(10.0, 1e308, 5730.0).expect("window still finite");
        assert_eq!(largest.nt, 0.0);
        assert!(plot_window(1e308).is_finite());
    }

    #[test]
    fn plot_window_truncates_fractional_time() {
        assert_eq!(plot_window(5730.0), 8595.0);
        assert_eq!(plot_window(1.9), 2.0);
        assert_eq!(plot_window(0.5), 0.0);
    }
}
