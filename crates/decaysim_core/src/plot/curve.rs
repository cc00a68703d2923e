//! Curve sampling shared by every plot output.
//!
//! Both the interactive chart and the static image are drawn from one
//! [`DecayCurve`], so the two artifacts always depict the same points and
//! axis ranges.

use super::{PlotError, PlotResult};
use crate::decay::remaining;

/// Smallest plotted time window.
pub const MIN_WINDOW: f64 = 0.1;
/// Sampling density before clamping.
pub const SAMPLES_PER_TIME_UNIT: f64 = 500.0;
pub const MIN_SAMPLES: usize = 100;
pub const MAX_SAMPLES: usize = 1000;
/// Upper cap of the quantity axis.
pub const Y_AXIS_CAP: f64 = 1e6;
/// Quantity axis upper bound used when `n0 == 0`.
const EMPTY_Y_AXIS_MAX: f64 = 1.0;

/// Sampled `N(t)` curve with its axis ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayCurve {
    /// Effective window after the minimum clamp.
    pub t_max: f64,
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    /// Upper bound of the quantity axis.
    pub y_max: f64,
}

impl DecayCurve {
    /// Samples `n0 · e^(−λt)` evenly over `[0, t_max]`, both ends included.
    ///
    /// # Errors
    /// - `InvalidCurve` when `n0` or `lambda` is negative or not finite, or
    ///   `t_max` is not finite.
    pub fn sample(n0: f64, lambda: f64, t_max: f64) -> PlotResult<Self> {
        if !n0.is_finite() || n0 < 0.0 {
            return Err(PlotError::InvalidCurve(format!(
                "initial quantity must be finite and >= 0, got {n0}"
            )));
        }
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(PlotError::InvalidCurve(format!(
                "decay constant must be finite and >= 0, got {lambda}"
            )));
        }
        if !t_max.is_finite() {
            return Err(PlotError::InvalidCurve(format!(
                "time window must be finite, got {t_max}"
            )));
        }

        let t_max = effective_window(t_max);
        let count = sample_count(t_max);
        let last = (count - 1) as f64;
        let times: Vec<f64> = (0..count)
            .map(|index| t_max * (index as f64 / last))
            .collect();
        let values = times
            .iter()
            .map(|&time| remaining(n0, lambda, time))
            .collect();

        let capped = n0.min(Y_AXIS_CAP);
        let y_max = if capped > 0.0 {
            capped
        } else {
            EMPTY_Y_AXIS_MAX
        };

        Ok(Self {
            t_max,
            times,
            values,
            y_max,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.t_max)
    }

    pub fn y_range(&self) -> (f64, f64) {
        (0.0, self.y_max)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}

/// Applies the minimum window clamp.
pub fn effective_window(t_max: f64) -> f64 {
    if t_max < MIN_WINDOW {
        MIN_WINDOW
    } else {
        t_max
    }
}

/// Number of samples for an already clamped window.
pub fn sample_count(t_max: f64) -> usize {
    let raw = (t_max * SAMPLES_PER_TIME_UNIT) as usize;
    raw.clamp(MIN_SAMPLES, MAX_SAMPLES)
}
