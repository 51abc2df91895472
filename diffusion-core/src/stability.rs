//! Explicit-Euler time step selection.
//!
//! The forward-Euler Laplacian update on a grid of spacing `h` is stable for
//! `dt <= h^2 / (2 * D * alpha)`. Requested steps above a safety margin of that
//! bound are clamped rather than rejected.

use serde::Serialize;

/// Fraction of the stability bound a step may use.
pub const SAFETY_FACTOR: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepPlan {
    pub h: f64,
    pub max_stable_dt: f64,
    /// `min(requested, SAFETY_FACTOR * max_stable_dt)`.
    pub safe_dt: f64,
    /// Step actually used; `steps * dt` lands on `t_end`.
    pub dt: f64,
    pub steps: usize,
    pub clamped: bool,
}

pub fn grid_spacing(n: usize) -> f64 {
    1.0 / (n + 1) as f64
}

pub fn max_stable_dt(n: usize, alpha: f64, dim: usize) -> f64 {
    let h = grid_spacing(n);
    (h * h) / (2.0 * dim as f64 * alpha)
}

/// Inputs are assumed validated (`alpha`, `requested_dt`, `t_end` finite and > 0).
pub fn plan(n: usize, alpha: f64, requested_dt: f64, t_end: f64, dim: usize) -> StepPlan {
    let h = grid_spacing(n);
    let max_dt = max_stable_dt(n, alpha, dim);
    let limit = SAFETY_FACTOR * max_dt;
    let safe_dt = requested_dt.min(limit);

    let mut steps = ((t_end / safe_dt).ceil() as usize).max(1);
    // ceil of a rounded quotient can land one short
    if t_end / steps as f64 > safe_dt {
        steps = steps.saturating_add(1);
    }

    StepPlan {
        h,
        max_stable_dt: max_dt,
        safe_dt,
        dt: t_end / steps as f64,
        steps,
        clamped: requested_dt > limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bound_divisor_is_twice_dimension() {
        let h2 = grid_spacing(9).powi(2);
        assert_relative_eq!(max_stable_dt(9, 0.5, 1), h2 / 1.0);
        assert_relative_eq!(max_stable_dt(9, 0.5, 2), h2 / 2.0);
        assert_relative_eq!(max_stable_dt(9, 0.5, 3), h2 / 3.0);
    }

    #[test]
    fn literal_1d_scenario_is_clamped() {
        let p = plan(80, 0.2, 0.0005, 1.0, 1);
        assert_relative_eq!(p.h, 1.0 / 81.0);
        assert_relative_eq!(p.max_stable_dt, 3.8104e-4, max_relative = 1e-4);
        assert_relative_eq!(p.safe_dt, 3.6199e-4, max_relative = 1e-4);
        assert!(p.clamped);
        assert_eq!(p.steps, 2763);
        assert!(p.dt <= p.safe_dt);
        assert_relative_eq!(p.dt * p.steps as f64, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn small_request_is_kept() {
        let p = plan(10, 0.1, 0.0009765625, 0.125, 2);
        assert!(!p.clamped);
        assert_eq!(p.safe_dt, 0.0009765625);
        assert_eq!(p.steps, 128);
        assert_eq!(p.dt, 0.0009765625);
    }

    #[test]
    fn short_duration_takes_one_step() {
        let p = plan(4, 0.2, 0.001, 1e-6, 3);
        assert_eq!(p.steps, 1);
        assert_eq!(p.dt, 1e-6);
    }

    #[test]
    fn huge_step_counts_saturate() {
        let p = plan(1_000_000, 1e6, 1.0, 1e3, 1);
        assert_eq!(p.steps, usize::MAX);
        assert!(p.dt > 0.0);
    }

    #[test]
    fn actual_dt_never_exceeds_safe_dt() {
        for n in [1, 2, 7, 40, 200] {
            for dim in 1..=3 {
                for t_end in [0.013, 0.5, 1.0, 3.3] {
                    let p = plan(n, 0.37, 1.0, t_end, dim);
                    assert!(p.dt <= SAFETY_FACTOR * max_stable_dt(n, 0.37, dim));
                    assert!(p.steps >= 1);
                }
            }
        }
    }
}
