//! Bounded, damped Newton iteration for one scalar unknown.
//!
//! Both saturation inversions reduce to driving `r(v) = Θ(v) − Θ*` to
//! zero over a closed box.  Each step is the Newton step clamped to the
//! box and halved until |r| decreases; the iteration only counts as
//! converged once |r| is within the residual tolerance.

use log::{debug, trace};

use crate::config::SolverConfig;
use crate::error::{LibrError, Result};
use crate::properties::{SolveReport, Unknown};

/// Solve `residual(v) = 0` for `v ∈ [bounds.0, bounds.1]`.
///
/// `residual` returns the residual and its derivative.  On failure the
/// error carries the best iterate found.
pub(crate) fn solve<F>(
    unknown: Unknown,
    residual: F,
    guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> Result<SolveReport>
where
    F: Fn(f64) -> (f64, f64),
{
    let (lo, hi) = bounds;
    if !guess.is_finite() || !(lo <= hi) {
        return Err(LibrError::InvalidInput(format!(
            "{unknown} solve needs a finite guess and ordered bounds, got {guess} in [{lo}, {hi}]"
        )));
    }

    let mut v = guess.clamp(lo, hi);
    let (mut r, mut dr) = residual(v);
    let mut iterations = 0;

    while iterations < config.max_iterations && !(r.abs() <= config.residual_tolerance) {
        if !dr.is_finite() || dr == 0.0 {
            break;
        }

        let mut step = -r / dr;
        let mut accepted = None;
        for _ in 0..=config.max_halvings {
            let candidate = (v + step).clamp(lo, hi);
            let (rc, drc) = residual(candidate);
            if rc.abs() < r.abs() {
                accepted = Some((candidate, rc, drc));
                break;
            }
            step *= 0.5;
        }
        let Some((next, rn, drn)) = accepted else {
            break;
        };

        iterations += 1;
        let moved = (next - v).abs();
        trace!("{unknown} iteration {iterations}: v = {next:.12}, r = {rn:.3e}");
        v = next;
        r = rn;
        dr = drn;

        if moved <= config.step_tolerance * (1.0 + v.abs()) {
            break;
        }
    }

    let report = SolveReport { value: v, iterations, residual: r };
    if r.abs() <= config.residual_tolerance {
        debug!("{unknown} solved: {report}");
        Ok(report)
    } else {
        debug!("{unknown} solve stalled: {report}");
        Err(LibrError::NotConverged { unknown, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn finds_interior_root() {
        let config = SolverConfig::default();
        let report = solve(Unknown::Temperature, |v| (v * v - 2.0, 2.0 * v), 1.0, (0.0, 5.0), &config)
            .unwrap();
        assert_abs_diff_eq!(report.value, 2f64.sqrt(), epsilon = 1e-9);
        assert!(report.iterations > 0);
    }

    #[test]
    fn guess_already_on_root_takes_no_steps() {
        let config = SolverConfig::default();
        let report =
            solve(Unknown::MassFraction, |v| (v - 0.5, 1.0), 0.5, (0.0, 1.0), &config).unwrap();
        assert_eq!(report.iterations, 0);
        assert_eq!(report.value, 0.5);
    }

    #[test]
    fn root_outside_box_reports_best_effort() {
        let config = SolverConfig::default();
        let err = solve(Unknown::MassFraction, |v| (v - 2.0, 1.0), 0.5, (0.0, 1.0), &config)
            .unwrap_err();
        match err {
            LibrError::NotConverged { unknown, report } => {
                assert_eq!(unknown, Unknown::MassFraction);
                assert_eq!(report.value, 1.0);
                assert_abs_diff_eq!(report.residual, -1.0);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn flat_residual_is_not_converged() {
        let config = SolverConfig::default();
        let err = solve(Unknown::Temperature, |_| (1.0, 0.0), 300.0, (0.0, 647.0), &config);
        assert!(matches!(err, Err(LibrError::NotConverged { .. })));
    }
}
