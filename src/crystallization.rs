//! Solubility limit of LiBr in water.
//!
//! Below the boundary temperature for its composition a solution
//! precipitates solid LiBr hydrates.  The boundary is linear
//! interpolation over Boryta's measured solubility points.

use log::warn;
use serde::{Deserialize, Serialize};

const CELSIUS_OFFSET: f64 = 273.15;

/// Piecewise-linear crystallization boundary, samples sorted by mass
/// fraction.
#[derive(Debug, Clone, Copy)]
pub struct CrystallizationCurve {
    /// (mass fraction kg/kg, boundary temperature °C)
    samples: &'static [(f64, f64)],
}

/// D. A. Boryta, "Solubility of lithium bromide in water between −50
/// and +100 °C", J. Chem. Eng. Data 15 (1970) 142–144.
pub static BORYTA: CrystallizationCurve = CrystallizationCurve {
    samples: &[
        (0.4520, -53.60),
        (0.4803, -49.32),
        (0.4963, -42.12),
        (0.5009, -36.32),
        (0.5050, -32.96),
        (0.5120, -29.17),
        (0.5170, -25.24),
        (0.5195, -16.11),
        (0.5370, -13.47),
        (0.5475, -8.94),
        (0.5592, -4.54),
        (0.5681, 1.11),
        (0.5722, 5.10),
        (0.5808, 9.93),
        (0.5867, 18.99),
        (0.6063, 24.29),
        (0.6250, 33.14),
        (0.6396, 38.26),
        (0.6517, 44.27),
        (0.6582, 50.35),
        (0.6616, 57.58),
        (0.6655, 63.42),
        (0.6737, 70.90),
        (0.6739, 71.69),
        (0.6827, 83.11),
        (0.6832, 82.68),
        (0.6899, 91.36),
        (0.6905, 91.82),
        (0.7004, 101.05),
        (0.7008, 102.02),
    ],
};

impl CrystallizationCurve {
    /// Sampled composition range (kg/kg).
    pub fn composition_range(&self) -> (f64, f64) {
        let first = self.samples.first().map_or(f64::NAN, |s| s.0);
        let last = self.samples.last().map_or(f64::NAN, |s| s.0);
        (first, last)
    }

    /// Boundary temperature (K) at mass fraction `x`.
    ///
    /// `None` below the first sample: such dilute solutions never
    /// crystallize.  Above the last sample the composition is clamped
    /// to it.
    pub fn temperature(&self, x: f64) -> Option<f64> {
        let (x_min, x_max) = self.composition_range();
        if !(x >= x_min) {
            return None;
        }
        let x = x.min(x_max);
        let upper = self.samples.partition_point(|s| s.0 < x);
        let celsius = if upper == 0 {
            self.samples[0].1
        } else {
            let (x0, t0) = self.samples[upper - 1];
            let (x1, t1) = self.samples[upper];
            t0 + (t1 - t0) * (x - x0) / (x1 - x0)
        };
        Some(celsius + CELSIUS_OFFSET)
    }

    /// `true` when a solution at `(t, x)` lies below the boundary.
    pub fn is_crystallized(&self, t: f64, x: f64) -> bool {
        self.temperature(x).is_some_and(|boundary| t < boundary)
    }

    /// Check labelled liquid states, logging each violation.
    pub fn check_state_points<'a, I>(&self, states: I) -> CrystallizationReport
    where
        I: IntoIterator<Item = (&'a str, f64, f64)>,
    {
        let mut violations = Vec::new();
        for (label, t, x) in states {
            let Some(boundary) = self.temperature(x) else { continue };
            if t < boundary {
                let violation = CrystallizationViolation {
                    label: label.to_string(),
                    temperature: t,
                    mass_fraction: x,
                    boundary,
                };
                warn!("{violation}");
                violations.push(violation);
            }
        }
        CrystallizationReport { violations }
    }
}

/// A labelled state below its crystallization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystallizationViolation {
    pub label: String,
    /// K
    pub temperature: f64,
    /// kg/kg
    pub mass_fraction: f64,
    /// Boundary temperature at `mass_fraction` (K)
    pub boundary: f64,
}

impl std::fmt::Display for CrystallizationViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: crystallization at T = {:.2} K, x = {:.4} (boundary {:.2} K)",
            self.label, self.temperature, self.mass_fraction, self.boundary
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrystallizationReport {
    pub violations: Vec<CrystallizationViolation>,
}

impl CrystallizationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}
