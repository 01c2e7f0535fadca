//! Tunable numerics and reference-state choices.
//!
//! Everything here is plain data with serde support, so a cycle model
//! can keep it in its own configuration file:
//!
//! ```
//! use libr::{Config, DomainPolicy, EnthalpyReference};
//!
//! let config: Config = serde_json::from_str(
//!     r#"{ "reference": "ambient", "flash": { "tolerance": 1e-7 } }"#,
//! ).unwrap();
//! assert_eq!(config.reference, EnthalpyReference::Ambient);
//! assert_eq!(config.flash.max_iterations, 100);
//! assert_eq!(config.domain, DomainPolicy::Warn);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::DomainPolicy;

// ── Saturation inversions ───────────────────────────────────────────

/// Limits of the bounded Newton iteration behind the inversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Converged when |Θ(T, x) − Θ_target| falls to this (K).
    pub residual_tolerance: f64,
    /// Relative step below which the iteration is considered stalled.
    pub step_tolerance: f64,
    /// Backtracking halvings tried per Newton step.
    pub max_halvings: usize,
    /// Box for the temperature unknown (K).
    pub temperature_bounds: (f64, f64),
    /// Box for the mass-fraction unknown (kg/kg).
    pub mass_fraction_bounds: (f64, f64),
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            residual_tolerance: 1e-9,
            step_tolerance: 1e-12,
            max_halvings: 30,
            temperature_bounds: (0.0, 647.0),
            mass_fraction_bounds: (0.0, 1.0),
        }
    }
}

// ── Flash ───────────────────────────────────────────────────────────

/// Fixed-point controls of the two-phase flash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    pub initial_quality: f64,
    /// Stop when successive qualities differ by less than this.
    pub tolerance: f64,
    pub min_iterations: usize,
    /// Reaching this count is reported as non-convergence.
    pub max_iterations: usize,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self { initial_quality: 0.1, tolerance: 1e-5, min_iterations: 5, max_iterations: 100 }
    }
}

// ── Reference state ─────────────────────────────────────────────────

/// Datum for the water contribution to enthalpy and entropy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnthalpyReference {
    /// Water properties as the backend reports them (IAPWS: u = s = 0
    /// for the triple-point liquid).
    #[default]
    Iapws,
    /// Water at 20 °C and 1 atm has zero enthalpy and entropy.
    Ambient,
}

impl EnthalpyReference {
    /// Temperature (K) and pressure (Pa) of the ambient datum.
    pub const AMBIENT_STATE: (f64, f64) = (293.15, 101_325.0);
}

// ── Top level ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverConfig,
    pub flash: FlashConfig,
    pub reference: EnthalpyReference,
    pub domain: DomainPolicy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn flash(mut self, flash: FlashConfig) -> Self {
        self.flash = flash;
        self
    }

    pub fn reference(mut self, reference: EnthalpyReference) -> Self {
        self.reference = reference;
        self
    }

    pub fn domain(mut self, policy: DomainPolicy) -> Self {
        self.domain = policy;
        self
    }
}
