//! # libr
//!
//! Thermodynamic properties of aqueous lithium bromide, the working pair
//! of single-effect absorption chillers, from the Pátek–Klomfar (2006)
//! correlations.
//!
//! ## Highlights
//!
//! * **Direct correlations**: vapour pressure, enthalpy, entropy, heat
//!   capacity and density at `(T, x)`
//! * **Saturation inversions**: boiling temperature at `(P, x)` and
//!   composition at `(T, P)`, each returning a [`SolveReport`] or an
//!   explicit [`LibrError::NotConverged`]
//! * **Two-phase flash** from `(h, P, z)` into liquid and water vapour
//! * **Crystallization boundary** and labelled state-point checks
//! * **Pluggable water**: built-in IAPWS-IF97 ([`If97Water`]) or NIST
//!   REFPROP ([`RefpropWater`]) behind the [`WaterBackend`] trait
//! * **Configurable units** through [`UnitSystem`]
//!
//! ## Quick example
//!
//! ```
//! use libr::{If97Water, LibrSolution};
//!
//! // Native units: K, bar, J/kg, J/(kg·K), kg/m³
//! let libr = LibrSolution::new(If97Water::new());
//!
//! let p = libr.pressure(323.15, 0.5)?;
//! let t = libr.temperature(p, 0.5)?;
//! assert!((t.value - 323.15).abs() < 1e-6);
//!
//! let h = libr.enthalpy(343.15, 0.6)?;
//! let split = libr.flash(h, 0.01, 0.6)?;
//! println!("{split}");
//! # Ok::<(), libr::LibrError>(())
//! ```
//!
//! ## Units
//!
//! ```
//! use libr::{If97Water, LibrSolution, UnitSystem, TempUnit, PressUnit};
//!
//! let units = UnitSystem::new()
//!     .temperature(TempUnit::Celsius)
//!     .pressure(PressUnit::KPa);
//! let libr = LibrSolution::with_units(If97Water::new(), units);
//! assert!(libr.is_crystallized(20.0, 0.65));
//! ```

// ── Internal modules ─────────────────────────────────────────────────
pub mod backend;
pub mod composition;
pub mod config;
pub mod correlation;
pub mod crystallization;
pub mod domain;
pub mod error;
mod flash;
pub mod properties;
mod solution;
mod solver;
pub mod sys;

// ── Public re-exports ────────────────────────────────────────────────
pub use backend::{If97Water, RefpropWater, WaterBackend};
pub use config::{Config, EnthalpyReference, FlashConfig, SolverConfig};
pub use correlation::EffectiveTemperature;
pub use crystallization::{CrystallizationReport, CrystallizationViolation, BORYTA};
pub use domain::{Correlation, DomainPolicy, DomainWarning, ValidityRange};
pub use error::{LibrError, Result};
pub use properties::{
    FlashResult, Quality, SolveReport, StateProps, Unknown, WaterCriticalPoint,
};
pub use solution::LibrSolution;

pub use converter::{
    Converter, UnitSystem,
    TempUnit, PressUnit, DensityUnit, EnergyUnit, EntropyUnit,
};
