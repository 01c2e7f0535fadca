//! Pure-water property providers.
//!
//! The LiBr correlations only need a handful of pure-water quantities:
//! the saturation line, saturated-phase caloric properties and the
//! critical point.  [`WaterBackend`] is that capability set; any
//! equation of state that implements it can drive the engine.
//!
//! **Units at this seam are SI and molar:** K, Pa, J/mol, J/(mol·K),
//! mol/m³.

pub mod if97;
pub mod refprop;

use crate::error::{LibrError, Result};
use crate::properties::WaterCriticalPoint;

pub use if97::If97Water;
pub use refprop::RefpropWater;

pub trait WaterBackend {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Saturation pressure (Pa) at temperature `t` (K).
    fn saturation_pressure(&self, t: f64, quality: f64) -> Result<f64>;

    /// Saturation temperature (K) at pressure `p` (Pa).
    fn saturation_temperature(&self, p: f64, quality: f64) -> Result<f64>;

    /// Molar enthalpy (J/mol) on the saturation line at `t`; quality 0
    /// is the liquid, 1 the vapour.
    fn molar_enthalpy_sat(&self, t: f64, quality: f64) -> Result<f64>;

    /// Molar entropy (J/(mol·K)) on the saturation line at `t`.
    fn molar_entropy_sat(&self, t: f64, quality: f64) -> Result<f64>;

    /// Isobaric molar heat capacity (J/(mol·K)) of saturated liquid.
    fn molar_heat_capacity_sat(&self, t: f64) -> Result<f64>;

    /// Molar density (mol/m³) of saturated liquid.
    fn molar_density_sat(&self, t: f64) -> Result<f64>;

    /// Single-phase molar enthalpy (J/mol) at `(t, p)`.
    fn molar_enthalpy(&self, t: f64, p: f64) -> Result<f64>;

    /// Single-phase molar entropy (J/(mol·K)) at `(t, p)`.
    fn molar_entropy(&self, t: f64, p: f64) -> Result<f64>;

    /// Critical-point properties.
    fn critical_point(&self) -> Result<WaterCriticalPoint>;
}

/// Ensure a value is a finite number (not NaN, not ±Infinity).
pub(crate) fn validate_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LibrError::InvalidInput(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Ensure a vapour quality lies in `[0, 1]`.
pub(crate) fn validate_quality(quality: f64) -> Result<()> {
    validate_finite("quality", quality)?;
    if !(0.0..=1.0).contains(&quality) {
        return Err(LibrError::InvalidInput(format!(
            "quality must lie in [0, 1], got {quality}"
        )));
    }
    Ok(())
}
