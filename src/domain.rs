//! Calibrated range of the correlations.
//!
//! Evaluation never refuses a state for being outside the range the
//! correlations were fitted on; the range is reported instead and the
//! caller's [`DomainPolicy`] decides what happens.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{LibrError, Result};

/// Which correlation a state was evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Correlation {
    VaporPressure,
    Enthalpy,
    Entropy,
    HeatCapacity,
    Density,
}

impl std::fmt::Display for Correlation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::VaporPressure => "vapour pressure",
            Self::Enthalpy => "enthalpy",
            Self::Entropy => "entropy",
            Self::HeatCapacity => "heat capacity",
            Self::Density => "density",
        };
        f.write_str(name)
    }
}

/// Closed temperature (K) and mass-fraction (kg/kg) box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityRange {
    pub t_min: f64,
    pub t_max: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl ValidityRange {
    /// 273.15–500 K over 0–0.75 kg/kg, the fitted range of every
    /// Pátek–Klomfar correlation.
    pub const PATEK_KLOMFAR: Self = Self { t_min: 273.15, t_max: 500.0, x_min: 0.0, x_max: 0.75 };

    pub fn contains(&self, t: f64, x: f64) -> bool {
        (self.t_min..=self.t_max).contains(&t) && (self.x_min..=self.x_max).contains(&x)
    }
}

impl Correlation {
    pub fn validity(&self) -> ValidityRange {
        ValidityRange::PATEK_KLOMFAR
    }
}

/// A state outside a correlation's calibrated range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainWarning {
    pub correlation: Correlation,
    /// K
    pub temperature: f64,
    /// kg/kg
    pub mass_fraction: f64,
    pub range: ValidityRange,
}

impl std::fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at T = {:.2} K, x = {:.4} lies outside {:.2}–{:.2} K, {:.2}–{:.2} kg/kg",
            self.correlation,
            self.temperature,
            self.mass_fraction,
            self.range.t_min,
            self.range.t_max,
            self.range.x_min,
            self.range.x_max
        )
    }
}

/// The warning for `(t, x)`, or `None` inside the calibrated range.
pub fn check(correlation: Correlation, t: f64, x: f64) -> Option<DomainWarning> {
    let range = correlation.validity();
    if range.contains(t, x) {
        return None;
    }
    Some(DomainWarning { correlation, temperature: t, mass_fraction: x, range })
}

/// What a public call does with a state outside the calibrated range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Evaluate silently.
    Ignore,
    /// Evaluate and log a warning.
    #[default]
    Warn,
    /// Fail with [`LibrError::OutOfDomain`].
    Reject,
}

impl DomainPolicy {
    /// Apply the policy to one evaluated state.
    pub fn apply(&self, correlation: Correlation, t: f64, x: f64) -> Result<()> {
        let Some(warning) = check(correlation, t, x) else {
            return Ok(());
        };
        match self {
            Self::Ignore => Ok(()),
            Self::Warn => {
                warn!("{warning}");
                Ok(())
            }
            Self::Reject => Err(LibrError::OutOfDomain(warning)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_closed() {
        let r = ValidityRange::PATEK_KLOMFAR;
        assert!(r.contains(273.15, 0.0));
        assert!(r.contains(500.0, 0.75));
        assert!(!r.contains(500.01, 0.5));
        assert!(!r.contains(300.0, 0.76));
    }

    #[test]
    fn policies() {
        assert!(DomainPolicy::Ignore.apply(Correlation::Enthalpy, 600.0, 0.5).is_ok());
        assert!(DomainPolicy::Warn.apply(Correlation::Enthalpy, 600.0, 0.5).is_ok());
        let err = DomainPolicy::Reject.apply(Correlation::Density, 300.0, 0.8).unwrap_err();
        match err {
            LibrError::OutOfDomain(w) => {
                assert_eq!(w.correlation, Correlation::Density);
                assert_eq!(w.mass_fraction, 0.8);
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(DomainPolicy::Reject.apply(Correlation::Density, 300.0, 0.5).is_ok());
    }
}
