use serde::{Deserialize, Serialize};

// ── Inversion result ────────────────────────────────────────────────

/// Which variable a saturation inversion solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unknown {
    Temperature,
    MassFraction,
}

impl std::fmt::Display for Unknown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature => f.write_str("temperature"),
            Self::MassFraction => f.write_str("mass fraction"),
        }
    }
}

/// Outcome of one saturation inversion.
///
/// Returned directly by each call, so no diagnostic state outlives it.
///
/// | Field      | Unit                                   |
/// |------------|----------------------------------------|
/// | value      | K (temperature) or kg/kg (composition) |
/// | iterations | Newton iterations performed            |
/// | residual   | Θ(T, x) − Θ_target, K                  |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub value: f64,
    pub iterations: usize,
    pub residual: f64,
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "value = {:.6}, iterations = {}, residual = {:.3e} K",
            self.value, self.iterations, self.residual
        )
    }
}

// ── Two-phase flash ─────────────────────────────────────────────────

/// Vapour quality of a flashed mixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Quality {
    /// Enthalpy below the bubble point: single-phase liquid.
    Subcooled,
    /// Vapour mass fraction in `[0, 1]`.
    Saturated(f64),
}

impl Quality {
    /// The numeric quality, or `None` for a subcooled liquid.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Subcooled => None,
            Self::Saturated(q) => Some(*q),
        }
    }

    pub fn is_subcooled(&self) -> bool {
        matches!(self, Self::Subcooled)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subcooled => f.write_str("subcooled"),
            Self::Saturated(q) => write!(f, "{q:.6}"),
        }
    }
}

/// Phase split of a LiBr/H₂O mixture at fixed (h, P, z).
///
/// The vapour is pure water, so `(1 − Q) · liquid_mass_fraction = z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashResult {
    pub quality: Quality,
    /// Equilibrium temperature (K in native units)
    pub temperature: f64,
    /// LiBr mass fraction of the liquid phase (kg/kg)
    pub liquid_mass_fraction: f64,
    /// Fixed-point iterations performed (0 for a subcooled feed)
    pub iterations: usize,
}

impl std::fmt::Display for FlashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Q = {}, T = {:.4}, x_liq = {:.6}",
            self.quality, self.temperature, self.liquid_mass_fraction
        )
    }
}

// ── Single state ────────────────────────────────────────────────────

/// All direct correlations evaluated at one `(T, x)` state.
///
/// **Native units:**
///
/// | Field         | Unit     |
/// |---------------|----------|
/// | temperature   | K        |
/// | mass_fraction | kg/kg    |
/// | pressure      | bar      |
/// | enthalpy      | J/kg     |
/// | entropy       | J/(kg·K) |
/// | heat_capacity | J/(kg·K) |
/// | density       | kg/m³    |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateProps {
    pub temperature: f64,
    pub mass_fraction: f64,
    pub pressure: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub heat_capacity: f64,
    pub density: f64,
}

impl std::fmt::Display for StateProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "T  = {:.4}", self.temperature)?;
        writeln!(f, "x  = {:.6} kg/kg", self.mass_fraction)?;
        writeln!(f, "P  = {:.6}", self.pressure)?;
        writeln!(f, "H  = {:.4}", self.enthalpy)?;
        writeln!(f, "S  = {:.4}", self.entropy)?;
        writeln!(f, "Cp = {:.4}", self.heat_capacity)?;
        write!(f, "D  = {:.4}", self.density)
    }
}

// ── Pure water critical point ───────────────────────────────────────

/// Critical point of pure water as reported by a water backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterCriticalPoint {
    /// Critical temperature (K)
    pub temperature: f64,
    /// Critical pressure (Pa)
    pub pressure: f64,
    /// Molar enthalpy at the critical point (J/mol)
    pub enthalpy: f64,
    /// Molar entropy at the critical point (J/(mol·K))
    pub entropy: f64,
    /// Critical molar density (mol/m³)
    pub density: f64,
}

impl std::fmt::Display for WaterCriticalPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tc = {:.4} K ({:.2} °C)", self.temperature, self.temperature - 273.15)?;
        writeln!(f, "Pc = {:.1} Pa ({:.4} bar)", self.pressure, self.pressure / 1e5)?;
        writeln!(f, "hc = {:.2} J/mol", self.enthalpy)?;
        writeln!(f, "sc = {:.4} J/(mol·K)", self.entropy)?;
        write!(f, "Dc = {:.2} mol/m³", self.density)
    }
}
