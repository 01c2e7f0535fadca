//! Configurable unit conversion for LiBr/H₂O property values.
//!
//! The property engine works in: **K, bar, J/kg, J/(kg·K), kg/m³**.
//! This crate lets you work in whatever units you prefer (°C, kPa,
//! kJ/kg, …) and handles the conversion transparently.  Compositions
//! are always LiBr mass fractions (kg/kg) and are never converted.
//!
//! # Presets
//!
//! | Preset          | T   | P   | H      | S / Cp    | D     |
//! |-----------------|-----|-----|--------|-----------|-------|
//! | `native()`      | K   | bar | J/kg   | J/(kg·K)  | kg/m³ |
//! | `engineering()` | °C  | kPa | kJ/kg  | kJ/(kg·K) | kg/m³ |
//! | `si()`          | K   | Pa  | J/kg   | J/(kg·K)  | kg/m³ |
//!
//! # Builder
//!
//! ```
//! use converter::{UnitSystem, TempUnit, PressUnit};
//!
//! let units = UnitSystem::new()
//!     .temperature(TempUnit::Celsius)
//!     .pressure(PressUnit::KPa);
//! ```

// ────────────────────────────────────────────────────────────────────
//  Unit enums
// ────────────────────────────────────────────────────────────────────

/// Temperature unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempUnit {
    /// Kelvin (native)
    Kelvin,
    /// Degrees Celsius
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

/// Pressure unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressUnit {
    /// Bar (native)
    Bar,
    /// Kilopascal (1 bar = 100 kPa)
    KPa,
    /// Megapascal
    MPa,
    /// Pascal
    Pa,
    /// Standard atmosphere (1.01325 bar)
    Atm,
    /// Pounds per square inch
    Psi,
}

/// Mass‑specific energy / enthalpy unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyUnit {
    /// J/kg (native)
    JPerKg,
    /// kJ/kg
    KJPerKg,
    /// BTU/lb
    BtuPerLb,
}

/// Mass‑specific entropy / heat‑capacity unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyUnit {
    /// J/(kg·K) (native)
    JPerKgK,
    /// kJ/(kg·K)
    KJPerKgK,
}

/// Mass density unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityUnit {
    /// kg/m³ (native)
    KgPerM3,
    /// g/cm³ (= kg/L)
    GPerCm3,
}

// ────────────────────────────────────────────────────────────────────
//  UnitSystem: user configuration
// ────────────────────────────────────────────────────────────────────

/// Describes the set of units the user wants to work in.
///
/// Create one with a preset (`native()`, `engineering()`, `si()`) or
/// customise individual quantities with the builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSystem {
    pub temperature: TempUnit,
    pub pressure:    PressUnit,
    pub energy:      EnergyUnit,
    pub entropy:     EntropyUnit,
    pub density:     DensityUnit,
}

impl UnitSystem {
    /// Start from native units.  Use the builder methods to change
    /// individual quantities.
    pub fn new() -> Self { Self::native() }

    // ── Presets ──────────────────────────────────────────────────────

    /// Native: K, bar, J/kg, J/(kg·K), kg/m³.
    pub fn native() -> Self {
        Self {
            temperature: TempUnit::Kelvin,
            pressure:    PressUnit::Bar,
            energy:      EnergyUnit::JPerKg,
            entropy:     EntropyUnit::JPerKgK,
            density:     DensityUnit::KgPerM3,
        }
    }

    /// Engineering / HVAC: °C, kPa, kJ/kg, kJ/(kg·K), kg/m³.
    pub fn engineering() -> Self {
        Self {
            temperature: TempUnit::Celsius,
            pressure:    PressUnit::KPa,
            energy:      EnergyUnit::KJPerKg,
            entropy:     EntropyUnit::KJPerKgK,
            density:     DensityUnit::KgPerM3,
        }
    }

    /// Strict SI: K, Pa, J/kg, J/(kg·K), kg/m³.
    pub fn si() -> Self {
        Self {
            temperature: TempUnit::Kelvin,
            pressure:    PressUnit::Pa,
            energy:      EnergyUnit::JPerKg,
            entropy:     EntropyUnit::JPerKgK,
            density:     DensityUnit::KgPerM3,
        }
    }

    // ── Builder methods ─────────────────────────────────────────────

    pub fn temperature(mut self, u: TempUnit) -> Self { self.temperature = u; self }
    pub fn pressure(mut self, u: PressUnit) -> Self { self.pressure = u; self }
    pub fn energy(mut self, u: EnergyUnit) -> Self { self.energy = u; self }
    pub fn entropy(mut self, u: EntropyUnit) -> Self { self.entropy = u; self }
    pub fn density(mut self, u: DensityUnit) -> Self { self.density = u; self }
}

impl Default for UnitSystem {
    fn default() -> Self { Self::native() }
}

// ────────────────────────────────────────────────────────────────────
//  Converter
// ────────────────────────────────────────────────────────────────────

const BTU_PER_LB_IN_J_PER_KG: f64 = 2_326.0;

/// Performs conversions between user units and the engine's native
/// units.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    pub units: UnitSystem,
}

impl Converter {
    pub fn new(units: UnitSystem) -> Self {
        Self { units }
    }

    /// Identity converter: native units in and out.
    pub fn identity() -> Self {
        Self { units: UnitSystem::native() }
    }

    /// `true` when every quantity is already in native units.
    pub fn is_identity(&self) -> bool {
        self.units == UnitSystem::native()
    }

    // ── Temperature ─────────────────────────────────────────────────

    /// User → native (K)
    pub fn t_to_native(&self, t: f64) -> f64 {
        match self.units.temperature {
            TempUnit::Kelvin     => t,
            TempUnit::Celsius    => t + 273.15,
            TempUnit::Fahrenheit => (t - 32.0) * 5.0 / 9.0 + 273.15,
        }
    }

    /// Native (K) → user
    pub fn t_from_native(&self, t: f64) -> f64 {
        match self.units.temperature {
            TempUnit::Kelvin     => t,
            TempUnit::Celsius    => t - 273.15,
            TempUnit::Fahrenheit => (t - 273.15) * 9.0 / 5.0 + 32.0,
        }
    }

    // ── Pressure ────────────────────────────────────────────────────

    /// User → native (bar)
    pub fn p_to_native(&self, p: f64) -> f64 {
        match self.units.pressure {
            PressUnit::Bar => p,
            PressUnit::KPa => p / 100.0,
            PressUnit::MPa => p * 10.0,
            PressUnit::Pa  => p / 100_000.0,
            PressUnit::Atm => p * 1.013_25,
            PressUnit::Psi => p * 0.068_947_57,
        }
    }

    /// Native (bar) → user
    pub fn p_from_native(&self, p: f64) -> f64 {
        match self.units.pressure {
            PressUnit::Bar => p,
            PressUnit::KPa => p * 100.0,
            PressUnit::MPa => p / 10.0,
            PressUnit::Pa  => p * 100_000.0,
            PressUnit::Atm => p / 1.013_25,
            PressUnit::Psi => p / 0.068_947_57,
        }
    }

    // ── Enthalpy / Gibbs energy ─────────────────────────────────────

    /// User → native (J/kg)
    pub fn h_to_native(&self, h: f64) -> f64 {
        match self.units.energy {
            EnergyUnit::JPerKg   => h,
            EnergyUnit::KJPerKg  => h * 1000.0,
            EnergyUnit::BtuPerLb => h * BTU_PER_LB_IN_J_PER_KG,
        }
    }

    /// Native (J/kg) → user
    pub fn h_from_native(&self, h: f64) -> f64 {
        match self.units.energy {
            EnergyUnit::JPerKg   => h,
            EnergyUnit::KJPerKg  => h / 1000.0,
            EnergyUnit::BtuPerLb => h / BTU_PER_LB_IN_J_PER_KG,
        }
    }

    // ── Entropy / Cp ────────────────────────────────────────────────

    /// User → native (J/(kg·K))
    pub fn s_to_native(&self, s: f64) -> f64 {
        match self.units.entropy {
            EntropyUnit::JPerKgK  => s,
            EntropyUnit::KJPerKgK => s * 1000.0,
        }
    }

    /// Native (J/(kg·K)) → user
    pub fn s_from_native(&self, s: f64) -> f64 {
        match self.units.entropy {
            EntropyUnit::JPerKgK  => s,
            EntropyUnit::KJPerKgK => s / 1000.0,
        }
    }

    // ── Density ─────────────────────────────────────────────────────

    /// Native (kg/m³) → user
    pub fn d_from_native(&self, d: f64) -> f64 {
        match self.units.density {
            DensityUnit::KgPerM3 => d,
            DensityUnit::GPerCm3 => d / 1000.0,
        }
    }
}
