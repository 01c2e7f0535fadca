use converter::{Converter, UnitSystem};
use log::debug;

use crate::backend::{validate_finite, WaterBackend};
use crate::config::{Config, EnthalpyReference};
use crate::correlation::{self, EffectiveTemperature, WaterDatum};
use crate::crystallization::{CrystallizationReport, BORYTA};
use crate::domain::{self, Correlation, DomainWarning};
use crate::error::*;
use crate::flash::{self, FlashModel};
use crate::properties::*;
use crate::solver;

/// Aqueous LiBr solution evaluated with the Pátek–Klomfar correlations
/// on top of a pure-water backend.
///
/// Every method is a pure function of its arguments: nothing is cached
/// between calls apart from the enthalpy datum fixed at construction.
/// Mass fractions are LiBr kg/kg in every unit system.
///
/// # Quick example (engineering units)
/// ```
/// use libr::{If97Water, LibrSolution, UnitSystem};
///
/// let libr = LibrSolution::with_units(If97Water::new(), UnitSystem::engineering());
/// // 50 °C, 50 wt-% LiBr → kPa
/// let p = libr.pressure(50.0, 0.5)?;
/// assert!((p - 3.487).abs() < 0.01);
/// # Ok::<(), libr::LibrError>(())
/// ```
pub struct LibrSolution<B: WaterBackend> {
    backend: B,
    config: Config,
    datum: WaterDatum,
    conv: Converter,
}

impl<B: WaterBackend> LibrSolution<B> {
    // ── Constructors ─────────────────────────────────────────────────

    /// Native units (K, bar, J/kg, J/(kg·K), kg/m³) and default config.
    pub fn new(backend: B) -> Self {
        Self::with_units(backend, UnitSystem::native())
    }

    /// Default config with a custom unit system.
    pub fn with_units(backend: B, units: UnitSystem) -> Self {
        Self {
            backend,
            config: Config::default(),
            datum: WaterDatum::default(),
            conv: Converter::new(units),
        }
    }

    /// Full control over units and numerics.
    ///
    /// With [`EnthalpyReference::Ambient`] the water datum is evaluated
    /// here, once, so this can fail if the backend cannot reach
    /// 20 °C / 1 atm.
    pub fn with_config(backend: B, units: UnitSystem, config: Config) -> Result<Self> {
        let datum = match config.reference {
            EnthalpyReference::Iapws => WaterDatum::default(),
            EnthalpyReference::Ambient => {
                let (t, p) = EnthalpyReference::AMBIENT_STATE;
                WaterDatum {
                    enthalpy: backend.molar_enthalpy(t, p)?,
                    entropy: backend.molar_entropy(t, p)?,
                }
            }
        };
        debug!(
            "LiBr solution on {} water, datum h = {:.3} J/mol, s = {:.4} J/(mol·K)",
            backend.name(),
            datum.enthalpy,
            datum.entropy
        );
        Ok(Self { backend, config, datum, conv: Converter::new(units) })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn units(&self) -> &UnitSystem {
        &self.conv.units
    }

    // ── Direct correlations ─────────────────────────────────────────

    /// Vapour pressure above the solution.
    pub fn pressure(&self, t: f64, x: f64) -> Result<f64> {
        let t = self.input_state(Correlation::VaporPressure, t, x)?;
        let p = correlation::saturation_pressure(&self.backend, t, x)?;
        Ok(self.conv.p_from_native(p))
    }

    /// Mass-specific enthalpy.
    pub fn enthalpy(&self, t: f64, x: f64) -> Result<f64> {
        let t = self.input_state(Correlation::Enthalpy, t, x)?;
        let h = correlation::enthalpy(&self.backend, &self.datum, t, x)?;
        Ok(self.conv.h_from_native(h))
    }

    /// Mass-specific entropy.
    pub fn entropy(&self, t: f64, x: f64) -> Result<f64> {
        let t = self.input_state(Correlation::Entropy, t, x)?;
        let s = correlation::entropy(&self.backend, &self.datum, t, x)?;
        Ok(self.conv.s_from_native(s))
    }

    /// Mass-specific isobaric heat capacity (entropy units).
    pub fn heat_capacity(&self, t: f64, x: f64) -> Result<f64> {
        let t = self.input_state(Correlation::HeatCapacity, t, x)?;
        let cp = correlation::heat_capacity(&self.backend, t, x)?;
        Ok(self.conv.s_from_native(cp))
    }

    pub fn density(&self, t: f64, x: f64) -> Result<f64> {
        let t = self.input_state(Correlation::Density, t, x)?;
        let d = correlation::density(&self.backend, t, x)?;
        Ok(self.conv.d_from_native(d))
    }

    /// Mass-specific Gibbs energy `h − T·s` (energy units).
    pub fn gibbs(&self, t: f64, x: f64) -> Result<f64> {
        let t = self.input_state(Correlation::Enthalpy, t, x)?;
        let h = correlation::enthalpy(&self.backend, &self.datum, t, x)?;
        let s = correlation::entropy(&self.backend, &self.datum, t, x)?;
        Ok(self.conv.h_from_native(h - t * s))
    }

    /// Every direct correlation at one state.
    pub fn props(&self, t: f64, x: f64) -> Result<StateProps> {
        let t_user = t;
        let t = self.input_state(Correlation::VaporPressure, t, x)?;
        let b = &self.backend;
        Ok(StateProps {
            temperature: t_user,
            mass_fraction: x,
            pressure: self.conv.p_from_native(correlation::saturation_pressure(b, t, x)?),
            enthalpy: self.conv.h_from_native(correlation::enthalpy(b, &self.datum, t, x)?),
            entropy: self.conv.s_from_native(correlation::entropy(b, &self.datum, t, x)?),
            heat_capacity: self.conv.s_from_native(correlation::heat_capacity(b, t, x)?),
            density: self.conv.d_from_native(correlation::density(b, t, x)?),
        })
    }

    /// Θ(T, x) with its partial derivatives, always in kelvin; the
    /// composition derivative is per unit mass fraction.
    pub fn effective_temperature(&self, t: f64, x: f64) -> Result<EffectiveTemperature> {
        let t = self.input_state(Correlation::VaporPressure, t, x)?;
        Ok(correlation::effective_temperature(t, x))
    }

    // ── Saturation inversions ───────────────────────────────────────

    /// Boiling temperature of a solution of mass fraction `x` at `p`.
    ///
    /// The report's `value` is in the configured temperature unit; its
    /// `residual` is always in kelvin.
    pub fn temperature(&self, p: f64, x: f64) -> Result<SolveReport> {
        validate_finite("mass fraction", x)?;
        let p = self.conv.p_to_native(p);
        let report = self.solve_temperature(p, x).map_err(|e| self.convert_failure(e))?;
        self.check_domain(Correlation::VaporPressure, report.value, x)?;
        Ok(self.convert_temperature_report(report))
    }

    /// Mass fraction of a solution boiling at `(t, p)`, starting at 0.5.
    pub fn mass_fraction(&self, t: f64, p: f64) -> Result<SolveReport> {
        self.mass_fraction_with_guess(t, p, 0.5)
    }

    pub fn mass_fraction_with_guess(&self, t: f64, p: f64, guess: f64) -> Result<SolveReport> {
        let t = self.conv.t_to_native(t);
        let p = self.conv.p_to_native(p);
        validate_finite("temperature", t)?;
        let report = self.solve_mass_fraction(t, p, guess)?;
        self.check_domain(Correlation::VaporPressure, t, report.value)?;
        Ok(report)
    }

    // ── Flash ───────────────────────────────────────────────────────

    /// Split a feed of enthalpy `h`, pressure `p` and overall mass
    /// fraction `z` into solution and water vapour.
    pub fn flash(&self, h: f64, p: f64, z: f64) -> Result<FlashResult> {
        let h = self.conv.h_to_native(h);
        let p = self.conv.p_to_native(p);
        let result = flash::flash(self, h, p, z, &self.config.flash).map_err(|e| match e {
            LibrError::FlashNotConverged { last, iterations } => LibrError::FlashNotConverged {
                last: self.convert_flash(last),
                iterations,
            },
            other => self.convert_failure(other),
        })?;
        self.check_domain(Correlation::Enthalpy, result.temperature, result.liquid_mass_fraction)?;
        Ok(self.convert_flash(result))
    }

    // ── Calibrated range ────────────────────────────────────────────

    /// Warning for a state outside `correlation`'s calibrated range,
    /// regardless of the configured policy.
    pub fn domain_check(&self, correlation: Correlation, t: f64, x: f64) -> Option<DomainWarning> {
        domain::check(correlation, self.conv.t_to_native(t), x)
    }

    // ── Crystallization ─────────────────────────────────────────────

    pub fn is_crystallized(&self, t: f64, x: f64) -> bool {
        BORYTA.is_crystallized(self.conv.t_to_native(t), x)
    }

    /// Crystallization boundary temperature at `x`, `None` for
    /// solutions too dilute to crystallize.
    pub fn crystallization_temperature(&self, x: f64) -> Option<f64> {
        BORYTA.temperature(x).map(|t| self.conv.t_from_native(t))
    }

    /// Check labelled `(label, T, x)` states against the boundary.
    /// Temperatures in the report are in the configured unit.
    pub fn check_state_points<'a, I>(&self, states: I) -> CrystallizationReport
    where
        I: IntoIterator<Item = (&'a str, f64, f64)>,
    {
        let native = states.into_iter().map(|(label, t, x)| (label, self.conv.t_to_native(t), x));
        let mut report = BORYTA.check_state_points(native);
        for v in &mut report.violations {
            v.temperature = self.conv.t_from_native(v.temperature);
            v.boundary = self.conv.t_from_native(v.boundary);
        }
        report
    }

    // ================================================================
    //  Native-unit internals
    // ================================================================

    /// Convert `t` to kelvin, validate and apply the domain policy.
    fn input_state(&self, correlation: Correlation, t: f64, x: f64) -> Result<f64> {
        let t = self.conv.t_to_native(t);
        validate_finite("temperature", t)?;
        validate_finite("mass fraction", x)?;
        self.check_domain(correlation, t, x)?;
        Ok(t)
    }

    fn check_domain(&self, correlation: Correlation, t: f64, x: f64) -> Result<()> {
        self.config.domain.apply(correlation, t, x)
    }

    /// Saturation temperature of pure water at `p` (bar).
    fn target_theta(&self, p: f64) -> Result<f64> {
        validate_finite("pressure", p)?;
        self.backend.saturation_temperature(p * 1e5, 0.0)
    }

    fn solve_temperature(&self, p: f64, x: f64) -> Result<SolveReport> {
        let target = self.target_theta(p)?;
        let residual = |t: f64| {
            let eff = correlation::effective_temperature(t, x);
            (eff.theta - target, eff.d_theta_dt)
        };
        let solver = &self.config.solver;
        solver::solve(Unknown::Temperature, residual, target, solver.temperature_bounds, solver)
    }

    fn solve_mass_fraction(&self, t: f64, p: f64, guess: f64) -> Result<SolveReport> {
        let target = self.target_theta(p)?;
        let residual = |x: f64| {
            let eff = correlation::effective_temperature(t, x);
            (eff.theta - target, eff.d_theta_dx)
        };
        let solver = &self.config.solver;
        solver::solve(Unknown::MassFraction, residual, guess, solver.mass_fraction_bounds, solver)
    }

    // ── Output conversion ───────────────────────────────────────────

    fn convert_temperature_report(&self, report: SolveReport) -> SolveReport {
        SolveReport { value: self.conv.t_from_native(report.value), ..report }
    }

    /// Temperature inversions report their best effort in user units.
    fn convert_failure(&self, err: LibrError) -> LibrError {
        match err {
            LibrError::NotConverged { unknown: Unknown::Temperature, report } => {
                LibrError::NotConverged {
                    unknown: Unknown::Temperature,
                    report: self.convert_temperature_report(report),
                }
            }
            other => other,
        }
    }

    fn convert_flash(&self, r: FlashResult) -> FlashResult {
        FlashResult { temperature: self.conv.t_from_native(r.temperature), ..r }
    }
}

impl<B: WaterBackend> FlashModel for LibrSolution<B> {
    fn bubble_temperature(&self, p: f64, x: f64) -> Result<f64> {
        Ok(self.solve_temperature(p, x)?.value)
    }

    fn liquid_enthalpy(&self, t: f64, x: f64) -> Result<f64> {
        correlation::enthalpy(&self.backend, &self.datum, t, x)
    }

    fn vapor_enthalpy(&self, t: f64) -> Result<f64> {
        correlation::vapor_enthalpy(&self.backend, &self.datum, t)
    }
}
