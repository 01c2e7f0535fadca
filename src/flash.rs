//! Isenthalpic, isobaric flash of a LiBr solution into liquid and pure
//! water vapour.
//!
//! Temperature and liquid composition both follow from the quality
//! through the salt balance `x_liq = z / (1 − Q)`, so the flash is a
//! fixed point on `Q` alone; each pass runs one bubble-temperature
//! inversion.

use log::{debug, trace};

use crate::config::FlashConfig;
use crate::error::{LibrError, Result};
use crate::properties::{FlashResult, Quality};

/// The three property evaluations the flash needs, in native units
/// (K, bar, J/kg).
pub(crate) trait FlashModel {
    /// Temperature at which a solution of mass fraction `x` boils at `p`.
    fn bubble_temperature(&self, p: f64, x: f64) -> Result<f64>;
    /// Solution enthalpy at `(t, x)`.
    fn liquid_enthalpy(&self, t: f64, x: f64) -> Result<f64>;
    /// Saturated water-vapour enthalpy at `t`, on the liquid's datum.
    fn vapor_enthalpy(&self, t: f64) -> Result<f64>;
}

pub(crate) fn flash<M: FlashModel + ?Sized>(
    model: &M,
    h: f64,
    p: f64,
    z: f64,
    config: &FlashConfig,
) -> Result<FlashResult> {
    if !h.is_finite() || !p.is_finite() || !z.is_finite() {
        return Err(LibrError::InvalidInput(format!(
            "flash inputs must be finite, got h = {h}, P = {p}, z = {z}"
        )));
    }
    if !(0.0..1.0).contains(&z) {
        return Err(LibrError::InvalidInput(format!(
            "feed mass fraction must lie in [0, 1), got {z}"
        )));
    }

    // All-liquid feed
    let t_bubble = model.bubble_temperature(p, z)?;
    let h_bubble = model.liquid_enthalpy(t_bubble, z)?;
    if h <= h_bubble {
        let quality = if h < h_bubble { Quality::Subcooled } else { Quality::Saturated(0.0) };
        debug!("flash: feed at or below bubble point (h = {h:.2}, h_bubble = {h_bubble:.2})");
        return Ok(FlashResult {
            quality,
            temperature: t_bubble,
            liquid_mass_fraction: z,
            iterations: 0,
        });
    }

    let mut q = config.initial_quality;
    let mut last = FlashResult {
        quality: Quality::Saturated(q),
        temperature: t_bubble,
        liquid_mass_fraction: z,
        iterations: 0,
    };

    for iteration in 1..=config.max_iterations {
        let x_liquid = z / (1.0 - q);
        let t = model.bubble_temperature(p, x_liquid)?;
        let h_liquid = model.liquid_enthalpy(t, x_liquid)?;
        let q_next = if h > h_liquid {
            let h_vapor = model.vapor_enthalpy(t)?;
            (h - h_liquid) / (h_vapor - h_liquid)
        } else {
            0.0
        };
        if !(0.0..1.0).contains(&q_next) {
            return Err(LibrError::InvalidInput(format!(
                "feed enthalpy {h:.2} leaves no liquid at {p} bar (quality {q_next:.4})"
            )));
        }

        let change = (q_next - q).abs();
        q = q_next;
        last = FlashResult {
            quality: Quality::Saturated(q),
            temperature: t,
            liquid_mass_fraction: x_liquid,
            iterations: iteration,
        };
        trace!("flash iteration {iteration}: {last}");

        if iteration >= config.min_iterations && change < config.tolerance {
            // Close the salt balance on the accepted quality
            let x_liquid = z / (1.0 - q);
            let result = FlashResult {
                temperature: model.bubble_temperature(p, x_liquid)?,
                liquid_mass_fraction: x_liquid,
                ..last
            };
            debug!("flash converged: {result}");
            return Ok(result);
        }
    }

    Err(LibrError::FlashNotConverged { last, iterations: config.max_iterations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Linear toy: boiling point rises 100 K per unit mass fraction,
    /// cp = 2000 J/(kg·K), latent heat 2.4 MJ/kg.
    struct Linear;

    impl FlashModel for Linear {
        fn bubble_temperature(&self, _p: f64, x: f64) -> Result<f64> {
            Ok(300.0 + 100.0 * x)
        }
        fn liquid_enthalpy(&self, t: f64, _x: f64) -> Result<f64> {
            Ok(2000.0 * (t - 273.15))
        }
        fn vapor_enthalpy(&self, t: f64) -> Result<f64> {
            Ok(2.4e6 + 1900.0 * (t - 273.15))
        }
    }

    #[test]
    fn subcooled_and_bubble_point_feeds() {
        let config = FlashConfig::default();
        let h_bubble = 2000.0 * (350.0 - 273.15);

        let r = flash(&Linear, h_bubble - 1.0, 0.05, 0.5, &config).unwrap();
        assert!(r.quality.is_subcooled());
        assert_eq!(r.liquid_mass_fraction, 0.5);
        assert_eq!(r.iterations, 0);

        let r = flash(&Linear, h_bubble, 0.05, 0.5, &config).unwrap();
        assert_eq!(r.quality, Quality::Saturated(0.0));
        assert_relative_eq!(r.temperature, 350.0);
    }

    #[test]
    fn two_phase_feed_satisfies_balances() {
        let config = FlashConfig::default();
        let h = 2000.0 * (350.0 - 273.15) + 50_000.0;
        let r = flash(&Linear, h, 0.05, 0.5, &config).unwrap();
        let q = r.quality.value().unwrap();
        assert!(q > 0.0 && q < 0.1);
        assert!(r.iterations >= config.min_iterations);
        assert_relative_eq!(r.liquid_mass_fraction * (1.0 - q), 0.5, max_relative = 1e-12);
        assert_relative_eq!(r.temperature, 300.0 + 100.0 * r.liquid_mass_fraction);
    }

    #[test]
    fn iteration_cap_is_an_error() {
        let config = FlashConfig { tolerance: 0.0, max_iterations: 8, ..FlashConfig::default() };
        let h = 2000.0 * (350.0 - 273.15) + 50_000.0;
        match flash(&Linear, h, 0.05, 0.5, &config) {
            Err(LibrError::FlashNotConverged { last, iterations }) => {
                assert_eq!(iterations, 8);
                assert_eq!(last.iterations, 8);
                assert!(last.quality.value().is_some());
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }
}
