use approx::assert_relative_eq;
use libr::backend::if97::If97Error;
use libr::composition::MW_H2O;
use libr::{If97Water, LibrError, LibrSolution, WaterBackend};

// ═══════════════════════════════════════════════════════════════════
//  Saturation line
// ═══════════════════════════════════════════════════════════════════

#[test]
fn normal_boiling_point() {
    let water = If97Water::new();
    let t = water.saturation_temperature(101_325.0, 0.0).unwrap();
    assert!((t - 373.124).abs() < 0.01, "Tsat(1 atm) expected ≈ 373.124 K, got {t:.4}");
    let p = water.saturation_pressure(t, 1.0).unwrap();
    assert_relative_eq!(p, 101_325.0, max_relative = 1e-6);
}

#[test]
fn latent_heat_at_100c() {
    let water = If97Water::new();
    let h_l = water.molar_enthalpy_sat(373.15, 0.0).unwrap();
    let h_v = water.molar_enthalpy_sat(373.15, 1.0).unwrap();
    let latent = (h_v - h_l) / MW_H2O / 1000.0;
    assert!((latent - 2256.5).abs() < 2.0, "latent heat expected ≈ 2256 kJ/kg, got {latent:.1}");

    let h_mid = water.molar_enthalpy_sat(373.15, 0.5).unwrap();
    assert_relative_eq!(h_mid, 0.5 * (h_l + h_v), max_relative = 1e-12);
}

#[test]
fn saturated_liquid_at_25c() {
    let water = If97Water::new();
    let rho = water.molar_density_sat(298.15).unwrap() * MW_H2O;
    assert!((rho - 997.0).abs() < 0.5, "ρ expected ≈ 997 kg/m³, got {rho:.2}");
    let cp = water.molar_heat_capacity_sat(298.15).unwrap();
    assert!((cp - 75.3).abs() < 0.2, "cp expected ≈ 75.3 J/(mol·K), got {cp:.3}");
}

#[test]
fn critical_point_constants() {
    let crit = If97Water::new().critical_point().unwrap();
    assert_eq!(crit.temperature, 647.096);
    assert_eq!(crit.enthalpy, 37_548.5);
    assert_eq!(crit.entropy, 79.3933);
    assert_relative_eq!(crit.density * MW_H2O, 322.0, max_relative = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════

#[test]
fn quality_must_be_a_fraction() {
    let water = If97Water::new();
    assert!(matches!(water.molar_enthalpy_sat(320.0, 1.5), Err(LibrError::InvalidInput(_))));
    assert!(matches!(water.saturation_pressure(320.0, -0.1), Err(LibrError::InvalidInput(_))));
}

#[test]
fn saturation_line_continues_below_triple_point() {
    let water = If97Water::new();
    let p = water.saturation_pressure(260.0, 0.0).unwrap();
    assert!((p - 222.55).abs() < 0.01, "Psat(260 K) expected ≈ 222.55 Pa, got {p:.4}");
    let t = water.saturation_temperature(p, 0.0).unwrap();
    assert_relative_eq!(t, 260.0, max_relative = 1e-9);

    // saturated liquid properties still stop at the triple point
    assert!(matches!(
        water.molar_enthalpy_sat(260.0, 0.0),
        Err(LibrError::Water(If97Error::TemperatureOutOfRange { .. }))
    ));
}

#[test]
fn saturation_line_floor_is_a_water_error() {
    let water = If97Water::new();
    assert!(matches!(
        water.saturation_pressure(150.0, 0.0),
        Err(LibrError::Water(If97Error::TemperatureOutOfRange { .. }))
    ));
    assert!(matches!(
        water.saturation_temperature(1e-3, 0.0),
        Err(LibrError::Water(If97Error::PressureOutOfRange { .. }))
    ));
}

#[test]
fn deep_depression_stays_on_saturation_line() {
    // Θ(280 K, 75 wt-%) ≈ 225.85 K, well below the triple point of water
    let libr = LibrSolution::new(If97Water::new());
    let p = libr.pressure(280.0, 0.75).unwrap();
    assert!((p - 8.6808e-5).abs() < 1e-8, "P(280 K, 0.75) expected ≈ 8.681e-5 bar, got {p:.6e}");
}
