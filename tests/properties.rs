use approx::assert_relative_eq;
use libr::composition::{mixture_molar_mass, mole_fraction};
use libr::{
    Config, Correlation, DomainPolicy, EnthalpyReference, If97Water, LibrError, LibrSolution,
    UnitSystem, WaterBackend,
};

fn libr() -> LibrSolution<If97Water> {
    LibrSolution::new(If97Water::new())
}

// ═══════════════════════════════════════════════════════════════════
//  Reference state (323.15 K, 50 wt-%)
// ═══════════════════════════════════════════════════════════════════

#[test]
fn enthalpy_reference_value() {
    let h = libr().enthalpy(323.15, 0.5).unwrap();
    assert!((h - 104_988.0).abs() < 100.0, "h expected ≈ 104 988 J/kg, got {h:.1}");
}

#[test]
fn entropy_reference_value() {
    let s = libr().entropy(323.15, 0.5).unwrap();
    assert!((s - 351.887).abs() < 0.5, "s expected ≈ 351.9 J/(kg·K), got {s:.3}");
}

#[test]
fn heat_capacity_reference_value() {
    let cp = libr().heat_capacity(323.15, 0.5).unwrap();
    assert!((cp - 2182.27).abs() < 2.0, "cp expected ≈ 2182 J/(kg·K), got {cp:.2}");
}

#[test]
fn density_reference_value() {
    let d = libr().density(323.15, 0.5).unwrap();
    assert!((d - 1522.07).abs() < 1.0, "ρ expected ≈ 1522 kg/m³, got {d:.2}");
}

// ═══════════════════════════════════════════════════════════════════
//  Derived quantities
// ═══════════════════════════════════════════════════════════════════

#[test]
fn props_bundle_matches_individual_calls() {
    let libr = libr();
    let state = libr.props(340.0, 0.57).unwrap();
    assert_eq!(state.pressure, libr.pressure(340.0, 0.57).unwrap());
    assert_eq!(state.enthalpy, libr.enthalpy(340.0, 0.57).unwrap());
    assert_eq!(state.entropy, libr.entropy(340.0, 0.57).unwrap());
    assert_eq!(state.heat_capacity, libr.heat_capacity(340.0, 0.57).unwrap());
    assert_eq!(state.density, libr.density(340.0, 0.57).unwrap());
    assert_eq!(state.temperature, 340.0);
}

#[test]
fn gibbs_is_h_minus_ts() {
    let libr = libr();
    let (t, x) = (330.0, 0.55);
    let g = libr.gibbs(t, x).unwrap();
    let expected = libr.enthalpy(t, x).unwrap() - t * libr.entropy(t, x).unwrap();
    assert_relative_eq!(g, expected, max_relative = 1e-12);
}

#[test]
fn enthalpy_slope_tracks_heat_capacity() {
    let libr = libr();
    let (t, x) = (330.0, 0.55);
    let dh_dt = (libr.enthalpy(t + 0.05, x).unwrap() - libr.enthalpy(t - 0.05, x).unwrap()) / 0.1;
    let cp = libr.heat_capacity(t, x).unwrap();
    assert!(
        (dh_dt - cp).abs() / cp < 0.02,
        "dh/dT = {dh_dt:.1} should be close to cp = {cp:.1}"
    );
}

#[test]
fn effective_temperature_is_below_solution_temperature() {
    let eff = libr().effective_temperature(323.15, 0.5).unwrap();
    assert!(eff.theta < 323.15);
    assert_relative_eq!(eff.d_theta_dx, -146.97, max_relative = 1e-3);
    assert_relative_eq!(eff.d_theta_dt, 0.88990, max_relative = 1e-4);
}

// ═══════════════════════════════════════════════════════════════════
//  Reference datum
// ═══════════════════════════════════════════════════════════════════

#[test]
fn ambient_datum_shifts_by_water_share() {
    let iapws = libr();
    let config = Config::new().reference(EnthalpyReference::Ambient);
    let ambient = LibrSolution::with_config(If97Water::new(), UnitSystem::native(), config).unwrap();

    let water = If97Water::new();
    let h_ref = water.molar_enthalpy(293.15, 101_325.0).unwrap();
    let s_ref = water.molar_entropy(293.15, 101_325.0).unwrap();

    let (t, w) = (323.15, 0.5);
    let x = mole_fraction(w);
    let share = (1.0 - x) / mixture_molar_mass(x);

    let h = ambient.enthalpy(t, w).unwrap();
    assert_relative_eq!(h, iapws.enthalpy(t, w).unwrap() - share * h_ref, max_relative = 1e-10);
    assert!((h - 62_982.0).abs() < 100.0, "h(ambient datum) expected ≈ 62 982 J/kg, got {h:.1}");

    let s = ambient.entropy(t, w).unwrap();
    assert_relative_eq!(s, iapws.entropy(t, w).unwrap() - share * s_ref, max_relative = 1e-10);

    // heat capacity and density do not depend on the datum
    assert_eq!(ambient.heat_capacity(t, w).unwrap(), iapws.heat_capacity(t, w).unwrap());
}

// ═══════════════════════════════════════════════════════════════════
//  Calibrated range
// ═══════════════════════════════════════════════════════════════════

#[test]
fn warn_policy_still_evaluates() {
    let h = libr().enthalpy(510.0, 0.5);
    assert!(h.is_ok(), "default policy only warns");
}

#[test]
fn reject_policy_fails_out_of_range() {
    let config = Config::new().domain(DomainPolicy::Reject);
    let libr = LibrSolution::with_config(If97Water::new(), UnitSystem::native(), config).unwrap();
    match libr.density(320.0, 0.78) {
        Err(LibrError::OutOfDomain(w)) => {
            assert_eq!(w.correlation, Correlation::Density);
            assert_eq!(w.mass_fraction, 0.78);
        }
        other => panic!("expected OutOfDomain, got {other:?}"),
    }
    assert!(libr.density(320.0, 0.6).is_ok());
}

#[test]
fn domain_check_uses_configured_units() {
    let libr = LibrSolution::with_units(If97Water::new(), UnitSystem::engineering());
    assert!(libr.domain_check(Correlation::Enthalpy, 50.0, 0.5).is_none());
    let w = libr.domain_check(Correlation::Enthalpy, -5.0, 0.5).unwrap();
    assert_relative_eq!(w.temperature, 268.15, max_relative = 1e-12);
}
