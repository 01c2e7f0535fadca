use approx::assert_relative_eq;
use libr::{
    Config, FlashConfig, If97Water, LibrError, LibrSolution, Quality, UnitSystem,
};

fn libr() -> LibrSolution<If97Water> {
    LibrSolution::new(If97Water::new())
}

// ═══════════════════════════════════════════════════════════════════
//  Two-phase feed
// ═══════════════════════════════════════════════════════════════════

#[test]
fn generator_outlet_flashed_into_absorber() {
    let libr = libr();
    // Strong solution leaving the generator at 70 °C, throttled to 10 mbar
    let h = libr.enthalpy(343.15, 0.6).unwrap();
    let r = libr.flash(h, 0.01, 0.6).unwrap();

    let q = r.quality.value().expect("feed should flash");
    assert_relative_eq!(q, 0.014_58, max_relative = 0.01);
    assert_relative_eq!(r.temperature, 321.75, max_relative = 0.01);
    assert_relative_eq!(r.liquid_mass_fraction, 0.6089, max_relative = 0.01);
    assert!(r.iterations >= 5, "at least five passes, got {}", r.iterations);
}

#[test]
fn flash_respects_salt_balance_and_boiling_point() {
    let libr = libr();
    let h = libr.enthalpy(360.0, 0.55).unwrap();
    let r = libr.flash(h, 0.05, 0.55).unwrap();

    let q = r.quality.value().unwrap();
    assert!(q > 0.0 && q < 0.2, "quality {q:.5} out of expected band");
    assert_relative_eq!(r.liquid_mass_fraction * (1.0 - q), 0.55, max_relative = 1e-12);

    let t_bubble = libr.temperature(0.05, r.liquid_mass_fraction).unwrap();
    assert_relative_eq!(r.temperature, t_bubble.value, max_relative = 1e-12);
}

#[test]
fn flash_in_engineering_units() {
    let libr = LibrSolution::with_units(If97Water::new(), UnitSystem::engineering());
    // kJ/kg, kPa, °C
    let h = libr.enthalpy(70.0, 0.6).unwrap();
    let r = libr.flash(h, 1.0, 0.6).unwrap();
    assert!(
        (r.temperature - 48.6).abs() < 0.2,
        "flash temperature expected ≈ 48.6 °C, got {:.3}",
        r.temperature
    );
}

// ═══════════════════════════════════════════════════════════════════
//  Single-phase feed
// ═══════════════════════════════════════════════════════════════════

#[test]
fn subcooled_feed_keeps_composition() {
    let libr = libr();
    let h = libr.enthalpy(300.0, 0.6).unwrap();
    let r = libr.flash(h, 0.01, 0.6).unwrap();
    assert_eq!(r.quality, Quality::Subcooled);
    assert_eq!(r.liquid_mass_fraction, 0.6);
    assert_eq!(r.iterations, 0);
    let t_bubble = libr.temperature(0.01, 0.6).unwrap();
    assert_eq!(r.temperature, t_bubble.value);
}

// ═══════════════════════════════════════════════════════════════════
//  Failure modes
// ═══════════════════════════════════════════════════════════════════

#[test]
fn iteration_cap_is_reported() {
    let flash = FlashConfig { max_iterations: 3, ..FlashConfig::default() };
    let config = Config::new().flash(flash);
    let libr = LibrSolution::with_config(If97Water::new(), UnitSystem::native(), config).unwrap();

    let h = libr.enthalpy(343.15, 0.6).unwrap();
    match libr.flash(h, 0.01, 0.6) {
        Err(LibrError::FlashNotConverged { last, iterations }) => {
            assert_eq!(iterations, 3);
            assert!(last.quality.value().is_some());
            assert!(last.temperature > 300.0 && last.temperature < 340.0);
        }
        other => panic!("expected FlashNotConverged, got {other:?}"),
    }
}

#[test]
fn invalid_feed_composition() {
    let libr = libr();
    assert!(matches!(libr.flash(1e5, 0.01, 1.2), Err(LibrError::InvalidInput(_))));
    assert!(matches!(libr.flash(f64::NAN, 0.01, 0.5), Err(LibrError::InvalidInput(_))));
}
