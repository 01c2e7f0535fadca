use approx::{assert_abs_diff_eq, assert_relative_eq};
use libr::composition::{mass_fraction, mixture_molar_mass, mole_fraction, MW_H2O, MW_LIBR};

// ═══════════════════════════════════════════════════════════════════
//  Mass ↔ mole fraction
// ═══════════════════════════════════════════════════════════════════

#[test]
fn half_salt_by_mass_is_about_17_mol_percent() {
    let x = mole_fraction(0.5);
    assert!((x - 0.1718).abs() < 1e-3, "x(w = 0.5) expected ≈ 0.1718, got {x:.6}");
    let w = mass_fraction(0.1718);
    assert!((w - 0.50).abs() < 1e-3, "w(x = 0.1718) expected ≈ 0.50, got {w:.6}");
}

#[test]
fn conversion_round_trips_over_unit_interval() {
    for i in 0..=1000 {
        let w = f64::from(i) / 1000.0;
        assert_abs_diff_eq!(mass_fraction(mole_fraction(w)), w, epsilon = 1e-9);
    }
    for i in 0..=100 {
        let x = f64::from(i) / 100.0;
        assert_abs_diff_eq!(mole_fraction(mass_fraction(x)), x, epsilon = 1e-9);
    }
}

#[test]
fn mole_fraction_is_monotonic() {
    let mut last = -1.0;
    for i in 0..=100 {
        let x = mole_fraction(f64::from(i) / 100.0);
        assert!(x > last, "mole fraction must increase with mass fraction");
        last = x;
    }
}

#[test]
fn mixture_molar_mass_spans_both_components() {
    assert_relative_eq!(mixture_molar_mass(0.0), MW_H2O);
    assert_relative_eq!(mixture_molar_mass(1.0), MW_LIBR);
    let x = mole_fraction(0.5);
    // one mole of mixture holds x·MW_LIBR kg of salt, half of its mass
    assert_relative_eq!(x * MW_LIBR / mixture_molar_mass(x), 0.5, max_relative = 1e-12);
}
