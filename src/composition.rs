//! Mass-fraction ↔ mole-fraction conversion for LiBr/H₂O.
//!
//! Both functions are total: inputs outside `[0, 1]` are evaluated
//! without complaint and callers own the physical domain check.

/// Molar mass of lithium bromide (kg/mol).
pub const MW_LIBR: f64 = 0.086_85;

/// Molar mass of water (kg/mol).
pub const MW_H2O: f64 = 0.018_015_268;

/// LiBr mole fraction of a solution with LiBr mass fraction `w`.
pub fn mole_fraction(w: f64) -> f64 {
    let n_libr = w / MW_LIBR;
    let n_h2o = (1.0 - w) / MW_H2O;
    n_libr / (n_libr + n_h2o)
}

/// LiBr mass fraction of a solution with LiBr mole fraction `x`.
pub fn mass_fraction(x: f64) -> f64 {
    x * MW_LIBR / mixture_molar_mass(x)
}

/// Molar mass of the solution at LiBr mole fraction `x` (kg/mol).
pub fn mixture_molar_mass(x: f64) -> f64 {
    x * MW_LIBR + (1.0 - x) * MW_H2O
}

/// Derivative of [`mole_fraction`] with respect to the mass fraction.
pub fn d_mole_fraction_d_mass_fraction(w: f64) -> f64 {
    let total = w / MW_LIBR + (1.0 - w) / MW_H2O;
    1.0 / (MW_LIBR * MW_H2O * total * total)
}
