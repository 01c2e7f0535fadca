//! Pátek–Klomfar correlations for aqueous LiBr.
//!
//! J. Pátek, J. Klomfar, "A computationally effective formulation of the
//! thermodynamic properties of LiBr–H₂O solutions from 273 to 500 K over
//! full composition range", Int. J. Refrig. 29 (2006) 566–578.
//!
//! Every property is a power series in the reduced LiBr mole fraction
//! `x_N` and a temperature ratio, combined with a pure-water property
//! supplied by a [`WaterBackend`]:
//!
//! ```text
//! Θ    = T − Σ aᵢ x_N^mᵢ (0.4 − x_N)^nᵢ (T/T_c)^tᵢ
//! h    = [(1 − x_N) h_w(T) + h_c  Σ aᵢ x_N^mᵢ (0.4 − x_N)^nᵢ (T_c/(T − T₀))^tᵢ] / M
//! s    = [(1 − x_N) s_w(T) + s_c  Σ …] / M
//! c_p  = [(1 − x_N) c_p,w(T) + c_p,t Σ …] / M
//! ρ    = [(1 − x_N) ρ_w(T) + ρ_c  Σ aᵢ x_N^mᵢ (T/T_c)^tᵢ] · M
//! ```

use crate::backend::WaterBackend;
use crate::composition::{self, MW_H2O};
use crate::error::Result;

/// Critical temperature of water used to reduce temperatures (K).
pub const T_CRIT: f64 = 647.096;

/// Nonlinear temperature parameter of the caloric correlations (K).
pub const T_0: f64 = 221.0;

/// Heat-capacity scaling constant c_p,t (J/(mol·K)).
pub const CP_T: f64 = 76.0226;

// ── Power series ────────────────────────────────────────────────────

/// One coefficient table: `Σ aᵢ x^mᵢ (0.4 − x)^nᵢ τ^tᵢ`.
#[derive(Debug, Clone, Copy)]
pub struct PowerSeries<const N: usize> {
    pub a: [f64; N],
    pub m: [i32; N],
    pub n: [i32; N],
    pub t: [i32; N],
}

impl<const N: usize> PowerSeries<N> {
    pub fn eval(&self, x: f64, tau: f64) -> f64 {
        let mut sum = 0.0;
        for i in 0..N {
            sum += self.a[i] * x.powi(self.m[i]) * (0.4 - x).powi(self.n[i]) * tau.powi(self.t[i]);
        }
        sum
    }

    /// Partial derivative with respect to the mole fraction.
    pub fn d_dx(&self, x: f64, tau: f64) -> f64 {
        let mut sum = 0.0;
        for i in 0..N {
            let (m, n) = (self.m[i], self.n[i]);
            let tau_part = tau.powi(self.t[i]);
            if m > 0 {
                sum += self.a[i] * m as f64 * x.powi(m - 1) * (0.4 - x).powi(n) * tau_part;
            }
            if n > 0 {
                sum -= self.a[i] * n as f64 * x.powi(m) * (0.4 - x).powi(n - 1) * tau_part;
            }
        }
        sum
    }

    /// Partial derivative with respect to the temperature variable τ.
    pub fn d_dtau(&self, x: f64, tau: f64) -> f64 {
        let mut sum = 0.0;
        for i in 0..N {
            let t = self.t[i];
            if t > 0 {
                sum += self.a[i] * x.powi(self.m[i]) * (0.4 - x).powi(self.n[i])
                    * t as f64 * tau.powi(t - 1);
            }
        }
        sum
    }
}

// ── Coefficient tables (Pátek–Klomfar 2006, Tables 4–8) ─────────────

/// Effective temperature, Table 4 (aᵢ in K).
pub const THETA: PowerSeries<8> = PowerSeries {
    a: [-2.41303e2, 1.91750e7, -1.75521e8, 3.25432e7, 3.92571e2, -2.12626e3, 1.85127e8, 1.91216e3],
    m: [3, 4, 4, 8, 1, 1, 4, 6],
    n: [0, 5, 6, 3, 0, 2, 6, 0],
    t: [0, 0, 0, 0, 1, 1, 1, 1],
};

/// Density, Table 5.
pub const DENSITY: PowerSeries<2> = PowerSeries {
    a: [1.746, 4.709],
    m: [1, 1],
    n: [0, 0],
    t: [0, 6],
};

/// Isobaric heat capacity, Table 6.
pub const HEAT_CAPACITY: PowerSeries<8> = PowerSeries {
    a: [-14.2094, 40.4943, 111.135, 229.980, 1345.26, -0.0141010, 0.0124977, -0.000683209],
    m: [2, 3, 3, 3, 3, 2, 1, 1],
    n: [0, 0, 1, 2, 3, 0, 3, 2],
    t: [0, 0, 0, 0, 0, 2, 3, 4],
};

/// Enthalpy, Table 7.
pub const ENTHALPY: PowerSeries<30> = PowerSeries {
    a: [
        2.27431, -7.99511, 385.239, -16394.0, -422.562, 0.113314, -8.33474, -17383.3,
        6.49763, 3245.52, -13464.3, 39932.2, -258877.0, -0.00193046, 2.80616, -40.4479,
        145.342, -2.74873, -449.743, -12.1794, -0.00583739, 0.233910, 0.341888, 8.85259,
        -17.8731, 0.0735179, -0.000179430, 0.00184261, -0.00624282, 0.00684765,
    ],
    m: [1, 1, 2, 3, 6, 1, 3, 5, 4, 5, 5, 6, 6, 1, 2, 2, 2, 5, 6, 7, 1, 1, 2, 2, 2, 3, 1, 1, 1, 1],
    n: [0, 1, 6, 6, 2, 0, 0, 4, 0, 4, 5, 5, 6, 0, 3, 5, 7, 0, 3, 1, 0, 4, 2, 6, 7, 0, 0, 1, 2, 3],
    t: [0, 0, 0, 0, 0, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5],
};

/// Entropy, Table 8.
pub const ENTROPY: PowerSeries<29> = PowerSeries {
    a: [
        1.53091, -4.52564, 698.302, -21666.4, -1475.33, 0.0847012, -6.59523, -29533.1,
        0.00956314, -0.188679, 9.31752, 5.78104, 13893.1, -17176.2, 415.108, -55564.7,
        -0.00423409, 30.5242, -1.67620, 14.8283, 0.00303055, -0.0401810, 0.149252, 2.59240,
        -0.177421, -0.0000699650, 0.000605007, -0.00165228, 0.00122966,
    ],
    m: [1, 1, 2, 3, 6, 1, 3, 5, 1, 2, 2, 4, 5, 5, 6, 6, 1, 3, 5, 7, 1, 1, 1, 2, 3, 1, 1, 1, 1],
    n: [0, 1, 6, 6, 2, 0, 0, 4, 0, 0, 4, 0, 4, 5, 2, 5, 0, 4, 0, 1, 0, 2, 4, 7, 1, 0, 1, 2, 3],
    t: [0, 0, 0, 0, 0, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 4, 5, 5, 5, 5],
};

// ── Effective temperature ───────────────────────────────────────────

/// Θ(T, x) together with its partial derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveTemperature {
    /// Θ (K)
    pub theta: f64,
    /// ∂Θ/∂T at constant composition (K/K)
    pub d_theta_dt: f64,
    /// ∂Θ/∂x with respect to the LiBr **mass** fraction (K)
    pub d_theta_dx: f64,
}

/// Θ(T, w): the temperature at which pure water has the vapour
/// pressure of the solution at temperature `t` (K) and LiBr mass
/// fraction `w`.
pub fn theta(t: f64, w: f64) -> f64 {
    let x = composition::mole_fraction(w);
    t - THETA.eval(x, t / T_CRIT)
}

/// Θ(T, w) and both partial derivatives.
pub fn effective_temperature(t: f64, w: f64) -> EffectiveTemperature {
    let x = composition::mole_fraction(w);
    let tau = t / T_CRIT;
    EffectiveTemperature {
        theta: t - THETA.eval(x, tau),
        d_theta_dt: 1.0 - THETA.d_dtau(x, tau) / T_CRIT,
        d_theta_dx: -THETA.d_dx(x, tau) * composition::d_mole_fraction_d_mass_fraction(w),
    }
}

// ── Direct correlations ─────────────────────────────────────────────

/// Molar datum subtracted from every pure-water contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaterDatum {
    /// J/mol
    pub enthalpy: f64,
    /// J/(mol·K)
    pub entropy: f64,
}

fn caloric_tau(t: f64) -> f64 {
    T_CRIT / (t - T_0)
}

/// Vapour pressure above the solution (bar).
pub fn saturation_pressure<B: WaterBackend + ?Sized>(backend: &B, t: f64, w: f64) -> Result<f64> {
    let p_pa = backend.saturation_pressure(theta(t, w), 0.0)?;
    Ok(p_pa * 1e-5)
}

/// Mass-specific enthalpy of the solution (J/kg).
pub fn enthalpy<B: WaterBackend + ?Sized>(
    backend: &B,
    datum: &WaterDatum,
    t: f64,
    w: f64,
) -> Result<f64> {
    let x = composition::mole_fraction(w);
    let h_c = backend.critical_point()?.enthalpy;
    let h_w = backend.molar_enthalpy_sat(t, 0.0)? - datum.enthalpy;
    let h_molar = (1.0 - x) * h_w + h_c * ENTHALPY.eval(x, caloric_tau(t));
    Ok(h_molar / composition::mixture_molar_mass(x))
}

/// Mass-specific entropy of the solution (J/(kg·K)).
pub fn entropy<B: WaterBackend + ?Sized>(
    backend: &B,
    datum: &WaterDatum,
    t: f64,
    w: f64,
) -> Result<f64> {
    let x = composition::mole_fraction(w);
    let s_c = backend.critical_point()?.entropy;
    let s_w = backend.molar_entropy_sat(t, 0.0)? - datum.entropy;
    let s_molar = (1.0 - x) * s_w + s_c * ENTROPY.eval(x, caloric_tau(t));
    Ok(s_molar / composition::mixture_molar_mass(x))
}

/// Mass-specific isobaric heat capacity of the solution (J/(kg·K)).
pub fn heat_capacity<B: WaterBackend + ?Sized>(backend: &B, t: f64, w: f64) -> Result<f64> {
    let x = composition::mole_fraction(w);
    let cp_w = backend.molar_heat_capacity_sat(t)?;
    let cp_molar = (1.0 - x) * cp_w + CP_T * HEAT_CAPACITY.eval(x, caloric_tau(t));
    Ok(cp_molar / composition::mixture_molar_mass(x))
}

/// Mass density of the solution (kg/m³).
pub fn density<B: WaterBackend + ?Sized>(backend: &B, t: f64, w: f64) -> Result<f64> {
    let x = composition::mole_fraction(w);
    let rho_c = backend.critical_point()?.density;
    let rho_w = backend.molar_density_sat(t)?;
    let rho_molar = (1.0 - x) * rho_w + rho_c * DENSITY.eval(x, t / T_CRIT);
    Ok(rho_molar * composition::mixture_molar_mass(x))
}

/// Mass-specific enthalpy of saturated water vapour at `t` on the same
/// datum as [`enthalpy`] (J/kg).
pub fn vapor_enthalpy<B: WaterBackend + ?Sized>(
    backend: &B,
    datum: &WaterDatum,
    t: f64,
) -> Result<f64> {
    Ok((backend.molar_enthalpy_sat(t, 1.0)? - datum.enthalpy) / MW_H2O)
}
