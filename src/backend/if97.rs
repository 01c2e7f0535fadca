//! Built-in IAPWS-IF97 water backend.
//!
//! Implements the three parts of the Industrial Formulation 1997 the
//! LiBr engine needs: region 4 (saturation line), region 1 (compressed
//! and saturated liquid) and region 2 (vapour).  Internally the
//! formulation's own units are used (`p` in MPa, `h` in kJ/kg, `s` in
//! kJ/(kg·K), `v` in m³/kg); the [`WaterBackend`] impl converts to the
//! molar SI units of the seam.

use thiserror::Error;

use super::{validate_finite, validate_quality, WaterBackend};
use crate::composition::MW_H2O;
use crate::error::Result;
use crate::properties::WaterCriticalPoint;

/// Errors raised by the IF97 equations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum If97Error {
    /// Input is `NaN` or `±Inf`.
    #[error("non-finite input")]
    NonFiniteInput,
    /// Temperature (K) outside the range of the equation used.
    #[error("temperature {t_k} K is outside the IF97 range")]
    TemperatureOutOfRange { t_k: f64 },
    /// Pressure (MPa) outside the range of the equation used.
    #[error("pressure {p_mpa} MPa is outside the IF97 range")]
    PressureOutOfRange { p_mpa: f64 },
    /// An intermediate quantity left the formulation's domain.
    #[error("invalid intermediate value")]
    InvalidIntermediateValue,
}

type If97Result<T> = std::result::Result<T, If97Error>;

/// Specific gas constant of water, kJ/(kg·K).
const R: f64 = 0.461_526;

const T_TRIPLE: f64 = 273.15;
const T_CRIT: f64 = 647.096;
const P_CRIT_MPA: f64 = 22.064;
const T_MAX_R1: f64 = 623.15;

/// Lower end of the saturation line.  Region 4 is extrapolated below the
/// triple point along subcooled liquid; effective temperatures of
/// concentrated solutions reach about 220 K.
const T_SAT_MIN: f64 = 200.0;
/// Saturation pressure at [`T_SAT_MIN`], MPa.
const P_SAT_MIN_MPA: f64 = 3.514e-7;

/// IAPWS-95 critical-point caloric values used by Pátek–Klomfar.
const H_CRIT_MOLAR: f64 = 37_548.5;
const S_CRIT_MOLAR: f64 = 79.3933;
const RHO_CRIT_MASS: f64 = 322.0;

// ── Region 4: saturation line ───────────────────────────────────────

const R4_N: [f64; 10] = [
    1_167.052_145_276_7,
    -724_213.167_032_06,
    -17.073_846_940_092,
    12_020.824_702_47,
    -3_232_555.032_233_3,
    14.915_108_613_53,
    -4_823.265_736_159_1,
    405_113.405_420_57,
    -0.238_555_575_678_49,
    650.175_348_447_98,
];

fn checked(value: f64) -> If97Result<f64> {
    if value.is_finite() { Ok(value) } else { Err(If97Error::InvalidIntermediateValue) }
}

fn sqrt_nonneg(x: f64) -> If97Result<f64> {
    if x.is_nan() || x < -1e-12 {
        return Err(If97Error::InvalidIntermediateValue);
    }
    Ok(x.max(0.0).sqrt())
}

/// Saturation pressure (MPa) at `t_k`, valid 200–647.096 K.
fn psat_mpa(t_k: f64) -> If97Result<f64> {
    if !t_k.is_finite() {
        return Err(If97Error::NonFiniteInput);
    }
    if !(T_SAT_MIN..=T_CRIT).contains(&t_k) {
        return Err(If97Error::TemperatureOutOfRange { t_k });
    }
    let n = &R4_N;
    let v = t_k + n[8] / (t_k - n[9]);
    let a = v * v + n[0] * v + n[1];
    let b = n[2] * v * v + n[3] * v + n[4];
    let c = n[5] * v * v + n[6] * v + n[7];
    let root = sqrt_nonneg(b * b - 4.0 * a * c)?;
    checked((2.0 * c / (-b + root)).powi(4))
}

/// Saturation temperature (K) at `p_mpa`, valid 0.35 mPa–22.064 MPa.
fn tsat_k(p_mpa: f64) -> If97Result<f64> {
    if !p_mpa.is_finite() {
        return Err(If97Error::NonFiniteInput);
    }
    if !(P_SAT_MIN_MPA..=P_CRIT_MPA).contains(&p_mpa) {
        return Err(If97Error::PressureOutOfRange { p_mpa });
    }
    let n = &R4_N;
    let beta = p_mpa.powf(0.25);
    let e = beta * beta + n[2] * beta + n[5];
    let f = n[0] * beta * beta + n[3] * beta + n[6];
    let g = n[1] * beta * beta + n[4] * beta + n[7];
    let d = 2.0 * g / (-f - sqrt_nonneg(f * f - 4.0 * e * g)?);
    let root = sqrt_nonneg((n[9] + d).powi(2) - 4.0 * (n[8] + n[9] * d))?;
    checked((n[9] + d - root) / 2.0)
}

// ── Region 1: liquid ────────────────────────────────────────────────

const R1_I: [i32; 34] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 8, 8, 21, 23, 29,
    30, 31, 32,
];
const R1_J: [i32; 34] = [
    -2, -1, 0, 1, 2, 3, 4, 5, -9, -7, -1, 0, 1, 3, -3, 0, 1, 3, 17, -4, 0, 6, -5, -2, 10, -8, -11,
    -6, -29, -31, -38, -39, -40, -41,
];
const R1_N: [f64; 34] = [
    0.146_329_712_131_67,
    -0.845_481_871_691_14,
    -3.756_360_367_204,
    3.385_516_916_838_5,
    -0.957_919_633_878_72,
    0.157_720_385_132_28,
    -0.016_616_417_199_501,
    8.121_462_998_356_8e-4,
    2.831_908_012_380_4e-4,
    -6.070_630_156_587_4e-4,
    -0.018_990_068_218_419,
    -0.032_529_748_770_505,
    -0.021_841_717_175_414,
    -5.283_835_796_993e-5,
    -4.718_432_107_326_7e-4,
    -3.000_178_079_302_6e-4,
    4.766_139_390_698_7e-5,
    -4.414_184_533_084_6e-6,
    -7.269_499_629_759_4e-16,
    -3.167_964_484_505_4e-5,
    -2.827_079_798_531_2e-6,
    -8.520_512_812_010_3e-10,
    -2.242_528_190_8e-6,
    -6.517_122_289_560_1e-7,
    -1.434_172_993_792_4e-13,
    -4.051_699_686_011_7e-7,
    -1.273_430_174_164_1e-9,
    -1.742_487_123_063_4e-10,
    -6.876_213_129_553_1e-19,
    1.447_830_782_852_1e-20,
    2.633_578_166_279_5e-23,
    -1.194_762_264_007_1e-23,
    1.822_809_458_140_4e-24,
    -9.353_708_729_245_8e-26,
];

/// Dimensionless Gibbs energy γ and the derivatives the liquid
/// properties need, evaluated in one pass.
struct Gibbs1 {
    pi: f64,
    tau: f64,
    gamma: f64,
    g_pi: f64,
    g_tau: f64,
    g_tautau: f64,
}

impl Gibbs1 {
    fn at(p_mpa: f64, t_k: f64) -> If97Result<Self> {
        if !p_mpa.is_finite() || !t_k.is_finite() {
            return Err(If97Error::NonFiniteInput);
        }
        if p_mpa <= 0.0 {
            return Err(If97Error::PressureOutOfRange { p_mpa });
        }
        if !(T_TRIPLE..=T_MAX_R1).contains(&t_k) {
            return Err(If97Error::TemperatureOutOfRange { t_k });
        }
        let pi = p_mpa / 16.53;
        let tau = 1386.0 / t_k;
        let (dp, dt) = (7.1 - pi, tau - 1.222);
        let (mut gamma, mut g_pi, mut g_tau, mut g_tautau) = (0.0, 0.0, 0.0, 0.0);
        for k in 0..34 {
            let (i, j, n) = (R1_I[k], R1_J[k], R1_N[k]);
            gamma += n * dp.powi(i) * dt.powi(j);
            g_pi -= n * i as f64 * dp.powi(i - 1) * dt.powi(j);
            g_tau += n * dp.powi(i) * j as f64 * dt.powi(j - 1);
            g_tautau += n * dp.powi(i) * (j * (j - 1)) as f64 * dt.powi(j - 2);
        }
        Ok(Self { pi, tau, gamma, g_pi, g_tau, g_tautau })
    }

    /// kJ/kg
    fn enthalpy(&self, t_k: f64) -> If97Result<f64> {
        checked(R * t_k * self.tau * self.g_tau)
    }

    /// kJ/(kg·K)
    fn entropy(&self) -> If97Result<f64> {
        checked(R * (self.tau * self.g_tau - self.gamma))
    }

    /// kJ/(kg·K)
    fn cp(&self) -> If97Result<f64> {
        checked(-R * self.tau * self.tau * self.g_tautau)
    }

    /// m³/kg
    fn volume(&self, p_mpa: f64, t_k: f64) -> If97Result<f64> {
        checked(R * t_k / p_mpa * self.pi * self.g_pi / 1000.0)
    }
}

// ── Region 2: vapour ────────────────────────────────────────────────

const R2_J0: [i32; 9] = [0, 1, -5, -4, -3, -2, -1, 2, 3];
const R2_N0: [f64; 9] = [
    -9.692_768_650_021_7,
    10.086_655_968_018,
    -0.005_608_791_128_302,
    0.071_452_738_081_455,
    -0.407_104_982_239_28,
    1.424_081_917_144_4,
    -4.383_951_131_945,
    -0.284_086_324_607_72,
    0.021_268_463_753_307,
];
const R2_IR: [i32; 43] = [
    1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 5, 6, 6, 6, 7, 7, 7, 8, 8, 9, 10, 10, 10,
    16, 16, 18, 20, 20, 20, 21, 22, 23, 24, 24, 24,
];
const R2_JR: [i32; 43] = [
    0, 1, 2, 3, 6, 1, 2, 4, 7, 36, 0, 1, 3, 6, 35, 1, 2, 3, 7, 3, 16, 35, 0, 11, 25, 8, 36, 13, 4,
    10, 14, 29, 50, 57, 20, 35, 48, 21, 53, 39, 26, 40, 58,
];
const R2_NR: [f64; 43] = [
    -1.773_174_247_321_3e-3,
    -0.017_834_862_292_358,
    -0.045_996_013_696_365,
    -0.057_581_259_083_432,
    -0.050_325_278_727_93,
    -3.303_264_167_020_3e-5,
    -1.894_898_751_631_5e-4,
    -3.939_277_724_335_5e-3,
    -0.043_797_295_650_573,
    -2.667_454_791_408_7e-5,
    2.048_173_769_230_9e-8,
    4.387_066_728_443_5e-7,
    -3.227_767_723_857e-5,
    -1.503_392_454_214_8e-3,
    -0.040_668_253_562_649,
    -7.884_730_955_936_7e-10,
    1.279_071_785_228_5e-8,
    4.822_537_271_850_7e-7,
    2.292_207_633_766_1e-6,
    -1.671_476_645_106_1e-11,
    -2.117_147_232_135_5e-3,
    -23.895_741_934_104,
    -5.905_956_432_427e-18,
    -1.262_180_889_910_1e-6,
    -0.038_946_842_435_739,
    1.125_621_136_045_9e-11,
    -8.231_134_089_799_8,
    1.980_971_280_208_8e-8,
    1.040_696_521_017_4e-19,
    -1.023_474_709_592_9e-13,
    -1.001_817_937_951_1e-9,
    -8.088_290_864_698_5e-11,
    0.106_930_318_794_09,
    -0.336_622_505_741_71,
    8.918_584_535_542_1e-25,
    3.062_931_687_623_2e-13,
    -4.200_246_769_820_8e-6,
    -5.905_602_968_563_9e-26,
    3.782_694_761_345_7e-6,
    -1.276_860_893_468_1e-15,
    7.308_761_059_506_1e-29,
    5.541_471_535_077_8e-17,
    -9.436_970_724_121e-7,
];

/// Ideal-gas plus residual parts of γ for region 2.
struct Gibbs2 {
    tau: f64,
    gamma: f64,
    g_tau: f64,
}

impl Gibbs2 {
    fn at(p_mpa: f64, t_k: f64) -> If97Result<Self> {
        if !p_mpa.is_finite() || !t_k.is_finite() {
            return Err(If97Error::NonFiniteInput);
        }
        if p_mpa <= 0.0 {
            return Err(If97Error::PressureOutOfRange { p_mpa });
        }
        if t_k < T_TRIPLE {
            return Err(If97Error::TemperatureOutOfRange { t_k });
        }
        let pi = p_mpa;
        let tau = 540.0 / t_k;
        let mut gamma = pi.ln();
        let mut g_tau = 0.0;
        for k in 0..9 {
            let (j, n) = (R2_J0[k], R2_N0[k]);
            gamma += n * tau.powi(j);
            g_tau += n * j as f64 * tau.powi(j - 1);
        }
        let dt = tau - 0.5;
        for k in 0..43 {
            let (i, j, n) = (R2_IR[k], R2_JR[k], R2_NR[k]);
            gamma += n * pi.powi(i) * dt.powi(j);
            g_tau += n * pi.powi(i) * j as f64 * dt.powi(j - 1);
        }
        Ok(Self { tau, gamma, g_tau })
    }

    /// kJ/kg
    fn enthalpy(&self, t_k: f64) -> If97Result<f64> {
        checked(R * t_k * self.tau * self.g_tau)
    }

    /// kJ/(kg·K)
    fn entropy(&self) -> If97Result<f64> {
        checked(R * (self.tau * self.g_tau - self.gamma))
    }
}

// ── Backend ─────────────────────────────────────────────────────────

/// kJ/kg (or kJ/(kg·K)) → J/mol (or J/(mol·K)).
fn to_molar(specific: f64) -> f64 {
    specific * 1000.0 * MW_H2O
}

/// IAPWS-IF97 water, stateless and always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct If97Water;

impl If97Water {
    pub fn new() -> Self {
        Self
    }

    /// Saturated liquid and vapour specific values of `f` at `t_k`,
    /// blended linearly by `quality`.
    fn saturated<F, G>(t_k: f64, quality: f64, liquid: F, vapour: G) -> Result<f64>
    where
        F: Fn(&Gibbs1) -> If97Result<f64>,
        G: Fn(&Gibbs2) -> If97Result<f64>,
    {
        validate_quality(quality)?;
        let p = psat_mpa(t_k)?;
        let mut value = 0.0;
        if quality < 1.0 {
            value += (1.0 - quality) * liquid(&Gibbs1::at(p, t_k)?)?;
        }
        if quality > 0.0 {
            value += quality * vapour(&Gibbs2::at(p, t_k)?)?;
        }
        Ok(value)
    }
}

impl WaterBackend for If97Water {
    fn name(&self) -> &str {
        "IAPWS-IF97"
    }

    fn saturation_pressure(&self, t: f64, quality: f64) -> Result<f64> {
        validate_quality(quality)?;
        Ok(psat_mpa(t)? * 1e6)
    }

    fn saturation_temperature(&self, p: f64, quality: f64) -> Result<f64> {
        validate_quality(quality)?;
        Ok(tsat_k(p * 1e-6)?)
    }

    fn molar_enthalpy_sat(&self, t: f64, quality: f64) -> Result<f64> {
        let h = Self::saturated(t, quality, |g| g.enthalpy(t), |g| g.enthalpy(t))?;
        Ok(to_molar(h))
    }

    fn molar_entropy_sat(&self, t: f64, quality: f64) -> Result<f64> {
        let s = Self::saturated(t, quality, Gibbs1::entropy, Gibbs2::entropy)?;
        Ok(to_molar(s))
    }

    fn molar_heat_capacity_sat(&self, t: f64) -> Result<f64> {
        let p = psat_mpa(t)?;
        Ok(to_molar(Gibbs1::at(p, t)?.cp()?))
    }

    fn molar_density_sat(&self, t: f64) -> Result<f64> {
        let p = psat_mpa(t)?;
        let v = Gibbs1::at(p, t)?.volume(p, t)?;
        Ok(1.0 / (v * MW_H2O))
    }

    fn molar_enthalpy(&self, t: f64, p: f64) -> Result<f64> {
        validate_finite("pressure", p)?;
        let p_mpa = p * 1e-6;
        let h = if t <= T_MAX_R1 && p_mpa >= psat_mpa(t)? {
            Gibbs1::at(p_mpa, t)?.enthalpy(t)?
        } else {
            Gibbs2::at(p_mpa, t)?.enthalpy(t)?
        };
        Ok(to_molar(h))
    }

    fn molar_entropy(&self, t: f64, p: f64) -> Result<f64> {
        validate_finite("pressure", p)?;
        let p_mpa = p * 1e-6;
        let s = if t <= T_MAX_R1 && p_mpa >= psat_mpa(t)? {
            Gibbs1::at(p_mpa, t)?.entropy()?
        } else {
            Gibbs2::at(p_mpa, t)?.entropy()?
        };
        Ok(to_molar(s))
    }

    fn critical_point(&self) -> Result<WaterCriticalPoint> {
        Ok(WaterCriticalPoint {
            temperature: T_CRIT,
            pressure: P_CRIT_MPA * 1e6,
            enthalpy: H_CRIT_MOLAR,
            entropy: S_CRIT_MOLAR,
            density: RHO_CRIT_MASS / MW_H2O,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn region4_reference_points() {
        assert_relative_eq!(psat_mpa(300.0).unwrap(), 0.003_536_589_41, max_relative = 1e-8);
        assert_relative_eq!(psat_mpa(500.0).unwrap(), 2.638_897_76, max_relative = 1e-8);
        assert_relative_eq!(tsat_k(0.1).unwrap(), 372.755_919, max_relative = 1e-8);
        assert_relative_eq!(tsat_k(1.0).unwrap(), 453.035_632, max_relative = 1e-8);
    }

    #[test]
    fn region1_table5() {
        let g = Gibbs1::at(3.0, 300.0).unwrap();
        assert_relative_eq!(g.volume(3.0, 300.0).unwrap(), 0.001_002_151_68, max_relative = 1e-8);
        assert_relative_eq!(g.enthalpy(300.0).unwrap(), 115.331_273, max_relative = 1e-8);
        assert_relative_eq!(g.entropy().unwrap(), 0.392_294_792, max_relative = 1e-8);
        assert_relative_eq!(g.cp().unwrap(), 4.173_012_18, max_relative = 1e-8);

        let g = Gibbs1::at(3.0, 500.0).unwrap();
        assert_relative_eq!(g.enthalpy(500.0).unwrap(), 975.542_239, max_relative = 1e-8);
        assert_relative_eq!(g.entropy().unwrap(), 2.580_419_12, max_relative = 1e-8);
    }

    #[test]
    fn region2_table15() {
        let g = Gibbs2::at(0.0035, 300.0).unwrap();
        assert_relative_eq!(g.enthalpy(300.0).unwrap(), 2_549.911_45, max_relative = 1e-8);
        assert_relative_eq!(g.entropy().unwrap(), 8.522_389_67, max_relative = 1e-8);

        let g = Gibbs2::at(0.0035, 700.0).unwrap();
        assert_relative_eq!(g.enthalpy(700.0).unwrap(), 3_335.683_75, max_relative = 1e-8);
    }

    #[test]
    fn saturation_line_extends_below_triple_point() {
        assert_relative_eq!(psat_mpa(T_TRIPLE).unwrap(), 6.112_126_77e-4, max_relative = 1e-8);
        for t in [205.0, 220.0, 250.0, 265.0] {
            let p = psat_mpa(t).unwrap();
            assert!(p < 6.112e-4);
            assert_relative_eq!(tsat_k(p).unwrap(), t, max_relative = 1e-9);
        }
        assert_relative_eq!(psat_mpa(220.0).unwrap(), 4.461_545_5e-6, max_relative = 1e-6);
    }

    #[test]
    fn saturation_line_has_a_floor() {
        assert_eq!(psat_mpa(150.0), Err(If97Error::TemperatureOutOfRange { t_k: 150.0 }));
        assert!(matches!(tsat_k(1e-8), Err(If97Error::PressureOutOfRange { .. })));
        // region 1 itself still stops at the triple point
        assert!(matches!(Gibbs1::at(psat_mpa(250.0).unwrap(), 250.0), Err(If97Error::TemperatureOutOfRange { .. })));
    }
}
