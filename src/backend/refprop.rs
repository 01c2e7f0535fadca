use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, Once};

use log::{debug, warn};

use super::{validate_finite, validate_quality, WaterBackend};
use crate::error::{LibrError, Result};
use crate::properties::WaterCriticalPoint;
use crate::sys::{RefpropLibrary, SatPoint, Side, Status, ThermState};

// ── Global lock (REFPROP is NOT thread-safe) ────────────────────────
// The lock value tracks which backend ID last ran SETUPdll so a
// backend only re-initialises when another one has been active.
static REFPROP_LOCK: Mutex<usize> = Mutex::new(0);
static NEXT_BACKEND_ID: AtomicUsize = AtomicUsize::new(1);

const WATER_FLD: &str = "WATER.FLD";

/// Pure water evaluated by NIST REFPROP (IAPWS-95).
///
/// The library is located at runtime: `REFPROP_PATH` (also read from a
/// `.env` file), then the platform's standard install directories.
///
/// ```no_run
/// use libr::{LibrSolution, RefpropWater};
///
/// let solution = LibrSolution::new(RefpropWater::new()?);
/// let p = solution.pressure(323.15, 0.5)?;
/// # Ok::<(), libr::LibrError>(())
/// ```
pub struct RefpropWater {
    id: usize,
    lib: RefpropLibrary,
    refprop_path: PathBuf,
    critical: WaterCriticalPoint,
}

impl RefpropWater {
    // ================================================================
    //  Constructors
    // ================================================================

    /// Locate REFPROP and set up `WATER.FLD`.
    pub fn new() -> Result<Self> {
        Self::load_dotenv();
        let path = Self::find_refprop_path()?;
        Self::from_dir(path)
    }

    /// Set up `WATER.FLD` from an explicit REFPROP directory.
    pub fn from_dir(refprop_path: impl AsRef<Path>) -> Result<Self> {
        let path = refprop_path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(LibrError::LibraryNotFound(path.display().to_string()));
        }
        let lib = RefpropLibrary::load_from_dir(&path)
            .map_err(|e| LibrError::LibraryNotFound(e.to_string()))?;

        let mut backend = Self {
            id: NEXT_BACKEND_ID.fetch_add(1, Ordering::Relaxed),
            lib,
            refprop_path: path,
            critical: WaterCriticalPoint {
                temperature: f64::NAN,
                pressure: f64::NAN,
                enthalpy: f64::NAN,
                entropy: f64::NAN,
                density: f64::NAN,
            },
        };

        let mut cid = Self::lock_refprop()?;
        backend.setup_inner()?;
        *cid = backend.id;
        backend.critical = backend.critical_inner()?;
        drop(cid);

        debug!(
            "REFPROP water ready from {} (Tc = {:.3} K)",
            backend.refprop_path.display(),
            backend.critical.temperature
        );
        Ok(backend)
    }

    // ── .env loading (once) ──────────────────────────────────────────

    fn load_dotenv() {
        static DOTENV_INIT: Once = Once::new();
        DOTENV_INIT.call_once(|| {
            if dotenvy::dotenv().is_ok() {
                return;
            }
            if let Ok(dir) = env::var("CARGO_MANIFEST_DIR") {
                let p = PathBuf::from(dir).join(".env");
                if p.exists() {
                    let _ = dotenvy::from_path(&p);
                }
            }
        });
    }

    // ── Path discovery ───────────────────────────────────────────────

    fn find_refprop_path() -> Result<PathBuf> {
        let mut tried = Vec::<String>::new();

        if let Ok(path) = env::var("REFPROP_PATH") {
            if Path::new(&path).exists() {
                return Ok(PathBuf::from(path));
            }
            tried.push(format!("REFPROP_PATH={path} (directory does not exist)"));
        }

        #[cfg(target_os = "windows")]
        let standard_paths = [r"C:\Program Files (x86)\REFPROP", r"C:\Program Files\REFPROP"];
        #[cfg(target_os = "macos")]
        let standard_paths = ["/Applications/REFPROP", "/opt/refprop"];
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        let standard_paths = ["/opt/refprop", "/usr/local/lib/refprop"];

        for path in standard_paths {
            if Path::new(path).exists() {
                return Ok(PathBuf::from(path));
            }
            tried.push(format!("{path} (not found)"));
        }

        Err(LibrError::LibraryNotFound(format!(
            "REFPROP directory not found. Tried:\n  - {}\n\
             Set REFPROP_PATH to the directory containing the REFPROP library and fluids/.",
            tried.join("\n  - ")
        )))
    }

    // ================================================================
    //  Locking and setup
    // ================================================================

    /// Acquire the global REFPROP lock without panicking on poison.
    fn lock_refprop() -> Result<MutexGuard<'static, usize>> {
        REFPROP_LOCK
            .lock()
            .map_err(|_| LibrError::Lock("a previous REFPROP call panicked".into()))
    }

    /// SETPATHdll + SETUPdll.  **Caller must hold REFPROP_LOCK.**
    fn setup_inner(&self) -> Result<()> {
        self.lib.set_path(&self.refprop_path.to_string_lossy());
        Self::check(self.lib.setup_pure(WATER_FLD))
    }

    /// Re-run setup if another backend used REFPROP since our last call.
    fn ensure_setup(&self, current_id: &mut usize) -> Result<()> {
        if *current_id != self.id {
            self.setup_inner()?;
            *current_id = self.id;
        }
        Ok(())
    }

    /// Run `f` with REFPROP locked and set up for water.
    fn with_refprop<T>(&self, f: impl FnOnce(&RefpropLibrary) -> Result<T>) -> Result<T> {
        let mut cid = Self::lock_refprop()?;
        self.ensure_setup(&mut cid)?;
        f(&self.lib)
    }

    fn critical_inner(&self) -> Result<WaterCriticalPoint> {
        let ((tc, pc, dc), status) = self.lib.critical();
        Self::check(status)?;
        let state = self.lib.therm(tc, dc);
        Ok(WaterCriticalPoint {
            temperature: tc,
            pressure: pc * 1e3,
            enthalpy: state.enthalpy,
            entropy: state.entropy,
            density: dc * 1e3,
        })
    }

    // ================================================================
    //  Helpers
    // ================================================================

    /// `ierr > 0` is an error, `ierr < 0` a warning that is logged.
    fn check(status: Status) -> Result<()> {
        if status.code > 0 {
            return Err(LibrError::Refprop { code: status.code, message: status.message });
        }
        if status.code < 0 {
            warn!("REFPROP warning {}: {}", status.code, status.message);
        }
        Ok(())
    }

    fn side(quality: f64) -> Side {
        if quality > 0.5 { Side::Dew } else { Side::Bubble }
    }

    fn saturation_at(lib: &RefpropLibrary, t: f64) -> Result<SatPoint> {
        let (point, status) = lib.sat_t(t, Side::Bubble);
        Self::check(status)?;
        Ok(point)
    }

    /// Quality-weighted blend of a saturated-liquid and saturated-vapour
    /// property evaluated by THERMdll.
    fn blend_saturated(&self, t: f64, quality: f64, pick: fn(&ThermState) -> f64) -> Result<f64> {
        validate_finite("temperature", t)?;
        validate_quality(quality)?;
        self.with_refprop(|lib| {
            let sat = Self::saturation_at(lib, t)?;
            let liquid = pick(&lib.therm(t, sat.liquid_density));
            let vapour = pick(&lib.therm(t, sat.vapor_density));
            Ok((1.0 - quality) * liquid + quality * vapour)
        })
    }

    fn flash(&self, t: f64, p: f64) -> Result<ThermState> {
        validate_finite("temperature", t)?;
        validate_finite("pressure", p)?;
        self.with_refprop(|lib| {
            let (state, status) = lib.tp_flash(t, p * 1e-3);
            Self::check(status)?;
            Ok(state)
        })
    }
}

impl WaterBackend for RefpropWater {
    fn name(&self) -> &str {
        "REFPROP"
    }

    fn saturation_pressure(&self, t: f64, quality: f64) -> Result<f64> {
        validate_finite("temperature", t)?;
        validate_quality(quality)?;
        self.with_refprop(|lib| {
            let (point, status) = lib.sat_t(t, Self::side(quality));
            Self::check(status)?;
            Ok(point.pressure * 1e3)
        })
    }

    fn saturation_temperature(&self, p: f64, quality: f64) -> Result<f64> {
        validate_finite("pressure", p)?;
        validate_quality(quality)?;
        self.with_refprop(|lib| {
            let (point, status) = lib.sat_p(p * 1e-3, Self::side(quality));
            Self::check(status)?;
            Ok(point.temperature)
        })
    }

    fn molar_enthalpy_sat(&self, t: f64, quality: f64) -> Result<f64> {
        self.blend_saturated(t, quality, |s| s.enthalpy)
    }

    fn molar_entropy_sat(&self, t: f64, quality: f64) -> Result<f64> {
        self.blend_saturated(t, quality, |s| s.entropy)
    }

    fn molar_heat_capacity_sat(&self, t: f64) -> Result<f64> {
        self.blend_saturated(t, 0.0, |s| s.cp)
    }

    fn molar_density_sat(&self, t: f64) -> Result<f64> {
        validate_finite("temperature", t)?;
        self.with_refprop(|lib| Ok(Self::saturation_at(lib, t)?.liquid_density * 1e3))
    }

    fn molar_enthalpy(&self, t: f64, p: f64) -> Result<f64> {
        Ok(self.flash(t, p)?.enthalpy)
    }

    fn molar_entropy(&self, t: f64, p: f64) -> Result<f64> {
        Ok(self.flash(t, p)?.entropy)
    }

    fn critical_point(&self) -> Result<WaterCriticalPoint> {
        Ok(self.critical.clone())
    }
}
