//! Minimal FFI layer over the NIST REFPROP shared library.
//!
//! Only the routines the water backend needs are resolved: path and
//! fluid setup, saturation at given T or P, the critical point, a
//! T–P flash and the (T, ρ) property call.  The library is loaded at
//! runtime with [`libloading`]; every symbol is resolved once when the
//! library is opened.
//!
//! Values cross this boundary in REFPROP's molar units: K, kPa, mol/L,
//! J/mol, J/(mol·K).

use std::os::raw::{c_char, c_double, c_int, c_long};
use std::path::Path;

use libloading::Library;

pub const REFPROP_STRLEN: usize = 255;
pub const REFPROP_FILESTR: usize = 10000;
pub const REFPROP_NC_MAX: usize = 20;

#[derive(Debug)]
pub enum RefpropSysError {
    /// The DLL/so could not be found or loaded.
    LibraryLoadFailed(String),
    /// A required symbol was not found in the library.
    SymbolNotFound(String),
}

impl std::fmt::Display for RefpropSysError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LibraryLoadFailed(msg) => write!(f, "REFPROP library load failed: {msg}"),
            Self::SymbolNotFound(sym) => write!(f, "symbol {sym} missing from REFPROP library"),
        }
    }
}

impl std::error::Error for RefpropSysError {}

// ── Fortran signatures ──────────────────────────────────────────────

type FnSetpath = unsafe extern "C" fn(*const c_char, c_long);

type FnSetup = unsafe extern "C" fn(
    *const c_int, *const c_char, *const c_char, *const c_char,
    *mut c_int, *mut c_char,
    c_long, c_long, c_long, c_long,
);

/// TPFLSHdll(t, p, z, d, dl, dv, x, y, q, e, h, s, cv, cp, w, ierr, herr, len)
type FnTpFlash = unsafe extern "C" fn(
    *const c_double, *const c_double, *const c_double,
    *mut c_double, *mut c_double, *mut c_double, *mut c_double, *mut c_double,
    *mut c_double, *mut c_double, *mut c_double, *mut c_double, *mut c_double,
    *mut c_double, *mut c_double,
    *mut c_int, *mut c_char, c_long,
);

/// SATTdll / SATPdll(in, z, kph, out, dl, dv, x, y, ierr, herr, len)
type FnSat = unsafe extern "C" fn(
    *const c_double, *const c_double, *const c_int,
    *mut c_double, *mut c_double, *mut c_double, *mut c_double, *mut c_double,
    *mut c_int, *mut c_char, c_long,
);

/// CRITPdll(z, tc, pc, dc, ierr, herr, len)
type FnCritp = unsafe extern "C" fn(
    *const c_double, *mut c_double, *mut c_double, *mut c_double,
    *mut c_int, *mut c_char, c_long,
);

/// THERMdll(t, d, z, p, e, h, s, cv, cp, w, hjt)
type FnTherm = unsafe extern "C" fn(
    *const c_double, *const c_double, *const c_double,
    *mut c_double, *mut c_double, *mut c_double, *mut c_double,
    *mut c_double, *mut c_double, *mut c_double, *mut c_double,
);

// ── Call results ────────────────────────────────────────────────────

/// `ierr`/`herr` pair reported by a REFPROP routine.  Positive codes
/// are errors, negative codes warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub code: i32,
    pub message: String,
}

impl Status {
    fn from_raw(ierr: c_int, herr: &[c_char]) -> Self {
        Self { code: ierr, message: from_c_string(herr) }
    }
}

/// One point on the saturation line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SatPoint {
    pub temperature: f64,
    pub pressure: f64,
    pub liquid_density: f64,
    pub vapor_density: f64,
}

/// Caloric state returned by THERMdll or TPFLSHdll.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermState {
    pub pressure: f64,
    pub density: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub cp: f64,
}

/// Saturation side selector for SATTdll / SATPdll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bubble = 1,
    Dew = 2,
}

// ── Library handle ──────────────────────────────────────────────────

/// A loaded REFPROP library with its function pointers resolved.
///
/// The wrappers below are safe: every pointer handed to Fortran comes
/// from a local buffer sized to REFPROP's documented limits.  REFPROP
/// itself keeps global state, so callers must serialise access.
pub struct RefpropLibrary {
    _lib: Library,
    fn_setpath: FnSetpath,
    fn_setup: FnSetup,
    fn_tpflsh: FnTpFlash,
    fn_satt: FnSat,
    fn_satp: FnSat,
    fn_critp: FnCritp,
    fn_therm: FnTherm,
}

impl RefpropLibrary {
    fn resolve<T: Copy>(lib: &Library, name: &[u8]) -> Result<T, RefpropSysError> {
        // SAFETY: the type aliases above match REFPROP 9/10's exported
        // Fortran routines.
        let sym: libloading::Symbol<T> = unsafe { lib.get(name) }.map_err(|_| {
            let display = String::from_utf8_lossy(&name[..name.len().saturating_sub(1)]);
            RefpropSysError::SymbolNotFound(display.into_owned())
        })?;
        Ok(*sym)
    }

    fn resolve_all(lib: Library) -> Result<Self, RefpropSysError> {
        Ok(Self {
            fn_setpath: Self::resolve(&lib, b"SETPATHdll\0")?,
            fn_setup: Self::resolve(&lib, b"SETUPdll\0")?,
            fn_tpflsh: Self::resolve(&lib, b"TPFLSHdll\0")?,
            fn_satt: Self::resolve(&lib, b"SATTdll\0")?,
            fn_satp: Self::resolve(&lib, b"SATPdll\0")?,
            fn_critp: Self::resolve(&lib, b"CRITPdll\0")?,
            fn_therm: Self::resolve(&lib, b"THERMdll\0")?,
            _lib: lib,
        })
    }

    /// Load the library from a REFPROP installation directory, trying
    /// the platform's usual file names, then the system search path.
    pub fn load_from_dir(dir: &Path) -> Result<Self, RefpropSysError> {
        let candidates: &[&str] = if cfg!(target_os = "windows") {
            if cfg!(target_pointer_width = "64") {
                &["REFPRP64.DLL", "REFPROP.DLL"]
            } else {
                &["REFPROP.DLL", "REFPRP64.DLL"]
            }
        } else if cfg!(target_os = "macos") {
            &["librefprop.dylib", "libREFPROP.dylib"]
        } else {
            &["librefprop.so", "libREFPROP.so"]
        };

        let mut errors = Vec::new();
        for name in candidates {
            let full = dir.join(name);
            if !full.exists() {
                continue;
            }
            // SAFETY: loading a shared library runs its initialisers;
            // REFPROP's have no preconditions.
            match unsafe { Library::new(&full) } {
                Ok(lib) => return Self::resolve_all(lib),
                Err(e) => errors.push(format!("{}: {e}", full.display())),
            }
        }
        for name in candidates {
            // SAFETY: as above.
            if let Ok(lib) = unsafe { Library::new(*name) } {
                return Self::resolve_all(lib);
            }
        }

        let detail = if errors.is_empty() {
            format!("no REFPROP library in {} (tried {candidates:?})", dir.display())
        } else {
            format!("REFPROP library present but not loadable: {}", errors.join("; "))
        };
        Err(RefpropSysError::LibraryLoadFailed(detail))
    }

    // ── Safe wrappers ───────────────────────────────────────────────

    /// Point REFPROP at its installation directory.
    pub fn set_path(&self, dir: &str) {
        let buf = to_c_string(dir, REFPROP_STRLEN);
        // SAFETY: `buf` is REFPROP_STRLEN long and NUL padded.
        unsafe { (self.fn_setpath)(buf.as_ptr(), dir.len().min(REFPROP_STRLEN - 1) as c_long) };
    }

    /// Load a single fluid file (e.g. `"WATER.FLD"`) with the default
    /// reference state.
    pub fn setup_pure(&self, fluid_file: &str) -> Status {
        let nc: c_int = 1;
        let hfld = to_c_string(fluid_file, REFPROP_FILESTR);
        let hfmix = to_c_string("HMX.BNC", REFPROP_STRLEN);
        let hrf = to_c_string("DEF", REFPROP_STRLEN);
        let mut ierr: c_int = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];
        // SAFETY: all buffers outlive the call and match the lengths passed.
        unsafe {
            (self.fn_setup)(
                &nc, hfld.as_ptr(), hfmix.as_ptr(), hrf.as_ptr(),
                &mut ierr, herr.as_mut_ptr(),
                REFPROP_FILESTR as c_long, REFPROP_STRLEN as c_long,
                REFPROP_STRLEN as c_long, REFPROP_STRLEN as c_long,
            );
        }
        Status::from_raw(ierr, &herr)
    }

    /// Saturation state at temperature `t` (K).
    pub fn sat_t(&self, t: f64, side: Side) -> (SatPoint, Status) {
        let ((p, dl, dv), status) = self.call_sat(self.fn_satt, t, side);
        let point = SatPoint { temperature: t, pressure: p, liquid_density: dl, vapor_density: dv };
        (point, status)
    }

    /// Saturation state at pressure `p` (kPa).
    pub fn sat_p(&self, p: f64, side: Side) -> (SatPoint, Status) {
        let ((t, dl, dv), status) = self.call_sat(self.fn_satp, p, side);
        let point = SatPoint { temperature: t, pressure: p, liquid_density: dl, vapor_density: dv };
        (point, status)
    }

    /// Returns (solved T or P, liquid density, vapour density).
    fn call_sat(&self, f: FnSat, input: f64, side: Side) -> ((f64, f64, f64), Status) {
        let z = pure_composition();
        let kph = side as c_int;
        let (mut out, mut dl, mut dv) = (0.0, 0.0, 0.0);
        let mut x = [0.0; REFPROP_NC_MAX];
        let mut y = [0.0; REFPROP_NC_MAX];
        let mut ierr: c_int = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];
        // SAFETY: every pointer refers to a local that outlives the call;
        // the composition arrays hold REFPROP_NC_MAX entries.
        unsafe {
            f(
                &input, z.as_ptr(), &kph,
                &mut out, &mut dl, &mut dv,
                x.as_mut_ptr(), y.as_mut_ptr(),
                &mut ierr, herr.as_mut_ptr(), REFPROP_STRLEN as c_long,
            );
        }
        ((out, dl, dv), Status::from_raw(ierr, &herr))
    }

    /// Critical temperature (K), pressure (kPa) and density (mol/L).
    pub fn critical(&self) -> ((f64, f64, f64), Status) {
        let z = pure_composition();
        let (mut tc, mut pc, mut dc) = (0.0, 0.0, 0.0);
        let mut ierr: c_int = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];
        // SAFETY: see `call_sat`.
        unsafe {
            (self.fn_critp)(
                z.as_ptr(), &mut tc, &mut pc, &mut dc,
                &mut ierr, herr.as_mut_ptr(), REFPROP_STRLEN as c_long,
            );
        }
        ((tc, pc, dc), Status::from_raw(ierr, &herr))
    }

    /// Single-phase flash at `t` (K) and `p` (kPa).
    pub fn tp_flash(&self, t: f64, p: f64) -> (ThermState, Status) {
        let z = pure_composition();
        let mut x = [0.0; REFPROP_NC_MAX];
        let mut y = [0.0; REFPROP_NC_MAX];
        let mut state = ThermState { pressure: p, ..ThermState::default() };
        let (mut dl, mut dv, mut q, mut e, mut cv, mut w) = (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let mut ierr: c_int = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];
        // SAFETY: see `call_sat`.
        unsafe {
            (self.fn_tpflsh)(
                &t, &p, z.as_ptr(),
                &mut state.density, &mut dl, &mut dv, x.as_mut_ptr(), y.as_mut_ptr(),
                &mut q, &mut e, &mut state.enthalpy, &mut state.entropy, &mut cv,
                &mut state.cp, &mut w,
                &mut ierr, herr.as_mut_ptr(), REFPROP_STRLEN as c_long,
            );
        }
        (state, Status::from_raw(ierr, &herr))
    }

    /// Properties at `t` (K) and molar density `d` (mol/L).  THERMdll
    /// reports no errors.
    pub fn therm(&self, t: f64, d: f64) -> ThermState {
        let z = pure_composition();
        let mut state = ThermState { density: d, ..ThermState::default() };
        let (mut e, mut cv, mut w, mut hjt) = (0.0, 0.0, 0.0, 0.0);
        // SAFETY: see `call_sat`.
        unsafe {
            (self.fn_therm)(
                &t, &d, z.as_ptr(),
                &mut state.pressure, &mut e, &mut state.enthalpy, &mut state.entropy,
                &mut cv, &mut state.cp, &mut w, &mut hjt,
            );
        }
        state
    }
}

fn pure_composition() -> [f64; REFPROP_NC_MAX] {
    let mut z = [0.0; REFPROP_NC_MAX];
    z[0] = 1.0;
    z
}

// ── String helpers ──────────────────────────────────────────────────

/// Zero-padded Fortran string buffer of length `max_len`.
pub fn to_c_string(s: &str, max_len: usize) -> Vec<c_char> {
    let mut buffer = vec![0 as c_char; max_len];
    for (dst, &src) in buffer.iter_mut().zip(s.as_bytes().iter().take(max_len - 1)) {
        *dst = src as c_char;
    }
    buffer
}

/// Trimmed Rust string from a NUL-terminated (or full) Fortran buffer.
pub fn from_c_string(buffer: &[c_char]) -> String {
    let bytes: Vec<u8> = buffer.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_string_round_trip_truncates() {
        let buf = to_c_string("WATER.FLD", 6);
        assert_eq!(buf.len(), 6);
        assert_eq!(from_c_string(&buf), "WATER");
        assert_eq!(from_c_string(&to_c_string("  HMX.BNC ", 32)), "HMX.BNC");
    }

    #[test]
    fn missing_directory_fails_cleanly() {
        let err = RefpropLibrary::load_from_dir(Path::new("/definitely/not/refprop"));
        assert!(matches!(err, Err(RefpropSysError::LibraryLoadFailed(_))));
    }
}
