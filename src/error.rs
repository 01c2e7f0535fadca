use thiserror::Error;

use crate::backend::if97::If97Error;
use crate::domain::DomainWarning;
use crate::properties::{FlashResult, SolveReport, Unknown};

#[derive(Error, Debug)]
pub enum LibrError {
    /// A saturation inversion did not reach its residual tolerance.
    /// `report` carries the best-effort value.
    #[error("{unknown} inversion did not converge: {report}")]
    NotConverged { unknown: Unknown, report: SolveReport },

    /// The two-phase flash hit its iteration cap.  `last` is the final
    /// iterate, not an equilibrium state.
    #[error("flash did not converge after {iterations} iterations (last iterate: {last})")]
    FlashNotConverged { last: FlashResult, iterations: usize },

    /// Input outside a correlation's calibrated range, raised only
    /// under [`DomainPolicy::Reject`](crate::DomainPolicy::Reject).
    #[error("outside calibrated range: {0}")]
    OutOfDomain(DomainWarning),

    /// Invalid or out‑of‑range input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The built-in IAPWS-IF97 water backend rejected a state.
    #[error("IF97 water property error: {0}")]
    Water(#[from] If97Error),

    /// Error returned by a REFPROP routine (ierr > 0).
    #[error("REFPROP error {code}: {message}")]
    Refprop { code: i32, message: String },

    /// The REFPROP DLL/so could not be loaded.
    #[error("REFPROP library not found: {0}")]
    LibraryNotFound(String),

    /// The REFPROP global lock is poisoned.
    #[error("REFPROP lock unavailable: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, LibrError>;
