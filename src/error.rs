/**
 * Fatal conditions the core can raise (§7). Construction errors are
 * returned normally; contract violations are asserted against in debug
 * builds and otherwise produced as clamped SAFE_HYDRO state (see
 * `state::CellState::enforce_safe_hydro`).
 */
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {

    #[error("boundary {axis:?} {side:?} is periodic but its opposite face is not")]
    AsymmetricPeriodicity { axis: crate::config::Axis, side: crate::config::Side },

    #[error("boundary {axis:?} {side:?} is periodic but the grid is not periodic along that axis")]
    PeriodicityMismatchWithGrid { axis: crate::config::Axis, side: crate::config::Side },

    #[error("boundary {axis:?} {side:?} is 'bondi' but no Bondi profile was supplied")]
    MissingBondiProfile { axis: crate::config::Axis, side: crate::config::Side },

    #[error("unknown Riemann solver '{0}'")]
    UnknownSolver(String),

    #[error("{field} must be in the range {low}..={high}, got {value}")]
    OutOfRange { field: &'static str, low: f64, high: f64, value: f64 },

    #[error("numerical contract violation in {operation}: {message}")]
    ContractViolation { operation: &'static str, message: String },
}
