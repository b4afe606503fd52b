//! Stable exit codes for gate CI steps.

use crate::error::GateError;

/// Step succeeded and wrote its JSON document.
pub const OK: i32 = 0;
/// Step failed on invalid configuration, malformed input, or other errors.
pub const INVALID: i32 = 1;
/// Wrong positional arguments or CLI usage error.
pub const USAGE: i32 = 2;
/// `gate report --exit-status` produced a failed report.
pub const REPORT_FAILED: i32 = 3;

/// Map a fatal error to its exit code.
///
/// Looks through the whole context chain, so a [`GateError`] wrapped with
/// `.context(..)` is still classified.
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(gate_err) = cause.downcast_ref::<GateError>() {
            return match gate_err {
                GateError::Arguments { .. } => USAGE,
                GateError::Configuration { .. } => INVALID,
            };
        }
    }
    INVALID
}
