//! Classified fatal errors.
//!
//! Most failures travel as `anyhow` context chains. The two kinds the
//! orchestrator must tell apart by exit code are typed here so `main` can
//! find them with a downcast.

/// Fatal step errors with a dedicated exit code.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Missing or malformed step input: categories, patterns, artifacts.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Wrong number of positional arguments for a step.
    #[error("{step}: expected {expected} positional argument(s), got {actual}")]
    Arguments {
        step: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl GateError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    pub fn arguments(step: &'static str, expected: usize, actual: usize) -> Self {
        Self::Arguments {
            step,
            expected,
            actual,
        }
    }
}
