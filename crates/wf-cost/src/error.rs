//! Error types for cost evaluation.

use thiserror::Error;
use wf_core::WfError;
use wf_synth::SynthError;

/// Errors encountered while computing a cost.
#[derive(Error, Debug)]
pub enum CostError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Malformed {what}: expected at least {expected} values, got {got}")]
    Malformed {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Measurement channel error: {message}")]
    Channel { message: String },

    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    #[error("Core error: {0}")]
    Core(#[from] WfError),
}

pub type CostResult<T> = Result<T, CostError>;

impl From<std::io::Error> for CostError {
    fn from(e: std::io::Error) -> Self {
        CostError::Channel {
            message: e.to_string(),
        }
    }
}
