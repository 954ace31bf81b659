//! Error types for waveform synthesis.

use thiserror::Error;
use wf_core::WfError;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors raised by synthesizers, the resampler and the linear solver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    /// Invalid argument provided by the caller.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Two inputs that must pair up element by element have different lengths.
    #[error("Length mismatch for {what}: expected {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Not enough samples for the requested interpolation.
    #[error("Too few samples for {what}: need at least {needed}, got {got}")]
    TooFewSamples {
        what: &'static str,
        needed: usize,
        got: usize,
    },

    /// Zero or non-finite pivot during tridiagonal elimination.
    #[error("Singular pivot at row {row}: {pivot}")]
    SingularPivot { row: usize, pivot: f64 },

    /// Malformed line in a waveform text file.
    #[error("Parse error on line {line}: {text:?}")]
    Parse { line: usize, text: String },

    #[error(transparent)]
    Core(#[from] WfError),
}
