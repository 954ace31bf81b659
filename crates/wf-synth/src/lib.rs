//! Waveform synthesis for closed-loop experiment optimization.
//!
//! An optimizer hands over a short parameter vector; the synthesizers in this
//! crate expand it into a dense, uniformly sampled control waveform. Each
//! synthesizer is a pure function of
//! `(start, end, duration, sample_rate, params)`:
//!
//! - [`poly_log_blend`]: polynomial plus logarithmic envelope, endpoint
//!   enforced through the back-solved leading coefficient
//! - [`linear_ramp`]: straight line between the endpoints
//! - [`cubic_spline`]: clamped cubic spline through equally spaced control
//!   points (uses the [`tridiag`] solver)
//! - [`bezier_handles`]: piecewise quadratic Bezier through shrinking handles
//! - [`sigmoid_like`]: saturating sigmoid of a polynomial
//!
//! [`resample`] changes the time resolution of an existing waveform, and
//! [`WaveSpec`] bundles a synthesizer choice with its boundary values so that
//! it can be loaded from configuration.

pub mod bezier;
pub mod error;
pub mod linear;
pub mod polylog;
pub mod resample;
pub mod shape;
pub mod sigmoid;
pub mod spline;
pub mod tridiag;
pub mod waveform;

pub use bezier::bezier_handles;
pub use error::{SynthError, SynthResult};
pub use linear::linear_ramp;
pub use polylog::poly_log_blend;
pub use resample::resample;
pub use shape::{WaveShape, WaveSpec};
pub use sigmoid::sigmoid_like;
pub use spline::cubic_spline;
pub use tridiag::{TridiagonalSystem, solve_tridiagonal};
pub use waveform::Waveform;
