//! Configurable synthesizer selection.

use crate::bezier::bezier_handles;
use crate::error::SynthResult;
use crate::linear::linear_ramp;
use crate::polylog::poly_log_blend;
use crate::sigmoid::sigmoid_like;
use crate::spline::cubic_spline;
use crate::waveform::Waveform;
use serde::{Deserialize, Serialize};
use wf_core::{Real, SampleGrid, units};

/// Which interpolation policy turns a parameter vector into a waveform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaveShape {
    /// Polynomial plus logarithmic envelope.
    PolyLog,
    /// Straight ramp; parameters are ignored.
    Linear,
    /// Cubic spline through equally spaced control points.
    CubicSpline,
    /// Quadratic Bezier through shrinking handles placed at `t_scales`.
    Bezier { t_scales: Vec<Real> },
    /// Sigmoid of a polynomial.
    Sigmoid,
}

impl WaveShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PolyLog => "poly_log",
            Self::Linear => "linear",
            Self::CubicSpline => "cubic_spline",
            Self::Bezier { .. } => "bezier",
            Self::Sigmoid => "sigmoid",
        }
    }
}

/// Boundary values, timing and shape of one rendered control channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub start: Real,
    pub end: Real,
    pub duration_s: Real,
    pub sample_rate_hz: Real,
    pub shape: WaveShape,
}

impl WaveSpec {
    pub fn new(start: Real, end: Real, duration_s: Real, sample_rate_hz: Real, shape: WaveShape) -> Self {
        Self {
            start,
            end,
            duration_s,
            sample_rate_hz,
            shape,
        }
    }

    pub fn grid(&self) -> SynthResult<SampleGrid> {
        Ok(SampleGrid::from_quantities(
            units::s(self.duration_s),
            units::hz(self.sample_rate_hz),
        )?)
    }

    /// Render a fresh waveform for `params`.
    pub fn render(&self, params: &[Real]) -> SynthResult<Waveform> {
        let (s, e, d, r) = (self.start, self.end, self.duration_s, self.sample_rate_hz);
        match &self.shape {
            WaveShape::PolyLog => poly_log_blend(s, e, d, r, params),
            WaveShape::Linear => linear_ramp(s, e, d, r),
            WaveShape::CubicSpline => cubic_spline(s, e, d, r, params),
            WaveShape::Bezier { t_scales } => bezier_handles(s, e, d, r, params, t_scales),
            WaveShape::Sigmoid => sigmoid_like(s, e, d, r, params),
        }
    }
}
