//! Linear ramp between two values.

use crate::error::SynthResult;
use crate::waveform::Waveform;
use wf_core::{Real, SampleGrid, ensure_finite};

/// `start + (end - start) * t` on the normalized grid, followed by an
/// explicit final sample equal to `end`.
pub fn linear_ramp(
    start: Real,
    end: Real,
    duration: Real,
    sample_rate: Real,
) -> SynthResult<Waveform> {
    ensure_finite(start, "start value")?;
    ensure_finite(end, "end value")?;
    let grid = SampleGrid::new(duration, sample_rate)?;
    let span = end - start;

    let mut samples: Vec<Real> = grid.normalized_times().map(|t| start + span * t).collect();
    samples.push(end);
    Ok(Waveform::new(samples))
}
