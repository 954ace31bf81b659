//! Uniform sample grid over `[0, duration)`.
//!
//! Every synthesizer and the direct cost evaluator walk the same grid: sample
//! `i` sits at `i / sample_rate`, and the grid holds `ceil(duration * rate)`
//! samples. Products that land within rounding noise of an integer are
//! snapped to that integer so that e.g. `0.07 s * 100 Hz` yields 7 samples.

use crate::error::WfResult;
use crate::numeric::{Real, ensure_positive};
use crate::units::{Frequency, Time};

/// Relative slack used when snapping `duration * rate` to an integer count.
const COUNT_SNAP_REL: Real = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleGrid {
    duration: Real,
    sample_rate: Real,
    len: usize,
}

impl SampleGrid {
    /// Build a grid from a duration (seconds) and a sample rate (Hz).
    pub fn new(duration: Real, sample_rate: Real) -> WfResult<Self> {
        let duration = ensure_positive(duration, "duration must be positive")?;
        let sample_rate = ensure_positive(sample_rate, "sample rate must be positive")?;
        Ok(Self {
            duration,
            sample_rate,
            len: sample_count(duration, sample_rate),
        })
    }

    /// Build a grid from uom quantities.
    pub fn from_quantities(duration: Time, sample_rate: Frequency) -> WfResult<Self> {
        Self::new(duration.value, sample_rate.value)
    }

    pub fn duration(&self) -> Real {
        self.duration
    }

    pub fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    /// Time between consecutive samples.
    pub fn step(&self) -> Real {
        1.0 / self.sample_rate
    }

    /// Number of samples in `[0, duration)`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute time of sample `i`.
    #[inline]
    pub fn time(&self, i: usize) -> Real {
        i as Real / self.sample_rate
    }

    /// Time of sample `i` normalized to the duration, in `[0, 1)`.
    #[inline]
    pub fn normalized(&self, i: usize) -> Real {
        self.time(i) / self.duration
    }

    pub fn times(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.len).map(|i| self.time(i))
    }

    pub fn normalized_times(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.len).map(|i| self.normalized(i))
    }
}

fn sample_count(duration: Real, sample_rate: Real) -> usize {
    let raw = duration * sample_rate;
    let nearest = raw.round();
    let count = if (raw - nearest).abs() <= COUNT_SNAP_REL * nearest.max(1.0) {
        nearest
    } else {
        raw.ceil()
    };
    (count as usize).max(1)
}
