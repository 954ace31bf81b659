//! Polynomial / logarithmic blend envelope.
//!
//! The envelope starts at 1 and is built from two coefficient families on the
//! normalized time `t`:
//!
//! ```text
//! env(t) = 1 + sum_i coef[i] * t^(i+1)
//!            + sum_i coef[l+i] * log2(1 + (2^(2i+3) - 1) t) / (2i+3)
//! ```
//!
//! with `coef = [a1, params...]` and `l = (params.len() + 1) / 2`. Both term
//! families equal 1 at `t = 1`, so choosing
//! `a1 = end/start - 1 - sum(params)` pins the envelope to `end/start` there.
//! For an odd parameter count every coefficient enters exactly one term; for
//! an even count the last parameter only enters through `a1`.

use crate::error::{SynthError, SynthResult};
use crate::waveform::Waveform;
use wf_core::{Real, SampleGrid, ensure_finite};

/// Render `start * env(t)` on `[0, duration)`. No explicit endpoint sample.
pub fn poly_log_blend(
    start: Real,
    end: Real,
    duration: Real,
    sample_rate: Real,
    params: &[Real],
) -> SynthResult<Waveform> {
    ensure_finite(start, "start value")?;
    ensure_finite(end, "end value")?;
    if start == 0.0 {
        return Err(SynthError::InvalidArg {
            what: "poly-log blend needs a non-zero start value",
        });
    }
    let grid = SampleGrid::new(duration, sample_rate)?;

    let a1 = end / start - 1.0 - params.iter().sum::<Real>();
    let coef: Vec<Real> = std::iter::once(a1).chain(params.iter().copied()).collect();
    let half = (params.len() + 1) / 2;

    let samples = grid
        .normalized_times()
        .map(|t| start * envelope(&coef, half, t))
        .collect();
    Ok(Waveform::new(samples))
}

fn envelope(coef: &[Real], half: usize, t: Real) -> Real {
    let mut env = 1.0;
    for i in 0..half {
        let order = (2 * i + 3) as i32;
        let stretch = 2.0_f64.powi(order) - 1.0;
        env += coef[i] * t.powi(i as i32 + 1);
        env += coef[half + i] * (1.0 + stretch * t).log2() / order as Real;
    }
    env
}
