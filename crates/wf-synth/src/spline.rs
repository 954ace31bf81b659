//! Cubic spline through equally spaced control points.
//!
//! `params` are the interior knot values; together with `start` and `end`
//! they give `n + 1` knots over `n = params.len() + 1` segments of width
//! `h = duration / n`. The knot second derivatives `M` satisfy the
//! zero-slope clamped system
//!
//! ```text
//! 2 M0 +   M1                 = 6 (y1 - y0) / h^2
//! ½ M(i-1) + 2 Mi + ½ M(i+1)  = 3 (y(i-1) - 2 yi + y(i+1)) / h^2
//!            M(n-1) + 2 Mn    = 6 (y(n-1) - yn) / h^2
//! ```
//!
//! which is strictly diagonally dominant, so the Thomas sweep never meets a
//! zero pivot for finite inputs.

use crate::error::SynthResult;
use crate::tridiag::TridiagonalSystem;
use crate::waveform::Waveform;
use wf_core::{Real, SampleGrid, ensure_finite};

/// Render the spline on `[0, duration)` plus a final `end` sample.
///
/// The first and last samples are pinned to `start`/`end` exactly.
pub fn cubic_spline(
    start: Real,
    end: Real,
    duration: Real,
    sample_rate: Real,
    params: &[Real],
) -> SynthResult<Waveform> {
    ensure_finite(start, "start value")?;
    ensure_finite(end, "end value")?;
    let grid = SampleGrid::new(duration, sample_rate)?;

    let segments = params.len() + 1;
    let h = duration / segments as Real;

    let mut y = Vec::with_capacity(segments + 1);
    y.push(start);
    y.extend_from_slice(params);
    y.push(end);

    let m = second_derivatives(&y, h)?;

    let mut knots: Vec<Real> = (0..segments).map(|i| i as Real * h).collect();
    knots.push(duration);

    let n_samples = grid.len();
    let mut wave = vec![0.0; n_samples + 1];
    let mut seg = 0;
    for (i, x) in grid.times().enumerate() {
        // Sample times only grow, so the segment index only moves forward.
        while seg + 1 < segments && x >= knots[seg + 1] {
            seg += 1;
        }
        let left = knots[seg + 1] - x;
        let right = x - knots[seg];
        let mut v = (left.powi(3) * m[seg] + right.powi(3) * m[seg + 1]) / (6.0 * h);
        v += (left * y[seg] + right * y[seg + 1]) / h;
        v -= h * (left * m[seg] + right * m[seg + 1]) / 6.0;
        wave[i] = v;
    }
    wave[0] = start;
    wave[n_samples] = end;

    tracing::debug!(segments, samples = wave.len(), "rendered cubic spline");
    Ok(Waveform::new(wave))
}

/// Assemble and solve the clamped system for the knot values `y`.
fn second_derivatives(y: &[Real], h: Real) -> SynthResult<Vec<Real>> {
    let n = y.len() - 1;
    let h2 = h * h;
    let mut sys = TridiagonalSystem::zeros(n + 1);

    sys.diag.fill(2.0);
    sys.upper[0] = 1.0;
    sys.lower[n] = 1.0;
    for i in 1..n {
        sys.upper[i] = 0.5;
        sys.lower[i] = 0.5;
        sys.rhs[i] = 3.0 * (y[i - 1] + y[i + 1] - 2.0 * y[i]) / h2;
    }
    sys.rhs[0] = 6.0 * (y[1] - y[0]) / h2;
    sys.rhs[n] = 6.0 * (y[n - 1] - y[n]) / h2;

    sys.solve()
}
