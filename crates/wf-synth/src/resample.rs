//! Quadratic resampling of an existing waveform.
//!
//! The input is taken to span `[0, duration]` inclusive with evenly spaced
//! nodes (so a synthesizer output that carries its explicit endpoint maps
//! back onto its own grid). A quadratic B-spline interpolates the nodes; its
//! value and slope are continuous everywhere, so the resampled signal has no
//! steps between input samples.
//!
//! Knots are the end nodes with multiplicity 3 plus the midpoints between
//! consecutive nodes, leaving out the first and last midpoint so that the
//! number of coefficients equals the number of nodes. With that layout node
//! `i` only sees basis functions `i-1, i, i+1`, and the interpolation
//! conditions form a tridiagonal system.

use crate::error::{SynthError, SynthResult};
use crate::tridiag::TridiagonalSystem;
use crate::waveform::Waveform;
use wf_core::{Real, SampleGrid};

/// Minimum input length for a quadratic through three points.
pub const MIN_SAMPLES: usize = 3;

const DEGREE: usize = 2;

/// Resample `wave` (spanning `[0, duration]`) onto `[0, duration)` at
/// `sample_rate`.
pub fn resample(wave: &[Real], duration: Real, sample_rate: Real) -> SynthResult<Waveform> {
    if wave.len() < MIN_SAMPLES {
        return Err(SynthError::TooFewSamples {
            what: "quadratic resampling",
            needed: MIN_SAMPLES,
            got: wave.len(),
        });
    }
    let grid = SampleGrid::new(duration, sample_rate)?;
    let spline = QuadraticSpline::interpolate(wave, duration)?;
    let samples = grid.times().map(|t| spline.value(t)).collect();
    Ok(Waveform::new(samples))
}

/// Interpolating quadratic B-spline over evenly spaced nodes.
#[derive(Debug, Clone)]
struct QuadraticSpline {
    knots: Vec<Real>,
    coef: Vec<Real>,
}

impl QuadraticSpline {
    fn interpolate(values: &[Real], duration: Real) -> SynthResult<Self> {
        let n = values.len();
        let last = n - 1;
        let mut nodes: Vec<Real> = (0..n).map(|i| i as Real * duration / last as Real).collect();
        nodes[last] = duration;

        let mut knots = Vec::with_capacity(n + DEGREE + 1);
        knots.extend([nodes[0]; DEGREE + 1]);
        knots.extend((2..last).map(|i| 0.5 * (nodes[i - 1] + nodes[i])));
        knots.extend([nodes[last]; DEGREE + 1]);

        let mut sys = TridiagonalSystem::zeros(n);
        for (row, &x) in nodes.iter().enumerate() {
            let mu = span(&knots, n, x);
            for (r, w) in basis(&knots, mu, x).into_iter().enumerate() {
                let col = mu - DEGREE + r;
                // Outside the band the basis vanishes at the nodes.
                if col + 1 == row {
                    sys.lower[row] = w;
                } else if col == row {
                    sys.diag[row] = w;
                } else if col == row + 1 {
                    sys.upper[row] = w;
                }
            }
        }
        sys.rhs.copy_from_slice(values);

        Ok(Self {
            coef: sys.solve()?,
            knots,
        })
    }

    fn value(&self, x: Real) -> Real {
        let mu = span(&self.knots, self.coef.len(), x);
        basis(&self.knots, mu, x)
            .iter()
            .enumerate()
            .map(|(r, w)| w * self.coef[mu - DEGREE + r])
            .sum()
    }
}

/// Knot span `mu` with `knots[mu] <= x < knots[mu + 1]`, clamped to the
/// valid range so that the right end belongs to the last span.
fn span(knots: &[Real], n_coef: usize, x: Real) -> usize {
    let above = knots.partition_point(|&k| k <= x);
    above.saturating_sub(1).clamp(DEGREE, n_coef - 1)
}

/// Non-zero basis functions `mu-2, mu-1, mu` at `x` (Cox-de Boor).
fn basis(knots: &[Real], mu: usize, x: Real) -> [Real; DEGREE + 1] {
    let mut n = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    n[0] = 1.0;
    for j in 1..=DEGREE {
        left[j] = x - knots[mu + 1 - j];
        right[j] = knots[mu + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_quadratics_exactly() {
        // y = 3t^2 - t + 2 sampled on [0, 2] with 9 points
        let f = |t: f64| 3.0 * t * t - t + 2.0;
        let wave: Vec<f64> = (0..9).map(|i| f(i as f64 * 0.25)).collect();
        let out = resample(&wave, 2.0, 7.0).unwrap();
        assert_eq!(out.len(), 14);
        for (i, v) in out.iter().enumerate() {
            let t = i as f64 / 7.0;
            assert!((v - f(t)).abs() < 1e-12, "t={t}: {v} vs {}", f(t));
        }
    }

    #[test]
    fn upsampling_a_line_is_exact() {
        let wave = [0.0, 1.0, 2.0, 3.0];
        let out = resample(&wave, 3.0, 4.0).unwrap();
        assert_eq!(out.len(), 12);
        for (i, v) in out.iter().enumerate() {
            assert!((v - i as f64 / 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cubic_samples_resample_without_steps() {
        // t^3 at t = 0..4; the slope never exceeds 48, so one 1 ms step
        // moves the value by less than 0.05.
        let wave: Vec<f64> = (0..5).map(|i| (i as f64).powi(3)).collect();
        let out = resample(&wave, 4.0, 1000.0).unwrap();
        assert_eq!(out.len(), 4000);
        for (i, pair) in out.samples().windows(2).enumerate() {
            assert!((pair[1] - pair[0]).abs() < 0.05, "step at sample {i}: {pair:?}");
        }
        for (i, node) in [(1000, 1.0), (2000, 8.0), (3000, 27.0)] {
            assert!((out[i] - node).abs() < 1e-9, "node {i}: {}", out[i]);
        }
        // Between nodes the spline value is 24/7, not the cubic's 3.375.
        assert!((out[1500] - 24.0 / 7.0).abs() < 1e-9, "{}", out[1500]);
    }

    #[test]
    fn slope_is_continuous_across_knots() {
        let wave = [0.0, 2.0, -1.0, 3.0, 0.5, 1.0];
        let spline = QuadraticSpline::interpolate(&wave, 5.0).unwrap();
        let h = 1e-7;
        for &k in &spline.knots[3..spline.knots.len() - 3] {
            let d_left = (spline.value(k) - spline.value(k - h)) / h;
            let d_right = (spline.value(k + h) - spline.value(k)) / h;
            assert!((d_left - d_right).abs() < 1e-4, "knot {k}: {d_left} vs {d_right}");
        }
    }

    #[test]
    fn basis_is_a_partition_of_unity() {
        let knots = [0.0, 0.0, 0.0, 1.5, 2.5, 4.0, 4.0, 4.0];
        for &x in &[0.0, 0.7, 1.5, 2.0, 3.9] {
            let mu = span(&knots, 5, x);
            let sum: f64 = basis(&knots, mu, x).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "x={x}: {sum}");
        }
        assert_eq!(span(&knots, 5, 4.0), 4);
    }

    #[test]
    fn three_samples_is_enough() {
        let out = resample(&[1.0, 0.0, 1.0], 1.0, 2.0).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!(out[1].abs() < 1e-12);
    }

    #[test]
    fn too_few_samples_is_an_error() {
        let err = resample(&[1.0, 2.0], 1.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            SynthError::TooFewSamples {
                what: "quadratic resampling",
                needed: 3,
                got: 2
            }
        );
    }
}
