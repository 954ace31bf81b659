//! Sigmoid-shaped transition driven by a polynomial in normalized time.

use crate::error::SynthResult;
use crate::waveform::Waveform;
use wf_core::{Real, SampleGrid, ensure_finite};

/// `start + (end - start) * (1 - e^-f) / (1 + e^-f)` with `f(t)` evaluated by
/// Horner's rule: `f = p0*t`, then `f = (p_i + f) * t`. The final sample is
/// `end`.
pub fn sigmoid_like(
    start: Real,
    end: Real,
    duration: Real,
    sample_rate: Real,
    params: &[Real],
) -> SynthResult<Waveform> {
    ensure_finite(start, "start value")?;
    ensure_finite(end, "end value")?;
    let grid = SampleGrid::new(duration, sample_rate)?;
    let amplitude = end - start;

    let mut samples: Vec<Real> = grid
        .normalized_times()
        .map(|t| {
            let f = params.iter().fold(0.0, |acc, p| (p + acc) * t);
            // (1 - e^-f) / (1 + e^-f) == tanh(f/2), which stays finite for large |f|
            amplitude * (0.5 * f).tanh() + start
        })
        .collect();
    samples.push(end);
    Ok(Waveform::new(samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_order_matches_leading_coefficient_first() {
        // params [2, 3] -> f(t) = (3 + 2t) t
        let wave = sigmoid_like(0.0, 1.0, 1.0, 4.0, &[2.0, 3.0]).unwrap();
        for i in 0..4 {
            let t = i as f64 / 4.0;
            let f = (3.0 + 2.0 * t) * t;
            let want = (1.0 - (-f).exp()) / (1.0 + (-f).exp());
            assert!((wave[i] - want).abs() < 1e-12);
        }
        assert_eq!(wave.last(), Some(1.0));
    }

    #[test]
    fn starts_at_start_value() {
        let wave = sigmoid_like(5.0, -1.0, 2.0, 10.0, &[1.0, 1.0]).unwrap();
        assert_eq!(wave.first(), Some(5.0));
        assert_eq!(wave.len(), 21);
    }

    #[test]
    fn large_exponent_stays_finite() {
        let wave = sigmoid_like(0.0, 1.0, 1.0, 100.0, &[1e6]).unwrap();
        assert!(wave.is_finite());
        assert!((wave[99] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_params_hold_start() {
        let wave = sigmoid_like(3.0, 7.0, 1.0, 5.0, &[]).unwrap();
        assert_eq!(&wave.samples()[..5], &[3.0; 5]);
    }
}
