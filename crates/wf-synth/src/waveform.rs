//! Dense sampled waveform and its line-oriented text format.
//!
//! The hardware side reads waveforms as one fixed-point value per line with
//! five decimal places, so `to_text` is the exchange format and must not
//! change precision or ordering.

use crate::error::{SynthError, SynthResult};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::ops::Index;
use wf_core::Real;

/// Decimal places written per sample.
pub const TEXT_PRECISION: usize = 5;

/// Uniformly sampled control signal. Each synthesizer call returns a fresh one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waveform(Vec<Real>);

impl Waveform {
    pub fn new(samples: Vec<Real>) -> Self {
        Self(samples)
    }

    pub fn samples(&self) -> &[Real] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Real> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Real> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.0.iter().copied()
    }

    /// True when every sample is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn into_inner(self) -> Vec<Real> {
        self.0
    }

    /// Render as newline-terminated `%.5f` lines.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 10);
        for v in &self.0 {
            out.push_str(&format!("{:.*}\n", TEXT_PRECISION, v));
        }
        out
    }

    /// Stream the text format into any writer.
    pub fn write_text<W: Write>(&self, mut w: W) -> io::Result<()> {
        for v in &self.0 {
            writeln!(w, "{:.*}", TEXT_PRECISION, v)?;
        }
        w.flush()
    }

    /// Parse newline-delimited reals; blank lines are skipped.
    pub fn from_text(text: &str) -> SynthResult<Self> {
        parse_values(text).map(Self)
    }
}

/// Parse one real per line, ignoring blank lines and surrounding whitespace.
pub fn parse_values(text: &str) -> SynthResult<Vec<Real>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.trim().parse::<Real>().map_err(|_| SynthError::Parse {
                line: idx + 1,
                text: line.to_string(),
            })
        })
        .collect()
}

impl From<Vec<Real>> for Waveform {
    fn from(samples: Vec<Real>) -> Self {
        Self(samples)
    }
}

impl AsRef<[Real]> for Waveform {
    fn as_ref(&self) -> &[Real] {
        &self.0
    }
}

impl Index<usize> for Waveform {
    type Output = Real;

    fn index(&self, i: usize) -> &Real {
        &self.0[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_uses_five_decimals_one_per_line() {
        let wave = Waveform::new(vec![0.0, 1.234_567, -2.5, 10.0]);
        assert_eq!(wave.to_text(), "0.00000\n1.23457\n-2.50000\n10.00000\n");
    }

    #[test]
    fn write_text_matches_to_text() {
        let wave = Waveform::new(vec![0.125, 3.0]);
        let mut buf = Vec::new();
        wave.write_text(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), wave.to_text());
    }

    #[test]
    fn parse_skips_blank_lines() {
        let values = parse_values("1.5\n\n  -2.0  \n3\n").unwrap();
        assert_eq!(values, vec![1.5, -2.0, 3.0]);
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse_values("1.0\n\nabc\n").unwrap_err();
        assert_eq!(
            err,
            SynthError::Parse {
                line: 3,
                text: "abc".to_string()
            }
        );
    }

    #[test]
    fn text_round_trip_keeps_five_decimals() {
        let wave = Waveform::new(vec![0.333_333_3, 9.876_54]);
        let back = Waveform::from_text(&wave.to_text()).unwrap();
        assert_eq!(back.samples(), &[0.33333, 9.87654]);
    }

    #[test]
    fn serializes_as_plain_sequence() {
        let wave = Waveform::new(vec![1.0, 2.0]);
        let yaml = serde_yaml::to_string(&wave).unwrap();
        let back: Waveform = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, wave);
        assert!(wave.is_finite());
        assert_eq!(wave[1], 2.0);
    }
}
