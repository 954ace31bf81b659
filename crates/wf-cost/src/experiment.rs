//! Hardware-in-the-loop experiment session.
//!
//! The session renders the control channels for one parameter vector, hands
//! them to a [`MeasurementChannel`] and scores what comes back. How the
//! channel reaches the hardware (file drop and poll, socket, mock) is the
//! channel's business; the session only owns the sequence numbers that tie a
//! shot to its result.

use crate::cost::CostFunction;
use crate::error::{CostError, CostResult};
use crate::outcome::OutcomeEvaluator;
use crate::record::CostRecord;
use serde::{Deserialize, Serialize};
use wf_core::Real;
use wf_synth::waveform::TEXT_PRECISION;
use wf_synth::{WaveSpec, Waveform, linear_ramp};

/// One control channel of a shot.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelOutput {
    Wave(Waveform),
    Constant(Real),
}

impl ChannelOutput {
    /// Same fixed-point line format as [`Waveform::to_text`].
    pub fn to_text(&self) -> String {
        match self {
            Self::Wave(w) => w.to_text(),
            Self::Constant(v) => format!("{:.*}\n", TEXT_PRECISION, v),
        }
    }
}

/// How a parameter vector maps onto control channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelPlan {
    /// The whole vector drives one synthesized waveform.
    Single { spec: WaveSpec },
    /// `[s1, e1, s2, e2, ...]` gives `ramps` linear ramps; every remaining
    /// parameter is written as a constant channel.
    LinearPairsWithConstants {
        ramps: usize,
        duration_s: Real,
        sample_rate_hz: Real,
    },
}

impl ChannelPlan {
    pub fn render(&self, params: &[Real]) -> CostResult<Vec<ChannelOutput>> {
        match self {
            Self::Single { spec } => Ok(vec![ChannelOutput::Wave(spec.render(params)?)]),
            Self::LinearPairsWithConstants {
                ramps,
                duration_s,
                sample_rate_hz,
            } => {
                let needed = 2 * ramps;
                if params.len() < needed {
                    return Err(CostError::Malformed {
                        what: "ramp parameter vector",
                        expected: needed,
                        got: params.len(),
                    });
                }
                let (pairs, constants) = params.split_at(needed);
                let mut out = Vec::with_capacity(ramps + constants.len());
                for pair in pairs.chunks_exact(2) {
                    let wave = linear_ramp(pair[0], pair[1], *duration_s, *sample_rate_hz)?;
                    out.push(ChannelOutput::Wave(wave));
                }
                out.extend(constants.iter().map(|&c| ChannelOutput::Constant(c)));
                Ok(out)
            }
        }
    }
}

/// Sequence numbers shared with the hardware side.
///
/// `signal_index` names the trigger for the next shot and `result_index` the
/// result the session waits for; both advance once per shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub signal_index: u64,
    pub result_index: u64,
}

impl SessionCounters {
    pub fn new(signal_index: u64, result_index: u64) -> Self {
        Self {
            signal_index,
            result_index,
        }
    }

    fn advance(&mut self) {
        self.signal_index += 1;
        self.result_index += 1;
    }
}

impl Default for SessionCounters {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Everything the hardware needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub signal_index: u64,
    pub result_index: u64,
    pub channels: Vec<ChannelOutput>,
}

/// Blocking bridge to the experiment hardware.
pub trait MeasurementChannel {
    /// Deliver the shot and block until its outcome vector is available.
    fn run_shot(&mut self, shot: &Shot) -> CostResult<Vec<Real>>;
}

/// [`CostFunction`] backed by real measurements.
///
/// A bad outcome is returned as-is; resampling is left to the optimizer.
#[derive(Debug)]
pub struct HardwareExperiment<C, E> {
    plan: ChannelPlan,
    channel: C,
    evaluator: E,
    counters: SessionCounters,
}

impl<C, E> HardwareExperiment<C, E>
where
    C: MeasurementChannel,
    E: OutcomeEvaluator,
{
    pub fn new(plan: ChannelPlan, channel: C, evaluator: E) -> Self {
        Self {
            plan,
            channel,
            evaluator,
            counters: SessionCounters::default(),
        }
    }

    /// Resume numbering from an earlier session.
    pub fn with_counters(mut self, counters: SessionCounters) -> Self {
        self.counters = counters;
        self
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }
}

impl<C, E> CostFunction for HardwareExperiment<C, E>
where
    C: MeasurementChannel,
    E: OutcomeEvaluator,
{
    fn compute_cost(&mut self, params: &[Real]) -> CostResult<CostRecord> {
        let channels = self.plan.render(params)?;
        let shot = Shot {
            signal_index: self.counters.signal_index,
            result_index: self.counters.result_index,
            channels,
        };
        let outcome = self.channel.run_shot(&shot)?;
        self.counters.advance();

        let record = self.evaluator.score(&outcome)?;
        tracing::info!(
            signal = shot.signal_index,
            result = shot.result_index,
            bad = record.is_bad(),
            cost = record.cost(),
            "shot scored"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_synth::WaveShape;

    #[test]
    fn linear_pairs_split_ramps_and_constants() {
        let plan = ChannelPlan::LinearPairsWithConstants {
            ramps: 2,
            duration_s: 0.1,
            sample_rate_hz: 100.0,
        };
        let out = plan
            .render(&[1.0, 0.0, -1.0, 1.0, 0.5, 0.25, 3.0, 4.0])
            .unwrap();
        assert_eq!(out.len(), 6);
        match &out[1] {
            ChannelOutput::Wave(w) => {
                assert_eq!(w.first(), Some(-1.0));
                assert_eq!(w.last(), Some(1.0));
                assert_eq!(w.len(), 11);
            }
            other => panic!("expected wave, got {other:?}"),
        }
        assert_eq!(out[2], ChannelOutput::Constant(0.5));
        assert_eq!(out[5].to_text(), "4.00000\n");
    }

    #[test]
    fn linear_pairs_need_enough_parameters() {
        let plan = ChannelPlan::LinearPairsWithConstants {
            ramps: 2,
            duration_s: 0.1,
            sample_rate_hz: 100.0,
        };
        assert!(matches!(
            plan.render(&[1.0, 0.0, 2.0]),
            Err(CostError::Malformed {
                expected: 4,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn single_plan_renders_one_wave() {
        let plan = ChannelPlan::Single {
            spec: WaveSpec::new(1.0, 0.0, 0.03, 1000.0, WaveShape::CubicSpline),
        };
        let out = plan.render(&[0.5, 0.2]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], ChannelOutput::Wave(w) if w.len() == 31));
    }

    #[test]
    fn plan_loads_from_yaml() {
        let plan: ChannelPlan = serde_yaml::from_str(
            "type: linear_pairs_with_constants\nramps: 2\nduration_s: 0.5\nsample_rate_hz: 1000\n",
        )
        .unwrap();
        assert!(matches!(
            plan,
            ChannelPlan::LinearPairsWithConstants { ramps: 2, .. }
        ));
    }
}
