//! Brachistochrone transit-time cost.
//!
//! A point mass slides without friction along the waveform, read as a height
//! profile sampled every `1 / sample_rate` horizontally, starting from rest
//! at the reference height. Per segment `(i-1, i)`:
//!
//! - speed `v = sqrt(2 g (H - y[i-1]))`
//! - arc length `s = hypot(dx, y[i-1] - y[i])`
//! - along-track rate `a = (y[i-1] - y[i]) / s`
//! - time `s / v` when `|a| < 1e-15`, else `(sqrt(v^2 + 2 a s) - v) / a`
//!
//! Any sample above the ceiling, any NaN sample and any non-finite segment
//! time make the whole curve infeasible. The feasible total is perturbed by
//! multiplicative Gaussian noise and compared with the ideal cycloid time
//! `pi * sqrt(k / g)`.

use crate::cost::CostFunction;
use crate::error::{CostError, CostResult};
use crate::record::CostRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use wf_core::units::{Accel, Length, Time, s};
use wf_core::{Real, SampleGrid, ensure_positive};
use wf_synth::{WaveShape, WaveSpec};

/// Below this the segment is treated as uniform motion.
const FLAT_SEGMENT_EPS: Real = 1e-15;

/// Ideal cycloid descent time for depth parameter `k` under gravity `g`.
pub fn cycloid_min_time(k: Real, g: Real) -> Real {
    PI * (k / g).sqrt()
}

/// [`cycloid_min_time`] on uom quantities.
pub fn cycloid_min_time_si(k: Length, g: Accel) -> Time {
    s(cycloid_min_time(k.value, g.value))
}

/// Physical and rendering settings for the brachistochrone experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrachistochroneConfig {
    /// Curve height at the left end.
    pub start: Real,
    /// Curve height at the right end.
    pub end: Real,
    /// Horizontal extent (rendered as the waveform duration).
    pub duration_s: Real,
    pub sample_rate_hz: Real,
    /// Cycloid depth parameter `k`.
    pub depth_k: Real,
    pub gravity: Real,
    /// Samples above this height mark the curve infeasible.
    pub ceiling: Real,
    /// Height at which the mass is at rest.
    pub reference_height: Real,
    /// Standard deviation of the multiplicative timing noise; 0 disables it.
    pub noise_std: Real,
    /// Reported uncertainty as a fraction of the noisy transit time.
    pub uncertainty_fraction: Real,
    /// Fixed seed for reproducible noise; entropy-seeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BrachistochroneConfig {
    fn default() -> Self {
        Self {
            start: 10.0,
            end: 0.0,
            duration_s: 15.71,
            sample_rate_hz: 5000.0,
            depth_k: 5.0,
            gravity: wf_core::units::constants::G_LAB_MPS2,
            ceiling: 10.0,
            reference_height: 10.0,
            noise_std: 0.1,
            uncertainty_fraction: 0.1,
            seed: None,
        }
    }
}

impl BrachistochroneConfig {
    /// The poly-log curve the optimizer's parameters describe.
    pub fn wave_spec(&self) -> WaveSpec {
        WaveSpec::new(
            self.start,
            self.end,
            self.duration_s,
            self.sample_rate_hz,
            WaveShape::PolyLog,
        )
    }

    pub fn min_time(&self) -> Real {
        cycloid_min_time(self.depth_k, self.gravity)
    }
}

/// Scores waveforms against the cycloid optimum.
#[derive(Debug, Clone)]
pub struct BrachistochroneEvaluator {
    config: BrachistochroneConfig,
    grid: SampleGrid,
    noise: Normal<Real>,
    rng: StdRng,
}

impl BrachistochroneEvaluator {
    pub fn new(config: BrachistochroneConfig) -> CostResult<Self> {
        ensure_positive(config.gravity, "gravity must be positive")?;
        ensure_positive(config.depth_k, "depth k must be positive")?;
        let grid = SampleGrid::new(config.duration_s, config.sample_rate_hz)?;
        let noise = Normal::new(0.0, config.noise_std).map_err(|_| CostError::InvalidArg {
            what: "noise std must be finite and non-negative",
        })?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            grid,
            noise,
            rng,
        })
    }

    pub fn config(&self) -> &BrachistochroneConfig {
        &self.config
    }

    /// Deterministic cycloid optimum; no noise involved.
    pub fn min_time(&self) -> Real {
        self.config.min_time()
    }

    /// Noise-free transit time, or `None` when the curve is infeasible.
    ///
    /// Walks the first `min(grid len, wave len)` samples.
    pub fn transit_time(&self, wave: &[Real]) -> CostResult<Option<Real>> {
        let n = self.grid.len().min(wave.len());
        if n < 2 {
            return Err(CostError::Malformed {
                what: "brachistochrone waveform",
                expected: 2,
                got: n,
            });
        }
        let cfg = &self.config;
        let dx = self.grid.step();

        let mut total = 0.0;
        for i in 1..n {
            let y = wave[i];
            if y.is_nan() || y > cfg.ceiling {
                tracing::debug!(sample = i, height = y, "curve leaves the feasible region");
                return Ok(None);
            }
            let v = (2.0 * cfg.gravity * (cfg.reference_height - wave[i - 1])).sqrt();
            let drop = wave[i - 1] - y;
            let arc = dx.hypot(drop);
            let a = drop / arc;
            let dt = if a.abs() < FLAT_SEGMENT_EPS {
                arc / v
            } else {
                ((v * v + 2.0 * a * arc).sqrt() - v) / a
            };
            if !dt.is_finite() {
                tracing::debug!(sample = i, speed = v, "segment time diverged");
                return Ok(None);
            }
            total += dt;
        }
        Ok(Some(total))
    }

    /// Score one waveform, injecting timing noise on feasible curves.
    pub fn evaluate(&mut self, wave: &[Real]) -> CostResult<CostRecord> {
        let Some(transit) = self.transit_time(wave)? else {
            return Ok(CostRecord::Bad);
        };
        let noisy = transit * (1.0 + self.noise.sample(&mut self.rng));
        let cost = noisy - self.min_time();
        Ok(CostRecord::measured(
            cost,
            self.config.uncertainty_fraction * noisy,
        ))
    }
}

/// Self-contained cost function: render the poly-log curve, then simulate it.
#[derive(Debug, Clone)]
pub struct BrachistochroneExperiment {
    spec: WaveSpec,
    evaluator: BrachistochroneEvaluator,
}

impl BrachistochroneExperiment {
    pub fn new(config: BrachistochroneConfig) -> CostResult<Self> {
        let spec = config.wave_spec();
        Ok(Self {
            spec,
            evaluator: BrachistochroneEvaluator::new(config)?,
        })
    }

    pub fn evaluator(&self) -> &BrachistochroneEvaluator {
        &self.evaluator
    }
}

impl CostFunction for BrachistochroneExperiment {
    fn compute_cost(&mut self, params: &[Real]) -> CostResult<CostRecord> {
        let wave = self.spec.render(params)?;
        let record = self.evaluator.evaluate(wave.samples())?;
        if record.is_bad() {
            tracing::warn!(?params, "brachistochrone sample rejected");
        }
        Ok(record)
    }
}
