//! Cost evaluation for closed-loop waveform optimization.
//!
//! The external optimizer talks to one [`CostFunction`] per experiment
//! variant: it passes a parameter vector and receives a [`CostRecord`]. Two
//! families of implementations live here:
//!
//! - [`BrachistochroneExperiment`]: a self-contained physical simulation that
//!   scores a synthesized curve by its frictionless transit time.
//! - [`HardwareExperiment`]: renders channels, hands them to a
//!   [`MeasurementChannel`] and scores the measured outcome with an
//!   [`OutcomeEvaluator`].
//!
//! Infeasible or divergent samples are reported as [`CostRecord::Bad`], never
//! as errors; errors are reserved for caller-contract violations.

pub mod brachistochrone;
pub mod cost;
pub mod error;
pub mod experiment;
pub mod outcome;
pub mod record;

pub use brachistochrone::{
    BrachistochroneConfig, BrachistochroneEvaluator, BrachistochroneExperiment, cycloid_min_time,
    cycloid_min_time_si,
};
pub use cost::CostFunction;
pub use error::{CostError, CostResult};
pub use experiment::{
    ChannelOutput, ChannelPlan, HardwareExperiment, MeasurementChannel, SessionCounters, Shot,
};
pub use outcome::{AtomNumberThreshold, OutcomeEvaluator, PhaseSpaceDensityCost};
pub use record::{CostDict, CostRecord};
