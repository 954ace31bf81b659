//! wf-core: stable foundation for waveflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + float guards)
//! - grid (uniform sample grid shared by synthesizers and evaluators)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WfError, WfResult};
pub use grid::SampleGrid;
pub use numeric::*;
pub use units::*;
