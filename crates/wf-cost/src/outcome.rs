//! Scoring of measured outcome vectors returned by the hardware side.

use crate::error::{CostError, CostResult};
use crate::record::CostRecord;
use serde::{Deserialize, Serialize};
use wf_core::Real;

/// Turns one measured outcome vector into a cost record.
pub trait OutcomeEvaluator {
    fn score(&self, outcome: &[Real]) -> CostResult<CostRecord>;
}

fn require_len(outcome: &[Real], expected: usize) -> CostResult<()> {
    if outcome.len() < expected {
        return Err(CostError::Malformed {
            what: "measured outcome",
            expected,
            got: outcome.len(),
        });
    }
    Ok(())
}

/// Evaporative-cooling efficiency.
///
/// Outcome layout: `[psd, psd0, atoms, atoms0, uncer]`. The cost is
/// `ln(psd/psd0) / ln(atoms/atoms0)`, the phase-space-density gain per atom
/// lost on a log scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSpaceDensityCost {
    /// Shots with fewer final atoms are discarded.
    pub min_atoms: Real,
}

impl Default for PhaseSpaceDensityCost {
    fn default() -> Self {
        Self { min_atoms: 1e5 }
    }
}

impl OutcomeEvaluator for PhaseSpaceDensityCost {
    fn score(&self, outcome: &[Real]) -> CostResult<CostRecord> {
        require_len(outcome, 5)?;
        let (psd, psd0, atoms, atoms0, uncer) =
            (outcome[0], outcome[1], outcome[2], outcome[3], outcome[4]);
        if atoms.is_nan() || atoms < self.min_atoms {
            return Ok(CostRecord::Bad);
        }
        let cost = (psd / psd0).ln() / (atoms / atoms0).ln();
        if !cost.is_finite() {
            return Ok(CostRecord::Bad);
        }
        Ok(CostRecord::measured(cost, uncer))
    }
}

/// Direct cost with an atom-number quality gate.
///
/// Outcome layout: `[cost, atoms]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomNumberThreshold {
    pub min_atoms: Real,
    /// Uncertainty attached to every accepted shot.
    pub uncertainty: Real,
}

impl Default for AtomNumberThreshold {
    fn default() -> Self {
        Self {
            min_atoms: 1e6,
            uncertainty: 0.1,
        }
    }
}

impl OutcomeEvaluator for AtomNumberThreshold {
    fn score(&self, outcome: &[Real]) -> CostResult<CostRecord> {
        require_len(outcome, 2)?;
        let (cost, atoms) = (outcome[0], outcome[1]);
        if atoms.is_nan() || atoms < self.min_atoms || !cost.is_finite() {
            return Ok(CostRecord::Bad);
        }
        Ok(CostRecord::measured(cost, self.uncertainty))
    }
}
