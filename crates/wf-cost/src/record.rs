//! Cost record handed back to the optimizer.

use crate::error::CostError;
use serde::{Deserialize, Serialize};
use wf_core::Real;

/// Outcome of scoring one waveform or measurement.
///
/// Serializes to the optimizer's dictionary shape: `{cost, uncer, bad:false}`
/// for measured samples and `{bad:true}` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "CostDict", try_from = "CostDict")]
pub enum CostRecord {
    Measured { cost: Real, uncertainty: Real },
    Bad,
}

impl CostRecord {
    pub fn measured(cost: Real, uncertainty: Real) -> Self {
        Self::Measured { cost, uncertainty }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, Self::Bad)
    }

    pub fn is_valid(&self) -> bool {
        !self.is_bad()
    }

    pub fn cost(&self) -> Option<Real> {
        match self {
            Self::Measured { cost, .. } => Some(*cost),
            Self::Bad => None,
        }
    }

    pub fn uncertainty(&self) -> Option<Real> {
        match self {
            Self::Measured { uncertainty, .. } => Some(*uncertainty),
            Self::Bad => None,
        }
    }
}

/// Wire shape of a [`CostRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Real>,
    #[serde(rename = "uncer", default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<Real>,
    pub bad: bool,
}

impl From<CostRecord> for CostDict {
    fn from(rec: CostRecord) -> Self {
        Self {
            cost: rec.cost(),
            uncertainty: rec.uncertainty(),
            bad: rec.is_bad(),
        }
    }
}

impl TryFrom<CostDict> for CostRecord {
    type Error = CostError;

    fn try_from(dict: CostDict) -> Result<Self, Self::Error> {
        if dict.bad {
            return Ok(Self::Bad);
        }
        match (dict.cost, dict.uncertainty) {
            (Some(cost), Some(uncertainty)) => Ok(Self::Measured { cost, uncertainty }),
            _ => Err(CostError::InvalidArg {
                what: "a valid cost record needs both cost and uncer",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_record_has_no_cost_field() {
        let json = serde_json::to_string(&CostRecord::Bad).unwrap();
        assert_eq!(json, r#"{"bad":true}"#);
        assert_eq!(CostRecord::Bad.cost(), None);
        assert!(!CostRecord::Bad.is_valid());
    }

    #[test]
    fn measured_record_uses_uncer_key() {
        let json = serde_json::to_string(&CostRecord::measured(1.5, 0.25)).unwrap();
        assert_eq!(json, r#"{"cost":1.5,"uncer":0.25,"bad":false}"#);
    }

    #[test]
    fn parses_back_from_dictionary() {
        let rec: CostRecord = serde_json::from_str(r#"{"cost":-0.5,"uncer":0.1,"bad":false}"#).unwrap();
        assert_eq!(rec, CostRecord::measured(-0.5, 0.1));
        let rec: CostRecord = serde_json::from_str(r#"{"bad":true}"#).unwrap();
        assert!(rec.is_bad());
        assert!(serde_json::from_str::<CostRecord>(r#"{"bad":false}"#).is_err());
    }
}
