//! The single capability every experiment variant offers the optimizer.

use crate::error::CostResult;
use crate::record::CostRecord;
use wf_core::Real;

/// Maps one parameter vector to one cost record.
///
/// Implementations own whatever per-run state they need (random generators,
/// sequence counters), hence `&mut self`. Returning `Ok(CostRecord::Bad)`
/// asks the optimizer to discard the sample; `Err` means the call itself was
/// malformed.
pub trait CostFunction {
    fn compute_cost(&mut self, params: &[Real]) -> CostResult<CostRecord>;
}

impl<F> CostFunction for F
where
    F: FnMut(&[Real]) -> CostResult<CostRecord>,
{
    fn compute_cost(&mut self, params: &[Real]) -> CostResult<CostRecord> {
        self(params)
    }
}
