//! Tridiagonal linear solver (Thomas algorithm).
//!
//! Solves `a[k]*x[k] + b[k]*x[k+1] + c[k]*x[k-1] = f[k]` for `k = 0..n`,
//! where `a` is the diagonal, `b` the super-diagonal (`b[n-1]` unused) and
//! `c` the sub-diagonal (`c[0]` unused). The forward sweep keeps the ratio
//! `v` and transformed right-hand side `y` one slot ahead of the row index,
//! then back-substitution walks from the last row up.

use crate::error::{SynthError, SynthResult};
use wf_core::Real;

/// Dense storage for one tridiagonal system.
///
/// Built and consumed inside a single synthesizer call; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    /// Main diagonal.
    pub diag: Vec<Real>,
    /// Super-diagonal; the last entry is ignored.
    pub upper: Vec<Real>,
    /// Sub-diagonal; the first entry is ignored.
    pub lower: Vec<Real>,
    /// Right-hand side.
    pub rhs: Vec<Real>,
}

impl TridiagonalSystem {
    /// Zero-filled system of dimension `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            diag: vec![0.0; n],
            upper: vec![0.0; n],
            lower: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    pub fn solve(&self) -> SynthResult<Vec<Real>> {
        solve_tridiagonal(&self.diag, &self.upper, &self.lower, &self.rhs)
    }
}

/// Solve a tridiagonal system. See the module docs for the band layout.
///
/// Returns [`SynthError::SingularPivot`] when an elimination pivot is zero or
/// non-finite instead of letting NaN leak into the result.
pub fn solve_tridiagonal(
    a: &[Real],
    b: &[Real],
    c: &[Real],
    f: &[Real],
) -> SynthResult<Vec<Real>> {
    let n = a.len();
    for (what, len) in [("super-diagonal", b.len()), ("sub-diagonal", c.len()), ("rhs", f.len())] {
        if len != n {
            return Err(SynthError::LengthMismatch {
                what,
                expected: n,
                got: len,
            });
        }
    }

    let mut v = vec![0.0; n + 1];
    let mut y = vec![0.0; n + 1];
    for k in 0..n {
        let u = a[k] - c[k] * v[k];
        if u == 0.0 || !u.is_finite() {
            tracing::warn!(row = k, pivot = u, "tridiagonal elimination hit a singular pivot");
            return Err(SynthError::SingularPivot { row: k, pivot: u });
        }
        v[k + 1] = b[k] / u;
        y[k + 1] = (f[k] - c[k] * y[k]) / u;
    }

    let mut x = vec![0.0; n + 1];
    for k in (1..=n).rev() {
        x[k - 1] = y[k] - v[k] * x[k];
    }
    x.truncate(n);
    Ok(x)
}
