//! Piecewise quadratic Bezier through shrinking handle points.
//!
//! Each parameter is a multiplicative shrink factor: the handle fraction
//! starts at 1 and becomes `frac_k = frac_(k-1) * params[k]`. Handle `k`
//! sits at time `t_scales[k] * duration` with value
//! `end + (start - end) * frac_k`. Together with the fixed anchors
//! `(0, start)` and `(duration, end)` the handles are laid out as
//!
//! ```text
//! anchor, H1, mid(H1,H2), H2, mid(H2,H3), ..., Hm, anchor
//! ```
//!
//! giving `2m + 1` nodes. Segment `j` is the quadratic Bezier on nodes
//! `2j, 2j+1, 2j+2`; the midpoints keep neighbouring segments tangent
//! continuous. For every sample time the Bezier parameter `u` is recovered
//! from the time coordinate by solving the quadratic `x(u) = t`, and the
//! waveform value is `y(u)`.

use crate::error::{SynthError, SynthResult};
use crate::waveform::Waveform;
use wf_core::{Real, SampleGrid, ensure_finite};

/// Below this the time polynomial is treated as linear in `u`.
const QUADRATIC_EPS: Real = 1e-15;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    t: Real,
    v: Real,
}

impl Node {
    fn midpoint(a: Node, b: Node) -> Node {
        Node {
            t: 0.5 * (a.t + b.t),
            v: 0.5 * (a.v + b.v),
        }
    }
}

/// Render the curve on `[0, duration)` plus a final `end` sample.
///
/// `params` and `t_scales` pair up one-to-one; a length mismatch is a caller
/// error. `t_scales` must be strictly increasing inside `(0, 1)`.
pub fn bezier_handles(
    start: Real,
    end: Real,
    duration: Real,
    sample_rate: Real,
    params: &[Real],
    t_scales: &[Real],
) -> SynthResult<Waveform> {
    if params.len() != t_scales.len() {
        return Err(SynthError::LengthMismatch {
            what: "t_scales",
            expected: params.len(),
            got: t_scales.len(),
        });
    }
    if params.is_empty() {
        return Err(SynthError::InvalidArg {
            what: "bezier needs at least one handle",
        });
    }
    ensure_finite(start, "start value")?;
    ensure_finite(end, "end value")?;
    let grid = SampleGrid::new(duration, sample_rate)?;

    let nodes = build_nodes(start, end, duration, params, t_scales)?;
    let segments = params.len();

    let n_samples = grid.len();
    let mut wave = vec![0.0; n_samples + 1];
    let mut seg = 0;
    for (i, t) in grid.times().enumerate() {
        while seg + 1 < segments && t >= nodes[2 * seg + 2].t {
            seg += 1;
        }
        let (p0, p1, p2) = (nodes[2 * seg], nodes[2 * seg + 1], nodes[2 * seg + 2]);
        let u = solve_parameter(p0.t, p1.t, p2.t, t);
        wave[i] = quadratic(p0.v, p1.v, p2.v, u);
    }
    wave[0] = start;
    wave[n_samples] = end;
    Ok(Waveform::new(wave))
}

fn build_nodes(
    start: Real,
    end: Real,
    duration: Real,
    params: &[Real],
    t_scales: &[Real],
) -> SynthResult<Vec<Node>> {
    let mut handles = Vec::with_capacity(params.len());
    let mut frac = 1.0;
    let mut prev_scale = 0.0;
    for (&factor, &scale) in params.iter().zip(t_scales) {
        ensure_finite(factor, "shrink factor")?;
        ensure_finite(scale, "t_scale")?;
        if scale <= prev_scale || scale >= 1.0 {
            return Err(SynthError::InvalidArg {
                what: "t_scales must be strictly increasing inside (0, 1)",
            });
        }
        prev_scale = scale;
        frac *= factor;
        handles.push(Node {
            t: scale * duration,
            v: end + (start - end) * frac,
        });
    }

    let mut nodes = Vec::with_capacity(2 * handles.len() + 1);
    nodes.push(Node { t: 0.0, v: start });
    for (k, &h) in handles.iter().enumerate() {
        if k > 0 {
            nodes.push(Node::midpoint(handles[k - 1], h));
        }
        nodes.push(h);
    }
    nodes.push(Node {
        t: duration,
        v: end,
    });
    Ok(nodes)
}

/// Root in `[0, 1]` of `(1-u)^2 x0 + 2u(1-u) x1 + u^2 x2 = t`.
fn solve_parameter(x0: Real, x1: Real, x2: Real, t: Real) -> Real {
    let a = x0 - 2.0 * x1 + x2;
    let b = 2.0 * (x1 - x0);
    let c = x0 - t;
    let u = if a.abs() < QUADRATIC_EPS {
        -c / b
    } else {
        let sq = (b * b - 4.0 * a * c).max(0.0).sqrt();
        let u = (-b + sq) / (2.0 * a);
        if (-1e-9..=1.0 + 1e-9).contains(&u) {
            u
        } else {
            (-b - sq) / (2.0 * a)
        }
    };
    u.clamp(0.0, 1.0)
}

fn quadratic(y0: Real, y1: Real, y2: Real, u: Real) -> Real {
    let w = 1.0 - u;
    w * w * y0 + 2.0 * u * w * y1 + u * u * y2
}
