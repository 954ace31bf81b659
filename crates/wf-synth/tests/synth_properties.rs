//! Cross-module properties of the synthesizers, solver and resampler.

use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;
use wf_synth::{
    WaveShape, WaveSpec, cubic_spline, linear_ramp, poly_log_blend, resample, solve_tridiagonal,
};

fn dense(a: &[f64], b: &[f64], c: &[f64]) -> DMatrix<f64> {
    let n = a.len();
    let mut m = DMatrix::zeros(n, n);
    for k in 0..n {
        m[(k, k)] = a[k];
        if k + 1 < n {
            m[(k, k + 1)] = b[k];
        }
        if k > 0 {
            m[(k, k - 1)] = c[k];
        }
    }
    m
}

proptest! {
    #[test]
    fn tridiagonal_solver_recovers_known_solution(
        rows in prop::collection::vec((-1.0_f64..1.0, -1.0_f64..1.0, 0.1_f64..2.0, -10.0_f64..10.0), 1..40)
    ) {
        let n = rows.len();
        let mut b: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let mut c: Vec<f64> = rows.iter().map(|r| r.1).collect();
        b[n - 1] = 0.0;
        c[0] = 0.0;
        // Strict diagonal dominance keeps every pivot away from zero.
        let a: Vec<f64> = (0..n).map(|k| b[k].abs() + c[k].abs() + rows[k].2).collect();
        let x_star = DVector::from_iterator(n, rows.iter().map(|r| r.3));

        let f = dense(&a, &b, &c) * &x_star;
        let x = solve_tridiagonal(&a, &b, &c, f.as_slice()).unwrap();

        for k in 0..n {
            prop_assert!((x[k] - x_star[k]).abs() < 1e-8, "row {}: {} vs {}", k, x[k], x_star[k]);
        }
    }

    #[test]
    fn resampling_at_own_rate_is_identity(
        knots in prop::collection::vec(-5.0_f64..5.0, 0..6),
        rate in prop::sample::select(vec![10.0_f64, 20.0, 50.0, 100.0]),
    ) {
        // Spline output carries its endpoint, so it spans [0, duration] inclusive.
        let wave = cubic_spline(0.0, 1.0, 2.0, rate, &knots).unwrap();
        let back = resample(wave.samples(), 2.0, rate).unwrap();
        prop_assert_eq!(back.len(), wave.len() - 1);
        for (a, b) in back.iter().zip(wave.iter()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_ramp_first_and_last(
        s in -10.0_f64..10.0,
        e in -10.0_f64..10.0,
        d in 0.001_f64..3.0,
        r in 10.0_f64..10_000.0,
    ) {
        let wave = linear_ramp(s, e, d, r).unwrap();
        prop_assert_eq!(wave[0], s);
        prop_assert_eq!(wave[wave.len() - 1], e);
    }

    #[test]
    fn well_formed_inputs_give_finite_output(
        params in prop::collection::vec(-3.0_f64..3.0, 1..8),
        start in 0.5_f64..10.0,
        end in -10.0_f64..10.0,
    ) {
        let specs = [
            WaveShape::PolyLog,
            WaveShape::Linear,
            WaveShape::CubicSpline,
            WaveShape::Sigmoid,
        ];
        for shape in specs {
            let spec = WaveSpec::new(start, end, 1.0, 200.0, shape);
            prop_assert!(spec.render(&params).unwrap().is_finite());
        }
    }
}

#[test]
fn spline_without_control_points_hits_both_ends() {
    let wave = cubic_spline(3.0, -1.0, 15.71, 100.0, &[]).unwrap();
    assert_eq!(wave.len(), 1572);
    assert_eq!(wave[0], 3.0);
    assert_eq!(wave[1571], -1.0);
    assert!(wave.iter().all(|v| (-1.0 - 1e-9..=3.0 + 1e-9).contains(&v)));
}

#[test]
fn poly_log_with_zero_coefficient_is_flat() {
    let wave = poly_log_blend(7.0, 7.0, 0.5, 1000.0, &[0.0]).unwrap();
    assert_eq!(wave.len(), 500);
    assert!(wave.iter().all(|v| (v - 7.0).abs() < 1e-12));
}

#[test]
fn bezier_mismatch_fails_for_any_pair() {
    let spec = WaveSpec::new(
        1.0,
        0.0,
        1.0,
        100.0,
        WaveShape::Bezier {
            t_scales: vec![0.3],
        },
    );
    assert!(spec.render(&[0.5, 0.5]).is_err());
    assert!(spec.render(&[]).is_err());
}

#[test]
fn text_export_is_line_per_sample() {
    let wave = linear_ramp(0.0, 1.0, 1.0, 4.0).unwrap();
    assert_eq!(wave.to_text(), "0.00000\n0.25000\n0.50000\n0.75000\n1.00000\n");
}
