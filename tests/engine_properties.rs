//! Property checks for the fitting engine on seeded random datasets.

use labfit::data::ObservationSet;
use labfit::domain::SortOrder;
use labfit::error::FitError;
use labfit::fit::{derive_weights, fit, propagate, r_squared};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const TRIALS: usize = 50;

fn noisy_line(rng: &mut StdRng, n: usize, k: f64, b: f64, sigma: f64) -> (Vec<f64>, Vec<f64>) {
    let noise = Normal::new(0.0, sigma).unwrap();
    let xs: Vec<f64> = (0..n).map(|_| rng.gen_range(-50.0..50.0)).collect();
    let ys = xs.iter().map(|&x| k * x + b + noise.sample(rng)).collect();
    (xs, ys)
}

fn unweighted_ols(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let sxx: f64 = xs.iter().map(|x| (x - mx) * (x - mx)).sum();
    let k = sxy / sxx;
    (k, my - k * mx)
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn uniform_multiplicity_matches_ordinary_least_squares() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..TRIALS {
        let (base_x, _) = noisy_line(&mut rng, 6, 0.0, 0.0, 1.0);
        let reps = rng.gen_range(1..4);
        let noise = Normal::new(0.0, 0.3).unwrap();

        let xs: Vec<f64> = base_x.iter().flat_map(|&x| std::iter::repeat_n(x, reps)).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 1.5 * x - 4.0 + noise.sample(&mut rng)).collect();

        let set = ObservationSet::from_values(&xs, &ys, SortOrder::Ascending).unwrap();
        let weights = derive_weights(&set);
        assert!(weights.weights.iter().all(|&w| w == reps as f64));
        let result = fit(&set, &weights).unwrap();

        let (k, b) = unweighted_ols(&xs, &ys);
        assert!(close(result.slope, k, 1e-9), "slope {} vs {k}", result.slope);
        assert!(close(result.intercept, b, 1e-9), "intercept {} vs {b}", result.intercept);
    }
}

#[test]
fn weighted_residuals_are_orthogonal_to_design() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..TRIALS {
        let n = rng.gen_range(3..30);
        let (mut xs, ys) = noisy_line(&mut rng, n, -0.8, 12.0, 2.0);
        // Snap some readings onto shared x-values so weights vary.
        for x in xs.iter_mut().step_by(3) {
            *x = x.round();
        }
        let set = match ObservationSet::from_values(&xs, &ys, SortOrder::Descending) {
            Ok(set) => set,
            Err(err) => panic!("unexpected {err}"),
        };
        let weights = derive_weights(&set);
        let result = match fit(&set, &weights) {
            Ok(r) => r,
            Err(FitError::SingularFit { .. }) => continue,
            Err(err) => panic!("unexpected {err}"),
        };

        let scale: f64 = set.ys().map(f64::abs).sum::<f64>() + 1.0;
        let x_scale: f64 = set.xs().map(f64::abs).sum::<f64>() * scale + 1.0;
        let sum_wr: f64 = result.residuals.iter().zip(&weights.weights).map(|(r, w)| r * w).sum();
        let sum_wrx: f64 = result
            .residuals
            .iter()
            .zip(&weights.weights)
            .zip(set.xs())
            .map(|((r, w), x)| r * w * x)
            .sum();
        assert!(sum_wr.abs() <= 1e-9 * scale, "Σwr = {sum_wr}");
        assert!(sum_wrx.abs() <= 1e-9 * x_scale, "Σwrx = {sum_wrx}");
    }
}

#[test]
fn r_squared_never_exceeds_one() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..TRIALS {
        let n = rng.gen_range(3..40);
        let (xs, ys) = noisy_line(&mut rng, n, 0.05, 3.0, 10.0);
        let set = ObservationSet::from_values(&xs, &ys, SortOrder::Ascending).unwrap();
        let result = fit(&set, &derive_weights(&set)).unwrap();
        let r2 = r_squared(&set, &result);
        assert!(r2 <= 1.0 + 1e-12, "r² = {r2}");
    }
}

#[test]
fn noiseless_data_gives_unit_r_squared() {
    let xs = [-3.0, -1.0, 0.0, 2.0, 2.0, 5.0];
    let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
    let set = ObservationSet::from_values(&xs, &ys, SortOrder::Ascending).unwrap();
    let result = fit(&set, &derive_weights(&set)).unwrap();
    assert!(result.residuals.iter().all(|r| r.abs() < 1e-12));
    assert!((r_squared(&set, &result) - 1.0).abs() < 1e-12);
}

#[test]
fn repeated_x_weight_equals_multiplicity() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..TRIALS {
        let reps = rng.gen_range(2..7);
        let mut xs: Vec<f64> = vec![10.0, 20.0, 30.0];
        xs.extend(std::iter::repeat_n(25.0, reps));
        let ys: Vec<f64> = xs.iter().map(|_| rng.gen_range(0.0..1.0)).collect();

        let set = ObservationSet::from_values(&xs, &ys, SortOrder::Ascending).unwrap();
        let weights = derive_weights(&set);
        for (p, w) in set.points().iter().zip(&weights.weights) {
            let expected = if p.x == 25.0 { reps as f64 } else { 1.0 };
            assert_eq!(*w, expected);
        }
        assert_eq!(weights.duplicates.len(), 1);
        assert_eq!(weights.duplicates[0].count, reps);
    }
}

#[test]
fn identity_relative_uncertainty_ignores_y_scale() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..TRIALS {
        let (xs, ys) = noisy_line(&mut rng, 12, 0.7, -2.0, 1.5);
        let factor = rng.gen_range(0.1..100.0);
        let scaled: Vec<f64> = ys.iter().map(|y| y * factor).collect();

        let rel = |ys: &[f64]| {
            let set = ObservationSet::from_values(&xs, ys, SortOrder::Ascending).unwrap();
            let result = fit(&set, &derive_weights(&set)).unwrap();
            propagate(&result, |k| k, |_| 1.0, None).unwrap()
        };
        let base = rel(&ys);
        let other = rel(&scaled);

        assert!(close(other.value, base.value * factor, 1e-9));
        assert!(close(other.relative_uncertainty, base.relative_uncertainty, 1e-9));
    }
}

#[test]
fn worked_examples() {
    // Exact line.
    let set = ObservationSet::from_values(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0], SortOrder::Ascending).unwrap();
    let result = fit(&set, &derive_weights(&set)).unwrap();
    assert!((result.slope - 1.0).abs() < 1e-12);
    assert!(result.intercept.abs() < 1e-12);
    assert!((r_squared(&set, &result) - 1.0).abs() < 1e-12);

    // Repeated x reading doubles its weight.
    let set = ObservationSet::from_values(&[1.0, 1.0, 2.0], &[1.0, 2.0, 2.0], SortOrder::Ascending).unwrap();
    let weights = derive_weights(&set);
    assert_eq!(weights.weights, vec![2.0, 2.0, 1.0]);
    let result = fit(&set, &weights).unwrap();
    assert!((result.slope - 0.5).abs() < 1e-12);
    assert!((result.intercept - 1.0).abs() < 1e-12);

    // No spread in x.
    let set = ObservationSet::from_values(&[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0], SortOrder::Ascending).unwrap();
    assert!(matches!(fit(&set, &derive_weights(&set)), Err(FitError::SingularFit { .. })));

    // Reciprocal of a zero slope.
    let set = ObservationSet::from_values(&[0.0, 1.0, 2.0], &[5.0, 5.0, 5.0], SortOrder::Ascending).unwrap();
    let result = fit(&set, &derive_weights(&set)).unwrap();
    assert_eq!(result.slope, 0.0);
    let err = propagate(&result, |k| 1.0 / k, |k| -1.0 / (k * k), None).unwrap_err();
    assert!(matches!(err, FitError::UndefinedTransform(_)));
}
