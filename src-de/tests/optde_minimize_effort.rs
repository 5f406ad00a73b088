use boxopt_de::{DEFAULT_SEED, Effort, minimize};
use boxopt_testfunctions::{create_bounds, quadratic, shifted_l1, split_bounds};
use std::cell::Cell;

#[test]
fn test_minimize_shifted_l1_default_effort() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (lower, upper) = split_bounds(&create_bounds(2, -10.0, 10.0));
    let report = minimize(&shifted_l1, &lower, &upper, Effort::default(), DEFAULT_SEED).unwrap();
    assert!((report.x[0] - 2.0).abs() < 1e-3, "x={:?}", report.x);
    assert!((report.x[1] - 8.0).abs() < 1e-3, "x={:?}", report.x);
    assert!(report.nfev <= 10 * 1000);
}

#[test]
fn test_minimize_counts_every_evaluation() {
    let calls = Cell::new(0usize);
    let func = |x: &[f64]| {
        calls.set(calls.get() + 1);
        quadratic(x)
    };
    let report = minimize(&func, &[-1.0; 3], &[1.0; 3], Effort::new(400, 3, 2), 3).unwrap();
    assert_eq!(report.nfev, calls.get());
    for &xi in report.x.iter() {
        assert!((-1.0..=1.0).contains(&xi));
    }
}

#[test]
fn test_minimize_tiny_budget_still_evaluates() {
    let calls = Cell::new(0usize);
    let func = |x: &[f64]| {
        calls.set(calls.get() + 1);
        quadratic(x)
    };
    let report = minimize(&func, &[-1.0; 2], &[1.0; 2], Effort::new(1, 1, 1), 1).unwrap();
    assert!(calls.get() >= 1);
    assert!(report.fun.is_finite());
}

#[test]
fn test_minimize_fixed_box_returns_the_point() {
    let report = minimize(&quadratic, &[0.25, -0.5], &[0.25, -0.5], Effort::default(), 1).unwrap();
    assert_eq!(report.x.to_vec(), vec![0.25, -0.5]);
    assert_eq!(report.fun, 0.3125);
}
