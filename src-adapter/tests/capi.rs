use std::cell::{Cell, RefCell};

use boxopt::capi::{boxopt_optimize, boxopt_optimize_ex};
use libc::{c_double, c_int, c_void};

thread_local! {
    static CALLS: Cell<usize> = const { Cell::new(0) };
    static CONTEXTS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

fn reset() {
    CALLS.with(|c| c.set(0));
    CONTEXTS.with(|c| c.borrow_mut().clear());
}

fn point<'a>(dimension: c_int, x: *const c_double) -> &'a [f64] {
    unsafe { std::slice::from_raw_parts(x, dimension as usize) }
}

extern "C" fn sphere(dimension: c_int, x: *const c_double, _: *mut c_void) -> c_double {
    CALLS.with(|c| c.set(c.get() + 1));
    boxopt_testfunctions::sphere(point(dimension, x))
}

extern "C" fn constant(_: c_int, _: *const c_double, _: *mut c_void) -> c_double {
    CALLS.with(|c| c.set(c.get() + 1));
    42.0
}

extern "C" fn record_context(dimension: c_int, x: *const c_double, ctx: *mut c_void) -> c_double {
    CONTEXTS.with(|c| c.borrow_mut().push(ctx as usize));
    point(dimension, x).iter().map(|v| v.abs()).sum()
}

/// Objective that reads its target from the context
extern "C" fn distance_to_target(dimension: c_int, x: *const c_double, ctx: *mut c_void) -> c_double {
    let target = unsafe { &*(ctx as *const Vec<f64>) };
    point(dimension, x).iter().zip(target).map(|(a, b)| (a - b).powi(2)).sum()
}

#[test]
fn test_zero_dimension_is_a_no_op() {
    reset();
    let mut out = [3.0; 2];
    let status = unsafe {
        boxopt_optimize(out.as_mut_ptr(), 0, std::ptr::null_mut(), -1.0, 1.0, 100, 1, 1, Some(sphere))
    };
    assert_eq!(status, 0);
    assert_eq!(CALLS.with(|c| c.get()), 0);
    assert_eq!(out, [3.0; 2]);
}

#[test]
fn test_sphere_2d_finds_origin() {
    reset();
    let mut out = [9.0; 2];
    let status = unsafe {
        boxopt_optimize(out.as_mut_ptr(), 2, std::ptr::null_mut(), -5.0, 5.0, 1000, 1, 1, Some(sphere))
    };
    assert_eq!(status, 0);
    assert!(out[0].abs() < 1e-2 && out[1].abs() < 1e-2, "out={:?}", out);
    assert!(CALLS.with(|c| c.get()) <= 1000);
}

#[test]
fn test_output_stays_within_bounds() {
    for &(lo, hi, dim) in &[(-5.0, 5.0, 1), (2.0, 3.0, 4), (-100.0, -99.5, 3), (0.0, 1e-9, 2)] {
        reset();
        let mut out = vec![f64::NAN; dim];
        let status = unsafe {
            boxopt_optimize(
                out.as_mut_ptr(),
                dim as c_int,
                std::ptr::null_mut(),
                lo,
                hi,
                300,
                2,
                2,
                Some(sphere),
            )
        };
        assert_eq!(status, 0);
        for &xi in &out {
            assert!(lo <= xi && xi <= hi, "[{}, {}] -> {}", lo, hi, xi);
        }
    }
}

#[test]
fn test_inverted_bounds_search_the_spanned_box() {
    reset();
    let mut out = [0.0; 3];
    let status = unsafe {
        boxopt_optimize(out.as_mut_ptr(), 3, std::ptr::null_mut(), 4.0, 1.0, 500, 1, 2, Some(sphere))
    };
    assert_eq!(status, 0);
    for &xi in &out {
        assert!((1.0..=4.0).contains(&xi), "xi={}", xi);
    }
}

#[test]
fn test_context_is_forwarded_verbatim() {
    reset();
    // never dereferenced by the library, so any address will do
    let sentinel = 0xDEAD_BEEF_usize as *mut c_void;
    let mut out = [0.0; 2];
    let status = unsafe {
        boxopt_optimize(out.as_mut_ptr(), 2, sentinel, -1.0, 1.0, 200, 1, 3, Some(record_context))
    };
    assert_eq!(status, 0);
    CONTEXTS.with(|c| {
        let seen = c.borrow();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|&p| p == 0xDEAD_BEEF));
    });
}

#[test]
fn test_context_carries_caller_state() {
    let mut target = vec![0.25, -0.75, 0.5];
    let mut out = [0.0; 3];
    let status = unsafe {
        boxopt_optimize(
            out.as_mut_ptr(),
            3,
            &mut target as *mut Vec<f64> as *mut c_void,
            -1.0,
            1.0,
            2000,
            1,
            2,
            Some(distance_to_target),
        )
    };
    assert_eq!(status, 0);
    for (o, t) in out.iter().zip(&target) {
        assert!((o - t).abs() < 1e-2, "out={:?}", out);
    }
}

#[test]
fn test_constant_landscape_gives_defined_point() {
    reset();
    let mut out = [f64::NAN; 4];
    let mut best = 0.0;
    let status = unsafe {
        boxopt_optimize_ex(
            out.as_mut_ptr(),
            4,
            std::ptr::null_mut(),
            -2.0,
            2.0,
            1000,
            1,
            10,
            Some(constant),
            &mut best,
        )
    };
    assert_eq!(status, 0);
    assert_eq!(best, 42.0);
    assert!(CALLS.with(|c| c.get()) > 0);
    for &xi in &out {
        assert!(!xi.is_nan() && (-2.0..=2.0).contains(&xi), "xi={}", xi);
    }
}

#[test]
fn test_best_fitness_matches_output() {
    reset();
    let mut out = [0.0; 2];
    let mut best = f64::NAN;
    let status = unsafe {
        boxopt_optimize_ex(
            out.as_mut_ptr(),
            2,
            std::ptr::null_mut(),
            -3.0,
            3.0,
            800,
            1,
            2,
            Some(sphere),
            &mut best,
        )
    };
    assert_eq!(status, 0);
    assert_eq!(best, boxopt_testfunctions::sphere(&out));

    // a null best-fitness slot is allowed
    let status = unsafe {
        boxopt_optimize_ex(
            out.as_mut_ptr(),
            2,
            std::ptr::null_mut(),
            -3.0,
            3.0,
            100,
            1,
            1,
            Some(sphere),
            std::ptr::null_mut(),
        )
    };
    assert_eq!(status, 0);
}

#[test]
fn test_nonpositive_effort_counts_as_one() {
    reset();
    let mut out = [0.0; 2];
    let status = unsafe {
        boxopt_optimize(out.as_mut_ptr(), 2, std::ptr::null_mut(), -1.0, 1.0, 0, -4, 0, Some(sphere))
    };
    assert_eq!(status, 0);
    // the initial population is always evaluated, one attempt only
    let calls = CALLS.with(|c| c.get());
    assert!(calls >= 1 && calls <= 64, "calls={}", calls);
}

extern "C" fn scaled_sphere(dimension: c_int, x: *const c_double, _: *mut c_void) -> c_double {
    point(dimension, x).iter().map(|v| (v * 1e-300).powi(2)).sum()
}

#[test]
fn test_bounds_wider_than_f64_max() {
    let mut out = [0.0; 2];
    let mut best = f64::NAN;
    let status = unsafe {
        boxopt_optimize_ex(
            out.as_mut_ptr(),
            2,
            std::ptr::null_mut(),
            -1e308,
            1e308,
            3000,
            1,
            3,
            Some(scaled_sphere),
            &mut best,
        )
    };
    assert_eq!(status, 0);
    assert!(best < 1.0, "best={}", best);
    assert!(out.iter().all(|v| v.is_finite() && v.abs() < 1e300), "out={:?}", out);
}

#[test]
fn test_non_finite_bounds_are_invalid() {
    reset();
    for (lo, hi) in [(f64::NEG_INFINITY, f64::INFINITY), (f64::NAN, 1.0), (-1.0, f64::INFINITY)] {
        let mut out = [3.0; 2];
        let status = unsafe {
            boxopt_optimize(out.as_mut_ptr(), 2, std::ptr::null_mut(), lo, hi, 100, 1, 1, Some(sphere))
        };
        assert_eq!(status, -2);
        assert_eq!(out, [3.0; 2]);
    }
    assert_eq!(CALLS.with(|c| c.get()), 0);
}
