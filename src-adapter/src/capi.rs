//! C ABI
//!
//! Status codes: 0 success, -1 allocation failure, -2 invalid argument.
//! The declarations live in `include/boxopt.h`.

use libc::{c_char, c_double, c_int, c_void};

use crate::adapter::{DeMinimizer, Outcome, optimize_with};
use crate::error::{AdapterError, Status};
use crate::params::OptimizerParams;

/// Objective supplied by the caller: `(dimension, point, context) -> fitness`
///
/// `point` holds `dimension` values and is only valid during the call.
pub type EvaluateFn =
    extern "C" fn(dimension: c_int, point: *const c_double, context: *mut c_void) -> c_double;

/// Caller context, forwarded to every evaluation and never dereferenced
#[derive(Debug, Clone, Copy)]
struct ContextHandle(*mut c_void);

unsafe fn optimize_raw(
    output: *mut c_double,
    dimension: c_int,
    context: *mut c_void,
    params: &OptimizerParams,
    evaluate: Option<EvaluateFn>,
) -> Result<Outcome, AdapterError> {
    if dimension == 0 {
        return Ok(Outcome { best_fitness: None, evaluations: 0 });
    }
    if dimension < 0 {
        return Err(AdapterError::NegativeDimension(dimension));
    }
    if output.is_null() {
        return Err(AdapterError::NullPointer("output"));
    }
    let Some(evaluate) = evaluate else {
        return Err(AdapterError::NullPointer("evaluate"));
    };

    let output = unsafe { std::slice::from_raw_parts_mut(output, dimension as usize) };
    let handle = ContextHandle(context);
    optimize_with(&DeMinimizer::default(), output, &handle, params, |n, x, ctx| {
        evaluate(n as c_int, x.as_ptr(), ctx.0)
    })
}

fn status_of(result: &Result<Outcome, AdapterError>) -> c_int {
    if let Err(e) = result {
        if !matches!(e, AdapterError::Allocation { .. }) {
            log::warn!("boxopt_optimize: {}", e);
        }
    }
    Status::from(result).code()
}

/// C API: Minimize `evaluate` over `[lower_bound, upper_bound]^dimension`.
///
/// Returns 0 on success (the best point is in `output`), -1 when the bound
/// buffers could not be allocated (`output` is all zeros), -2 for a negative
/// `dimension`, a null `output`/`evaluate` or an infinite/NaN bound.
/// `dimension == 0` returns 0 without touching anything.
///
/// # Safety
/// Caller must ensure:
/// - `output` points to a writable buffer of at least `dimension` doubles
/// - `evaluate` does not unwind and only reads `dimension` values of `point`
/// - `context` stays valid for whatever `evaluate` does with it
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn boxopt_optimize(
    output: *mut c_double,
    dimension: c_int,
    context: *mut c_void,
    lower_bound: c_double,
    upper_bound: c_double,
    iterations: c_int,
    depth: c_int,
    attempts: c_int,
    evaluate: Option<EvaluateFn>,
) -> c_int {
    let params = OptimizerParams::builder()
        .bounds(lower_bound, upper_bound)
        .iterations(iterations)
        .depth(depth)
        .attempts(attempts)
        .build();
    let result = unsafe { optimize_raw(output, dimension, context, &params, evaluate) };
    status_of(&result)
}

/// C API: [`boxopt_optimize`] that also reports the best fitness.
///
/// `*best_fitness` is written only when the pointer is non-null and a search
/// ran, that is on success with `dimension > 0`.
///
/// # Safety
/// Same as [`boxopt_optimize`]; `best_fitness` is null or points to a
/// writable double.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn boxopt_optimize_ex(
    output: *mut c_double,
    dimension: c_int,
    context: *mut c_void,
    lower_bound: c_double,
    upper_bound: c_double,
    iterations: c_int,
    depth: c_int,
    attempts: c_int,
    evaluate: Option<EvaluateFn>,
    best_fitness: *mut c_double,
) -> c_int {
    let params = OptimizerParams::builder()
        .bounds(lower_bound, upper_bound)
        .iterations(iterations)
        .depth(depth)
        .attempts(attempts)
        .build();
    let result = unsafe { optimize_raw(output, dimension, context, &params, evaluate) };
    if let Ok(Outcome { best_fitness: Some(f), .. }) = result {
        if !best_fitness.is_null() {
            unsafe { *best_fitness = f };
        }
    }
    status_of(&result)
}

/// C API: Library version packed as `major << 16 | minor << 8 | patch`.
#[unsafe(no_mangle)]
pub extern "C" fn boxopt_version() -> c_int {
    let mut parts = crate::VERSION.split('.').filter_map(|p| p.parse::<c_int>().ok());
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    (major << 16) | (minor << 8) | patch
}

/// C API: Static description of a status code. Never null, never freed.
#[unsafe(no_mangle)]
pub extern "C" fn boxopt_status_message(status: c_int) -> *const c_char {
    Status::message(status).as_ptr()
}

/// C API: Install the library logger (filter from `BOXOPT_LOG`). Idempotent.
#[unsafe(no_mangle)]
pub extern "C" fn boxopt_init_logging() {
    crate::init_logging();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    extern "C" fn sphere(dimension: c_int, point: *const c_double, _: *mut c_void) -> c_double {
        let x = unsafe { std::slice::from_raw_parts(point, dimension as usize) };
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_version_matches_package() {
        let v = boxopt_version();
        assert_eq!(v >> 16, env!("CARGO_PKG_VERSION_MAJOR").parse::<c_int>().unwrap());
        assert_eq!((v >> 8) & 0xff, env!("CARGO_PKG_VERSION_MINOR").parse::<c_int>().unwrap());
        assert_eq!(v & 0xff, env!("CARGO_PKG_VERSION_PATCH").parse::<c_int>().unwrap());
    }

    #[test]
    fn test_status_message_is_static_text() {
        let msg = unsafe { CStr::from_ptr(boxopt_status_message(-1)) };
        assert_eq!(msg.to_str().unwrap(), "allocation failure");
    }

    #[test]
    fn test_invalid_arguments() {
        let mut out = [1.0; 2];
        let ctx = std::ptr::null_mut();
        let negative = unsafe {
            boxopt_optimize(out.as_mut_ptr(), -1, ctx, -1.0, 1.0, 10, 1, 1, Some(sphere))
        };
        assert_eq!(negative, -2);
        let null_out =
            unsafe { boxopt_optimize(std::ptr::null_mut(), 2, ctx, -1.0, 1.0, 10, 1, 1, Some(sphere)) };
        assert_eq!(null_out, -2);
        let null_eval =
            unsafe { boxopt_optimize(out.as_mut_ptr(), 2, ctx, -1.0, 1.0, 10, 1, 1, None) };
        assert_eq!(null_eval, -2);
        // nothing ran, so nothing was zeroed
        assert_eq!(out, [1.0; 2]);
    }

    #[test]
    fn test_zero_dimension_accepts_null_pointers() {
        let mut best = -7.0;
        let status = unsafe {
            boxopt_optimize_ex(
                std::ptr::null_mut(),
                0,
                std::ptr::null_mut(),
                -1.0,
                1.0,
                10,
                1,
                1,
                None,
                &mut best,
            )
        };
        assert_eq!(status, 0);
        assert_eq!(best, -7.0);
    }
}
