//! The Optimization Adapter
//!
//! Translates a flat request (output buffer, scalar bounds, effort, context,
//! evaluator) into the shape the minimizer expects, calls it exactly once and
//! leaves the best point in the caller's buffer.

use std::cell::Cell;

use boxopt_de::{DEFAULT_SEED, Effort};

use crate::bounds::BoundBuffers;
use crate::error::AdapterError;
use crate::params::OptimizerParams;

/// Seam to the black-box minimizer
pub trait Minimizer {
    /// Minimize `evaluate` over the box `[lower[i], upper[i]]`.
    ///
    /// `lower`, `upper` and `output` have the same length. The best point is
    /// written to `output` and its fitness returned. `None` means no point was
    /// produced and `output` was left as it came in.
    fn minimize<F>(
        &self,
        evaluate: F,
        lower: &[f64],
        upper: &[f64],
        output: &mut [f64],
        effort: Effort,
    ) -> Option<f64>
    where
        F: Fn(&[f64]) -> f64;
}

/// Differential Evolution minimizer from `boxopt_de`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeMinimizer {
    pub seed: u64,
}

impl Default for DeMinimizer {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl DeMinimizer {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Minimizer for DeMinimizer {
    fn minimize<F>(
        &self,
        evaluate: F,
        lower: &[f64],
        upper: &[f64],
        output: &mut [f64],
        effort: Effort,
    ) -> Option<f64>
    where
        F: Fn(&[f64]) -> f64,
    {
        match boxopt_de::minimize(&evaluate, lower, upper, effort, self.seed) {
            Ok(report) => {
                for (slot, &xi) in output.iter_mut().zip(report.x.iter()) {
                    *slot = xi;
                }
                Some(report.fun)
            }
            Err(e) => {
                log::error!("minimizer rejected the request: {}", e);
                None
            }
        }
    }
}

/// What a completed request reports besides the point in `output`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Fitness of the returned point; `None` when no search ran (dimension 0)
    /// or the minimizer produced no point
    pub best_fitness: Option<f64>,
    /// Evaluator invocations
    pub evaluations: usize,
}

/// Minimize `evaluate` over `[lower_bound, upper_bound]^n` with `minimizer`,
/// where `n = output.len()`.
///
/// - `n == 0`: returns at once; nothing is allocated and `evaluate` is never
///   called.
/// - otherwise `output` is zero-filled, the bounds are broadcast, the
///   minimizer runs once and the best point is left in `output`.
///
/// `evaluate` receives `(n, point, context)`; `context` is forwarded as is.
///
/// # Errors
///
/// - `AdapterError::NonFiniteBound` when a bound is infinite or NaN; `output`
///   is left untouched.
/// - `AdapterError::Allocation` when a bound buffer cannot be obtained;
///   `output` is then all zeros and the minimizer has not run.
pub fn optimize_with<M, C, F>(
    minimizer: &M,
    output: &mut [f64],
    context: &C,
    params: &OptimizerParams,
    evaluate: F,
) -> Result<Outcome, AdapterError>
where
    M: Minimizer,
    C: ?Sized,
    F: Fn(usize, &[f64], &C) -> f64,
{
    let dimension = output.len();
    if dimension == 0 {
        log::debug!("optimize: dimension 0, nothing to do");
        return Ok(Outcome { best_fitness: None, evaluations: 0 });
    }

    let (lower, upper) = (params.lower_bound(), params.upper_bound());
    if !lower.is_finite() || !upper.is_finite() {
        let err = AdapterError::NonFiniteBound { lower, upper };
        log::warn!("optimize: {}", err);
        return Err(err);
    }

    output.fill(0.0);
    let bounds =
        BoundBuffers::try_broadcast(dimension, lower, upper)
            .inspect_err(|e| log::warn!("optimize: {}", e))?;

    let evaluations = Cell::new(0usize);
    let objective = |x: &[f64]| {
        evaluations.set(evaluations.get() + 1);
        evaluate(dimension, x, context)
    };
    let best_fitness =
        minimizer.minimize(objective, bounds.lower(), bounds.upper(), output, params.effort());

    log::debug!(
        "optimize: {} dimensions, f={:?} after {} evaluations",
        dimension,
        best_fitness,
        evaluations.get()
    );
    Ok(Outcome { best_fitness, evaluations: evaluations.get() })
}

/// [`optimize_with`] using the default [`DeMinimizer`]
pub fn optimize_with_context<C, F>(
    output: &mut [f64],
    context: &C,
    params: &OptimizerParams,
    evaluate: F,
) -> Result<Outcome, AdapterError>
where
    C: ?Sized,
    F: Fn(usize, &[f64], &C) -> f64,
{
    optimize_with(&DeMinimizer::default(), output, context, params, evaluate)
}

/// Context-free convenience over [`optimize_with_context`]
///
/// # Example
///
/// ```rust
/// use boxopt::{OptimizerParams, optimize};
///
/// let params = OptimizerParams::builder().bounds(-5.0, 5.0).attempts(1).build();
/// let mut x = [0.0; 2];
/// optimize(&mut x, &params, |p| p.iter().map(|v| v * v).sum()).unwrap();
/// assert!(x.iter().all(|v| v.abs() < 1e-2));
/// ```
pub fn optimize<F>(
    output: &mut [f64],
    params: &OptimizerParams,
    evaluate: F,
) -> Result<Outcome, AdapterError>
where
    F: Fn(&[f64]) -> f64,
{
    optimize_with_context(output, &(), params, |_, x, _| evaluate(x))
}
