//! Effort-budgeted minimization: the single entry point the adapter drives.
//!
//! The three effort knobs keep the meaning they have for BiteOpt-style
//! minimizers:
//! - `iterations`: objective evaluations per attempt
//! - `depth`: number of sub-populations (islands) searching together
//! - `attempts`: independent restarts, the best one is kept
//!
//! Values below one are treated as one. Runs are deterministic for a seed.

use ndarray::Array1;

use crate::{
    DEConfigBuilder, DEReport, DifferentialEvolution, Init, Mutation, Result, Strategy,
};

/// Members per free variable and island
const POPSIZE_PER_VARIABLE: usize = 5;
const ATTEMPT_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed used when the caller has no preference
pub const DEFAULT_SEED: u64 = 1;

/// Raw effort parameters, as received over the C ABI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effort {
    pub iterations: i32,
    pub depth: i32,
    pub attempts: i32,
}

impl Default for Effort {
    fn default() -> Self {
        Self { iterations: 1000, depth: 1, attempts: 10 }
    }
}

impl Effort {
    pub fn new(iterations: i32, depth: i32, attempts: i32) -> Self {
        Self { iterations, depth, attempts }
    }

    /// Evaluation budget of one attempt
    pub fn evaluations_per_attempt(&self) -> usize {
        self.iterations.max(1) as usize
    }

    pub fn islands(&self) -> usize {
        self.depth.max(1) as usize
    }

    pub fn attempts(&self) -> usize {
        self.attempts.max(1) as usize
    }
}

/// Outcome of [`minimize`]
#[derive(Debug, Clone)]
pub struct MinimizeReport {
    /// Best point over all attempts
    pub x: Array1<f64>,
    /// Objective value at `x`
    pub fun: f64,
    /// Objective evaluations over all attempts
    pub nfev: usize,
    pub attempts: usize,
    /// Zero-based attempt that produced `x`
    pub best_attempt: usize,
}

/// Minimize `func` over the box spanned by `lower` and `upper`.
///
/// Each pair is read as the interval between its two values, so an inverted
/// pair searches the same box as the ordered one.
///
/// # Errors
///
/// `BoundsMismatch` when `lower` and `upper` differ in length,
/// `NonFiniteBound` when a bound is infinite or NaN.
///
/// # Example
///
/// ```rust
/// use boxopt_de::{Effort, minimize};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let report = minimize(&sphere, &[-5.0; 2], &[5.0; 2], Effort::new(1000, 1, 1), 1).unwrap();
/// assert!(report.fun < 1e-4);
/// ```
pub fn minimize<F>(
    func: &F,
    lower: &[f64],
    upper: &[f64],
    effort: Effort,
    seed: u64,
) -> Result<MinimizeReport>
where
    F: Fn(&[f64]) -> f64,
{
    if lower.len() != upper.len() {
        return Err(crate::DEError::BoundsMismatch { lower: lower.len(), upper: upper.len() });
    }
    let (lo, hi): (Vec<f64>, Vec<f64>) = lower
        .iter()
        .zip(upper)
        .map(|(&l, &u)| if u < l { (u, l) } else { (l, u) })
        .unzip();
    let lo = Array1::from(lo);
    let hi = Array1::from(hi);

    let attempts = effort.attempts();
    log::debug!(
        "minimize: {} dimensions, {} evaluations x {} attempt(s), {} island(s)",
        lo.len(),
        effort.evaluations_per_attempt(),
        attempts,
        effort.islands()
    );

    let run_attempt = |attempt: usize| -> Result<DEReport> {
        // budget-driven: only a fully collapsed population stops an attempt early
        let config = DEConfigBuilder::new()
            .strategy(Strategy::Best1Bin)
            .mutation(Mutation::Range { min: 0.5, max: 1.0 })
            .recombination(0.9)
            .popsize(POPSIZE_PER_VARIABLE)
            .init(Init::LatinHypercube)
            .tol(0.0)
            .atol(0.0)
            .maxiter(usize::MAX)
            .max_evals(effort.evaluations_per_attempt())
            .islands(effort.islands())
            .seed(seed.wrapping_add((attempt as u64).wrapping_mul(ATTEMPT_SEED_STRIDE)))
            .build()?;
        let de = DifferentialEvolution::new(func, lo.clone(), hi.clone())?;
        let report = de.with_config(config).solve();
        log::debug!(
            "minimize: attempt {}/{} f={:.6e} nfev={} ({})",
            attempt + 1,
            attempts,
            report.fun,
            report.nfev,
            report.message
        );
        Ok(report)
    };

    let mut best = run_attempt(0)?;
    let mut best_attempt = 0;
    let mut nfev = best.nfev;
    for attempt in 1..attempts {
        let report = run_attempt(attempt)?;
        nfev += report.nfev;
        if report.fun < best.fun || (best.fun.is_nan() && !report.fun.is_nan()) {
            best = report;
            best_attempt = attempt;
        }
    }

    Ok(MinimizeReport { x: best.x, fun: best.fun, nfev, attempts, best_attempt })
}
