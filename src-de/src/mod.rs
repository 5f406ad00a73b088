//! Differential Evolution (DE) global optimizer in pure Rust using ndarray
//!
//! This is the minimizer wrapped by the `boxopt` adapter. It is a pragmatic
//! implementation in the spirit of SciPy's `scipy.optimize.differential_evolution`.
//!
//! Supported features:
//! - Box constraints (lower/upper bounds), equal bounds pin a variable
//! - Strategies: best1, rand1, currenttobest1, best2, randtobest1 with
//!   binomial or exponential crossover
//! - Mutation as a fixed factor or dithering in a range [min,max)
//! - Initialization: Latin Hypercube Sampling (LHS) or random uniform
//! - Optional initial guess `x0` overriding the best member after init
//! - Island model with ring migration
//! - Convergence by std(pop_f) <= atol + tol * |mean(pop_f)|, a generation
//!   cap and an evaluation budget
//! - [`minimize`]: restarts and islands driven by an iterations/depth/attempts effort

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod error;
pub use error::{DEError, Result};

mod clip_free_inplace;
mod distinct_indices;
mod init_latin_hypercube;
mod init_random;
mod island;

mod mutant_best1;
mod mutant_best2;
mod mutant_current_to_best1;
mod mutant_rand1;
mod mutant_rand_to_best1;

mod crossover_binomial;
mod crossover_exponential;

pub mod differential_evolution;
pub mod minimize;

pub use differential_evolution::differential_evolution;
pub use minimize::{DEFAULT_SEED, Effort, MinimizeReport, minimize};

use island::Island;

/// Smallest population an island runs with; best/2 draws four donors besides the target
pub const MIN_POPULATION: usize = 8;

const ISLAND_SEED_STRIDE: u64 = 0xD1B5_4A32_D192_ED03;

/// Index and value of the smallest energy. NaN never wins over a number.
pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
    let mut best_i = 0usize;
    let mut best_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if val < best_v || (best_v.is_nan() && !val.is_nan()) {
            best_v = val;
            best_i = i;
        }
    }
    (best_i, best_v)
}

/// Index and value of the largest energy. NaN counts as the worst.
pub(crate) fn argmax(v: &Array1<f64>) -> (usize, f64) {
    let mut worst_i = 0usize;
    let mut worst_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if worst_v.is_nan() {
            break;
        }
        if val > worst_v || val.is_nan() {
            worst_v = val;
            worst_i = i;
        }
    }
    (worst_i, worst_v)
}

/// Call the objective on a row without copying when the row is contiguous
fn evaluate<F>(func: &F, x: ArrayView1<f64>) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    match x.as_slice() {
        Some(s) => func(s),
        None => func(&x.to_vec()),
    }
}

/// Differential Evolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Best1Bin,
    Best1Exp,
    Rand1Bin,
    Rand1Exp,
    CurrentToBest1Bin,
    CurrentToBest1Exp,
    Best2Bin,
    Best2Exp,
    RandToBest1Bin,
    RandToBest1Exp,
}

impl FromStr for Strategy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.to_lowercase();
        match t.as_str() {
            "best1bin" | "best1" => Ok(Strategy::Best1Bin),
            "best1exp" => Ok(Strategy::Best1Exp),
            "rand1bin" | "rand1" => Ok(Strategy::Rand1Bin),
            "rand1exp" => Ok(Strategy::Rand1Exp),
            "currenttobest1bin" | "current-to-best1bin" | "current_to_best1bin" => {
                Ok(Strategy::CurrentToBest1Bin)
            }
            "currenttobest1exp" | "current-to-best1exp" | "current_to_best1exp" => {
                Ok(Strategy::CurrentToBest1Exp)
            }
            "best2bin" | "best2" => Ok(Strategy::Best2Bin),
            "best2exp" => Ok(Strategy::Best2Exp),
            "randtobest1bin" | "rand-to-best1bin" | "rand_to_best1bin" => {
                Ok(Strategy::RandToBest1Bin)
            }
            "randtobest1exp" | "rand-to-best1exp" | "rand_to_best1exp" => {
                Ok(Strategy::RandToBest1Exp)
            }
            _ => Err(format!("unknown strategy: {}", s)),
        }
    }
}

impl Strategy {
    /// Crossover dictated by the strategy suffix
    pub fn crossover(self) -> Crossover {
        match self {
            Strategy::Best1Bin
            | Strategy::Rand1Bin
            | Strategy::CurrentToBest1Bin
            | Strategy::Best2Bin
            | Strategy::RandToBest1Bin => Crossover::Binomial,
            Strategy::Best1Exp
            | Strategy::Rand1Exp
            | Strategy::CurrentToBest1Exp
            | Strategy::Best2Exp
            | Strategy::RandToBest1Exp => Crossover::Exponential,
        }
    }

    fn mutant<R: Rng + ?Sized>(
        self,
        i: usize,
        pop: &Array2<f64>,
        best_idx: usize,
        f: f64,
        rng: &mut R,
    ) -> Array1<f64> {
        use mutant_best1::mutant_best1;
        use mutant_best2::mutant_best2;
        use mutant_current_to_best1::mutant_current_to_best1;
        use mutant_rand1::mutant_rand1;
        use mutant_rand_to_best1::mutant_rand_to_best1;

        match self {
            Strategy::Best1Bin | Strategy::Best1Exp => mutant_best1(i, pop, best_idx, f, rng),
            Strategy::Rand1Bin | Strategy::Rand1Exp => mutant_rand1(i, pop, f, rng),
            Strategy::CurrentToBest1Bin | Strategy::CurrentToBest1Exp => {
                mutant_current_to_best1(i, pop, best_idx, f, rng)
            }
            Strategy::Best2Bin | Strategy::Best2Exp => mutant_best2(i, pop, best_idx, f, rng),
            Strategy::RandToBest1Bin | Strategy::RandToBest1Exp => {
                mutant_rand_to_best1(i, pop, best_idx, f, rng)
            }
        }
    }
}

/// Crossover type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// Binomial (uniform) crossover
    #[default]
    Binomial,
    /// Exponential crossover
    Exponential,
}

/// Mutation setting: either a fixed factor or a uniform range (dithering)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    /// Fixed mutation factor F in [0, 2]
    Factor(f64),
    /// Dithering range [min, max) with 0 <= min <= max <= 2
    Range { min: f64, max: f64 },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Range { min: 0.5, max: 1.0 }
    }
}

impl Mutation {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Mutation::Factor(f) => f,
            Mutation::Range { min, max } => min + rng.random::<f64>() * (max - min),
        }
    }

    fn limits(&self) -> (f64, f64) {
        match *self {
            Mutation::Factor(f) => (f, f),
            Mutation::Range { min, max } => (min, max),
        }
    }
}

/// Initialization scheme for the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Init {
    #[default]
    LatinHypercube,
    Random,
}

/// Configuration for the Differential Evolution optimizer
#[derive(Debug, Clone)]
pub struct DEConfig {
    /// Generation cap
    pub maxiter: usize,
    /// Members per free variable; an island holds max(popsize * n_free, MIN_POPULATION)
    pub popsize: usize,
    pub tol: f64,
    pub atol: f64,
    pub mutation: Mutation,
    /// CR in [0,1]
    pub recombination: f64,
    pub strategy: Strategy,
    pub init: Init,
    pub seed: Option<u64>,
    /// Optional initial guess used to replace the best member after init
    pub x0: Option<Array1<f64>>,
    /// Objective evaluation budget; the initial population is always evaluated
    pub max_evals: Option<usize>,
    /// Number of sub-populations evolving side by side
    pub islands: usize,
    /// Generations between two ring migrations
    pub migration_interval: usize,
}

impl Default for DEConfig {
    fn default() -> Self {
        Self {
            maxiter: 1000,
            popsize: 15,
            tol: 1e-2,
            atol: 0.0,
            mutation: Mutation::default(),
            recombination: 0.7,
            strategy: Strategy::Best1Bin,
            init: Init::default(),
            seed: None,
            x0: None,
            max_evals: None,
            islands: 1,
            migration_interval: 10,
        }
    }
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
pub struct DEConfigBuilder {
    cfg: DEConfig,
}

impl Default for DEConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DEConfigBuilder {
    pub fn new() -> Self {
        Self { cfg: DEConfig::default() }
    }
    pub fn maxiter(mut self, v: usize) -> Self {
        self.cfg.maxiter = v;
        self
    }
    pub fn popsize(mut self, v: usize) -> Self {
        self.cfg.popsize = v;
        self
    }
    pub fn tol(mut self, v: f64) -> Self {
        self.cfg.tol = v;
        self
    }
    pub fn atol(mut self, v: f64) -> Self {
        self.cfg.atol = v;
        self
    }
    pub fn mutation(mut self, v: Mutation) -> Self {
        self.cfg.mutation = v;
        self
    }
    pub fn recombination(mut self, v: f64) -> Self {
        self.cfg.recombination = v;
        self
    }
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn init(mut self, v: Init) -> Self {
        self.cfg.init = v;
        self
    }
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    pub fn x0(mut self, v: Array1<f64>) -> Self {
        self.cfg.x0 = Some(v);
        self
    }
    pub fn max_evals(mut self, v: usize) -> Self {
        self.cfg.max_evals = Some(v);
        self
    }
    pub fn islands(mut self, v: usize) -> Self {
        self.cfg.islands = v;
        self
    }
    pub fn migration_interval(mut self, v: usize) -> Self {
        self.cfg.migration_interval = v;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Rejects a zero population multiplier, a mutation outside [0, 2] or with
    /// min > max, a recombination outside [0, 1], zero islands and a zero
    /// migration interval.
    pub fn build(self) -> Result<DEConfig> {
        let cfg = self.cfg;
        if cfg.popsize == 0 {
            return Err(DEError::PopulationTooSmall { pop_size: cfg.popsize });
        }
        let (min, max) = cfg.mutation.limits();
        if !(0.0..=2.0).contains(&min) || !(0.0..=2.0).contains(&max) || min > max {
            return Err(DEError::InvalidMutation { min, max });
        }
        if !(0.0..=1.0).contains(&cfg.recombination) {
            return Err(DEError::InvalidRecombination(cfg.recombination));
        }
        if cfg.islands == 0 {
            return Err(DEError::InvalidIslands);
        }
        if cfg.migration_interval == 0 {
            return Err(DEError::InvalidMigrationInterval);
        }
        Ok(cfg)
    }
}

/// Result/Report of a DE optimization run
#[derive(Clone)]
pub struct DEReport {
    pub x: Array1<f64>,
    pub fun: f64,
    pub success: bool,
    pub message: String,
    pub nit: usize,
    pub nfev: usize,
    /// Final population of the island holding the best member
    pub population: Array2<f64>,
    pub population_energies: Array1<f64>,
}

impl fmt::Debug for DEReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DEReport")
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("success", &self.success)
            .field("message", &self.message)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field(
                "population",
                &format!("{}x{}", self.population.nrows(), self.population.ncols()),
            )
            .field("population_energies", &format!("len={}", self.population_energies.len()))
            .finish()
    }
}

/// Differential Evolution optimizer
pub struct DifferentialEvolution<'a, F>
where
    F: Fn(&[f64]) -> f64,
{
    func: &'a F,
    lower: Array1<f64>,
    upper: Array1<f64>,
    config: DEConfig,
}

impl<'a, F> DifferentialEvolution<'a, F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Create a new DE optimizer with objective `func` and bounds [lower, upper]
    ///
    /// # Errors
    ///
    /// `BoundsMismatch` when the two arrays differ in length, `NonFiniteBound`
    /// for an infinite or NaN bound, `InvalidBounds` when some upper bound is
    /// below its lower bound.
    pub fn new(func: &'a F, lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(DEError::BoundsMismatch { lower: lower.len(), upper: upper.len() });
        }
        for i in 0..lower.len() {
            if let Some(&value) = [lower[i], upper[i]].iter().find(|v| !v.is_finite()) {
                return Err(DEError::NonFiniteBound { index: i, value });
            }
            if upper[i] < lower[i] {
                return Err(DEError::InvalidBounds { index: i, lower: lower[i], upper: upper[i] });
            }
        }
        Ok(Self { func, lower, upper, config: DEConfig::default() })
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut DEConfig {
        &mut self.config
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: DEConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the optimization and return a report
    pub fn solve(&mut self) -> DEReport {
        use init_latin_hypercube::init_latin_hypercube;
        use init_random::init_random;

        let n = self.lower.len();

        // Identify fixed (equal-bounds) and free variables
        let is_free: Vec<bool> = (0..n).map(|i| self.upper[i] - self.lower[i] > 0.0).collect();
        let n_free = is_free.iter().filter(|&&b| b).count();
        if n_free == 0 {
            // All fixed; just evaluate x = lower
            let x = self.lower.clone();
            let f = evaluate(self.func, x.view());
            log::debug!("DE: all {} variables fixed by bounds, f={:.6e}", n, f);
            return DEReport {
                population: x.clone().insert_axis(ndarray::Axis(0)),
                x,
                fun: f,
                success: true,
                message: "All variables fixed by bounds".into(),
                nit: 0,
                nfev: 1,
                population_energies: Array1::from(vec![f]),
            };
        }

        let npop = (self.config.popsize * n_free).max(MIN_POPULATION);
        let n_islands = self.config.islands.max(1);
        let migration_interval = self.config.migration_interval.max(1);
        let budget = self.config.max_evals.unwrap_or(usize::MAX);
        let generation_cost = npop * n_islands;

        log::debug!(
            "DE init: {} dimensions ({} free), {} island(s) of {}, maxiter={}, budget={}",
            n,
            n_free,
            n_islands,
            npop,
            self.config.maxiter,
            budget
        );
        log::debug!(
            "  strategy={:?}, mutation={:?}, CR={:.3}, tol={:.2e}, atol={:.2e}",
            self.config.strategy,
            self.config.mutation,
            self.config.recombination,
            self.config.tol,
            self.config.atol
        );

        // Timing toggle via env var
        let timing_enabled = std::env::var("BOXOPT_DE_TIMING").map(|v| v != "0").unwrap_or(false);

        let base_seed: u64 = match self.config.seed {
            Some(s) => s,
            None => rand::rng().random(),
        };

        // Initialize every island in [lower, upper]
        let mut islands: Vec<Island> = (0..n_islands)
            .map(|k| {
                let mut rng = StdRng::seed_from_u64(
                    base_seed.wrapping_add((k as u64).wrapping_mul(ISLAND_SEED_STRIDE)),
                );
                let pop = match self.config.init {
                    Init::LatinHypercube => {
                        init_latin_hypercube(n, npop, &self.lower, &self.upper, &is_free, &mut rng)
                    }
                    Init::Random => init_random(n, npop, &self.lower, &self.upper, &is_free, &mut rng),
                };
                Island::new(pop, rng)
            })
            .collect();

        let t_eval0 = Instant::now();
        let mut nfev: usize = 0;
        for island in islands.iter_mut() {
            island.energies = island.pop.outer_iter().map(|row| evaluate(self.func, row)).collect();
            nfev += npop;
        }
        let mut t_eval_tot = t_eval0.elapsed();

        // If x0 provided, override the best member of the first island
        if let Some(x0) = &self.config.x0 {
            if x0.len() == n {
                let mut x0c = x0.clone();
                clip_free_inplace::clip_free_inplace(&mut x0c, &self.lower, &self.upper, &is_free);
                let f0 = evaluate(self.func, x0c.view());
                nfev += 1;
                let (best_idx, _) = islands[0].best();
                islands[0].pop.row_mut(best_idx).assign(&x0c);
                islands[0].energies[best_idx] = f0;
            } else {
                log::warn!("DE: ignoring x0 of length {} for a {}-dimensional problem", x0.len(), n);
            }
        }

        let (mut best_island, mut best_f) = global_best(&islands);
        let mut best_x = {
            let (idx, _) = islands[best_island].best();
            islands[best_island].pop.row(idx).to_owned()
        };
        log::trace!("DE iter {:4}  best_f={:.6e}", 0, best_f);

        // Main loop
        let mut success = false;
        let mut message = format!("Maximum iterations reached: {}", self.config.maxiter);
        let mut nit = 0;
        let mut t_iter_tot = Duration::ZERO;

        for iter in 1..=self.config.maxiter {
            if nfev.saturating_add(generation_cost) > budget {
                message = format!("Evaluation budget exhausted: {} of {} used", nfev, budget);
                break;
            }
            nit = iter;
            let iter_start = Instant::now();

            let mut accepted = 0;
            let mut t_eval = Duration::ZERO;
            for island in islands.iter_mut() {
                accepted += self.evolve_island(island, &is_free, &mut t_eval);
            }
            nfev += generation_cost;
            t_eval_tot += t_eval;

            if n_islands > 1 && iter % migration_interval == 0 {
                let moved = island::migrate_ring(&mut islands);
                log::trace!("DE iter {:4}  migrated {} member(s)", iter, moved);
            }

            // Update best solution after generation
            let (new_island, new_f) = global_best(&islands);
            if new_f < best_f || (best_f.is_nan() && !new_f.is_nan()) {
                best_island = new_island;
                best_f = new_f;
                let (idx, _) = islands[best_island].best();
                best_x = islands[best_island].pop.row(idx).to_owned();
            }

            // Convergence check
            let (pop_mean, pop_std) = energy_stats(&islands);
            let convergence_threshold = self.config.atol + self.config.tol * pop_mean.abs();

            let iter_dur = iter_start.elapsed();
            t_iter_tot += iter_dur;

            log::trace!(
                "DE iter {:4}  best_f={:.6e}  std={:.3e}  accepted={}/{}",
                iter,
                best_f,
                pop_std,
                accepted,
                generation_cost
            );
            if timing_enabled && (iter <= 5 || iter % 10 == 0) {
                log::debug!(
                    "TIMING iter {:4}: eval={:.3} ms, total={:.3} ms",
                    iter,
                    t_eval.as_secs_f64() * 1e3,
                    iter_dur.as_secs_f64() * 1e3
                );
            }

            if pop_std <= convergence_threshold {
                success = true;
                message = format!(
                    "Converged: std(pop_f)={:.3e} <= threshold={:.3e}",
                    pop_std, convergence_threshold
                );
                break;
            }
        }

        log::debug!("DE finished after {} generation(s), {} evaluations: {}", nit, nfev, message);
        if timing_enabled {
            log::debug!(
                "TIMING total: eval={:.3} s, iter_total={:.3} s",
                t_eval_tot.as_secs_f64(),
                t_iter_tot.as_secs_f64()
            );
        }

        let Island { pop, energies, .. } = islands.swap_remove(best_island);
        DEReport {
            x: best_x,
            fun: best_f,
            success,
            message,
            nit,
            nfev,
            population: pop,
            population_energies: energies,
        }
    }

    /// One generation on one island: build every trial against the current
    /// best, then select greedily. Returns the number of accepted trials.
    fn evolve_island(&self, island: &mut Island, is_free: &[bool], t_eval: &mut Duration) -> usize {
        use clip_free_inplace::clip_free_inplace;
        use crossover_binomial::binomial_crossover;
        use crossover_exponential::exponential_crossover;

        let npop = island.pop.nrows();
        let (best_idx, _) = island.best();
        let strategy = self.config.strategy;
        let cr = self.config.recombination;

        let mut trials = Vec::with_capacity(npop);
        for i in 0..npop {
            let f = self.config.mutation.sample(&mut island.rng);
            let mutant = strategy.mutant(i, &island.pop, best_idx, f, &mut island.rng);
            let target = island.pop.row(i);
            let mut trial = match strategy.crossover() {
                Crossover::Binomial => binomial_crossover(&target, &mutant, cr, &mut island.rng),
                Crossover::Exponential => {
                    exponential_crossover(&target, &mutant, cr, &mut island.rng)
                }
            };
            clip_free_inplace(&mut trial, &self.lower, &self.upper, is_free);
            trials.push(trial);
        }

        let t0 = Instant::now();
        let mut accepted = 0;
        for (i, trial) in trials.into_iter().enumerate() {
            let energy = evaluate(self.func, trial.view());
            let current = island.energies[i];
            if energy <= current || (current.is_nan() && !energy.is_nan()) {
                island.pop.row_mut(i).assign(&trial);
                island.energies[i] = energy;
                accepted += 1;
            }
        }
        *t_eval += t0.elapsed();
        accepted
    }
}

/// Island holding the best member and its energy
fn global_best(islands: &[Island]) -> (usize, f64) {
    let mut best_k = 0;
    let mut best_f = f64::NAN;
    for (k, island) in islands.iter().enumerate() {
        let (_, f) = island.best();
        if f < best_f || (best_f.is_nan() && !f.is_nan()) {
            best_k = k;
            best_f = f;
        }
    }
    (best_k, best_f)
}

/// Mean and population standard deviation of all energies across islands
fn energy_stats(islands: &[Island]) -> (f64, f64) {
    let count: usize = islands.iter().map(|island| island.energies.len()).sum();
    let sum: f64 = islands.iter().map(|island| island.energies.sum()).sum();
    let mean = sum / count as f64;
    let sq: f64 = islands
        .iter()
        .flat_map(|island| island.energies.iter())
        .map(|&e| (e - mean) * (e - mean))
        .sum();
    (mean, (sq / count as f64).sqrt())
}

#[cfg(test)]
mod strategy_tests {
    use super::*;

    #[test]
    fn test_parse_strategy_variants() {
        assert_eq!("best1exp".parse::<Strategy>().unwrap(), Strategy::Best1Exp);
        assert_eq!("rand1".parse::<Strategy>().unwrap(), Strategy::Rand1Bin);
        assert_eq!("Rand-To-Best1Bin".parse::<Strategy>().unwrap(), Strategy::RandToBest1Bin);
        assert!("rand3bin".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_dictates_crossover() {
        assert_eq!(Strategy::Best2Bin.crossover(), Crossover::Binomial);
        assert_eq!(Strategy::CurrentToBest1Exp.crossover(), Crossover::Exponential);
    }

    #[test]
    fn test_argmin_argmax_with_nan() {
        let v = Array1::from(vec![f64::NAN, 3.0, 1.0, 2.0]);
        assert_eq!(argmin(&v), (2, 1.0));
        let (i, w) = argmax(&v);
        assert_eq!(i, 0);
        assert!(w.is_nan());

        let v = Array1::from(vec![3.0, f64::NAN, 5.0]);
        assert_eq!(argmax(&v).0, 1);
    }
}
