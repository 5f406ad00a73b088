//! Request parameters: the scalar bounds and the effort budget

use boxopt_de::Effort;

/// Bounds and effort for one optimization request
///
/// The bounds are scalars broadcast to every dimension and must be finite;
/// infinite or NaN bounds are rejected with `AdapterError::NonFiniteBound`.
/// The effort values are passed to the minimizer verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerParams {
    lower_bound: f64,
    upper_bound: f64,
    iterations: i32,
    depth: i32,
    attempts: i32,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self { lower_bound: -1.0, upper_bound: 1.0, iterations: 1000, depth: 1, attempts: 10 }
    }
}

impl OptimizerParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> OptimizerParamsBuilder {
        OptimizerParamsBuilder::new()
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn iterations(&self) -> i32 {
        self.iterations
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn attempts(&self) -> i32 {
        self.attempts
    }

    pub fn set_lower_bound(&mut self, lower_bound: f64) {
        self.lower_bound = lower_bound;
    }

    pub fn set_upper_bound(&mut self, upper_bound: f64) {
        self.upper_bound = upper_bound;
    }

    pub fn set_iterations(&mut self, iterations: i32) {
        self.iterations = iterations;
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn set_attempts(&mut self, attempts: i32) {
        self.attempts = attempts;
    }

    /// Effort triple in the minimizer's terms
    pub fn effort(&self) -> Effort {
        Effort::new(self.iterations, self.depth, self.attempts)
    }
}

/// Fluent builder for [`OptimizerParams`]
#[derive(Debug, Clone, Default)]
pub struct OptimizerParamsBuilder {
    params: OptimizerParams,
}

impl OptimizerParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both scalar bounds
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.params.lower_bound = lower;
        self.params.upper_bound = upper;
        self
    }

    pub fn lower_bound(mut self, v: f64) -> Self {
        self.params.lower_bound = v;
        self
    }

    pub fn upper_bound(mut self, v: f64) -> Self {
        self.params.upper_bound = v;
        self
    }

    pub fn iterations(mut self, v: i32) -> Self {
        self.params.iterations = v;
        self
    }

    pub fn depth(mut self, v: i32) -> Self {
        self.params.depth = v;
        self
    }

    pub fn attempts(mut self, v: i32) -> Self {
        self.params.attempts = v;
        self
    }

    pub fn build(self) -> OptimizerParams {
        self.params
    }
}
