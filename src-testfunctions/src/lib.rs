//! Optimization test functions library
//!
//! Objectives used to benchmark and validate the boxopt minimizers. Every
//! function takes a plain slice, which is what both the engine and the C
//! boundary hand to an objective. Functions are organized by category:
//!
//! - **Unimodal**: Single global optimum functions (sphere, rosenbrock, etc.)
//! - **Multimodal**: Multiple local minima functions (ackley, rastrigin, etc.)
//!
//! # Example
//!
//! ```rust
//! use boxopt_testfunctions::*;
//!
//! assert_eq!(sphere(&[0.0, 0.0]), 0.0);
//!
//! let meta = get_function_metadata("rosenbrock").unwrap();
//! assert_eq!(meta.global_minima[0].1, 0.0);
//! ```

pub mod functions;
pub use functions::*;

/// Metadata for a test function: search box and known optima
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: &'static str,
    /// The objective itself
    pub function: fn(&[f64]) -> f64,
    /// Bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Whether the function is multimodal
    pub multimodal: bool,
}

/// Per-dimension bounds, all set to `[lower, upper]`
pub fn create_bounds(n: usize, lower: f64, upper: f64) -> Vec<(f64, f64)> {
    vec![(lower, upper); n]
}

/// Split bounds into the separate lower and upper vectors the minimizers take
pub fn split_bounds(bounds: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
    bounds.iter().copied().unzip()
}

/// Metadata for every registered function, in two dimensions
pub fn all_functions() -> Vec<FunctionMetadata> {
    vec![
        FunctionMetadata {
            name: "sphere",
            function: sphere,
            bounds: create_bounds(2, -5.12, 5.12),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: false,
        },
        FunctionMetadata {
            name: "quadratic",
            function: quadratic,
            bounds: create_bounds(2, -1.0, 1.0),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: false,
        },
        FunctionMetadata {
            name: "rosenbrock",
            function: rosenbrock,
            bounds: create_bounds(2, -5.0, 10.0),
            global_minima: vec![(vec![1.0, 1.0], 0.0)],
            multimodal: false,
        },
        FunctionMetadata {
            name: "booth",
            function: booth,
            bounds: create_bounds(2, -10.0, 10.0),
            global_minima: vec![(vec![1.0, 3.0], 0.0)],
            multimodal: false,
        },
        FunctionMetadata {
            name: "shifted_l1",
            function: shifted_l1,
            bounds: create_bounds(2, -10.0, 10.0),
            global_minima: vec![(vec![2.0, 8.0], 0.0)],
            multimodal: false,
        },
        FunctionMetadata {
            name: "rastrigin",
            function: rastrigin,
            bounds: create_bounds(2, -5.12, 5.12),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: true,
        },
        FunctionMetadata {
            name: "ackley",
            function: ackley,
            bounds: create_bounds(2, -32.768, 32.768),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: true,
        },
        FunctionMetadata {
            name: "griewank",
            function: griewank,
            bounds: create_bounds(2, -600.0, 600.0),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: true,
        },
        FunctionMetadata {
            name: "himmelblau",
            function: himmelblau,
            bounds: create_bounds(2, -5.0, 5.0),
            global_minima: vec![
                (vec![3.0, 2.0], 0.0),
                (vec![-2.805118, 3.131312], 0.0),
                (vec![-3.779310, -3.283186], 0.0),
                (vec![3.584428, -1.848126], 0.0),
            ],
            multimodal: true,
        },
    ]
}

/// Look up a function by name
pub fn get_function_metadata(name: &str) -> Option<FunctionMetadata> {
    all_functions().into_iter().find(|m| m.name == name)
}

/// Bounds of a named function, if registered
pub fn get_function_bounds(name: &str) -> Option<Vec<(f64, f64)>> {
    get_function_metadata(name).map(|m| m.bounds)
}
