//! Unimodal test functions

/// Sphere function
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Sum of squares, the same bowl as `sphere` under the name used by the
/// adapter scenarios
pub fn quadratic(x: &[f64]) -> f64 {
    sphere(x)
}

/// Rosenbrock function - N-dimensional banana valley
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-5, 10]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

/// Booth function - 2D plate
/// Global minimum: f(x) = 0 at x = (1, 3)
/// Bounds: x_i in [-10, 10]
pub fn booth(x: &[f64]) -> f64 {
    (x[0] + 2.0 * x[1] - 7.0).powi(2) + (2.0 * x[0] + x[1] - 5.0).powi(2)
}

/// Shifted L1 distance to (2, 8), non-smooth at the optimum
/// Global minimum: f(x) = 0 at x = (2, 8)
/// Bounds: x_i in [-10, 10]
pub fn shifted_l1(x: &[f64]) -> f64 {
    (x[0] - 2.0).abs() + (x[1] - 8.0).abs()
}
