//! Multimodal test functions

use std::f64::consts::{E, PI};

/// Rastrigin function - highly multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum: f64 = x.iter().map(|&xi| xi.powi(2) - 10.0 * (2.0 * PI * xi).cos()).sum();
    10.0 * n + sum
}

/// Ackley function - N-dimensional, nearly flat outer region
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-32.768, 32.768]
pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|&xi| xi.powi(2)).sum();
    let sum_cos: f64 = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum();

    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// Griewank function
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-600, 600]
pub fn griewank(x: &[f64]) -> f64 {
    let sum_squares: f64 = x.iter().map(|&xi| xi.powi(2)).sum();
    let product_cos: f64 =
        x.iter().enumerate().map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos()).product();
    1.0 + sum_squares / 4000.0 - product_cos
}

/// Himmelblau function - 2D with four equal minima
/// Global minimum: f(x) = 0 at (3, 2), (-2.805118, 3.131312),
/// (-3.779310, -3.283186), (3.584428, -1.848126)
/// Bounds: x_i in [-5, 5]
pub fn himmelblau(x: &[f64]) -> f64 {
    (x[0].powi(2) + x[1] - 11.0).powi(2) + (x[0] + x[1].powi(2) - 7.0).powi(2)
}
