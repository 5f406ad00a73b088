use crate::{DEConfig, DEError, DEReport, DifferentialEvolution, Result};
use ndarray::Array1;

/// Convenience function mirroring SciPy's API shape (simplified):
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs
/// - `config`: DE configuration
///
/// # Errors
///
/// Returns `DEError::InvalidBounds` if any bound pair has upper < lower.
pub fn differential_evolution<F>(func: &F, bounds: &[(f64, f64)], config: DEConfig) -> Result<DEReport>
where
    F: Fn(&[f64]) -> f64,
{
    let n = bounds.len();
    let mut lower = Array1::<f64>::zeros(n);
    let mut upper = Array1::<f64>::zeros(n);
    for (i, &(lo, hi)) in bounds.iter().enumerate() {
        if hi < lo {
            return Err(DEError::InvalidBounds { index: i, lower: lo, upper: hi });
        }
        lower[i] = lo;
        upper[i] = hi;
    }
    let de = DifferentialEvolution::new(func, lower, upper)?;
    Ok(de.with_config(config).solve())
}
