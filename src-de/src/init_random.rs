use ndarray::{Array1, Array2};
use rand::Rng;

use crate::init_latin_hypercube::interpolate;

/// Uniform random population inside the box; fixed variables sit on their bound.
pub(crate) fn init_random<R: Rng + ?Sized>(
    n: usize,
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    is_free: &[bool],
    rng: &mut R,
) -> Array2<f64> {
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..npop {
        for j in 0..n {
            pop[[i, j]] = if is_free[j] {
                interpolate(lower[j], upper[j], rng.random::<f64>())
            } else {
                lower[j]
            };
        }
    }
    pop
}
