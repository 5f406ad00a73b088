use ndarray::{Array1, Array2};
use rand::Rng;

use crate::distinct_indices::distinct_indices;

/// best/1: x_best + F (x_r0 - x_r1)
pub(crate) fn mutant_best1<R: Rng + ?Sized>(
    i: usize,
    pop: &Array2<f64>,
    best_idx: usize,
    f: f64,
    rng: &mut R,
) -> Array1<f64> {
    let idxs = distinct_indices(i, 2, pop.nrows(), rng);
    &pop.row(best_idx) + &((&pop.row(idxs[0]) - &pop.row(idxs[1])) * f)
}
