use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// Binomial crossover; one coordinate taken from the mutant is always forced.
pub(crate) fn binomial_crossover<R: Rng + ?Sized>(
    target: &ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let forced = rng.random_range(0..n);
    Array1::from_shape_fn(n, |j| {
        if j == forced || rng.random::<f64>() < cr {
            mutant[j]
        } else {
            target[j]
        }
    })
}
