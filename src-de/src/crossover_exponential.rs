use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// Exponential crossover: copy a contiguous (cyclic) run of mutant coordinates
/// starting at a random position, extending while `u < cr`.
pub(crate) fn exponential_crossover<R: Rng + ?Sized>(
    target: &ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let mut trial = target.to_owned();
    let mut j = rng.random_range(0..n);
    let mut copied = 0;
    loop {
        trial[j] = mutant[j];
        copied += 1;
        j = (j + 1) % n;
        if copied >= n || rng.random::<f64>() >= cr {
            break;
        }
    }
    trial
}
