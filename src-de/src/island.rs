//! Island model: several sub-populations evolve side by side and exchange
//! their best members along a ring every few generations.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;

use crate::{argmax, argmin};

/// One sub-population with its own energies and random stream
pub(crate) struct Island {
    pub(crate) pop: Array2<f64>,
    pub(crate) energies: Array1<f64>,
    pub(crate) rng: StdRng,
}

impl Island {
    pub(crate) fn new(pop: Array2<f64>, rng: StdRng) -> Self {
        let npop = pop.nrows();
        Self { pop, energies: Array1::from_elem(npop, f64::INFINITY), rng }
    }

    pub(crate) fn best(&self) -> (usize, f64) {
        argmin(&self.energies)
    }
}

/// Copy the best member of island `k + 1` over the worst member of island `k`
/// (cyclically). A migrant only lands if it beats the member it replaces.
pub(crate) fn migrate_ring(islands: &mut [Island]) -> usize {
    let k = islands.len();
    if k < 2 {
        return 0;
    }
    let migrants: Vec<(Array1<f64>, f64)> = islands
        .iter()
        .map(|island| {
            let (idx, f) = island.best();
            (island.pop.row(idx).to_owned(), f)
        })
        .collect();

    let mut moved = 0;
    for (dst, island) in islands.iter_mut().enumerate() {
        let (x, f) = &migrants[(dst + 1) % k];
        let (worst, worst_f) = argmax(&island.energies);
        if *f < worst_f || (worst_f.is_nan() && !f.is_nan()) {
            island.pop.row_mut(worst).assign(x);
            island.energies[worst] = *f;
            moved += 1;
        }
    }
    moved
}
