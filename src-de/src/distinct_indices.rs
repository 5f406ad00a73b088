use rand::Rng;

/// Draw `count` distinct member indices in `0..pool`, all different from `exclude`.
///
/// The caller guarantees `pool > count + 1`, which the population floor enforces.
pub(crate) fn distinct_indices<R: Rng + ?Sized>(
    exclude: usize,
    count: usize,
    pool: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(pool > count, "population too small for {} donors", count);
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let idx = rng.random_range(0..pool);
        if idx != exclude && !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_indices_are_distinct_and_skip_current() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..8 {
            let idxs = distinct_indices(i, 4, 8, &mut rng);
            assert_eq!(idxs.len(), 4);
            assert!(!idxs.contains(&i));
            let mut sorted = idxs.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 4, "duplicates in {:?}", idxs);
        }
    }
}
