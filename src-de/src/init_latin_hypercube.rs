use ndarray::{Array1, Array2};
use rand::Rng;
use rand::seq::SliceRandom;

/// Latin Hypercube Sampling: each free axis is cut in `npop` strata and every
/// stratum receives exactly one member.
pub(crate) fn init_latin_hypercube<R: Rng + ?Sized>(
    n: usize,
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    is_free: &[bool],
    rng: &mut R,
) -> Array2<f64> {
    let mut pop = Array2::<f64>::zeros((npop, n));
    let mut strata: Vec<usize> = (0..npop).collect();
    for j in 0..n {
        if !is_free[j] {
            pop.column_mut(j).fill(lower[j]);
            continue;
        }
        strata.shuffle(rng);
        for (i, &s) in strata.iter().enumerate() {
            let u = (s as f64 + rng.random::<f64>()) / npop as f64;
            pop[[i, j]] = interpolate(lower[j], upper[j], u);
        }
    }
    pop
}

/// Point at fraction `u` of `[lo, hi]`. Weighted form so that bounds spanning
/// more than `f64::MAX` do not overflow.
pub(crate) fn interpolate(lo: f64, hi: f64, u: f64) -> f64 {
    let x = lo * (1.0 - u) + hi * u;
    // rounding may land one ulp outside the box
    if x > hi {
        hi
    } else if x < lo {
        lo
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_lhs_one_member_per_stratum() {
        let mut rng = StdRng::seed_from_u64(3);
        let lower = Array1::from(vec![0.0, -1.0]);
        let upper = Array1::from(vec![10.0, -1.0]);
        let pop = init_latin_hypercube(2, 10, &lower, &upper, &[true, false], &mut rng);

        let mut hits = vec![0usize; 10];
        for i in 0..10 {
            let x = pop[[i, 0]];
            assert!((0.0..10.0).contains(&x));
            hits[x.floor() as usize] += 1;
            // fixed axis pinned on its bound
            assert_eq!(pop[[i, 1]], -1.0);
        }
        assert!(hits.iter().all(|&h| h == 1), "strata hits: {:?}", hits);
    }

    #[test]
    fn test_lhs_bounds_wider_than_f64_max() {
        let mut rng = StdRng::seed_from_u64(4);
        let lower = Array1::from(vec![-1e308]);
        let upper = Array1::from(vec![1e308]);
        let pop = init_latin_hypercube(1, 16, &lower, &upper, &[true], &mut rng);
        for &x in pop.iter() {
            assert!(x.is_finite() && (-1e308..=1e308).contains(&x), "x={}", x);
        }
        // strata still spread the members over the whole axis
        assert!(pop.iter().any(|&x| x < -5e307) && pop.iter().any(|&x| x > 5e307));
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(-2.0, 6.0, 0.0), -2.0);
        assert_eq!(interpolate(-2.0, 6.0, 1.0), 6.0);
        assert_eq!(interpolate(-f64::MAX, f64::MAX, 0.5), 0.0);
    }
}
