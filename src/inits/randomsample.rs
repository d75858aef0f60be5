use crate::{KMeans, KMeansConfig, KMeansState, Primitive, Result};
use rand::prelude::*;
use std::ops::DerefMut;
use tracing::trace;

/// Draw samples uniformly, rejecting every draw whose coordinates equal an already chosen centroid.
/// Terminates because [`KMeans::run`] checked that at least k distinct samples exist.
#[inline(always)] pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
    let mut rnd = config.rnd.borrow_mut();
    let mut chosen = Vec::with_capacity(state.k);
    while chosen.len() < state.k {
        let candidate = kmean.samples[rnd.deref_mut().gen_range(0, kmean.samples.len())];
        if chosen.contains(&candidate) {
            trace!(x = %candidate.x(), y = %candidate.y(), "rejected duplicate initial centroid");
            continue;
        }
        chosen.push(candidate);
    }
    state.centroids = chosen;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn picks_k_distinct_samples() {
        // Heavy duplication makes rejections likely
        let mut samples = vec![Point::new(1.0f64, 1.0); 50];
        samples.push(Point::new(2.0, 2.0));
        samples.push(Point::new(3.0, 3.0));
        let kmean = KMeans::new(samples.clone());

        for seed in 0..20 {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let mut state = KMeansState::new(samples.len(), 3);
            calculate(&kmean, &mut state, &conf).unwrap();

            assert_eq!(state.centroids.len(), 3);
            for (i, c) in state.centroids.iter().enumerate() {
                assert!(samples.contains(c));
                assert!(!state.centroids[i + 1..].contains(c));
            }
        }
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let samples: Vec<_> = (0..100).map(|i| Point::new(i as f64, (i * i) as f64)).collect();
        let kmean = KMeans::new(samples);
        let draw = || {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
            let mut state = KMeansState::new(100, 5);
            calculate(&kmean, &mut state, &conf).unwrap();
            state.centroids
        };
        assert_eq!(draw(), draw());
    }
}
