use crate::{KMeans, KMeansConfig, KMeansError, KMeansState, Point, Primitive, Result};

#[inline(always)]
pub fn calculate<T: Primitive>(
    kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<Point<T>>,
) -> Result<()> {
    if computed.len() != state.k {
        return Err(KMeansError::InvalidClusterCount { k: state.k, available: computed.len() });
    }
    debug_assert_eq!(state.assignments.len(), kmean.samples.len());
    state.centroids = computed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_with_precomputed_centroids() {
        let samples = vec![0.0, 1.0, 2.0, 20.0, 21.0, 22.0].into_iter().map(|x| Point::new(x, 0.0f32)).collect();
        let centroids = vec![Point::new(0.0, 0.0), Point::new(21.0, 0.0)];

        let kmean = KMeans::new(samples);
        let result = kmean.kmeans_lloyd(2, 200, KMeans::init_precomputed(centroids), &KMeansConfig::default()).unwrap();

        assert_eq!(result.centroids, vec![Point::new(1.0, 0.0), Point::new(21.0, 0.0)]);
    }

    #[test]
    fn centroid_count_has_to_match_k() {
        let kmean = KMeans::new(vec![Point::new(0.0f64, 0.0), Point::new(1.0, 0.0)]);
        let res = kmean.kmeans_lloyd(2, 10, KMeans::init_precomputed(vec![Point::new(0.0, 0.0)]), &KMeansConfig::default());
        assert_eq!(res.unwrap_err(), KMeansError::InvalidClusterCount { k: 2, available: 1 });
    }
}
