use crate::{partitioned, KMeans, KMeansConfig, KMeansState, Point, Primitive, Result};
use super::{iterate, RoundStats, Variant};
use tracing::debug;

/// K-means executed as repeated partitioned rounds ([`partitioned::run_round`]), i.e. the in-process counterpart of
/// an external driver that resubmits a map/combine/reduce job with the previous round's centroids.
///
/// The per-sample `assignments` and `centroid_distances` in the state are only filled in once the calculation
/// finished; during the rounds only centroids, frequencies and distance sums are tracked. Empty clusters are always
/// carried forward.
#[derive(Clone, Copy, Debug)]
pub struct PartitionedLloyd {
    /// Amount of contiguous partitions the samples are split into. `0` is treated as `1`.
    pub partitions: usize,
}

impl PartitionedLloyd {
    fn split<'a, T: Primitive>(&self, samples: &'a [Point<T>]) -> Vec<&'a [Point<T>]> {
        let partitions = self.partitions.max(1);
        let partition_size = ((samples.len() + partitions - 1) / partitions).max(1);
        samples.chunks(partition_size).collect()
    }
}

impl<T: Primitive> Variant<T> for PartitionedLloyd {
    fn cluster_from_seeds(&self, data: &KMeans<T>, state: &mut KMeansState<T>, max_iter: usize, config: &KMeansConfig<'_, T>) -> Result<()> {
        let partitions = self.split(&data.samples);
        debug!(partitions = partitions.len(), samples = data.samples.len(), "running partitioned k-means");

        iterate(state, max_iter, config, |state| {
            let round = partitioned::run_round(&partitions, &state.centroids)?;
            state.centroids = round.centroids;
            state.centroid_frequency = round.centroid_frequency;
            Ok(RoundStats { shift: round.shift, distsum: round.distsum })
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::{assert_clusters_eq, two_blobs};
    use rand::prelude::*;

    #[test]
    fn splits_into_contiguous_partitions() {
        let samples: Vec<Point<f64>> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
        let sizes = |partitions| PartitionedLloyd { partitions }.split(&samples).iter().map(|p| p.len()).collect::<Vec<_>>();
        assert_eq!(sizes(1), vec![10]);
        assert_eq!(sizes(3), vec![4, 4, 2]);
        assert_eq!(sizes(0), vec![10]);
        assert_eq!(sizes(50), vec![1; 10]);
    }

    #[test]
    fn four_points_in_two_partitions() {
        let samples = vec![Point::new(0.0f64, 0.0), Point::new(0.0, 2.0), Point::new(10.0, 10.0), Point::new(10.0, 12.0)];
        let seeds = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let kmean = KMeans::new(samples);
        let res = kmean.kmeans_partitioned(2, 2, 1000, KMeans::init_precomputed(seeds), &KMeansConfig::default()).unwrap();

        assert_eq!(res.centroids, vec![Point::new(0.0, 1.0), Point::new(10.0, 11.0)]);
        assert_eq!(res.assignments, vec![0, 0, 1, 1]);
        assert_eq!(res.centroid_frequency, vec![2, 2]);
        assert_eq!(res.iterations, 2);
        assert!(res.converged);
    }

    #[test] fn same_result_as_lloyd_f32() { same_result_as_lloyd::<f32>(); }
    #[test] fn same_result_as_lloyd_f64() { same_result_as_lloyd::<f64>(); }

    fn same_result_as_lloyd<T: Primitive>() {
        let mut rnd = StdRng::seed_from_u64(1337);
        let mut samples = two_blobs::<T>(60);
        samples.extend((0..120).map(|_| Point::new(rnd.gen_range(T::zero(), T::from(100.0).unwrap()), rnd.gen_range(T::zero(), T::from(100.0).unwrap()))));
        let kmean = KMeans::new(samples);

        let seeds = kmean.samples()[..5].to_vec();
        let lloyd = kmean.kmeans_lloyd(5, 300, KMeans::init_precomputed(seeds.clone()), &KMeansConfig::default()).unwrap();
        for partitions in [1, 3, 8].iter() {
            let res = kmean.kmeans_partitioned(*partitions, 5, 300, KMeans::init_precomputed(seeds.clone()), &KMeansConfig::default()).unwrap();
            assert_clusters_eq(&lloyd.assignments, &lloyd.centroids, &res.assignments, &res.centroids, T::from(1e-3).unwrap());
        }
    }
}
