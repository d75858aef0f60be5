use crate::{EmptyClusterPolicy, KMeans, KMeansConfig, KMeansError, KMeansState, PartialAggregate, Point, Primitive, Result};
use super::{iterate, max_shift, RoundStats, Variant};
use std::cmp::Ordering;
use tracing::debug;

/// Sequential k-means (Lloyd). Assignment runs in parallel over the samples, recomputation builds a fresh table of
/// per-centroid sums every round.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lloyd;

impl Lloyd {
    fn update_centroids<T: Primitive>(data: &KMeans<T>, state: &mut KMeansState<T>, policy: EmptyClusterPolicy) -> Result<RoundStats<T>> {
        let mut aggregates = vec![PartialAggregate::empty(); state.k];
        let mut new_distsum = T::zero();

        let (assignments, centroid_distances) = (&state.assignments, &state.centroid_distances);
        rayon::scope(|s| {
            s.spawn(|_| {
                data.samples.iter()
                    .zip(assignments.iter().cloned())
                    .for_each(|(sample, centroid_id)| aggregates[centroid_id].push(sample));
            });
            s.spawn(|_| {
                new_distsum = centroid_distances.iter().cloned().sum();
            });
        });

        if policy == EmptyClusterPolicy::Reseed && aggregates.iter().any(PartialAggregate::is_empty) {
            new_distsum -= Self::reseed_empty_clusters(data, state, &mut aggregates);
        }

        let new_centroids = aggregates.iter().enumerate()
            .zip(state.centroids.iter())
            .map(|((idx, aggregate), &previous)| match aggregate.centroid(idx) {
                Ok(centroid) => Ok(centroid),
                Err(KMeansError::EmptyCluster { index }) => {
                    debug!(index, "empty cluster, keeping previous centroid");
                    Ok(previous)
                },
                Err(e) => Err(e),
            })
            .collect::<Result<Vec<Point<T>>>>()?;

        state.centroid_frequency.iter_mut()
            .zip(aggregates.iter())
            .for_each(|(freq, aggregate)| *freq = aggregate.count);
        let shift = max_shift(&state.centroids, &new_centroids);
        state.centroids = new_centroids;
        Ok(RoundStats { shift, distsum: new_distsum })
    }

    /// Assign bad samples to empty clusters. Returns the amount by which the distance sum shrank.
    fn reseed_empty_clusters<T: Primitive>(data: &KMeans<T>, state: &mut KMeansState<T>, aggregates: &mut [PartialAggregate<T>]) -> T {
        let mut removed_dist = T::zero();
        let mut distance_sorted_samples: Vec<usize> = (0..data.samples.len()).collect();
        distance_sorted_samples.sort_by(
            |&i1, &i2| state.centroid_distances[i1].partial_cmp(&state.centroid_distances[i2]).unwrap_or(Ordering::Equal));

        for i in 0..state.k {
            if !aggregates[i].is_empty() {
                continue;
            }
            // Find the sample with the highest distance to its centroid, that is not alone in its cluster
            let candidate = distance_sorted_samples.iter().rev().cloned()
                .find(|&sample_id| aggregates[state.assignments[sample_id]].count > 1);
            let sample_id = match candidate {
                Some(sample_id) => sample_id,
                None => {
                    debug!(index = i, "no sample available for reseeding, keeping previous centroid");
                    continue;
                }
            };
            let prev_centroid_id = state.assignments[sample_id];
            let sample = data.samples[sample_id];
            debug!(index = i, sample = sample_id, "reseeding empty cluster");

            // Re-Assign found sample to centroid without any samples
            aggregates[prev_centroid_id].pop(&sample);
            aggregates[i].push(&sample);
            removed_dist += state.centroid_distances[sample_id];
            // Centroid is moved into the chosen point -> the points centroid distance is 0
            state.centroid_distances[sample_id] = T::zero();
            state.assignments[sample_id] = i;
        }
        removed_dist
    }
}

impl<T: Primitive> Variant<T> for Lloyd {
    fn cluster_from_seeds(&self, data: &KMeans<T>, state: &mut KMeansState<T>, max_iter: usize, config: &KMeansConfig<'_, T>) -> Result<()> {
        iterate(state, max_iter, config, |state| {
            data.update_cluster_assignments(state, None);
            Self::update_centroids(data, state, config.empty_cluster_policy)
        })
    }
}
