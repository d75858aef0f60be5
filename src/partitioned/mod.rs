//! One round of k-means split into the three phases a distributed execution substrate schedules:
//!
//! 1. [`assign`]: per partition, label every point with the index of its nearest centroid. The centroid set is
//!    broadcast once per round and only read.
//! 2. [`combine`]: per partition, fold all points sharing a label into one [`PartialAggregate`]. This cuts what has
//!    to be shuffled to the reduce phase from one record per point to at most k records per partition.
//! 3. [`reduce`]: merge the partial aggregates of all partitions and divide once.
//!
//! [`run_round`] executes all three phases in-process, with one rayon task per partition. Chaining rounds until
//! convergence is left to the caller (or to [`KMeans::kmeans_partitioned`](crate::KMeans::kmeans_partitioned)).
//!
//! [`PartialAggregate`]: crate::PartialAggregate

mod assign;
mod combine;
mod reduce;

pub use assign::{assign, assign_partition};
pub use combine::{combine, combine_partition};
pub use reduce::{reduce, reduce_round};

use crate::{KMeansError, PartialAggregate, Point, Primitive, Result};
use rayon::prelude::*;
use tracing::debug;

/// Output of one combine task: the partial aggregate of every label that occurred in the partition, ordered by label.
pub type CombineOutput<T> = Vec<(usize, PartialAggregate<T>)>;

/// Result of [`run_round`].
#[derive(Clone, Debug, PartialEq)]
pub struct RoundOutput<T: Primitive> {
    /// Recomputed centroid set, index-correspondent to the input centroid set.
    pub centroids: Vec<Point<T>>,
    /// Amount of points assigned to each centroid during the round.
    pub centroid_frequency: Vec<usize>,
    /// Largest distance any centroid moved.
    pub shift: T,
    /// Sum of all points' distances to the centroid they were assigned to.
    pub distsum: T,
}

/// Execute one full round over **partitions** against the broadcast **centroids**.
///
/// Partitions are processed in parallel; the reduce phase starts once every partition delivered its aggregates.
/// Centroids without any assigned point keep their previous value.
///
/// ## Errors
/// [`KMeansError::InvalidClusterCount`] if **centroids** is empty.
pub fn run_round<T, P>(partitions: &[P], centroids: &[Point<T>]) -> Result<RoundOutput<T>>
        where T: Primitive, P: AsRef<[Point<T>]> + Sync {
    if centroids.is_empty() {
        let available = partitions.iter().map(|p| p.as_ref().len()).sum();
        return Err(KMeansError::InvalidClusterCount { k: 0, available });
    }

    // collect() is the barrier: reduce only sees complete partition outputs
    let outputs: Vec<(CombineOutput<T>, T)> = partitions.par_iter()
        .map(|partition| {
            let labelled = assign_partition(partition.as_ref(), centroids);
            let distsum = labelled.iter()
                .map(|(idx, point)| point.distance(&centroids[*idx]))
                .fold(T::zero(), |acc, d| acc + d);
            (combine_partition(&labelled), distsum)
        })
        .collect();
    debug!(partitions = outputs.len(), k = centroids.len(), "all partitions combined");

    let distsum = outputs.iter().fold(T::zero(), |acc, (_, d)| acc + *d);
    let combined: Vec<CombineOutput<T>> = outputs.into_iter().map(|(c, _)| c).collect();

    let mut centroid_frequency = vec![0usize; centroids.len()];
    combined.iter().flatten()
        .filter(|(idx, _)| *idx < centroids.len())
        .for_each(|(idx, aggregate)| centroid_frequency[*idx] += aggregate.count);

    let new_centroids = reduce_round(centroids, &combined);
    let shift = crate::variants::max_shift(centroids, &new_centroids);
    Ok(RoundOutput { centroids: new_centroids, centroid_frequency, shift, distsum })
}
