use crate::{KMeansError, PartialAggregate, Point, Primitive, Result};
use super::CombineOutput;
use tracing::{debug, warn};

/// Merge the partial aggregates all partitions reported for **index** and divide once.
///
/// ## Errors
/// [`KMeansError::EmptyCluster`] if the merged count is zero.
pub fn reduce<'a, T, I>(index: usize, partials: I) -> Result<Point<T>>
        where T: Primitive, I: IntoIterator<Item = &'a PartialAggregate<T>> {
    partials.into_iter()
        .fold(PartialAggregate::empty(), |acc, p| acc.merge(p))
        .centroid(index)
}

/// Reduce the combine outputs of all partitions into the next centroid set. Indices no partition reported keep
/// their value from **previous**; labels outside of **previous** are dropped.
pub fn reduce_round<T: Primitive>(previous: &[Point<T>], outputs: &[CombineOutput<T>]) -> Vec<Point<T>> {
    let mut grouped: Vec<Vec<&PartialAggregate<T>>> = vec![Vec::new(); previous.len()];
    for (idx, aggregate) in outputs.iter().flatten() {
        match grouped.get_mut(*idx) {
            Some(group) => group.push(aggregate),
            None => warn!(index = *idx, k = previous.len(), "dropping partial aggregate with unknown label"),
        }
    }

    grouped.iter().enumerate()
        .zip(previous.iter())
        .map(|((idx, partials), &prev)| match reduce(idx, partials.iter().cloned()) {
            Ok(centroid) => centroid,
            Err(_) => {
                debug!(index = idx, "empty cluster, keeping previous centroid");
                prev
            }
        })
        .collect()
}
