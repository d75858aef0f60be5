use crate::{KMeans, KMeansConfig, KMeansState, Primitive, Result};
use tracing::debug;

mod lloyd;
mod partitioned;

pub use lloyd::Lloyd;
pub use partitioned::PartitionedLloyd;

/// A clustering algorithm that refines a set of seed centroids.
///
/// Initialization is done by [`KMeans::run`] before the variant is invoked, so every variant can be combined with
/// every initialization method.
pub trait Variant<T: Primitive> {
    /// Iterate from the seed centroids in **state** until the abort strategy of **config** or **max_iter** stops it.
    /// Has to leave the final centroids in `state.centroids` and set `state.iterations`.
    fn cluster_from_seeds(&self, data: &KMeans<T>, state: &mut KMeansState<T>, max_iter: usize, config: &KMeansConfig<'_, T>) -> Result<()>;
}

/// Outcome of one round: the largest centroid shift and the new distance sum.
pub(crate) struct RoundStats<T: Primitive> {
    pub shift: T,
    pub distsum: T,
}

/// Shared iteration loop: runs **round** until the abort strategy or **max_iter** ends the calculation.
pub(crate) fn iterate<T, R>(state: &mut KMeansState<T>, max_iter: usize, config: &KMeansConfig<'_, T>, mut round: R) -> Result<()>
        where T: Primitive, R: FnMut(&mut KMeansState<T>) -> Result<RoundStats<T>> {
    let mut abort_strategy = config.abort_strategy.create_logic();
    state.distsum = T::infinity();

    for i in 1..=max_iter {
        let RoundStats { shift, distsum: new_distsum } = round(state)?;
        state.iterations = i;
        state.shift = shift;

        // Notify subscriber about finished iteration
        (config.iteration_done)(state, i, new_distsum);
        debug!(iteration = i, shift = %shift, distsum = %new_distsum, "round finished");

        let proceed = abort_strategy.next(shift, new_distsum);
        state.distsum = new_distsum;
        if !proceed {
            state.converged = true;
            break;
        }
    }
    Ok(())
}

/// Largest distance between corresponding centroids of two sets. A non-finite centroid never counts as settled:
/// its shift is reported as infinity.
pub(crate) fn max_shift<T: Primitive>(old: &[crate::Point<T>], new: &[crate::Point<T>]) -> T {
    old.iter().zip(new.iter())
        .map(|(o, n)| o.distance(n))
        .map(|d| if d.is_nan() { T::infinity() } else { d })
        .fold(T::zero(), |acc, d| if d > acc { d } else { acc })
}
