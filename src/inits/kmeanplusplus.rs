use crate::{KMeans, KMeansConfig, KMeansState, Primitive, Result};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
    {
        // Randomly select first centroid
        let first_idx = config.rnd.borrow_mut().deref_mut().gen_range(0, kmean.samples.len());
        state.centroids[0] = kmean.samples[first_idx];
    }
    for k in 1..state.k {
        // For each following centroid...
        // Calculate distances & update cluster-assignments
        kmean.update_cluster_assignments(state, Some(k));

        // Every sample's chance to become the next centroid is proportional to its squared distance to the nearest
        // centroid chosen so far. Already chosen samples have weight 0 and can not be drawn again.
        let weights = state.centroid_distances.iter().map(|&d| d * d);
        let centroid_index = WeightedIndex::new(weights)?;
        let sampled_centroid_id = centroid_index.sample(config.rnd.borrow_mut().deref_mut());
        state.centroids[k] = kmean.samples[sampled_centroid_id];
    }
    Ok(())
}
