use crate::{helpers, AbortStrategy, KMeansError, Point, Primitive, Result};
use crate::variants::{Lloyd, PartitionedLloyd, Variant};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;
use tracing::info;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// What to do with a centroid that did not receive a single point in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid's previous value for the next round.
    CarryForward,
    /// Move the sample farthest from its centroid (taken from a cluster with more than one member)
    /// into the empty cluster. Only honoured by [`KMeans::kmeans_lloyd`]; the partitioned rounds have no
    /// global view of the samples and always carry forward.
    Reseed,
}
impl Default for EmptyClusterPolicy {
    fn default() -> Self { EmptyClusterPolicy::CarryForward }
}

/// This is a structure holding various configuration options for the a k-means calculations, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::default(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .field("empty_cluster_policy", &self.empty_cluster_policy)
            .finish()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::Converged`] `{ epsilon: 1e-8 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Set how centroids without any assigned point are treated.
    /// ## Default
    /// [`EmptyClusterPolicy::CarryForward`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers. Indices are labels, they carry no meaning across runs
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **centroid_distances**: Vector containing each sample's (Euclidean) distance to its centroid
/// - **shift**: Largest distance a centroid moved during the most recent round
/// - **iterations**: Amount of rounds that were executed
/// - **converged**: Whether the abort strategy ended the calculation (**false** if it hit `max_iter`)
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<Point<T>>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub shift: T,
    pub iterations: usize,
    pub converged: bool,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![Point::default(); k],
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            shift: T::infinity(),
            iterations: 0,
            converged: false,
        }
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the points you want to operate on. The primitive type
/// of the passed points will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
/// - Partitioned k-Means (assign / combine / reduce rounds) [`KMeans::kmeans_partitioned`]
/// - Any other [`Variant`] through [`KMeans::run`]
///
/// ## Supported initialization methods
/// - Random-Sample [`KMeans::init_random_sample`]
/// - K-Mean++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) samples: Vec<Point<T>>,
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure, taking ownership of **samples**.
    pub fn new(samples: Vec<Point<T>>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Point<T>] { &self.samples }

    pub(crate) fn validate(&self, k: usize) -> Result<()> {
        if self.samples.is_empty() {
            return Err(KMeansError::EmptyInput);
        }
        let available = helpers::count_distinct(&self.samples);
        if k == 0 || k > available {
            return Err(KMeansError::InvalidClusterCount { k, available });
        }
        Ok(())
    }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>, limit_k: Option<usize>) {
        let centroids = &state.centroids[..limit_k.unwrap_or(state.k)];

        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = self.samples.len() / rayon::current_num_threads();
        self.samples.par_iter()
            .with_min_len(work_packet_size.max(1))
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = helpers::nearest_centroid(s, centroids);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        assignments.iter().cloned()
            .for_each(|centroid_id| centroid_frequency[centroid_id] += 1);
    }

    /// Run an arbitrary clustering [`Variant`] on the samples.
    ///
    /// Validates **k**, lets **init** seed the centroids, hands them to the variant and finally assigns every
    /// sample to its nearest final centroid.
    ///
    /// ## Errors
    /// - [`KMeansError::EmptyInput`] when there are no samples
    /// - [`KMeansError::InvalidClusterCount`] when `k == 0` or k exceeds the amount of distinct samples
    /// - Whatever **init** or the variant report
    pub fn run<'a, V, F>(&self, variant: &V, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where V: Variant<T>, for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        self.validate(k)?;

        let mut state = KMeansState::new(self.samples.len(), k);
        init(self, &mut state, config)?;
        (config.init_done)(&state);

        variant.cluster_from_seeds(self, &mut state, max_iter, config)?;

        self.update_cluster_assignments(&mut state, None);
        let (assignments, centroid_frequency) = (&state.assignments, &mut state.centroid_frequency);
        self.update_cluster_frequencies(assignments, centroid_frequency);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        info!(iterations = state.iterations, converged = state.converged, distsum = %state.distsum, "k-means finished");
        Ok(state)
    }

    /// Normal K-Means algorithm implementation (Lloyd). Each round assigns every sample to its nearest centroid and
    /// recomputes every centroid as the mean of its samples.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of iterations (just pass a high number for infinite)
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_partitioned::*;
    ///
    /// let samples = vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0), Point::new(10.0, 10.0), Point::new(10.0, 12.0)];
    /// let kmean = KMeans::new(samples);
    /// let seeds = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
    /// let result = kmean.kmeans_lloyd(2, 1000, KMeans::init_precomputed(seeds), &KMeansConfig::default()).unwrap();
    ///
    /// assert_eq!(result.centroids, vec![Point::new(0.0, 1.0), Point::new(10.0, 11.0)]);
    /// assert_eq!(result.iterations, 2);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        self.run(&Lloyd, k, max_iter, init, config)
    }

    /// K-Means computed in partitioned rounds: the samples are split into **partitions** contiguous slices, which are
    /// assigned and combined in parallel. The per-partition aggregates are then reduced into the next centroid set.
    ///
    /// ## Arguments
    /// - **partitions**: Amount of partitions to split the samples into
    /// - **k**, **max_iter**, **init**, **config**: see [`KMeans::kmeans_lloyd`]
    pub fn kmeans_partitioned<'a, F>(&self, partitions: usize, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        self.run(&PartitionedLloyd { partitions }, k, max_iter, init, config)
    }

    /// Cluster the samples into **k** clusters using random-sample initialization, at most
    /// [`MAX_ITERATIONS`](crate::MAX_ITERATIONS) rounds and the default convergence epsilon.
    pub fn cluster(&self, k: usize) -> Result<Vec<Point<T>>> {
        self.kmeans_lloyd(k, crate::MAX_ITERATIONS, KMeans::init_random_sample, &KMeansConfig::default())
            .map(|state| state.centroids)
    }

    /// K-Means++ initialization method, as implemented in Matlab
    ///
    /// ## Description
    /// This initialization method starts by selecting one sample as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid (per iteration) by calculating
    /// each sample's probability of "being a centroid". This probability is bigger, the farther away a sample
    /// is from its centroid. Then, one sample is randomly selected, while taking their probability of being
    /// the next centroid into account.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_kmeanplusplus<'a>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<()> {
        crate::inits::kmeanplusplus::calculate(kmean, state, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k samples with pairwise different coordinates as initial centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample<'a>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<()> {
        crate::inits::randomsample::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given **centroids** as initial centroids. Their count has to match the requested k.
    pub fn init_precomputed(centroids: Vec<Point<T>>) -> impl FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'_, T>) -> Result<()> {
        move |kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>|
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
    }
}

/// Cluster **inputs** into **k** clusters. Shorthand for [`KMeans::cluster`].
pub fn cluster<T: Primitive>(inputs: Vec<Point<T>>, k: usize) -> Result<Vec<Point<T>>> {
    KMeans::new(inputs).cluster(k)
}
