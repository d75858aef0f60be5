//! # kmeans-partitioned - API documentation
//!
//! Small rust library for k-means-clustering of planar points, which additionally provides the building blocks
//! to run each k-means round as a partitioned assign / combine / reduce job.
//!
//! ## Design target
//! The sequential engine is a plain Lloyd implementation: assign every point to its nearest centroid, recompute
//! each centroid as the mean of its points, repeat until no centroid moves by more than [`EPSILON`] or
//! [`MAX_ITERATIONS`] rounds were executed.
//!
//! The partitioned path computes exactly one such round per invocation, split into phases that only depend on
//! their own partition plus a read-only broadcast of the current centroids (see [`partitioned`]). A combine step
//! pre-aggregates `(sum_x, sum_y, count)` per cluster inside every partition, so only `partitions × k` records
//! travel to the final reduce instead of one record per point.
//!
//! ## Supported variants
//! For a list of supported variants, have a look at the documentation of [`KMeans`]. Own variants can be plugged in
//! by implementing [`Variant`].
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. Apart from precomputed seeds,
//! all of them are random. Pass a seeded generator through [`KMeansConfigBuilder::random_generator`] for
//! repeatable results.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_partitioned::*;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(7);
//! let samples: Vec<Point<f64>> = (0..2000).map(|_| Point::new(rnd.gen(), rnd.gen())).collect();
//!
//! let kmean = KMeans::new(samples);
//! let conf = KMeansConfig::build().random_generator(rnd).build();
//! let result = kmean.kmeans_lloyd(5, MAX_ITERATIONS, KMeans::init_random_sample, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Rounds: {}", result.iterations);
//! ```
//!
//! ## Example (one partitioned round)
//! ```rust
//! use kmeans_partitioned::*;
//!
//! let partitions = vec![
//!     vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0)],
//!     vec![Point::new(10.0, 10.0), Point::new(10.0, 12.0)],
//! ];
//! let centroids = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
//!
//! let round = partitioned::run_round(&partitions, &centroids).unwrap();
//! assert_eq!(round.centroids, vec![Point::new(0.0, 1.0), Point::new(10.0, 11.0)]);
//! ```

#[macro_use] mod helpers;
mod primitive;
mod error;
mod point;
mod api;
mod variants;
mod inits;
mod abort_strategy;
pub mod partitioned;
pub mod codec;

pub use abort_strategy::AbortStrategy;
pub use api::{cluster, EmptyClusterPolicy, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState};
pub use error::{KMeansError, Result};
pub use point::{PartialAggregate, Point};
pub use primitive::Primitive;
pub use variants::{Lloyd, PartitionedLloyd, Variant};

/// Upper bound of rounds [`KMeans::cluster`] executes.
pub const MAX_ITERATIONS: usize = 1000;
/// Largest centroid shift that still counts as converged by default.
pub const EPSILON: f64 = 1e-8;
