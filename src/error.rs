use thiserror::Error;

/// Errors produced by the clustering engine and its text boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMeansError {
    /// Clustering was requested without any input samples.
    #[error("no input points given")]
    EmptyInput,
    /// `k` is zero, or larger than the amount of distinct samples available for initialization.
    #[error("invalid cluster count {k}: {available} distinct points available")]
    InvalidClusterCount { k: usize, available: usize },
    /// A centroid did not receive any points in a round. [`Point::average`](crate::Point::average) has no cluster
    /// index to report and always uses `0`.
    #[error("no points to average for cluster {index}")]
    EmptyCluster { index: usize },
    /// A text-encoded point or partial aggregate could not be parsed.
    #[error("malformed record '{record}': {reason}")]
    MalformedRecord { record: String, reason: String },
    /// Weighted centroid sampling failed (e.g. every weight is zero).
    #[error("centroid sampling failed: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),
}

pub type Result<T> = std::result::Result<T, KMeansError>;
