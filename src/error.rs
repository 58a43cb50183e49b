use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call was rejected (or aborted) because of its arguments / the dataset it was given.
    InvalidArgument,
    /// The calculation was cancelled through the configured cancel-flag.
    Cancelled,
}

/// Errors returned by this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {sample_cnt} samples")]
    InvalidClusterCount { requested: usize, sample_cnt: usize },

    /// Samples in the dataset have inconsistent dimensionality.
    #[error("dimension mismatch at sample {sample}: expected {expected}, found {found}")]
    DimensionMismatch { sample: usize, expected: usize, found: usize },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: &'static str },

    /// The dataset contains NaN or an infinite value.
    #[error("non-finite value in sample {sample}, dimension {dim}")]
    NonFiniteValue { sample: usize, dim: usize },

    /// An empty cluster could not be re-seeded, because every sample already coincides with a centroid.
    /// (Happens when k exceeds the amount of distinct samples)
    #[error("cluster {cluster} is empty and no unused sample is left to re-seed it")]
    DegenerateCluster { cluster: usize },

    /// Calculation was cancelled between two iterations.
    #[error("calculation cancelled")]
    Cancelled,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Cancelled => ErrorKind::Cancelled,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
