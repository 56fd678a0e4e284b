use thiserror::Error;

/// Errors reported by the fallible map operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An open-addressing table cannot be rebuilt smaller than its live entry count.
    #[error("requested capacity {requested} cannot hold {len} live entries")]
    CapacityTooSmall { requested: usize, len: usize },

    /// A chained table needs at least one bucket.
    #[error("capacity must be at least 1")]
    ZeroCapacity,

    /// A builder was given a capacity it cannot round to a usable prime.
    #[error("invalid initial capacity: {0}")]
    InvalidCapacity(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
