//! Errors surfaced by table construction and growth.
use core::{error, fmt};

/// Errors returned by this library.
///
/// A missing key is never an error: `search` yields `None` and `delete`
/// does nothing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TableError {
    /// The bucket array of the given length could not be reserved.
    AllocationFailure { buckets: usize },
    /// Growing to `requested` buckets would exceed the configured `limit`.
    BucketLimit { requested: usize, limit: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TableError::AllocationFailure { buckets } => {
                write!(f, "failed to allocate {} buckets", buckets)
            }
            TableError::BucketLimit { requested, limit } => {
                write!(f, "{} buckets requested, limit is {}", requested, limit)
            }
        }
    }
}

impl error::Error for TableError {}
