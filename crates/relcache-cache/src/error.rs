//! Error types for keyed cache operations.

use relcache_store::{BoxError, RelationError};
use thiserror::Error;

/// Errors that can occur during keyed cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key function failed for a value. The store was not touched.
    #[error("cannot derive key for {value}")]
    Key {
        /// `Debug` rendering of the offending value.
        value: String,
        #[source]
        source: BoxError,
    },

    /// The underlying relation store rejected the operation.
    #[error("store error: {0}")]
    Store(#[from] RelationError),
}

impl CacheError {
    /// Returns `true` if the store has no relation record for the key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }
}

/// Convenience type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
