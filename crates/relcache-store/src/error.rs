//! Error types for relation store operations.

/// Boxed cause returned by user-supplied derivation functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from relation store operations.
#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    /// A mutation was attempted with an empty key.
    #[error("key must not be empty")]
    EmptyKey,

    /// The reference-derivation function failed for the item at `key`.
    #[error("cannot derive references for key {key:?}")]
    DeriveReferences {
        key: String,
        #[source]
        source: BoxError,
    },

    /// The store holds no relation record for this key.
    #[error("relation of key {key:?} not found")]
    RelationNotFound { key: String },

    /// A backward edge names an item that is not stored.
    ///
    /// Edge bookkeeping must make this unreachable. Treat it as a defect,
    /// never as something to retry.
    #[error("internal invariant violated: {referrer:?} is recorded as referencing {key:?} but is not stored")]
    InvariantViolated { key: String, referrer: String },

    /// Another thread panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// The store configuration could not be parsed.
    #[error("invalid store config: {0}")]
    Config(String),
}

impl RelationError {
    /// Returns `true` for [`RelationError::RelationNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RelationNotFound { .. })
    }
}

/// Result alias for relation store operations.
pub type RelationResult<T> = Result<T, RelationError>;
