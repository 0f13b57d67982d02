//! Error types for the store crate.

use verso_merge::MergeError;

use crate::revision::RevisionId;

/// Errors from versioned store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key has no revision chain.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The key already has a chain; use `commit` to write new revisions.
    #[error("key already exists: {0}")]
    KeyExists(String),

    /// The named base revision is not part of the key's chain.
    #[error("unknown revision {revision} for key {key}")]
    UnknownRevision { key: String, revision: RevisionId },

    /// The value could not be serialized for content addressing.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The merge engine failed to reconcile a divergent commit.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
