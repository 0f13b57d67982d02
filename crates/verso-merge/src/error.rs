//! Error types for the merge crate.

use verso_value::RecordTypeId;

use crate::accessor::AccessError;

/// Errors that can occur during a merge.
///
/// The taxonomy is narrow by design: the engine always produces a result
/// for well-formed values, so the only failures are record configuration
/// errors — a record type the engine was never taught to rebuild.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// No record accessor is registered for this type id.
    #[error("no record accessor registered for type {0}")]
    MissingAccessor(RecordTypeId),

    /// The record accessor failed to rebuild a merged record.
    #[error("record rebuild failed at {path}: {source}")]
    Rebuild {
        path: String,
        #[source]
        source: AccessError,
    },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
