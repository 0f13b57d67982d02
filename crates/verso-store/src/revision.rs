use std::fmt;

use verso_value::Value;

use crate::error::{StoreError, StoreResult};

/// Content-addressed identifier for a stored revision.
///
/// A `RevisionId` is the BLAKE3 hash of the value's serialized form.
/// Identical values always produce the same id, so revisions deduplicate
/// and a commit of an unchanged value is a no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionId([u8; 32]);

impl RevisionId {
    /// Compute the revision id of a value.
    ///
    /// Serialization is deterministic: containers and record fields are
    /// ordered maps, so equal values always hash equally.
    pub fn of_value(value: &Value) -> StoreResult<Self> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self(*blake3::hash(&bytes).as_bytes()))
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevisionId({})", self.short_hex())
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
