use std::collections::HashMap;
use std::sync::RwLock;

use verso_merge::MergeEngine;
use verso_value::Value;

use crate::error::{StoreError, StoreResult};
use crate::revision::RevisionId;

/// A point-in-time view of a key: its value and the revision holding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub revision: RevisionId,
    pub value: Value,
}

/// Result of a commit.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitOutcome {
    /// The new head of the key's chain.
    pub snapshot: Snapshot,
    /// `true` if the head had moved and the write was merge-resolved.
    pub merged: bool,
}

/// One key's revision history, oldest first. The last entry is the head.
struct Chain {
    revisions: Vec<(RevisionId, Value)>,
}

impl Chain {
    fn head(&self) -> &(RevisionId, Value) {
        // A chain is created with its first revision and only ever grows.
        self.revisions.last().expect("chain has at least one revision")
    }

    fn find(&self, revision: &RevisionId) -> Option<&Value> {
        self.revisions
            .iter()
            .find(|(id, _)| id == revision)
            .map(|(_, value)| value)
    }
}

/// In-memory versioned value store with optimistic, merge-resolved commits.
///
/// Writers read a [`Snapshot`], derive a new value from it, and commit
/// naming the revision they started from. If the head has not moved the
/// commit fast-forwards; otherwise the store reconciles
/// `(base, written, head)` through the merge engine and installs the
/// result. The store never rejects a well-formed commit for divergence.
///
/// All chains live in memory behind a `RwLock`. Values are cloned on read.
pub struct VersionedStore {
    engine: MergeEngine,
    chains: RwLock<HashMap<String, Chain>>,
}

impl VersionedStore {
    /// Create a store whose engine merges any record via the map accessor.
    pub fn new() -> Self {
        Self::with_engine(MergeEngine::with_map_accessor())
    }

    /// Create a store around a configured merge engine.
    pub fn with_engine(engine: MergeEngine) -> Self {
        Self {
            engine,
            chains: RwLock::new(HashMap::new()),
        }
    }

    /// Current head of `key`, if the key exists.
    pub fn get(&self, key: &str) -> Option<Snapshot> {
        let chains = self.chains.read().expect("lock poisoned");
        chains.get(key).map(|chain| {
            let (revision, value) = chain.head();
            Snapshot {
                revision: *revision,
                value: value.clone(),
            }
        })
    }

    /// Create the first revision of a new key.
    pub fn insert(&self, key: &str, value: Value) -> StoreResult<Snapshot> {
        let revision = RevisionId::of_value(&value)?;
        let mut chains = self.chains.write().expect("lock poisoned");
        if chains.contains_key(key) {
            return Err(StoreError::KeyExists(key.to_string()));
        }
        chains.insert(
            key.to_string(),
            Chain {
                revisions: vec![(revision, value.clone())],
            },
        );
        Ok(Snapshot { revision, value })
    }

    /// Commit a new value for `key`, based on the revision the writer read.
    ///
    /// Fast-forwards when `based_on` is still the head; otherwise resolves
    /// the divergence through the merge engine. Committing a value equal to
    /// the resulting head is a no-op (content addressing deduplicates it).
    pub fn commit(
        &self,
        key: &str,
        based_on: &RevisionId,
        value: Value,
    ) -> StoreResult<CommitOutcome> {
        let mut chains = self.chains.write().expect("lock poisoned");
        let chain = chains
            .get_mut(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;

        let base = chain
            .find(based_on)
            .ok_or_else(|| StoreError::UnknownRevision {
                key: key.to_string(),
                revision: *based_on,
            })?
            .clone();

        let (head_id, head_value) = chain.head().clone();

        let (new_value, merged) = if head_id == *based_on {
            (value, false)
        } else {
            let resolved = self.engine.merge(&base, &value, &head_value)?;
            tracing::debug!(
                key,
                base = %based_on.short_hex(),
                head = %head_id.short_hex(),
                "commit diverged from head, merge-resolved"
            );
            (resolved, true)
        };

        let revision = RevisionId::of_value(&new_value)?;
        if revision != head_id {
            chain.revisions.push((revision, new_value.clone()));
        }

        Ok(CommitOutcome {
            snapshot: Snapshot {
                revision,
                value: new_value,
            },
            merged,
        })
    }

    /// Number of revisions recorded for `key`.
    pub fn revision_count(&self, key: &str) -> Option<usize> {
        let chains = self.chains.read().expect("lock poisoned");
        chains.get(key).map(|chain| chain.revisions.len())
    }

    /// Sorted list of all keys.
    pub fn keys(&self) -> Vec<String> {
        let chains = self.chains.read().expect("lock poisoned");
        let mut keys: Vec<String> = chains.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of keys in the store.
    pub fn len(&self) -> usize {
        self.chains.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.chains.read().expect("lock poisoned").is_empty()
    }
}

impl Default for VersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VersionedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionedStore")
            .field("key_count", &self.len())
            .finish()
    }
}
