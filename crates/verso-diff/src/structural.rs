//! Structural comparison of two value trees.
//!
//! For containers and records the diff walks the union of both key sets and
//! assigns each key a [`KeyDiff`] verdict, recursing into nested values.
//! Scalars and numbers compare by equality only.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use verso_value::Value;

/// The result of comparing two values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diff {
    /// The values compare structurally equal.
    Unchanged,
    /// A leaf-level change between two values compared only by equality.
    Value { before: Value, after: Value },
    /// Per-key verdicts for a container or record.
    Keys(BTreeMap<String, KeyDiff>),
}

/// Verdict for a single key of a container or record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum KeyDiff {
    /// The key is absent in `before` and present in `after`.
    Added(Value),
    /// The key is present in `before` and absent in `after`.
    Removed(Value),
    /// Present in both with structurally equal values.
    Unchanged,
    /// Present in both with differing values.
    Changed(Diff),
}

impl Diff {
    /// Returns `true` if the comparison found no difference.
    pub fn is_unchanged(&self) -> bool {
        match self {
            Self::Unchanged => true,
            Self::Value { .. } => false,
            Self::Keys(entries) => entries.values().all(|v| matches!(v, KeyDiff::Unchanged)),
        }
    }

    /// The per-key verdicts, if this diff compared keyed values.
    pub fn entries(&self) -> Option<&BTreeMap<String, KeyDiff>> {
        match self {
            Self::Keys(entries) => Some(entries),
            _ => None,
        }
    }

    /// Number of added keys at the top level.
    pub fn additions(&self) -> usize {
        self.count(|v| matches!(v, KeyDiff::Added(_)))
    }

    /// Number of removed keys at the top level.
    pub fn removals(&self) -> usize {
        self.count(|v| matches!(v, KeyDiff::Removed(_)))
    }

    /// Number of changed keys at the top level.
    pub fn changes(&self) -> usize {
        self.count(|v| matches!(v, KeyDiff::Changed(_)))
    }

    /// The keys the edit touched: every key present in `before` or `after`.
    ///
    /// This is the set the container merge applies edit rules to; keys
    /// outside it are carried forward from `latest` untouched. A key that
    /// appears here with an `Unchanged` verdict still merges to the latest
    /// value, so the two formulations agree.
    pub fn touched_keys(&self) -> BTreeSet<String> {
        match self {
            Self::Keys(entries) => entries.keys().cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    fn count(&self, pred: impl Fn(&KeyDiff) -> bool) -> usize {
        match self {
            Self::Keys(entries) => entries.values().filter(|v| pred(v)).count(),
            _ => 0,
        }
    }
}

/// Compare two values.
///
/// Containers diff per key; records of the same type diff over their field
/// maps. Every other pairing (scalars, numbers, mixed kinds, records of
/// different types) compares as an opaque leaf.
///
/// Equal keyed values still produce a tree of `Unchanged` verdicts, so
/// [`Diff::touched_keys`] always reports the full `before ∪ after` key set.
pub fn diff(before: &Value, after: &Value) -> Diff {
    match (before, after) {
        (Value::Container(b), Value::Container(a)) => Diff::Keys(diff_maps(b, a)),
        (Value::Record(b), Value::Record(a)) if b.type_id() == a.type_id() => {
            Diff::Keys(diff_maps(b.fields(), a.fields()))
        }
        _ if before == after => Diff::Unchanged,
        _ => Diff::Value {
            before: before.clone(),
            after: after.clone(),
        },
    }
}

fn diff_maps(
    before: &BTreeMap<String, Value>,
    after: &BTreeMap<String, Value>,
) -> BTreeMap<String, KeyDiff> {
    let mut entries = BTreeMap::new();

    for (key, bv) in before {
        let verdict = match after.get(key) {
            Some(av) if av == bv => KeyDiff::Unchanged,
            Some(av) => KeyDiff::Changed(diff(bv, av)),
            None => KeyDiff::Removed(bv.clone()),
        };
        entries.insert(key.clone(), verdict);
    }

    for (key, av) in after {
        if !before.contains_key(key) {
            entries.insert(key.clone(), KeyDiff::Added(av.clone()));
        }
    }

    entries
}
