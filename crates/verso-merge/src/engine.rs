//! Three-way structural merge.
//!
//! Reconciles a `before → after` edit with an independently evolved
//! `latest` value: numbers merge by additive delta, keyed containers merge
//! key-by-key with untouched keys carried forward from `latest`, records
//! merge over their accessor-provided field maps, and scalars follow
//! override-if-changed. The merge is a pure function of its inputs and the
//! read-only accessor registry; inputs are never mutated and the result is
//! always freshly built.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use verso_value::{Record, RecordTypeId, Value};

use crate::accessor::{AccessorRegistry, MapAccessor, RecordAccessor};
use crate::error::{MergeError, MergeResult};
use crate::report::{render_path, MergeReport};

/// The merge engine.
///
/// Holds the record accessor registry; everything else is stateless.
/// Cheap to share across threads — concurrent merges need no coordination.
#[derive(Debug, Default)]
pub struct MergeEngine {
    accessors: AccessorRegistry,
}

impl MergeEngine {
    /// Create an engine with the given accessor registry.
    pub fn new(accessors: AccessorRegistry) -> Self {
        Self { accessors }
    }

    /// Create an engine that merges any record through [`MapAccessor`].
    ///
    /// Suitable when records carry their full merge-visible state in their
    /// own field maps. Callers with partial or constructor-guarded record
    /// types should register per-type accessors via [`MergeEngine::new`]
    /// instead.
    pub fn with_map_accessor() -> Self {
        Self::new(AccessorRegistry::with_fallback(MapAccessor))
    }

    /// The accessor registry this engine dispatches record merges through.
    pub fn accessors(&self) -> &AccessorRegistry {
        &self.accessors
    }

    /// Merge an edit (`before → after`) onto an independently evolved
    /// `latest` value.
    ///
    /// Never fails on well-formed value trees; the only error source is a
    /// record type the registry cannot resolve or rebuild.
    pub fn merge(&self, before: &Value, after: &Value, latest: &Value) -> MergeResult<Value> {
        self.merge_with_report(before, after, latest)
            .map(|(value, _)| value)
    }

    /// Like [`MergeEngine::merge`], additionally reporting every position
    /// where the author and an independent writer changed the same scalar.
    pub fn merge_with_report(
        &self,
        before: &Value,
        after: &Value,
        latest: &Value,
    ) -> MergeResult<(Value, MergeReport)> {
        tracing::trace!(kind = %after.kind(), "three-way merge");
        let mut report = MergeReport::new();
        let mut path = Vec::new();
        let merged = self.merge_value(
            Some(before),
            Some(after),
            Some(latest),
            &mut path,
            &mut report,
        )?;
        // All three operands are present, so the merge cannot erase the root.
        Ok((merged.unwrap_or_else(|| latest.clone()), report))
    }

    /// Recursive entry point used by every strategy for nested sub-values.
    ///
    /// Absent operands arrive as `None`; the kind of `after` (falling back
    /// to `before`) selects the strategy, and operands of another kind are
    /// treated as that kind's zero. Returns `None` when the merged value is
    /// absent (a scalar with no survivor).
    fn merge_value(
        &self,
        before: Option<&Value>,
        after: Option<&Value>,
        latest: Option<&Value>,
        path: &mut Vec<String>,
        report: &mut MergeReport,
    ) -> MergeResult<Option<Value>> {
        // A no-op edit carries latest through untouched, whatever its kind.
        if before == after {
            return Ok(latest.cloned());
        }

        let governing = match after.or(before) {
            Some(value) => value,
            None => return Ok(latest.cloned()),
        };

        match governing {
            Value::Number(_) => {
                let b = number_or_zero(before);
                let a = number_or_zero(after);
                let l = number_or_zero(latest);
                Ok(Some(Value::Number(l + (a - b))))
            }
            Value::Container(_) => {
                let empty = BTreeMap::new();
                let b = container_or_empty(before, &empty);
                let a = container_or_empty(after, &empty);
                let l = container_or_empty(latest, &empty);
                let merged = self.merge_container(b, a, l, path, report)?;
                Ok(Some(Value::Container(merged)))
            }
            Value::Record(governing) => self
                .merge_record(governing, before, after, latest, path, report)
                .map(|record| Some(Value::Record(record))),
            Value::Scalar(_) => Ok(self.merge_scalar(before, after, latest, path, report)),
        }
    }

    /// Key-by-key merge over the union of the three key sets.
    fn merge_container(
        &self,
        before: &BTreeMap<String, Value>,
        after: &BTreeMap<String, Value>,
        latest: &BTreeMap<String, Value>,
        path: &mut Vec<String>,
        report: &mut MergeReport,
    ) -> MergeResult<BTreeMap<String, Value>> {
        let mut keys: BTreeSet<&String> = before.keys().collect();
        keys.extend(after.keys());
        keys.extend(latest.keys());

        let mut result = BTreeMap::new();
        for key in keys {
            let bv = before.get(key);
            let av = after.get(key);
            let lv = latest.get(key);

            // Untouched by the edit: carry latest forward, absent stays absent.
            if bv.is_none() && av.is_none() {
                if let Some(lv) = lv {
                    result.insert(key.clone(), lv.clone());
                }
                continue;
            }

            path.push(key.clone());
            let merged = self.merge_value(bv, av, lv, path, report);
            path.pop();

            match merged? {
                // A zero result only survives when latest had an entry to
                // preserve; otherwise it would be a phantom key.
                Some(value) if value.is_zero() && lv.is_none() => {}
                Some(value) => {
                    result.insert(key.clone(), value);
                }
                None => {}
            }
        }
        Ok(result)
    }

    /// Merge records by merging their accessor-provided field maps, then
    /// rebuilding a fresh record seeded from `latest`.
    fn merge_record(
        &self,
        governing: &Record,
        before: Option<&Value>,
        after: Option<&Value>,
        latest: Option<&Value>,
        path: &mut Vec<String>,
        report: &mut MergeReport,
    ) -> MergeResult<Record> {
        let type_id = governing.type_id();
        let accessor = self
            .accessors
            .get(type_id)
            .ok_or_else(|| MergeError::MissingAccessor(type_id.clone()))?;

        let b_fields = record_fields(accessor, before, type_id);
        let a_fields = record_fields(accessor, after, type_id);
        let l_fields = record_fields(accessor, latest, type_id);

        let merged = self.merge_container(&b_fields, &a_fields, &l_fields, path, report)?;

        // Seed from latest so fields the accessor does not expose carry
        // over; a latest of another type contributes nothing.
        let template = match latest.and_then(Value::as_record) {
            Some(record) if record.type_id() == type_id => record.clone(),
            _ => Record::empty(type_id.clone()),
        };

        accessor
            .rebuild(&template, merged)
            .map_err(|source| MergeError::Rebuild {
                path: render_path(path),
                source,
            })
    }

    /// Override-if-changed: the author's edit wins over an untouched latest
    /// value. `before != after` is guaranteed by the caller.
    fn merge_scalar(
        &self,
        before: Option<&Value>,
        after: Option<&Value>,
        latest: Option<&Value>,
        path: &mut Vec<String>,
        report: &mut MergeReport,
    ) -> Option<Value> {
        if latest != before && latest != after {
            report.record(path, before, after, latest);
        }
        after.cloned()
    }
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_number).unwrap_or(0.0)
}

fn container_or_empty<'a>(
    value: Option<&'a Value>,
    empty: &'a BTreeMap<String, Value>,
) -> &'a BTreeMap<String, Value> {
    value.and_then(Value::as_container).unwrap_or(empty)
}

fn record_fields(
    accessor: &Arc<dyn RecordAccessor>,
    value: Option<&Value>,
    type_id: &RecordTypeId,
) -> BTreeMap<String, Value> {
    match value.and_then(Value::as_record) {
        Some(record) if record.type_id() == type_id => accessor.fields(record),
        _ => BTreeMap::new(),
    }
}
