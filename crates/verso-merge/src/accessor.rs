//! Record field access.
//!
//! The engine has no knowledge of how a record type's fields are discovered
//! or how a fresh instance is built; that capability is injected per type
//! through [`RecordAccessor`] and looked up in an [`AccessorRegistry`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use verso_value::{Record, RecordTypeId, Value};

/// Errors raised by a record accessor.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// A fresh instance of the record type cannot be built.
    #[error("record type {type_id} cannot be instantiated: {reason}")]
    Instantiate {
        type_id: RecordTypeId,
        reason: String,
    },

    /// A merged field cannot be written back to the record type.
    #[error("field {field} is not writable on record type {type_id}")]
    ImmutableField {
        type_id: RecordTypeId,
        field: String,
    },
}

/// Field access for one record type.
///
/// `fields` enumerates the merge-visible fields of a record. `rebuild`
/// constructs a new record seeded from `template`: fields the accessor
/// exposes are replaced wholesale by `merged` (a field absent from `merged`
/// is absent from the result), while fields it does not expose are carried
/// over from the template unchanged. Implementations must never mutate the
/// template — callers may still hold it for auditing.
///
/// Object-safe and `Send + Sync` so accessors can be shared behind
/// `Arc<dyn RecordAccessor>` across threads.
pub trait RecordAccessor: Send + Sync {
    /// Enumerate the merge-visible fields of `record`.
    fn fields(&self, record: &Record) -> BTreeMap<String, Value>;

    /// Build a new record of the template's type with the merged fields
    /// applied.
    fn rebuild(
        &self,
        template: &Record,
        merged: BTreeMap<String, Value>,
    ) -> Result<Record, AccessError>;
}

/// Stock accessor that exposes every field of the record's own map.
///
/// With every field exposed, the merged map governs the whole field set and
/// `rebuild` cannot fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapAccessor;

impl RecordAccessor for MapAccessor {
    fn fields(&self, record: &Record) -> BTreeMap<String, Value> {
        record.fields().clone()
    }

    fn rebuild(
        &self,
        template: &Record,
        merged: BTreeMap<String, Value>,
    ) -> Result<Record, AccessError> {
        Ok(Record::new(template.type_id().clone(), merged))
    }
}

/// Read-only mapping from record type id to its accessor.
///
/// Built once at configuration time; afterwards it is never written, so it
/// can be shared across threads without synchronization.
#[derive(Clone, Default)]
pub struct AccessorRegistry {
    accessors: HashMap<RecordTypeId, Arc<dyn RecordAccessor>>,
    fallback: Option<Arc<dyn RecordAccessor>>,
}

impl AccessorRegistry {
    /// An empty registry. Merging any record through it is a configuration
    /// error.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that answers every unregistered type with `fallback`.
    pub fn with_fallback(fallback: impl RecordAccessor + 'static) -> Self {
        Self {
            accessors: HashMap::new(),
            fallback: Some(Arc::new(fallback)),
        }
    }

    /// Register an accessor for a record type, replacing any previous one.
    pub fn register(
        &mut self,
        type_id: impl Into<RecordTypeId>,
        accessor: impl RecordAccessor + 'static,
    ) {
        self.accessors.insert(type_id.into(), Arc::new(accessor));
    }

    /// Look up the accessor for a type id, falling back if configured.
    pub fn get(&self, type_id: &RecordTypeId) -> Option<&Arc<dyn RecordAccessor>> {
        self.accessors.get(type_id).or(self.fallback.as_ref())
    }

    /// Number of explicitly registered accessors.
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Returns `true` if no accessors are registered (fallback excluded).
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl std::fmt::Debug for AccessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorRegistry")
            .field("registered", &self.accessors.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_accessor_exposes_all_fields() {
        let mut rec = Record::empty("page");
        rec.set("title", Value::from("Home"));
        rec.set("views", Value::Number(4.0));

        let fields = MapAccessor.fields(&rec);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("title"), Some(&Value::from("Home")));
    }

    #[test]
    fn map_accessor_rebuild_replaces_field_set() {
        let mut template = Record::empty("page");
        template.set("stale", Value::from("x"));

        let mut merged = BTreeMap::new();
        merged.insert("fresh".to_string(), Value::Number(1.0));

        let rebuilt = MapAccessor.rebuild(&template, merged).unwrap();
        assert_eq!(rebuilt.type_id().as_str(), "page");
        assert!(rebuilt.get("stale").is_none());
        assert_eq!(rebuilt.get("fresh"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = AccessorRegistry::new();
        assert!(registry.get(&RecordTypeId::new("page")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn registered_accessor_is_found() {
        let mut registry = AccessorRegistry::new();
        registry.register("page", MapAccessor);
        assert!(registry.get(&RecordTypeId::new("page")).is_some());
        assert!(registry.get(&RecordTypeId::new("article")).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn fallback_answers_unregistered_types() {
        let registry = AccessorRegistry::with_fallback(MapAccessor);
        assert!(registry.get(&RecordTypeId::new("anything")).is_some());
        assert!(registry.is_empty());
    }
}
