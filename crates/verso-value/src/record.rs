use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Name of a record type.
///
/// Record merging is dispatched per type: the merge engine looks up the
/// record accessor registered for this id. Two records are only merged
/// field-by-field when their type ids match.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordTypeId(String);

impl RecordTypeId {
    /// Create a type id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordTypeId({})", self.0)
    }
}

impl fmt::Display for RecordTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordTypeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A structured value with a fixed, named set of fields.
///
/// The field map is the record's merge-visible state; which fields a merge
/// actually sees is decided by the record accessor registered for
/// [`Record::type_id`], not by the record itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    type_id: RecordTypeId,
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create a record with the given fields.
    pub fn new(type_id: impl Into<RecordTypeId>, fields: BTreeMap<String, Value>) -> Self {
        Self {
            type_id: type_id.into(),
            fields,
        }
    }

    /// Create a record with no fields set.
    pub fn empty(type_id: impl Into<RecordTypeId>) -> Self {
        Self::new(type_id, BTreeMap::new())
    }

    /// The record's type id.
    pub fn type_id(&self) -> &RecordTypeId {
        &self.type_id
    }

    /// The record's field map.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Consume the record, returning its field map.
    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field, returning the previous value if any.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    /// Returns `true` if no fields are set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<RecordTypeId> for Record {
    fn from(type_id: RecordTypeId) -> Self {
        Self::empty(type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;

    #[test]
    fn empty_record_has_no_fields() {
        let r = Record::empty("page");
        assert!(r.is_empty());
        assert_eq!(r.type_id().as_str(), "page");
    }

    #[test]
    fn set_and_get() {
        let mut r = Record::empty("page");
        assert!(r.set("title", Value::Scalar("Home".into())).is_none());
        assert_eq!(r.get("title"), Some(&Value::Scalar("Home".into())));

        let prev = r.set("title", Value::Scalar("Start".into()));
        assert_eq!(prev, Some(Value::Scalar(Scalar::Text("Home".into()))));
    }

    #[test]
    fn equality_includes_type_id() {
        let mut a = Record::empty("page");
        a.set("n", Value::Number(1.0));
        let mut b = Record::empty("article");
        b.set("n", Value::Number(1.0));
        assert_ne!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let mut r = Record::empty("page");
        r.set("count", Value::Number(3.0));
        let json = serde_json::to_string(&r).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(r, parsed);
    }
}
