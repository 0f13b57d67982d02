use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::scalar::Scalar;

/// The variant tag of a [`Value`].
///
/// Merge behavior is dispatched on the kind of a value, not on its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Scalar,
    Container,
    Record,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Scalar => "scalar",
            Self::Container => "container",
            Self::Record => "record",
        };
        write!(f, "{name}")
    }
}

/// Everything the engine can merge or diff.
///
/// A closed, recursive sum type. Keys of containers are unique strings and
/// their order carries no meaning; `BTreeMap` keeps iteration deterministic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Any integral or floating quantity, treated uniformly as a real value.
    Number(f64),
    /// An equality-compared leaf.
    Scalar(Scalar),
    /// An unordered string-keyed map of values.
    Container(BTreeMap<String, Value>),
    /// A structured value with a fixed, named field set.
    Record(Record),
}

impl Value {
    /// The variant tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Number(_) => Kind::Number,
            Self::Scalar(_) => Kind::Scalar,
            Self::Container(_) => Kind::Container,
            Self::Record(_) => Kind::Record,
        }
    }

    /// An empty container.
    pub fn empty_container() -> Self {
        Self::Container(BTreeMap::new())
    }

    /// The zero of this value's kind.
    ///
    /// Zero is what an absent operand becomes before a recursive merge:
    /// `0.0` for numbers, the empty map for containers, the empty record of
    /// the same type for records. Scalars have no zero — their absence is
    /// represented as absence (`None`), never as a constructed value.
    pub fn zero(&self) -> Option<Value> {
        match self {
            Self::Number(_) => Some(Self::Number(0.0)),
            Self::Scalar(_) => None,
            Self::Container(_) => Some(Self::empty_container()),
            Self::Record(r) => Some(Self::Record(Record::empty(r.type_id().clone()))),
        }
    }

    /// Returns `true` if this value equals its kind's zero.
    ///
    /// A present scalar is never zero; `Scalar::Null` is a real value.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0.0,
            Self::Scalar(_) => false,
            Self::Container(map) => map.is_empty(),
            Self::Record(r) => r.is_empty(),
        }
    }

    /// The numeric content, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The container map, if this is a container.
    pub fn as_container(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Container(map) => Some(map),
            _ => None,
        }
    }

    /// The record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::from(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Container(map)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Number(1.0).kind(), Kind::Number);
        assert_eq!(Value::from("x").kind(), Kind::Scalar);
        assert_eq!(Value::empty_container().kind(), Kind::Container);
        assert_eq!(Value::from(Record::empty("t")).kind(), Kind::Record);
    }

    #[test]
    fn zero_per_kind() {
        assert_eq!(Value::Number(7.0).zero(), Some(Value::Number(0.0)));
        assert_eq!(Value::from("x").zero(), None);
        assert_eq!(
            Value::empty_container().zero(),
            Some(Value::empty_container())
        );

        let rec = Value::from(Record::empty("page"));
        assert_eq!(rec.zero(), Some(Value::from(Record::empty("page"))));
    }

    #[test]
    fn is_zero() {
        assert!(Value::Number(0.0).is_zero());
        assert!(!Value::Number(0.5).is_zero());
        assert!(Value::empty_container().is_zero());
        assert!(Value::from(Record::empty("t")).is_zero());
        // Present scalars are never zero, null included.
        assert!(!Value::Scalar(Scalar::Null).is_zero());
        assert!(!Value::from(false).is_zero());
    }

    #[test]
    fn record_zero_keeps_type_id() {
        let mut r = Record::empty("page");
        r.set("title", Value::from("x"));
        let zero = Value::Record(r).zero().unwrap();
        assert_eq!(zero.as_record().unwrap().type_id().as_str(), "page");
        assert!(zero.is_zero());
    }

    #[test]
    fn container_equality_ignores_insertion_order() {
        let mut a = BTreeMap::new();
        a.insert("x".to_string(), Value::Number(1.0));
        a.insert("y".to_string(), Value::Number(2.0));

        let mut b = BTreeMap::new();
        b.insert("y".to_string(), Value::Number(2.0));
        b.insert("x".to_string(), Value::Number(1.0));

        assert_eq!(Value::Container(a), Value::Container(b));
    }
}
