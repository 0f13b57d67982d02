//! JSON interchange for the value model.
//!
//! Conversions are total in both directions. JSON objects become containers
//! and arrays become opaque scalars (no recursive strategy exists for
//! ordered sequences). Records serialize as plain objects of their fields,
//! so `to_json` is lossy for record type ids; use the serde representation
//! of [`Value`] itself where type fidelity matters.

use std::collections::BTreeMap;

use crate::scalar::Scalar;
use crate::value::Value;

impl Value {
    /// Convert a JSON document into a value tree.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => {
                // All numbers are merged as reals. Precision past 2^53 is
                // the caller's problem, as with any f64 arithmetic.
                Value::Number(n.as_f64().unwrap_or(0.0))
            }
            serde_json::Value::String(s) => Value::Scalar(Scalar::Text(s.clone())),
            serde_json::Value::Array(_) => Value::Scalar(Scalar::Opaque(json.clone())),
            serde_json::Value::Object(map) => {
                let entries: BTreeMap<String, Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect();
                Value::Container(entries)
            }
        }
    }

    /// Render this value tree as a JSON document.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => number_to_json(*n),
            Value::Scalar(Scalar::Null) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Scalar(Scalar::Text(s)) => serde_json::Value::String(s.clone()),
            Value::Scalar(Scalar::Timestamp(t)) => serde_json::Value::String(t.to_rfc3339()),
            Value::Scalar(Scalar::Opaque(v)) => v.clone(),
            Value::Container(map) => map_to_json(map),
            Value::Record(r) => map_to_json(r.fields()),
        }
    }
}

fn map_to_json(map: &BTreeMap<String, Value>) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

fn number_to_json(n: f64) -> serde_json::Value {
    // Integral values render as integers so round-trips stay readable.
    if n.fract() == 0.0 && n.is_finite() && n.abs() < (i64::MAX as f64) {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_map_both_ways() {
        let doc = json!({"t": "text", "b": true, "n": null});
        let value = Value::from_json(&doc);
        let map = value.as_container().unwrap();
        assert_eq!(map.get("t"), Some(&Value::from("text")));
        assert_eq!(map.get("b"), Some(&Value::from(true)));
        assert_eq!(map.get("n"), Some(&Value::Scalar(Scalar::Null)));
        assert_eq!(value.to_json(), doc);
    }

    #[test]
    fn numbers_are_reals() {
        let value = Value::from_json(&json!({"i": 3, "f": 2.5}));
        let map = value.as_container().unwrap();
        assert_eq!(map.get("i"), Some(&Value::Number(3.0)));
        assert_eq!(map.get("f"), Some(&Value::Number(2.5)));
    }

    #[test]
    fn integral_numbers_render_as_integers() {
        assert_eq!(Value::Number(3.0).to_json(), json!(3));
        assert_eq!(Value::Number(2.5).to_json(), json!(2.5));
    }

    #[test]
    fn arrays_become_opaque_scalars() {
        let doc = json!({"items": [1, 2, 3]});
        let value = Value::from_json(&doc);
        let items = value.as_container().unwrap().get("items").unwrap();
        assert!(matches!(items, Value::Scalar(Scalar::Opaque(_))));
        assert_eq!(value.to_json(), doc);
    }

    #[test]
    fn nested_objects_become_containers() {
        let doc = json!({"outer": {"inner": {"leaf": 1}}});
        let value = Value::from_json(&doc);
        let outer = value.as_container().unwrap().get("outer").unwrap();
        let inner = outer.as_container().unwrap().get("inner").unwrap();
        assert_eq!(inner.as_container().unwrap().get("leaf"), Some(&Value::Number(1.0)));
        assert_eq!(value.to_json(), doc);
    }

    #[test]
    fn record_renders_as_field_object() {
        let mut rec = crate::Record::empty("page");
        rec.set("title", Value::from("Home"));
        assert_eq!(Value::Record(rec).to_json(), json!({"title": "Home"}));
    }

    #[test]
    fn roundtrip_preserves_structure() {
        let doc = json!({
            "count": 4,
            "name": "widget",
            "tags": ["a", "b"],
            "meta": {"created": "2024-01-01", "flags": {"hidden": false}}
        });
        let value = Value::from_json(&doc);
        assert_eq!(value.to_json(), doc);
    }
}
