use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A leaf value compared only by equality.
///
/// Scalars have no recursive merge strategy: the engine never looks inside
/// them. Anything that is not a number, keyed container, or record lands
/// here, including JSON arrays (as [`Scalar::Opaque`]).
///
/// `Scalar::Null` is a present value. A key holding `Null` is semantically
/// distinct from an absent key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// An explicit null. Present, unlike an absent key.
    Null,
    /// A boolean.
    Bool(bool),
    /// A text string.
    Text(String),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// Any value without a registered recursive strategy (e.g. a list).
    Opaque(serde_json::Value),
}

impl Scalar {
    /// Returns `true` if this is `Scalar::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Opaque(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_null() {
        assert!(Scalar::Null.is_null());
        assert!(!Scalar::Bool(false).is_null());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Scalar::from("abc"), Scalar::Text("abc".into()));
        assert_ne!(Scalar::from("abc"), Scalar::from("abd"));
        assert_ne!(Scalar::Null, Scalar::Text(String::new()));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::from("hi").to_string(), "\"hi\"");
    }

    #[test]
    fn timestamps_compare_by_instant() {
        let t = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(Scalar::Timestamp(t), Scalar::Timestamp(t));
        let later = DateTime::from_timestamp(1_700_000_001, 0).unwrap();
        assert_ne!(Scalar::Timestamp(t), Scalar::Timestamp(later));
    }

    #[test]
    fn serde_roundtrip() {
        let s = Scalar::Text("roundtrip".into());
        let json = serde_json::to_string(&s).unwrap();
        let parsed: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(s, parsed);
    }
}
