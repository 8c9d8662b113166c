//! This module declares a generic Value enum for the data under validation.

use std::collections::BTreeMap;
use std::fmt;

use float_ord::FloatOrd;

/// The map type used for object-like containers.
pub type ValueMap = BTreeMap<String, Value>;

/// `Value` represents all the types of data we can validate and normalize.
///
/// `Value::Absent` is the "key exists but holds no value" state.  It is not
/// a value in its own right: the lossy clone and the normalizer both strip
/// map entries that hold it, so it can never survive into normalized output.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd)]
#[allow(missing_docs)]
pub enum Value {
    Absent,
    Null,
    Bool(bool),
    Integer(i128),
    Float(FloatOrd<f64>),
    Text(String),
    Array(Vec<Value>),
    Map(ValueMap),
}

// FloatOrd doesn't implement Debug, so we have to do all the work by hand.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "Absent"),
            Value::Null => write!(f, "Null"),
            Value::Bool(x) => x.fmt(f),
            Value::Integer(x) => x.fmt(f),
            Value::Float(x) => x.0.fmt(f),
            Value::Text(x) => x.fmt(f),
            Value::Array(x) => x.fmt(f),
            Value::Map(x) => x.fmt(f),
        }
    }
}

// Display is used when a value is quoted inside an error message.  Scalars
// print bare (the message templates supply their own quoting); containers
// fall back to the Debug form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(x) => write!(f, "{}", x),
            Value::Integer(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{}", x.0),
            Value::Text(x) => write!(f, "{}", x),
            Value::Array(_) | Value::Map(_) => write!(f, "{:?}", self),
        }
    }
}

impl Value {
    /// Build a `Value::Float` without needing to name `float_ord::FloatOrd`.
    pub fn from_float<F: Into<f64>>(f: F) -> Value {
        Value::Float(FloatOrd(f.into()))
    }

    /// True if this is the absence sentinel.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Fetch a field of an object-like value by name.
    ///
    /// Returns `None` for non-map values, for keys that don't exist, and for
    /// keys holding the absence sentinel.  This is the accessor resolvers
    /// use to inspect sibling properties.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => match m.get(key) {
                Some(Value::Absent) | None => None,
                found => found,
            },
            _ => None,
        }
    }

    /// Make a structurally independent copy, dropping values that have no
    /// lossless data representation.
    ///
    /// Map entries holding `Absent` are omitted; an `Absent` array element
    /// (or an `Absent` at the top level) becomes `Null`.  This is deliberate
    /// lossy-clone behavior: the normalizer's stripping rules assume absent
    /// entries never reach it, so the two stages compose predictably.
    pub fn lossy_clone(&self) -> Value {
        match self {
            Value::Absent => Value::Null,
            Value::Array(a) => Value::Array(a.iter().map(Value::lossy_clone).collect()),
            Value::Map(m) => Value::Map(
                m.iter()
                    .filter(|(_, v)| !v.is_absent())
                    .map(|(k, v)| (k.clone(), v.lossy_clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}
