//! This module implements validation to and from [`serde_json::Value`].
//!
//! # Examples
//!
//! ```
//! use normalize_json::schema::{string_max, tree};
//! use normalize_json::{compile, validate_json_str};
//!
//! let validator = compile(tree(vec![("name", string_max(30))]));
//! let normalized = validate_json_str(&validator, r#"{ "name": " Bob " }"#).unwrap();
//! assert_eq!(normalized, serde_json::json!({ "name": "Bob" }));
//! ```
//!

#![cfg(feature = "serde_json")]

use crate::compile::Validator;
use crate::util::ValidateError;
use crate::value::{Value, ValueMap};
use serde_json::Value as JSON_Value;
use std::convert::TryFrom;

// Convert JSON `Value`s to the local `Value` type that the validate code
// uses.

impl TryFrom<&JSON_Value> for Value {
    type Error = ValidateError;

    fn try_from(value: &JSON_Value) -> Result<Self, Self::Error> {
        let result = match value {
            JSON_Value::Null => Value::Null,
            JSON_Value::Bool(b) => Value::Bool(*b),
            JSON_Value::Number(num) => {
                if let Some(u) = num.as_u64() {
                    Value::Integer(u as i128)
                } else if let Some(i) = num.as_i64() {
                    Value::Integer(i as i128)
                } else if let Some(f) = num.as_f64() {
                    Value::from_float(f)
                } else {
                    return Err(ValidateError::ValueError(
                        "JSON Value::Number conversion failure".into(),
                    ));
                }
            }
            JSON_Value::String(t) => Value::Text(t.clone()),
            JSON_Value::Array(a) => {
                let array: Result<_, _> = a.iter().map(Value::try_from).collect();
                Value::Array(array?)
            }
            JSON_Value::Object(m) => {
                let map: Result<ValueMap, ValidateError> = m
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), Value::try_from(v)?)))
                    .collect();
                Value::Map(map?)
            }
        };
        Ok(result)
    }
}

#[test]
fn test_json_number_behavior() {
    // The TryFrom above must probe u64, then i64, then f64, so that number
    // types survive precisely: serde_json sometimes permits as_f64 to work
    // on integers, and a float must never be demoted to an integer.

    let json_value: JSON_Value = serde_json::from_str("1").unwrap();
    assert!(json_value.as_u64().is_some());

    let json_value: JSON_Value = serde_json::from_str("-1").unwrap();
    assert!(json_value.as_u64().is_none());
    assert!(json_value.as_i64().is_some());

    let json_value: JSON_Value = serde_json::from_str("1.0").unwrap();
    assert!(json_value.as_u64().is_none());
    assert!(json_value.as_i64().is_none());
    assert!(json_value.as_f64().is_some());
}

// A variant that consumes the JSON Value.
impl TryFrom<JSON_Value> for Value {
    type Error = ValidateError;

    fn try_from(value: JSON_Value) -> Result<Self, Self::Error> {
        Value::try_from(&value)
    }
}

// Convert normalized output back into JSON form.  Absent entries can't
// round-trip; map entries holding the sentinel are dropped and an array
// element becomes null, matching the lossy clone's policy.
impl From<&Value> for JSON_Value {
    fn from(value: &Value) -> JSON_Value {
        match value {
            Value::Absent | Value::Null => JSON_Value::Null,
            Value::Bool(b) => JSON_Value::Bool(*b),
            Value::Integer(i) => match i64::try_from(*i) {
                Ok(i) => JSON_Value::from(i),
                // Out of i64 range; the closest double will have to do.
                Err(_) => JSON_Value::from(*i as f64),
            },
            Value::Float(f) => serde_json::Number::from_f64(f.0)
                .map(JSON_Value::Number)
                .unwrap_or(JSON_Value::Null),
            Value::Text(s) => JSON_Value::String(s.clone()),
            Value::Array(a) => JSON_Value::Array(a.iter().map(JSON_Value::from).collect()),
            Value::Map(m) => JSON_Value::Object(
                m.iter()
                    .filter(|(_, v)| !v.is_absent())
                    .map(|(k, v)| (k.clone(), JSON_Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Validate already-parsed JSON data and return the normalized copy.
pub fn validate_json(
    validator: &Validator,
    value: &JSON_Value,
) -> Result<JSON_Value, ValidateError> {
    let value = Value::try_from(value)?;
    let normalized = validator.validate(&value)?;
    Ok(JSON_Value::from(&normalized))
}

/// Validate JSON-encoded data and return the normalized copy.
pub fn validate_json_str(validator: &Validator, json: &str) -> Result<JSON_Value, ValidateError> {
    // Deserialize the JSON bytes
    let json_value: JSON_Value =
        serde_json::from_str(json).map_err(|e| ValidateError::ValueError(format!("{}", e)))?;
    validate_json(validator, &json_value)
}
