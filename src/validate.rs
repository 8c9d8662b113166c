//! This module contains the validation/normalization engine.
//!
//! More precisely, it applies a requirement [`Tree`] to a [`Value`] tree,
//! mutating the working copy in place (trimming strings, stripping absent
//! entries) and failing fast on the first violated constraint.

use crate::schema::{Bounds, Literal, Pattern, Requirement, Resolution, Tree};
use crate::util::{
    malformed, missing_property, must_not_be_present, not_an_object, type_mismatch,
    unexpected_property, TempResult, ValidateError, ValidateResult,
};
use crate::value::Value;
use std::mem;

// Set a maximum number of resolver hops, to avoid infinite loops in the
// case of circular resolver chains.
const MAX_RESOLVER_HOPS: u32 = 50;

// Where the property under validation lives inside its container: a named
// field of a map, or an indexed element of an array.
enum Slot<'a> {
    Field(&'a str),
    Index(usize),
}

// Take the property's value out of the container, leaving the slot empty.
// A key holding the absence sentinel reads as missing.
fn take_slot(container: &mut Value, slot: &Slot) -> Option<Value> {
    match (container, slot) {
        (Value::Map(m), Slot::Field(name)) => match m.remove(*name) {
            Some(Value::Absent) | None => None,
            found => found,
        },
        (Value::Array(a), Slot::Index(i)) => {
            match mem::replace(&mut a[*i], Value::Absent) {
                Value::Absent => None,
                value => Some(value),
            }
        }
        _ => None,
    }
}

// Put a (possibly normalized) value back into its slot.
fn put_slot(container: &mut Value, slot: &Slot, value: Value) {
    match (container, slot) {
        (Value::Map(m), Slot::Field(name)) => {
            m.insert((*name).to_string(), value);
        }
        (Value::Array(a), Slot::Index(i)) => {
            a[*i] = value;
        }
        _ => {}
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

/// Apply a requirement tree to an object-like container, in place.
///
/// Declared keys are validated first (fail-fast), then keys holding the
/// absence sentinel are stripped, then any remaining undeclared key is an
/// error.  That ordering matters: a missing or invalid declared property is
/// always reported before an undeclared-property error for the same
/// container.
pub(crate) fn validate_object(container: &mut Value, tree: &Tree, path: &str) -> ValidateResult {
    match container {
        Value::Map(_) => (),
        _ => return Err(not_an_object(path)),
    }

    for (name, requirement) in tree {
        let child_path = join_path(path, name);
        validate_property(&child_path, Slot::Field(name.as_str()), container, requirement)?;
    }

    if let Value::Map(map) = container {
        map.retain(|_, value| !value.is_absent());
        for key in map.keys() {
            if !tree.contains_key(key) {
                return Err(unexpected_property(&join_path(path, key)));
            }
        }
    }
    Ok(())
}

// This is the main per-property dispatch function.
// It resolves indirection (optional wrappers, resolvers) against the
// container, then checks the value against the effective marker, writing
// the normalized value back into its slot on success.
fn validate_property(
    path: &str,
    slot: Slot,
    container: &mut Value,
    requirement: &Requirement,
) -> ValidateResult {
    // Unwrap optional decoration and resolver indirection first.  A
    // resolver sees the container as it currently stands (earlier
    // properties already normalized).  A requirement returned by a resolver
    // is re-dispatched from scratch, so the optional flag resets.
    let mut optional = false;
    let mut hops = 0u32;
    let mut req = requirement.clone();
    let req = loop {
        match req {
            Requirement::Optional(inner) => {
                optional = true;
                req = *inner;
            }
            Requirement::Resolve(resolver) => {
                hops += 1;
                if hops > MAX_RESOLVER_HOPS {
                    return Err(malformed(format!("{}: resolver hop limit hit", path)));
                }
                match resolver.resolve(container) {
                    Resolution::Valid => return Ok(()),
                    Resolution::Invalid(e) => return Err(e),
                    Resolution::Require(next) => {
                        optional = false;
                        req = next;
                    }
                }
            }
            effective => break effective,
        }
    };

    // The absence marker succeeds only when the slot holds nothing.
    if let Requirement::Absent = req {
        return match take_slot(container, &slot) {
            Some(_) => Err(must_not_be_present(path)),
            None => Ok(()),
        };
    }

    // Missing-value short-circuit.
    let value = match take_slot(container, &slot) {
        Some(value) => value,
        None => {
            return if optional {
                Ok(())
            } else {
                Err(missing_property(path))
            };
        }
    };

    let normalized = match req {
        Requirement::String { max } => check_string(path, value, max, optional)?,
        Requirement::Number(bounds) => check_number(path, value, bounds, false)?,
        Requirement::Integer(bounds) => check_number(path, value, bounds, true)?,
        Requirement::Pattern(pattern) => check_pattern(path, value, &pattern)?,
        Requirement::Array(element) => check_array(path, value, &element)?,
        Requirement::Nested(tree) => {
            let mut inner = value;
            validate_object(&mut inner, &tree, path)?;
            inner
        }
        Requirement::OneOf(options) => check_enum(path, value, &options)?,
        // Optional, Resolve and Absent were consumed above.
        other => {
            let kind: &'static str = (&other).into();
            return Err(malformed(format!("{}: unexpected {} requirement", path, kind)));
        }
    };
    put_slot(container, &slot, normalized);
    Ok(())
}

fn check_string(path: &str, value: Value, max: Option<usize>, optional: bool) -> TempResult<Value> {
    let s = match value {
        Value::Text(s) => s,
        _ => return Err(type_mismatch(path, "a string")),
    };
    if s.is_empty() && !optional {
        return Err(ValidateError::EmptyOrBlank(format!("{} is empty.", path)));
    }
    let trimmed = s.trim();
    if trimmed.is_empty() && !optional {
        return Err(ValidateError::EmptyOrBlank(format!(
            "{} is only whitespace.",
            path
        )));
    }
    if let Some(max) = max {
        // Byte length; multi-byte characters count more than once.
        if trimmed.len() > max {
            return Err(ValidateError::RangeViolation(format!(
                "{} is longer than {} characters.",
                path, max
            )));
        }
    }
    Ok(Value::Text(trimmed.to_string()))
}

fn check_number(path: &str, value: Value, bounds: Bounds, integer: bool) -> TempResult<Value> {
    let n = match &value {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => f.0,
        _ => return Err(type_mismatch(path, "a number")),
    };
    if n.is_nan() {
        return Err(ValidateError::TypeMismatch(format!("{} is NaN.", path)));
    }
    if !n.is_finite() {
        return Err(ValidateError::TypeMismatch(format!("{} is infinite.", path)));
    }
    // JSON has a single number type, so a float with no fractional part
    // counts as an integer.
    if integer && n.fract() != 0.0 {
        return Err(ValidateError::TypeMismatch(format!(
            "{} is not an integer.",
            path
        )));
    }
    if n < bounds.min {
        return Err(ValidateError::RangeViolation(format!(
            "{} is less than {}.",
            path, bounds.min
        )));
    }
    if n > bounds.max {
        return Err(ValidateError::RangeViolation(format!(
            "{} is greater than {}.",
            path, bounds.max
        )));
    }
    Ok(value)
}

fn check_pattern(path: &str, value: Value, pattern: &Pattern) -> TempResult<Value> {
    let matched = match &value {
        Value::Text(s) => pattern.re.is_match(s),
        _ => return Err(type_mismatch(path, "a string")),
    };
    if matched {
        Ok(value)
    } else {
        Err(ValidateError::PatternMismatch(format!(
            "\"{}\" is not a valid format for {}: /{}/",
            value,
            path,
            pattern.re.as_str()
        )))
    }
}

fn check_array(path: &str, value: Value, element: &Requirement) -> TempResult<Value> {
    let len = match &value {
        Value::Array(a) => a.len(),
        _ => return Err(type_mismatch(path, "an array")),
    };
    let mut sequence = value;
    for index in 0..len {
        // The element's enclosing container is the sequence itself, so a
        // resolver on the element requirement sees its sibling elements.
        let child_path = format!("{}[{}]", path, index);
        validate_property(&child_path, Slot::Index(index), &mut sequence, element)?;
    }
    Ok(sequence)
}

// Strict equality against a literal, except that numeric literals compare
// numerically across the integer/float representations (JSON has a single
// number type).
fn literal_matches(literal: &Literal, value: &Value) -> bool {
    match (literal, value) {
        (Literal::Bool(b), Value::Bool(v)) => b == v,
        (Literal::Int(i), Value::Integer(v)) => i == v,
        (Literal::Int(i), Value::Float(v)) => *i as f64 == v.0,
        (Literal::Float(f), Value::Float(v)) => *f == v.0,
        (Literal::Float(f), Value::Integer(v)) => *f == *v as f64,
        (Literal::Text(t), Value::Text(v)) => t == v,
        _ => false,
    }
}

fn check_enum(path: &str, value: Value, options: &[Literal]) -> TempResult<Value> {
    if options.iter().any(|lit| literal_matches(lit, &value)) {
        Ok(value)
    } else {
        Err(ValidateError::EnumMismatch(format!(
            "\"{}\" is not valid for {}",
            value, path
        )))
    }
}
