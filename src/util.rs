//! This module defines error and result types.
//!

use std::error;
use std::fmt;
use std::result::Result;

/// The error produced when validation fails or a schema is malformed.
///
/// Each variant carries a single human-readable message naming the offending
/// property path and the reason.  Validation is fail-fast: the first violated
/// constraint aborts the whole call, so there is never more than one message.
///
/// The variant is the programmatic handle; `Display` yields the bare message.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ValidateError {
    /// The input isn't an object, or a typed field holds the wrong kind of value.
    TypeMismatch(String),
    /// A required (non-optional) field is absent.
    MissingProperty(String),
    /// A present field has no corresponding declaration.
    UnexpectedProperty(String),
    /// A field declared absent-only carries a value.
    MustNotBePresent(String),
    /// A numeric value is out of bounds, or a string exceeds its max length.
    RangeViolation(String),
    /// A required string is empty or whitespace-only after trimming.
    EmptyOrBlank(String),
    /// A string fails its declared pattern.
    PatternMismatch(String),
    /// A value is not one of the declared literal members.
    EnumMismatch(String),
    /// A requirement the engine does not recognize (schema-authoring defect).
    MalformedSchema(String),
    /// A data value that can't be converted for validation.
    ValueError(String),
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ValidateError::*;
        match self {
            TypeMismatch(msg) | MissingProperty(msg) | UnexpectedProperty(msg)
            | MustNotBePresent(msg) | RangeViolation(msg) | EmptyOrBlank(msg)
            | PatternMismatch(msg) | EnumMismatch(msg) | MalformedSchema(msg)
            | ValueError(msg) => write!(f, "{}", msg),
        }
    }
}

// Standard boilerplate, required so other errors can wrap this one.
impl error::Error for ValidateError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// Shortcut for creating type mismatch errors.
pub(crate) fn type_mismatch(path: &str, expected: &str) -> ValidateError {
    ValidateError::TypeMismatch(format!("{} is not {}.", path, expected))
}

/// Shortcut for the "input isn't an object" error.
///
/// The top level has no path, so the message is just "Not an object".
pub(crate) fn not_an_object(path: &str) -> ValidateError {
    if path.is_empty() {
        ValidateError::TypeMismatch("Not an object".into())
    } else {
        type_mismatch(path, "an object")
    }
}

pub(crate) fn missing_property(path: &str) -> ValidateError {
    ValidateError::MissingProperty(format!("Missing property: {}", path))
}

pub(crate) fn unexpected_property(path: &str) -> ValidateError {
    ValidateError::UnexpectedProperty(format!("Contains extra property: {}", path))
}

pub(crate) fn must_not_be_present(path: &str) -> ValidateError {
    ValidateError::MustNotBePresent(format!("{} should not be present.", path))
}

pub(crate) fn malformed<M: Into<String>>(msg: M) -> ValidateError {
    ValidateError::MalformedSchema(msg.into())
}

/// A validation that doesn't return anything.
pub type ValidateResult = Result<(), ValidateError>;

// A Result that returns some temporary value.
pub(crate) type TempResult<T> = Result<T, ValidateError>;
