//! `normalize-json` is a library for validating loosely-typed structured
//! data against a declarative schema that describes the expected shape of
//! the data.
//!
//! A schema is a requirement tree: a map from property name to a
//! requirement describing what that property must satisfy (a typed value
//! with parameters, an enumeration of literals, a nested schema, or a
//! dynamic requirement computed from sibling values).  Compiling a tree
//! yields a reusable validator; applying the validator to a candidate value
//! either returns a deep, *normalized* copy (strings trimmed, absent fields
//! stripped) or fails with one descriptive error naming the first violated
//! constraint.  The caller's input is never mutated.
//!
//! # Implementation Details
//!
//! - Requirements are an explicit closed enum ([`schema::Requirement`]);
//!   dispatch never relies on sentinel values or function identity.
//!
//! - Validation is performed over a generic [`value::Value`] tree, so the
//!   engine is agnostic to the serialization format.  JSON support is
//!   provided behind the default `serde_json` feature.
//!
//! - Validation works on a structurally independent clone of the input.
//!   The clone is deliberately lossy: entries holding the absence sentinel
//!   are dropped up front, matching the normalizer's own stripping policy.
//!
//! - Validation is fail-fast: the first violated constraint aborts the call
//!   with a single [`ValidateError`] naming the offending property path.
//!
//! # Examples
//!
//! This example validates and normalizes JSON-encoded data:
//!
//! ```
//! # #[cfg(feature = "serde_json")] {
//! use normalize_json::schema::{number_range, one_of, string_max, tree};
//! use normalize_json::{compile, validate_json_str};
//!
//! let validator = compile(tree(vec![
//!     ("name", string_max(30)),
//!     ("age", number_range(0.0, 100.0)),
//!     ("color", one_of(vec!["red", "yellow", "blue"])),
//! ]));
//!
//! let json = r#"{ "name": " Nigel   ", "age": 23, "color": "blue" }"#;
//! let normalized = validate_json_str(&validator, json).unwrap();
//! assert_eq!(normalized["name"], "Nigel");
//! # }
//! ```
//!
//! If the data doesn't satisfy the schema, an error results:
//!
//! ```
//! # #[cfg(feature = "serde_json")] {
//! use normalize_json::schema::{string, tree};
//! use normalize_json::{compile, validate_json_str};
//!
//! let validator = compile(tree(vec![("name", string())]));
//! let err = validate_json_str(&validator, r#"{ "name": 23 }"#).unwrap_err();
//! assert_eq!(err.to_string(), "name is not a string.");
//! # }
//! ```
//!
//! Supported requirement kinds:
//! - Strings, with optional maximum length and leading/trailing whitespace
//!   trimming
//! - Numbers and integers, with optional inclusive bounds
//! - Regular-expression patterns (unanchored substring match)
//! - Arrays with a per-element requirement
//! - Nested object schemas, composable from other compiled schemas
//! - Enumerations of literal primitives
//! - Dynamic (data-dependent) requirements via resolvers
//! - Absence markers and optional decoration

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::cast_possible_truncation)]

pub mod compile;
pub mod matcher;
pub mod schema;
pub mod util;
#[doc(inline)]
pub use util::{ValidateError, ValidateResult};
pub(crate) mod validate;
pub mod value;

#[doc(inline)]
pub use compile::{compile, Validator};

#[cfg(feature = "serde_json")]
pub mod json;
#[cfg(feature = "serde_json")]
#[doc(inline)]
pub use json::{validate_json, validate_json_str};
