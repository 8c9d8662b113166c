//! This module adapts the validator's error contract into a boolean
//! pass/fail result plus message, for use inside test-framework matchers.
//!
//! The message polarity follows matcher convention: on a pass, the message
//! is the one a *negated* expectation would report.

use crate::compile::{compile, Validator};
use crate::schema::Tree;
use crate::value::Value;

/// The outcome of fitting one value against a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFit {
    /// Whether the value validated successfully.
    pub pass: bool,
    /// The matcher message for whichever expectation did not hold.
    pub message: String,
}

/// Fit a value against a compiled validator.
pub fn fit_schema(validator: &Validator, value: &Value) -> SchemaFit {
    match validator.validate(value) {
        Ok(_) => SchemaFit {
            pass: true,
            message: format!("Expected {:?} to fail the schema", value),
        },
        Err(e) => SchemaFit {
            pass: false,
            message: format!("Expected {:?} to pass: \"{}\"", value, e),
        },
    }
}

/// Compile a raw requirement tree, then fit a value against it.
pub fn fit_tree(tree: &Tree, value: &Value) -> SchemaFit {
    fit_schema(&compile(tree.clone()), value)
}
