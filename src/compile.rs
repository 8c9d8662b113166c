//! This module defines the schema compiler, the public entry point.
//!
//! [`compile`] binds a requirement tree into a reusable [`Validator`].  The
//! tree is immutable after compilation and a single `Validator` may be used
//! for unboundedly many validation calls; each call clones its own working
//! copy, so concurrent use is safe.

use crate::schema::Tree;
use crate::util::ValidateError;
use crate::validate::validate_object;
use crate::value::Value;

/// Compile a requirement tree into a reusable validator.
pub fn compile(tree: Tree) -> Validator {
    Validator { tree }
}

/// A compiled schema.
///
/// Created by [`compile`].  Exposes the original requirement tree so it can
/// be composed into larger schemas (as a nested-object requirement or an
/// array-element requirement).
#[derive(Debug, Clone, PartialEq)]
pub struct Validator {
    tree: Tree,
}

impl Validator {
    /// The original requirement tree, unchanged, for reuse as a sub-schema.
    pub fn requirements(&self) -> &Tree {
        &self.tree
    }

    /// Consume the validator and return its requirement tree.
    pub fn into_requirements(self) -> Tree {
        self.tree
    }

    /// Validate `input` and return a normalized deep copy.
    ///
    /// The input is never mutated.  Validation starts from a lossy
    /// structural clone (absent-valued entries dropped; see
    /// [`Value::lossy_clone`]), then the normalizer trims strings and
    /// enforces the schema, failing on the first violated constraint.
    pub fn validate(&self, input: &Value) -> Result<Value, ValidateError> {
        let mut working = input.lossy_clone();
        validate_object(&mut working, &self.tree, "")?;
        Ok(working)
    }
}
