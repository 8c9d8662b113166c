//! This module defines the requirement model: the vocabulary of schema
//! nodes that describe what each property of a container must satisfy.
//!
//! A schema is a [`Tree`]: a map from property name to [`Requirement`].
//! Requirements form a closed tagged enum, so dispatch in the validation
//! engine never relies on function identity or other sentinel tricks.
//!
//! This module is pure data plus constructors; the behavior lives in the
//! validation engine.

use crate::util::{malformed, ValidateError};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use strum_macros::IntoStaticStr;

/// A requirement tree: one [`Requirement`] per declared property name.
///
/// Key order is irrelevant for correctness.  A `Tree` built for one schema
/// may be reused verbatim as a nested-object requirement or an array-element
/// requirement inside a larger schema.
pub type Tree = BTreeMap<String, Requirement>;

/// A literal value usable as an enumeration member, e.g. `7`, `1.3`, or `"red"`.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Literal {
    Bool(bool),
    Int(i128),
    Float(f64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(fl) => write!(f, "{}", fl),
            Literal::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Literal {
        Literal::Bool(b)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Literal {
        Literal::Int(i.into())
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Literal {
        Literal::Int(i.into())
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Literal {
        Literal::Float(f)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Literal {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Literal {
        Literal::Text(s)
    }
}

/// Inclusive numeric bounds for the number and integer kinds.
///
/// A bare numeric requirement is unconstrained.  With a single `max`
/// parameter the range is `[0, max]`; with both parameters it is
/// `[min, max]`, inclusive on both ends.
#[derive(Debug, Copy, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// No constraint in either direction.
    pub const UNBOUNDED: Bounds = Bounds {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// The single-parameter form: `[0, max]`.
    pub fn at_most(max: f64) -> Bounds {
        Bounds { min: 0.0, max }
    }

    /// The two-parameter form: `[min, max]`.
    pub fn between(min: f64, max: f64) -> Bounds {
        Bounds { min, max }
    }
}

/// A compiled regular-expression pattern.
///
/// Matching is a substring match: a pattern without `^...$` anchors passes
/// if any part of the candidate string matches.  This is deliberate; schema
/// authors anchor explicitly when they want a whole-string match.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub(crate) re: regex::Regex,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        // We only need to compare the string form,
        // not the compiled form.
        self.re.as_str() == other.re.as_str()
    }
}

/// The verdict a [`Resolver`] returns for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The property is valid as-is; nothing further to check.
    Valid,
    /// The property is invalid; this error propagates directly.
    Invalid(ValidateError),
    /// Validate the property against this requirement instead.
    Require(Requirement),
}

/// A dynamic requirement: a pure function of the enclosing container.
///
/// This is how the effective type of a property can depend on sibling
/// values ("field B's shape depends on field A's value").  The function
/// receives a snapshot of the container currently being validated and
/// returns a [`Resolution`].
#[derive(Clone)]
pub struct Resolver {
    f: Arc<dyn Fn(&Value) -> Resolution + Send + Sync>,
}

impl Resolver {
    /// Wrap a resolution function.
    pub fn new<F>(f: F) -> Resolver
    where
        F: Fn(&Value) -> Resolution + Send + Sync + 'static,
    {
        Resolver { f: Arc::new(f) }
    }

    pub(crate) fn resolve(&self, container: &Value) -> Resolution {
        (self.f)(container)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolver")
    }
}

// Two resolvers are equal only if they are clones of the same function.
impl PartialEq for Resolver {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.f) as *const () == Arc::as_ptr(&other.f) as *const ()
    }
}

/// A requirement node: what one property must satisfy.
///
/// The variant is the marker (the discriminator selecting which validation
/// rule applies); the payload carries that marker's parameters.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Requirement {
    /// A text string, optionally limited to `max` length (in bytes).
    String {
        /// Maximum length; `None` means unlimited.
        max: Option<usize>,
    },
    /// A finite number within the given bounds.
    Number(Bounds),
    /// A finite number with no fractional part, within the given bounds.
    Integer(Bounds),
    /// An ordered sequence; every element must satisfy the inner requirement.
    Array(Box<Requirement>),
    /// A string matching a regular expression.
    Pattern(Pattern),
    /// A nested object validated against its own requirement tree.
    Nested(Tree),
    /// An enumeration: the value must strictly equal one listed literal.
    OneOf(Vec<Literal>),
    /// A data-dependent requirement, resolved against the container.
    Resolve(Resolver),
    /// The property must not be present (or must hold no value).
    Absent,
    /// Missing is acceptable; if present, the inner requirement applies.
    Optional(Box<Requirement>),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Pattern(p) => write!(f, "/{}/", p.re.as_str()),
            _ => {
                let variant: &str = self.into();
                write!(f, "{}", variant)
            }
        }
    }
}

/// A shortcut for an unlimited string requirement.
pub fn string() -> Requirement {
    Requirement::String { max: None }
}

/// A shortcut for a string requirement with a maximum length.
///
/// Length is measured in bytes, the native length unit of Rust strings.
/// Multi-byte characters count as more than one unit toward the maximum.
pub fn string_max(max: usize) -> Requirement {
    Requirement::String { max: Some(max) }
}

/// A shortcut for an unconstrained number requirement.
pub fn number() -> Requirement {
    Requirement::Number(Bounds::UNBOUNDED)
}

/// A shortcut for a number in `[0, max]`.
pub fn number_max(max: f64) -> Requirement {
    Requirement::Number(Bounds::at_most(max))
}

/// A shortcut for a number in `[min, max]`, inclusive on both ends.
pub fn number_range(min: f64, max: f64) -> Requirement {
    Requirement::Number(Bounds::between(min, max))
}

/// A shortcut for an unconstrained integer requirement.
pub fn integer() -> Requirement {
    Requirement::Integer(Bounds::UNBOUNDED)
}

/// A shortcut for an integer in `[0, max]`.
pub fn integer_max(max: f64) -> Requirement {
    Requirement::Integer(Bounds::at_most(max))
}

/// A shortcut for an integer in `[min, max]`, inclusive on both ends.
pub fn integer_range(min: f64, max: f64) -> Requirement {
    Requirement::Integer(Bounds::between(min, max))
}

/// A shortcut for an array whose every element satisfies `element`.
pub fn array(element: Requirement) -> Requirement {
    Requirement::Array(Box::new(element))
}

/// Compile a regular-expression requirement.
///
/// Matching is unanchored: the pattern passes if any substring of the
/// candidate matches.  A bad pattern is a schema-authoring error.
pub fn pattern(re: &str) -> Result<Requirement, ValidateError> {
    let re = regex::Regex::new(re)
        .map_err(|e| malformed(format!("bad pattern /{}/: {}", re, e)))?;
    Ok(Requirement::Pattern(Pattern { re }))
}

/// A shortcut for a nested-object requirement.
pub fn nested(tree: Tree) -> Requirement {
    Requirement::Nested(tree)
}

/// A shortcut for an enumeration requirement.
pub fn one_of<T: Into<Literal>>(options: Vec<T>) -> Requirement {
    Requirement::OneOf(options.into_iter().map(Into::into).collect())
}

/// A shortcut for a dynamic requirement.
pub fn resolver<F>(f: F) -> Requirement
where
    F: Fn(&Value) -> Resolution + Send + Sync + 'static,
{
    Requirement::Resolve(Resolver::new(f))
}

/// A shortcut for the absence marker.
pub fn absent() -> Requirement {
    Requirement::Absent
}

/// Wrap a requirement so that a missing value is acceptable.
pub fn optional(req: Requirement) -> Requirement {
    Requirement::Optional(Box::new(req))
}

/// Build a requirement tree from name/requirement pairs.
pub fn tree(entries: Vec<(&str, Requirement)>) -> Tree {
    entries
        .into_iter()
        .map(|(name, req)| (name.to_string(), req))
        .collect()
}
