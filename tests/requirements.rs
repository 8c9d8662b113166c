#![cfg(feature = "serde_json")]

use normalize_json::matcher::{fit_schema, fit_tree};
use normalize_json::schema::{
    absent, array, integer, nested, number_max, number_range, one_of, optional, pattern, resolver,
    string, string_max, tree, Resolution, Tree,
};
use normalize_json::value::{Value, ValueMap};
use normalize_json::{compile, ValidateError};
use serde::Serialize;
use serde_json::json;
use std::convert::TryFrom;

// Create a Value instance from anything that's serializable
fn gen_value<T: Serialize>(t: T) -> Value {
    Value::try_from(serde_json::to_value(t).unwrap()).unwrap()
}

// Build an object-like Value by hand, so tests can place the absence
// sentinel (which has no JSON spelling).
fn map_of(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<ValueMap>(),
    )
}

trait TestValidate {
    fn test_validate(&self, tree: &Tree) -> Result<Value, ValidateError>;
}

impl TestValidate for Value {
    // Compile a fresh validator and run one validation
    fn test_validate(&self, tree: &Tree) -> Result<Value, ValidateError> {
        compile(tree.clone()).validate(self)
    }
}

#[test]
fn validate_not_an_object() {
    let schema = tree(vec![("name", string())]);
    let err = gen_value(7).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "Not an object");
    gen_value("abc").test_validate(&schema).unwrap_err();
    gen_value(vec![1, 2]).test_validate(&schema).unwrap_err();
}

#[test]
fn validate_string_trim() {
    let schema = tree(vec![("name", string())]);
    let normalized = gen_value(json!({"name": " Nigel   "}))
        .test_validate(&schema)
        .unwrap();
    assert_eq!(normalized, gen_value(json!({"name": "Nigel"})));

    let err = gen_value(json!({"name": 23})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "name is not a string.");

    let err = gen_value(json!({})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "Missing property: name");
}

#[test]
fn validate_string_blank() {
    let schema = tree(vec![("name", string())]);
    let err = gen_value(json!({"name": ""})).test_validate(&schema).unwrap_err();
    assert!(matches!(err, ValidateError::EmptyOrBlank(_)));
    assert_eq!(err.to_string(), "name is empty.");

    let err = gen_value(json!({"name": "   "})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "name is only whitespace.");

    // Optional strings tolerate empty and blank values; blank normalizes
    // to empty.
    let schema = tree(vec![("name", optional(string()))]);
    gen_value(json!({"name": ""})).test_validate(&schema).unwrap();
    let normalized = gen_value(json!({"name": "   "}))
        .test_validate(&schema)
        .unwrap();
    assert_eq!(normalized, gen_value(json!({"name": ""})));
    gen_value(json!({})).test_validate(&schema).unwrap();
}

#[test]
fn validate_string_max_length() {
    let schema = tree(vec![("name", string_max(5))]);
    gen_value(json!({"name": "Nigel"})).test_validate(&schema).unwrap();
    let err = gen_value(json!({"name": "Nigella"}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "name is longer than 5 characters.");

    // Length is checked after trimming.
    gen_value(json!({"name": "  Nigel  "})).test_validate(&schema).unwrap();
}

#[test]
fn validate_number_bounds() {
    let schema = tree(vec![("n", number_range(-12.0, -3.0))]);
    gen_value(json!({"n": -12})).test_validate(&schema).unwrap();
    gen_value(json!({"n": -3})).test_validate(&schema).unwrap();
    gen_value(json!({"n": -12.0001})).test_validate(&schema).unwrap_err();
    let err = gen_value(json!({"n": -2.9999})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "n is greater than -3.");

    // The single-parameter form means [0, max].
    let schema = tree(vec![("n", number_max(10.0))]);
    gen_value(json!({"n": 0})).test_validate(&schema).unwrap();
    gen_value(json!({"n": 10})).test_validate(&schema).unwrap();
    gen_value(json!({"n": -0.5})).test_validate(&schema).unwrap_err();
    gen_value(json!({"n": 10.5})).test_validate(&schema).unwrap_err();

    let err = gen_value(json!({"n": "ten"})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "n is not a number.");
}

#[test]
fn validate_integer() {
    let schema = tree(vec![("n", integer())]);
    gen_value(json!({"n": -1})).test_validate(&schema).unwrap();
    // A float with no fractional part counts as an integer.
    gen_value(json!({"n": 2.0})).test_validate(&schema).unwrap();
    let err = gen_value(json!({"n": 0.1})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "n is not an integer.");
}

#[test]
fn validate_number_non_finite() {
    // NaN and infinities have no JSON spelling; build the values by hand.
    let schema = tree(vec![("n", integer())]);
    let err = map_of(vec![("n", Value::from_float(f64::NAN))])
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "n is NaN.");

    let err = map_of(vec![("n", Value::from_float(f64::INFINITY))])
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "n is infinite.");

    let schema = tree(vec![("n", number_max(10.0))]);
    map_of(vec![("n", Value::from_float(f64::NEG_INFINITY))])
        .test_validate(&schema)
        .unwrap_err();
}

#[test]
fn validate_pattern() {
    let schema = tree(vec![("zip", pattern(r"^\d{5}$").unwrap())]);
    gen_value(json!({"zip": "02134"})).test_validate(&schema).unwrap();
    let err = gen_value(json!({"zip": "0213"})).test_validate(&schema).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"0213\" is not a valid format for zip: /^\\d{5}$/"
    );
    gen_value(json!({"zip": 2134})).test_validate(&schema).unwrap_err();

    // An unanchored pattern is a substring match.
    let schema = tree(vec![("word", pattern("bc").unwrap())]);
    gen_value(json!({"word": "abcd"})).test_validate(&schema).unwrap();
    gen_value(json!({"word": "acbd"})).test_validate(&schema).unwrap_err();
}

#[test]
fn bad_pattern_is_schema_error() {
    let err = pattern("(").unwrap_err();
    assert!(matches!(err, ValidateError::MalformedSchema(_)));
}

#[test]
fn validate_array() {
    let schema = tree(vec![("words", array(string_max(10)))]);
    gen_value(json!({"words": []})).test_validate(&schema).unwrap();
    gen_value(json!({"words": ["hi"]})).test_validate(&schema).unwrap();

    let err = gen_value(json!({"words": ["hi", 7]}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "words[1] is not a string.");

    let err = gen_value(json!({"words": ["unquestionably"]}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "words[0] is longer than 10 characters.");

    let err = gen_value(json!({"words": "hi"})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "words is not an array.");

    // Elements are normalized in place too.
    let normalized = gen_value(json!({"words": [" hi "]}))
        .test_validate(&schema)
        .unwrap();
    assert_eq!(normalized, gen_value(json!({"words": ["hi"]})));
}

#[test]
fn validate_nested() {
    let schema = tree(vec![(
        "name",
        nested(tree(vec![
            ("first", string_max(30)),
            ("last", string_max(30)),
        ])),
    )]);
    gen_value(json!({"name": {"first": "John", "last": "Cleese"}}))
        .test_validate(&schema)
        .unwrap();

    let err = gen_value(json!({"name": {"first": "John"}}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing property: name.last");

    let err = gen_value(json!({"name": "John Cleese"}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "name is not an object.");

    // An absent-valued unknown sibling inside the nested object is
    // stripped without erroring.
    let inner = map_of(vec![
        ("first", Value::Text("John".to_string())),
        ("last", Value::Text("Cleese".to_string())),
        ("title", Value::Absent),
    ]);
    let normalized = map_of(vec![("name", inner)]).test_validate(&schema).unwrap();
    assert_eq!(
        normalized,
        gen_value(json!({"name": {"first": "John", "last": "Cleese"}}))
    );
}

#[test]
fn validate_extra_properties() {
    let schema = tree(vec![("good", string())]);
    let err = gen_value(json!({"good": "x", "extra": "y"}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "Contains extra property: extra");

    // An undeclared key holding the absence sentinel is stripped, not
    // rejected.
    let candidate = map_of(vec![
        ("good", Value::Text("x".to_string())),
        ("extra", Value::Absent),
    ]);
    let normalized = candidate.test_validate(&schema).unwrap();
    assert_eq!(normalized, gen_value(json!({"good": "x"})));
}

#[test]
fn declared_errors_win_over_extra_properties() {
    // A missing declared property is reported before any undeclared one.
    let schema = tree(vec![("good", string())]);
    let err = gen_value(json!({"extra": "y"})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "Missing property: good");
}

#[test]
fn validate_absent_marker() {
    let schema = tree(vec![("ghost", absent()), ("name", string())]);
    gen_value(json!({"name": "Bob"})).test_validate(&schema).unwrap();

    let err = gen_value(json!({"name": "Bob", "ghost": 1}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "ghost should not be present.");

    // Present-with-no-value is the same as absent.
    let candidate = map_of(vec![
        ("name", Value::Text("Bob".to_string())),
        ("ghost", Value::Absent),
    ]);
    let normalized = candidate.test_validate(&schema).unwrap();
    assert_eq!(normalized, gen_value(json!({"name": "Bob"})));
}

#[test]
fn validate_enum() {
    let schema = tree(vec![("color", one_of(vec!["red", "yellow", "blue"]))]);
    gen_value(json!({"color": "blue"})).test_validate(&schema).unwrap();

    let err = gen_value(json!({"color": "green"}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "\"green\" is not valid for color");

    // Equality is strict; null is a value, not a match.
    let err = gen_value(json!({"color": null})).test_validate(&schema).unwrap_err();
    assert!(matches!(err, ValidateError::EnumMismatch(_)));
}

#[test]
fn validate_enum_numeric() {
    let schema = tree(vec![("n", one_of(vec![1, 2, 3]))]);
    gen_value(json!({"n": 2})).test_validate(&schema).unwrap();
    // One number type: an integral float equals the integer literal.
    gen_value(json!({"n": 2.0})).test_validate(&schema).unwrap();
    gen_value(json!({"n": 2.5})).test_validate(&schema).unwrap_err();
    gen_value(json!({"n": "2"})).test_validate(&schema).unwrap_err();
}

#[test]
fn validate_resolver_conditional() {
    // "badge" is required for admins and forbidden otherwise.
    let schema = tree(vec![
        ("kind", one_of(vec!["admin", "guest"])),
        (
            "badge",
            resolver(|obj| match obj.get("kind") {
                Some(Value::Text(kind)) if kind == "admin" => Resolution::Require(string()),
                _ => Resolution::Require(absent()),
            }),
        ),
    ]);

    gen_value(json!({"kind": "admin", "badge": "blue"}))
        .test_validate(&schema)
        .unwrap();
    gen_value(json!({"kind": "guest"})).test_validate(&schema).unwrap();

    let err = gen_value(json!({"kind": "admin"})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "Missing property: badge");

    let err = gen_value(json!({"kind": "guest", "badge": "blue"}))
        .test_validate(&schema)
        .unwrap_err();
    assert_eq!(err.to_string(), "badge should not be present.");
}

#[test]
fn validate_resolver_verdicts() {
    let schema = tree(vec![("anything", resolver(|_| Resolution::Valid))]);
    gen_value(json!({"anything": 1})).test_validate(&schema).unwrap();
    gen_value(json!({})).test_validate(&schema).unwrap();

    let schema = tree(vec![(
        "nothing",
        resolver(|_| {
            Resolution::Invalid(ValidateError::MustNotBePresent(
                "nothing is never acceptable.".to_string(),
            ))
        }),
    )]);
    let err = gen_value(json!({})).test_validate(&schema).unwrap_err();
    assert_eq!(err.to_string(), "nothing is never acceptable.");
}

#[test]
fn validate_composed_schema() {
    // A sub-schema's exposed tree validates identically standalone or
    // embedded in an outer schema.
    let inner = compile(tree(vec![
        ("first", string_max(30)),
        ("last", string_max(30)),
    ]));
    let outer = compile(tree(vec![
        ("name", nested(inner.requirements().clone())),
        ("aliases", array(nested(inner.requirements().clone()))),
    ]));

    let name = json!({"first": " John ", "last": "Cleese"});
    let standalone = inner.validate(&gen_value(&name)).unwrap();
    let composed = outer
        .validate(&gen_value(json!({"name": name, "aliases": [name]})))
        .unwrap();
    assert_eq!(composed.get("name"), Some(&standalone));

    // A failure inside the embedded copy matches the standalone failure
    // kind.
    let bad = json!({"first": "John"});
    inner.validate(&gen_value(&bad)).unwrap_err();
    outer
        .validate(&gen_value(json!({"name": bad, "aliases": []})))
        .unwrap_err();
}

#[test]
fn normalization_is_idempotent() {
    let validator = compile(tree(vec![
        ("name", string_max(30)),
        ("age", optional(integer())),
        ("words", array(string())),
    ]));
    let candidate = gen_value(json!({
        "name": "  Nigel ",
        "age": 23,
        "words": [" hi ", "there"],
    }));
    let once = validator.validate(&candidate).unwrap();
    let twice = validator.validate(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn input_is_never_mutated() {
    let validator = compile(tree(vec![("name", string())]));
    let candidate = map_of(vec![
        ("name", Value::Text(" Nigel ".to_string())),
        ("junk", Value::Absent),
    ]);
    let snapshot = candidate.clone();
    let normalized = validator.validate(&candidate).unwrap();

    assert_eq!(candidate, snapshot);
    assert_ne!(normalized, candidate);
    assert_eq!(normalized, gen_value(json!({"name": "Nigel"})));
}

#[test]
fn matcher_adapter() {
    let validator = compile(tree(vec![("name", string())]));

    let fit = fit_schema(&validator, &gen_value(json!({"name": "Bob"})));
    assert!(fit.pass);
    assert!(fit.message.contains("to fail the schema"));

    let fit = fit_schema(&validator, &gen_value(json!({"name": 7})));
    assert!(!fit.pass);
    assert!(fit.message.contains("name is not a string."));

    let fit = fit_tree(validator.requirements(), &gen_value(json!({"name": "Bob"})));
    assert!(fit.pass);
}
