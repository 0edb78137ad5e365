//! The fixed JSON shapes external consumers (serializers, response
//! generators) rely on.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use outcome_rust_core::error::{AnyError, ConversionError, Error};
use outcome_rust_core::maybe::Maybe;
use outcome_rust_core::oneof::{OneOf2, OneOf3};
use outcome_rust_core::outcome::Outcome;
use outcome_rust_core::reason::Reason;
use outcome_rust_core::success::Success;
use serde_json::json;

#[test]
fn outcome_success_shape() {
    let outcome = Outcome::ok_with("v".to_owned(), [Success::new("s")]);
    let value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(
        value,
        json!({
            "isSuccess": true,
            "value": "v",
            "errors": [],
            "successes": [{"type": "Success", "message": "s", "tags": {}}],
        })
    );
}

#[test]
fn outcome_failure_shape() {
    let outcome: Outcome<String> =
        Outcome::fail(Error::new("nope").with_http_status(422).unwrap());
    let value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(
        value,
        json!({
            "isSuccess": false,
            "value": null,
            "errors": [{
                "type": "Error",
                "message": "nope",
                "tags": {"HttpStatusCode": 422},
            }],
            "successes": [],
        })
    );

    let back: Outcome<String> = serde_json::from_value(value).unwrap();
    assert_eq!(back, outcome);
}

#[test]
fn reason_shape_carries_the_concrete_type_name() {
    let conversion = AnyError::from(ConversionError::new("bad input"));
    let value = serde_json::to_value(&conversion).unwrap();

    assert_eq!(value["type"], json!("ConversionError"));
    assert_eq!(value["message"], json!("bad input"));
    assert_eq!(value["tags"]["ErrorType"], json!("Conversion"));
    assert_eq!(value["tags"]["Severity"], json!("Warning"));

    let back: AnyError = serde_json::from_value(value).unwrap();
    assert_eq!(back.kind(), "ConversionError");
}

#[test]
fn union_shape_is_zero_based_index_plus_value() {
    let value: OneOf2<String, i32> = OneOf2::Second(5);
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"index": 1, "value": 5})
    );

    let nested: OneOf3<i32, String, bool> = OneOf3::Second("mid".to_owned());
    let json = serde_json::to_value(&nested).unwrap();
    assert_eq!(json, json!({"index": 1, "value": "mid"}));
    let back: OneOf3<i32, String, bool> = serde_json::from_value(json).unwrap();
    assert_eq!(back, nested);
}

#[test]
fn maybe_shape_omits_absent_values() {
    assert_eq!(
        serde_json::to_value(Maybe::Some(7)).unwrap(),
        json!({"hasValue": true, "value": 7})
    );
    assert_eq!(
        serde_json::to_value(Maybe::<i32>::None).unwrap(),
        json!({"hasValue": false})
    );
}

#[test]
fn outcomes_nest_inside_outcomes_of_collections() {
    let combined = Outcome::combine(vec![Outcome::ok(1), Outcome::ok(2)]);
    let value = serde_json::to_value(&combined).unwrap();
    assert_eq!(value["value"], json!([1, 2]));

    let back: Outcome<Vec<i32>> = serde_json::from_value(value).unwrap();
    assert_eq!(back, combined);
}

#[test]
fn tags_survive_the_round_trip_independent_of_order() {
    let error = Error::new("m")
        .with_tags(vec![("b", json!(2)), ("a", json!(1))])
        .unwrap();
    let any = AnyError::from(error.clone());

    let back: AnyError = serde_json::from_value(serde_json::to_value(&any).unwrap()).unwrap();
    assert_eq!(back.tags(), error.tags());
}
