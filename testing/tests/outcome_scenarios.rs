//! End-to-end scenarios for the outcome railway.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use outcome_rust_core::error::{AnyError, Error, ExceptionError};
use outcome_rust_core::outcome::Outcome;
use outcome_rust_core::reason::{Reason, ReasonError};
use outcome_rust_core::success::Success;
use outcome_rust_testing::{assert_outcome, error_messages, success_messages};
use serde_json::json;

fn parse_quantity(input: &str) -> Outcome<u32> {
    Outcome::try_fn(|| input.trim().parse::<u32>())
        .ensure(|n| *n > 0, Error::new("quantity must be positive"))
}

#[test]
fn validation_pipeline_accepts_good_input() {
    let outcome = parse_quantity(" 12 ").map(|n| n * 10);
    assert_outcome(outcome).is_success().has_value(&120);
}

#[test]
fn validation_pipeline_rejects_short_input() {
    let outcome = Outcome::ok("ab".to_owned()).ensure(|s| s.len() >= 3, Error::new("too short"));
    assert_outcome(outcome)
        .is_failed()
        .has_error_messages(&["too short"]);
}

#[test]
fn parse_failure_is_captured_not_thrown() {
    let outcome = parse_quantity("not a number");
    assert_outcome(outcome)
        .is_failed()
        .has_error_matching(|e| e.kind() == "ExceptionError");
}

#[test]
fn chain_short_circuits_without_running_later_stages() {
    let outcome = Outcome::<u32>::fail_message("upstream down")
        .bind(|_| unreachable!("bind must not run after a failure"))
        .map(|n: u32| n + 1);

    assert_outcome(outcome)
        .is_failed()
        .has_error_messages(&["upstream down"]);
}

#[test]
fn combine_keeps_only_errors_on_failure() {
    let combined = Outcome::combine(vec![
        Outcome::ok_with(1, [Success::new("s")]),
        Outcome::fail_message("e"),
    ]);

    assert_eq!(error_messages(&combined), ["e"]);
    assert!(success_messages(&combined).is_empty());
}

#[test]
fn merge_keeps_every_reason_on_failure() {
    let merged = Outcome::merge(vec![
        Outcome::ok_with(1, [Success::new("s")]),
        Outcome::fail_message("e"),
    ]);

    assert_eq!(error_messages(&merged), ["e"]);
    assert_eq!(success_messages(&merged), ["s"]);
}

#[test]
fn reasons_are_immutable_under_fluent_mutation() {
    let base = Error::new("m");
    let tagged = base.with_tag("k", json!("v")).unwrap();

    assert!(base.tags().is_empty());
    assert_eq!(tagged.tags().get("k"), Some(&json!("v")));
}

#[test]
fn tag_collisions_fail_atomically() {
    // A batch with an internal duplicate applies nothing.
    let error = Error::new("m");
    let result = error.with_tags(vec![("k", json!("1")), ("k", json!("2"))]);
    assert_eq!(
        result.unwrap_err(),
        ReasonError::DuplicateTagKey { key: "k".into() }
    );
    assert!(error.tags().is_empty());

    // A second write to an existing key also fails.
    let tagged = error.with_tag("k", json!("1")).unwrap();
    assert!(tagged.with_tag("k", json!("1")).is_err());
}

#[test]
fn wrapped_fault_survives_every_fluent_call() {
    let wrapped = ExceptionError::from_error(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "peer vanished",
    ));

    let cloned = wrapped
        .with_message("renamed")
        .unwrap()
        .with_tag("k", json!(1))
        .unwrap();

    // The foreign fault is state beyond message and tags; it has to
    // reappear on every rebuilt instance.
    assert_eq!(cloned.fault().unwrap().to_string(), "peer vanished");
}

#[test]
fn maybe_bridges_into_the_railway() {
    use outcome_rust_core::maybe::Maybe;

    let lookup = |id: u32| -> Maybe<&'static str> {
        if id == 1 {
            Maybe::Some("ada")
        } else {
            Maybe::None
        }
    };

    let found = lookup(1).ok_or_else(|| Error::new("user not found"));
    assert_outcome(found).is_success().has_value(&"ada");

    let missing = lookup(9).ok_or_else(|| Error::new("user not found"));
    assert_outcome(missing)
        .is_failed()
        .has_error_messages(&["user not found"]);
}

#[test]
fn http_status_tag_flows_to_consumers() {
    let outcome: Outcome<()> =
        Outcome::fail(Error::new("missing").with_http_status(404).unwrap());

    let status = outcome.errors()[0]
        .tags()
        .get("HttpStatusCode")
        .and_then(serde_json::Value::as_u64);
    assert_eq!(status, Some(404));
}

#[test]
fn exhaustive_match_consumes_the_outcome() {
    let verdict = Outcome::ok(21).match_with(
        |n| format!("value {n}"),
        |errors: Vec<AnyError>| format!("{} errors", errors.len()),
    );
    assert_eq!(verdict, "value 21");
}
