//! Concurrent aggregation of independent outcome-producing tasks.
//!
//! Every task is spawned before any is awaited, and every task is awaited
//! to completion: one failed or aborted task never abandons the others.
//! If all tasks succeed the values come back in input order (a tuple for
//! the fixed arities, a `Vec` for the homogeneous form). If any task
//! fails, the errors of **all** failed tasks are aggregated in input
//! order. A panicked task contributes an
//! [`ExceptionError`](crate::error::ExceptionError); an aborted task
//! contributes the cancellation error, never an unwound panic.
//!
//! # Example
//!
//! ```
//! use outcome_rust_core::outcome::Outcome;
//! use outcome_rust_core::when_all::when_all2;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let combined = when_all2(
//!     async { Outcome::ok(1) },
//!     async { Outcome::ok("two") },
//! )
//! .await;
//!
//! assert_eq!(combined.into_value(), Some((1, "two")));
//! # }
//! ```

use crate::error::{AnyError, ExceptionError};
use crate::outcome::Outcome;
use crate::success::Success;
use futures::future::join_all;
use std::future::Future;
use tokio::task::{JoinError, JoinHandle};

/// Await a spawned task, converting a panic or abort into a failed
/// outcome.
async fn settle<T>(handle: JoinHandle<Outcome<T>>) -> Outcome<T> {
    match handle.await {
        Ok(outcome) => outcome,
        Err(join_error) => Outcome::fail(join_failure(join_error)),
    }
}

fn join_failure(join_error: JoinError) -> AnyError {
    if join_error.is_cancelled() {
        AnyError::from(ExceptionError::cancelled())
    } else {
        AnyError::from(ExceptionError::from_error(join_error))
    }
}

fn collect_reasons<T>(
    outcome: Outcome<T>,
    values: &mut Vec<T>,
    successes: &mut Vec<Success>,
    errors: &mut Vec<AnyError>,
) {
    successes.extend(outcome.successes().to_vec());
    errors.extend(outcome.errors().to_vec());
    if let Some(value) = outcome.into_value() {
        values.push(value);
    }
}

/// Run two heterogeneous tasks concurrently and aggregate their outcomes.
pub async fn when_all2<T1, T2>(
    first: impl Future<Output = Outcome<T1>> + Send + 'static,
    second: impl Future<Output = Outcome<T2>> + Send + 'static,
) -> Outcome<(T1, T2)>
where
    T1: Send + 'static,
    T2: Send + 'static,
{
    let first = tokio::spawn(first);
    let second = tokio::spawn(second);

    let first = settle(first).await;
    let second = settle(second).await;

    let mut successes = Vec::new();
    let mut errors: Vec<AnyError> = Vec::new();
    successes.extend(first.successes().to_vec());
    successes.extend(second.successes().to_vec());
    errors.extend(first.errors().to_vec());
    errors.extend(second.errors().to_vec());

    match (first.into_value(), second.into_value()) {
        (Some(v1), Some(v2)) if errors.is_empty() => Outcome::ok_with((v1, v2), successes),
        _ => {
            tracing::warn!(errors = errors.len(), "when_all aggregated failures");
            Outcome::fail_with(errors)
        },
    }
}

/// Run three heterogeneous tasks concurrently and aggregate their
/// outcomes.
pub async fn when_all3<T1, T2, T3>(
    first: impl Future<Output = Outcome<T1>> + Send + 'static,
    second: impl Future<Output = Outcome<T2>> + Send + 'static,
    third: impl Future<Output = Outcome<T3>> + Send + 'static,
) -> Outcome<(T1, T2, T3)>
where
    T1: Send + 'static,
    T2: Send + 'static,
    T3: Send + 'static,
{
    let first = tokio::spawn(first);
    let second = tokio::spawn(second);
    let third = tokio::spawn(third);

    let first = settle(first).await;
    let second = settle(second).await;
    let third = settle(third).await;

    let mut successes = Vec::new();
    let mut errors: Vec<AnyError> = Vec::new();
    successes.extend(first.successes().to_vec());
    successes.extend(second.successes().to_vec());
    successes.extend(third.successes().to_vec());
    errors.extend(first.errors().to_vec());
    errors.extend(second.errors().to_vec());
    errors.extend(third.errors().to_vec());

    match (first.into_value(), second.into_value(), third.into_value()) {
        (Some(v1), Some(v2), Some(v3)) if errors.is_empty() => {
            Outcome::ok_with((v1, v2, v3), successes)
        },
        _ => {
            tracing::warn!(errors = errors.len(), "when_all aggregated failures");
            Outcome::fail_with(errors)
        },
    }
}

/// Run four heterogeneous tasks concurrently and aggregate their
/// outcomes.
#[allow(clippy::similar_names)]
pub async fn when_all4<T1, T2, T3, T4>(
    first: impl Future<Output = Outcome<T1>> + Send + 'static,
    second: impl Future<Output = Outcome<T2>> + Send + 'static,
    third: impl Future<Output = Outcome<T3>> + Send + 'static,
    fourth: impl Future<Output = Outcome<T4>> + Send + 'static,
) -> Outcome<(T1, T2, T3, T4)>
where
    T1: Send + 'static,
    T2: Send + 'static,
    T3: Send + 'static,
    T4: Send + 'static,
{
    let first = tokio::spawn(first);
    let second = tokio::spawn(second);
    let third = tokio::spawn(third);
    let fourth = tokio::spawn(fourth);

    let first = settle(first).await;
    let second = settle(second).await;
    let third = settle(third).await;
    let fourth = settle(fourth).await;

    let mut successes = Vec::new();
    let mut errors: Vec<AnyError> = Vec::new();
    successes.extend(first.successes().to_vec());
    successes.extend(second.successes().to_vec());
    successes.extend(third.successes().to_vec());
    successes.extend(fourth.successes().to_vec());
    errors.extend(first.errors().to_vec());
    errors.extend(second.errors().to_vec());
    errors.extend(third.errors().to_vec());
    errors.extend(fourth.errors().to_vec());

    match (
        first.into_value(),
        second.into_value(),
        third.into_value(),
        fourth.into_value(),
    ) {
        (Some(v1), Some(v2), Some(v3), Some(v4)) if errors.is_empty() => {
            Outcome::ok_with((v1, v2, v3, v4), successes)
        },
        _ => {
            tracing::warn!(errors = errors.len(), "when_all aggregated failures");
            Outcome::fail_with(errors)
        },
    }
}

/// Run a homogeneous collection of tasks concurrently; the values come
/// back in input order.
pub async fn when_all<T, F>(tasks: impl IntoIterator<Item = F>) -> Outcome<Vec<T>>
where
    T: Send + 'static,
    F: Future<Output = Outcome<T>> + Send + 'static,
{
    let handles: Vec<JoinHandle<Outcome<T>>> = tasks.into_iter().map(tokio::spawn).collect();
    let outcomes = join_all(handles.into_iter().map(settle)).await;

    let mut values = Vec::with_capacity(outcomes.len());
    let mut successes = Vec::new();
    let mut errors: Vec<AnyError> = Vec::new();

    for outcome in outcomes {
        collect_reasons(outcome, &mut values, &mut successes, &mut errors);
    }

    if errors.is_empty() {
        Outcome::ok_with(values, successes)
    } else {
        tracing::warn!(errors = errors.len(), "when_all aggregated failures");
        Outcome::fail_with(errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::reason::Reason;
    use std::time::Duration;

    #[tokio::test]
    async fn all_success_yields_tuple_in_input_order() {
        let combined = when_all2(async { Outcome::ok(1) }, async { Outcome::ok("two") }).await;
        assert_eq!(combined.into_value(), Some((1, "two")));
    }

    #[tokio::test]
    async fn failures_aggregate_in_task_order() {
        let combined = when_all2(
            async { Outcome::<i32>::fail_message("e1") },
            async { Outcome::<i32>::fail_message("e2") },
        )
        .await;

        assert!(combined.is_failed());
        let messages: Vec<&str> = combined.errors().iter().map(AnyError::message).collect();
        assert_eq!(messages, ["e1", "e2"]);
    }

    #[tokio::test]
    async fn one_failure_still_awaits_the_rest() {
        let combined = when_all3(
            async { Outcome::<i32>::fail_message("fast failure") },
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Outcome::ok(2)
            },
            async { Outcome::<i32>::fail_message("slow failure") },
        )
        .await;

        // Both failures are present even though one task succeeded late.
        let messages: Vec<&str> = combined.errors().iter().map(AnyError::message).collect();
        assert_eq!(messages, ["fast failure", "slow failure"]);
    }

    async fn exploding() -> Outcome<i32> {
        panic!("task exploded")
    }

    #[tokio::test]
    async fn panicked_task_becomes_an_exception_error() {
        let combined = when_all2(async { Outcome::ok(1) }, exploding()).await;

        assert!(combined.is_failed());
        assert_eq!(combined.errors().len(), 1);
        assert_eq!(combined.errors()[0].kind(), "ExceptionError");
    }

    #[tokio::test]
    async fn success_annotations_are_kept_on_full_success() {
        let combined = when_all2(
            async { Outcome::ok_with(1, [crate::success::Success::new("a")]) },
            async { Outcome::ok_with(2, [crate::success::Success::new("b")]) },
        )
        .await;

        let messages: Vec<&str> = combined.successes().iter().map(Reason::message).collect();
        assert_eq!(messages, ["a", "b"]);
    }

    #[tokio::test]
    async fn homogeneous_collection_preserves_input_order() {
        let tasks = (0u64..4).map(|i| async move {
            // Later tasks finish first; order must still follow input.
            tokio::time::sleep(Duration::from_millis(20 - i * 5)).await;
            Outcome::ok(i)
        });

        let combined = when_all(tasks).await;
        assert_eq!(combined.into_value(), Some(vec![0, 1, 2, 3]));
    }

    #[tokio::test]
    async fn when_all4_aggregates_mixed_results() {
        let combined = when_all4(
            async { Outcome::ok(1) },
            async { Outcome::<i32>::fail(Error::new("e2")) },
            async { Outcome::ok(3) },
            async { Outcome::<i32>::fail(Error::new("e4")) },
        )
        .await;

        let messages: Vec<&str> = combined.errors().iter().map(AnyError::message).collect();
        assert_eq!(messages, ["e2", "e4"]);
    }
}
