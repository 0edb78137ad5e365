//! Deadline decorator for outcome-producing computations.
//!
//! There is no implicit timeout anywhere in the crate; callers compose
//! one explicitly by racing a computation against a delay. Elapsing maps
//! to a failed outcome whose error is tagged `ErrorType="Timeout"` with
//! the configured duration, so downstream consumers can tell a deadline
//! from a domain failure.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use outcome_rust_core::outcome::Outcome;
//! use outcome_rust_core::timeout::timeout;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let outcome = timeout(Duration::from_millis(10), async {
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//!     Outcome::ok(1)
//! })
//! .await;
//!
//! assert!(outcome.is_failed());
//! # }
//! ```

use crate::error::Error;
use crate::outcome::Outcome;
use crate::tags::{keys, Tags};
use std::future::Future;
use std::time::Duration;

/// Await `operation`, failing with a timeout-tagged error if it does not
/// complete within `duration`.
pub async fn timeout<T>(
    duration: Duration,
    operation: impl Future<Output = Outcome<T>>,
) -> Outcome<T> {
    match tokio::time::timeout(duration, operation).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => {
            tracing::debug!(?duration, "operation timed out");
            Outcome::fail(timeout_error(duration))
        },
    }
}

fn timeout_error(duration: Duration) -> Error {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    let mut tags = Tags::new();
    tags.insert_unchecked(keys::ERROR_TYPE, "Timeout");
    tags.insert_unchecked(keys::TIMEOUT_MILLISECONDS, millis);
    Error::from_parts(format!("operation timed out after {millis}ms"), tags)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tags::TagValue;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn completion_within_the_deadline_passes_through() {
        let outcome = timeout(Duration::from_secs(1), async { Outcome::ok(5) }).await;
        assert_eq!(outcome.into_value(), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsing_produces_a_tagged_error() {
        let outcome = timeout(Duration::from_millis(250), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Outcome::ok(5)
        })
        .await;

        assert!(outcome.is_failed());
        let error = &outcome.errors()[0];
        assert_eq!(
            error.tags().get(keys::ERROR_TYPE).and_then(TagValue::as_str),
            Some("Timeout")
        );
        assert_eq!(
            error.tags().get(keys::TIMEOUT_MILLISECONDS),
            Some(&json!(250))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failure_inside_the_deadline_is_not_a_timeout() {
        let outcome = timeout(Duration::from_secs(1), async {
            Outcome::<i32>::fail_message("domain failure")
        })
        .await;

        assert_eq!(outcome.errors()[0].message(), "domain failure");
        assert!(!outcome.errors()[0].tags().contains_key(keys::ERROR_TYPE));
    }
}
