//! Retry with multiplicative backoff and full failure history.
//!
//! [`retry`] re-invokes an outcome-producing operation until it succeeds
//! or the attempt budget is spent. Every failed attempt leaves a trace:
//! a marker error (`"attempt i of N"`) followed by the attempt's own
//! errors stamped with a `RetryAttempt` tag, so the final failure exposes
//! the complete history rather than just the last attempt.
//!
//! Cancellation is never retried: a cancellation-classified error from
//! the operation, a token already cancelled before an attempt, or a token
//! cancelled mid-delay all stop the loop immediately.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use outcome_rust_core::outcome::Outcome;
//! use outcome_rust_core::retry::{retry, RetryPolicy};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let policy = RetryPolicy::new(2, Duration::from_millis(1), 1.0).unwrap();
//! let token = CancellationToken::new();
//!
//! let outcome = retry(
//!     || async { Outcome::<i32>::fail_message("still down") },
//!     policy,
//!     &token,
//! )
//! .await;
//!
//! // 3 attempts, each contributing a marker plus the original error.
//! assert_eq!(outcome.errors().len(), 6);
//! # }
//! ```

use crate::error::{AnyError, Error, ExceptionError};
use crate::outcome::Outcome;
use crate::tags::keys;
use std::future::Future;
use std::time::Duration;
use thiserror::Error as ThisError;
use tokio_util::sync::CancellationToken;

/// Invalid retry configuration, reported at construction rather than on
/// first use.
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum RetryPolicyError {
    /// The backoff factor must be a finite number of at least 1.0.
    #[error("backoff factor must be at least 1.0, got {factor}")]
    BackoffBelowOne {
        /// The rejected factor.
        factor: f64,
    },
}

/// How often, and with what pacing, an operation is retried.
///
/// `max_retries` counts retries, not attempts: the operation runs at most
/// `max_retries + 1` times. A backoff factor of `1.0` keeps the delay
/// constant; larger factors multiply the delay after each retry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
    backoff_factor: f64,
}

impl RetryPolicy {
    /// Validate and build a policy.
    ///
    /// # Errors
    ///
    /// Returns [`RetryPolicyError::BackoffBelowOne`] when the factor is
    /// below `1.0`, infinite, or NaN.
    pub fn new(
        max_retries: u32,
        delay: Duration,
        backoff_factor: f64,
    ) -> Result<Self, RetryPolicyError> {
        if !backoff_factor.is_finite() || backoff_factor < 1.0 {
            return Err(RetryPolicyError::BackoffBelowOne {
                factor: backoff_factor,
            });
        }
        Ok(Self {
            max_retries,
            delay,
            backoff_factor,
        })
    }

    /// A constant-delay policy; always valid.
    #[must_use]
    pub const fn constant(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            backoff_factor: 1.0,
        }
    }

    /// The retry budget (attempts are `max_retries + 1`).
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before the first retry.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Multiplier applied to the delay after each retry.
    #[must_use]
    pub const fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }
}

/// Retry `operation` according to `policy`, accumulating the full failure
/// history.
///
/// The first successful attempt's outcome is returned as-is. Otherwise
/// the returned failure contains, per failed attempt, a marker error
/// `"attempt i of N"` followed by that attempt's errors tagged with
/// `RetryAttempt`. The delay between attempts is cancellable through
/// `token`. Cancellation, whether of the token or reported by the
/// operation itself, stops the loop without spending remaining retries.
pub async fn retry<T, F, Fut>(
    mut operation: F,
    policy: RetryPolicy,
    token: &CancellationToken,
) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T>>,
{
    let attempts = policy.max_retries + 1;
    let mut history: Vec<AnyError> = Vec::new();
    let mut delay = policy.delay;

    for attempt in 1..=attempts {
        if token.is_cancelled() {
            history.push(AnyError::from(ExceptionError::cancelled()));
            break;
        }

        let outcome = operation().await;
        if outcome.is_success() {
            return outcome;
        }

        let cancelled = outcome.errors().iter().any(AnyError::is_cancellation);
        tracing::debug!(attempt, attempts, cancelled, "retry attempt failed");

        history.push(attempt_marker(attempt, attempts));
        for error in outcome.errors() {
            history.push(stamp_attempt(error, attempt));
        }

        if cancelled {
            break;
        }

        if attempt < attempts {
            tokio::select! {
                () = token.cancelled() => {
                    history.push(AnyError::from(ExceptionError::cancelled()));
                    break;
                },
                () = tokio::time::sleep(delay) => {},
            }
            delay = delay.mul_f64(policy.backoff_factor);
        }
    }

    Outcome::fail_with(history)
}

fn attempt_marker(attempt: u32, attempts: u32) -> AnyError {
    AnyError::from(Error::new(format!("attempt {attempt} of {attempts}")))
}

// Errors from a nested retry already carry the tag; leave those alone.
fn stamp_attempt(error: &AnyError, attempt: u32) -> AnyError {
    if error.tags().contains_key(keys::RETRY_ATTEMPT) {
        error.clone()
    } else {
        error
            .with_tag(keys::RETRY_ATTEMPT, attempt)
            .unwrap_or_else(|_| error.clone())
    }
}
