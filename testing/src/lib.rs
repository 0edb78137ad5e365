//! # Outcome Rust Testing
//!
//! Testing utilities for the outcome algebra.
//!
//! This crate provides:
//! - A fluent assertion harness for outcomes
//! - Message extraction helpers for reason lists
//! - A deterministic flaky-operation builder for retry tests
//!
//! ## Example
//!
//! ```
//! use outcome_rust_core::outcome::Outcome;
//! use outcome_rust_testing::assert_outcome;
//!
//! assert_outcome(Outcome::ok(42))
//!     .is_success()
//!     .has_value(&42);
//!
//! assert_outcome(Outcome::<i32>::fail_message("boom"))
//!     .is_failed()
//!     .has_error_messages(&["boom"]);
//! ```

use outcome_rust_core::error::AnyError;
use outcome_rust_core::outcome::Outcome;
use outcome_rust_core::reason::Reason;
use std::fmt::Debug;
use std::future::Ready;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Extract the error messages of an outcome, in order.
#[must_use]
pub fn error_messages<T>(outcome: &Outcome<T>) -> Vec<String> {
    outcome
        .errors()
        .iter()
        .map(|e| e.message().to_owned())
        .collect()
}

/// Extract the success-annotation messages of an outcome, in order.
#[must_use]
pub fn success_messages<T>(outcome: &Outcome<T>) -> Vec<String> {
    outcome
        .successes()
        .iter()
        .map(|s| s.message().to_owned())
        .collect()
}

/// Start a fluent assertion chain over an outcome.
#[must_use]
pub fn assert_outcome<T>(outcome: Outcome<T>) -> OutcomeAssert<T> {
    OutcomeAssert { outcome }
}

/// Fluent assertions over an [`Outcome`], consumed chain-style.
///
/// Each assertion panics with a readable message on mismatch, the way
/// `assert_eq!` does, and returns `self` so checks read as one sentence.
pub struct OutcomeAssert<T> {
    outcome: Outcome<T>,
}

impl<T: Debug + PartialEq> OutcomeAssert<T> {
    /// Assert the outcome is successful.
    ///
    /// # Panics
    ///
    /// Panics when the outcome is failed, listing its errors.
    pub fn is_success(self) -> Self {
        assert!(
            self.outcome.is_success(),
            "expected success, got errors: {:?}",
            error_messages(&self.outcome)
        );
        self
    }

    /// Assert the outcome is failed.
    ///
    /// # Panics
    ///
    /// Panics when the outcome is successful.
    pub fn is_failed(self) -> Self {
        assert!(
            self.outcome.is_failed(),
            "expected failure, got value: {:?}",
            self.outcome.value()
        );
        self
    }

    /// Assert the outcome holds exactly `expected`.
    ///
    /// # Panics
    ///
    /// Panics when the outcome is failed or holds a different value.
    pub fn has_value(self, expected: &T) -> Self {
        assert_eq!(
            self.outcome.value(),
            Some(expected),
            "errors: {:?}",
            error_messages(&self.outcome)
        );
        self
    }

    /// Assert the error messages match `expected`, in order.
    ///
    /// # Panics
    ///
    /// Panics on any difference in count, order, or content.
    pub fn has_error_messages(self, expected: &[&str]) -> Self {
        assert_eq!(error_messages(&self.outcome), expected);
        self
    }

    /// Assert the success-annotation messages match `expected`, in order.
    ///
    /// # Panics
    ///
    /// Panics on any difference in count, order, or content.
    pub fn has_success_messages(self, expected: &[&str]) -> Self {
        assert_eq!(success_messages(&self.outcome), expected);
        self
    }

    /// Assert that some error satisfies `predicate`.
    ///
    /// # Panics
    ///
    /// Panics when no error matches.
    pub fn has_error_matching(self, predicate: impl Fn(&AnyError) -> bool) -> Self {
        assert!(
            self.outcome.errors().iter().any(predicate),
            "no error matched; errors: {:?}",
            error_messages(&self.outcome)
        );
        self
    }

    /// Unwrap the chain, handing the outcome back.
    #[must_use]
    pub fn into_inner(self) -> Outcome<T> {
        self.outcome
    }
}

/// A deterministic operation that fails a fixed number of times before
/// succeeding. Built for retry tests.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use outcome_rust_core::retry::{retry, RetryPolicy};
/// use outcome_rust_testing::Flaky;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let flaky = Flaky::failing_first(2);
/// let outcome = retry(
///     flaky.op(),
///     RetryPolicy::constant(5, Duration::from_millis(1)),
///     &CancellationToken::new(),
/// )
/// .await;
///
/// assert!(outcome.is_success());
/// assert_eq!(flaky.calls(), 3);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Flaky {
    calls: Arc<AtomicU32>,
    fail_first: u32,
}

impl Flaky {
    /// An operation that fails its first `fail_first` invocations.
    #[must_use]
    pub fn failing_first(fail_first: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            fail_first,
        }
    }

    /// An operation that never succeeds.
    #[must_use]
    pub fn always_failing() -> Self {
        Self::failing_first(u32::MAX)
    }

    /// How many times the operation has been invoked.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// The operation itself, shaped for [`retry`](outcome_rust_core::retry::retry).
    ///
    /// Successful invocations yield the 0-based call number.
    #[must_use]
    pub fn op(&self) -> impl FnMut() -> Ready<Outcome<u32>> {
        let calls = Arc::clone(&self.calls);
        let fail_first = self.fail_first;
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(if call < fail_first {
                Outcome::fail_message(format!("transient failure on call {call}"))
            } else {
                Outcome::ok(call)
            })
        }
    }
}
