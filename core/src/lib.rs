//! # Outcome Rust Core
//!
//! Railway-oriented error handling built from three algebras:
//!
//! - **Outcomes** ([`Outcome<T>`](outcome::Outcome)): success with a
//!   value and optional [`Success`](success::Success) annotations, or
//!   failure with one or more [`AnyError`](error::AnyError) reasons.
//!   Chains of `map`/`bind`/`ensure` short-circuit on failure by data;
//!   nothing panics for an expected failure.
//! - **Unions** ([`OneOf2`](oneof::OneOf2)..[`OneOf4`](oneof::OneOf4)):
//!   closed discriminated unions with exhaustive matching, per-slot
//!   transforms, and structural equality.
//! - **Maybe** ([`Maybe<T>`](maybe::Maybe)): optional values with an
//!   explicit, error-producing bridge into the outcome railway.
//!
//! Reasons are immutable: every fluent "mutator" on a
//! [`Reason`](reason::Reason) returns a new instance, tag keys are
//! write-once, and batch tagging is all-or-nothing. Misuse (blank or
//! duplicate keys, empty messages, invalid retry policies) surfaces
//! immediately as a [`ReasonError`](reason::ReasonError) or
//! [`RetryPolicyError`](retry::RetryPolicyError) at the violating call.
//!
//! ## Example
//!
//! ```
//! use outcome_rust_core::error::Error;
//! use outcome_rust_core::outcome::Outcome;
//!
//! fn username(input: &str) -> Outcome<String> {
//!     Outcome::ok(input.trim().to_owned())
//!         .ensure(|name| name.len() >= 3, Error::new("too short"))
//!         .map(|name| name.to_lowercase())
//! }
//!
//! assert_eq!(username("  Ada  ").value().map(String::as_str), Some("ada"));
//! assert_eq!(username("ab").errors()[0].message(), "too short");
//! ```
//!
//! ## Concurrency
//!
//! [`when_all`](when_all::when_all) runs independent outcome-producing
//! tasks concurrently and aggregates *all* failures; [`retry`](retry::retry)
//! re-invokes an operation with multiplicative backoff while keeping the
//! full failure history; [`timeout`](timeout::timeout) races a computation
//! against a deadline. Cancellation is cooperative
//! (`tokio_util::sync::CancellationToken`), never retried, and never
//! disguised as an ordinary error.
//!
//! ## Wire shapes
//!
//! Every public type serializes to the fixed shapes external consumers
//! rely on: outcomes as `{isSuccess, value, errors, successes}`, reasons
//! as `{type, message, tags}`, unions as `{index, value}`, and maybes as
//! `{hasValue, value?}`. Failure-to-HTTP mapping happens entirely through
//! the tag convention in [`tags::keys`].

pub mod error;
pub mod maybe;
pub mod oneof;
pub mod outcome;
pub mod reason;
pub mod retry;
pub mod success;
pub mod tags;
pub mod timeout;
pub mod when_all;

pub use error::{AnyError, ConversionError, Error, ExceptionError};
pub use maybe::Maybe;
pub use oneof::{OneOf2, OneOf3, OneOf4};
pub use outcome::Outcome;
pub use reason::{Reason, ReasonError};
pub use retry::{retry, RetryPolicy, RetryPolicyError};
pub use success::Success;
pub use tags::{TagValue, Tags};
pub use timeout::timeout;
pub use when_all::{when_all, when_all2, when_all3, when_all4};
