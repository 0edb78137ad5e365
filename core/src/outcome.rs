//! The outcome container: success with a value, or failure with reasons.
//!
//! [`Outcome<T>`] is the railway at the heart of the crate. An outcome is
//! either successful (a value plus zero or more [`Success`] annotations)
//! or failed (one or more [`AnyError`] reasons). Chains of
//! [`map`](Outcome::map), [`bind`](Outcome::bind), and
//! [`ensure`](Outcome::ensure) short-circuit on failure by data, never by
//! panicking.
//!
//! The non-generic result of the source model is simply `Outcome<()>`.
//!
//! # Example
//!
//! ```
//! use outcome_rust_core::outcome::Outcome;
//! use outcome_rust_core::error::Error;
//!
//! fn parse(input: &str) -> Outcome<i64> {
//!     Outcome::try_fn(|| input.trim().parse::<i64>())
//! }
//!
//! let doubled = parse("21")
//!     .ensure(|n| *n > 0, Error::new("must be positive"))
//!     .map(|n| n * 2);
//!
//! assert_eq!(doubled.value(), Some(&42));
//!
//! let failed = parse("x").map(|n| n * 2);
//! assert!(failed.is_failed());
//! ```
//!
//! # Invariant
//!
//! `is_success() == errors().is_empty() == value().is_some()` at all
//! times. Every constructor is a named factory; the fields are private, so
//! an inconsistent outcome (a value alongside errors, or a failure with no
//! reasons) cannot be built from outside this module. A *failed* outcome
//! may still carry success annotations: [`merge`](Outcome::merge)
//! preserves every reason from every input regardless of the aggregate
//! state.

use crate::error::{AnyError, Error, ExceptionError};
use crate::success::Success;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::{smallvec, SmallVec};
use std::future::Future;

type SuccessVec = SmallVec<[Success; 4]>;
type ErrorVec = SmallVec<[AnyError; 4]>;

/// Success-with-value or failure-with-reasons.
///
/// See the [module docs](self) for the governing invariant.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<T> {
    value: Option<T>,
    successes: SuccessVec,
    errors: ErrorVec,
}

impl<T> Outcome<T> {
    /// A successful outcome holding `value`.
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            successes: SmallVec::new(),
            errors: SmallVec::new(),
        }
    }

    /// A successful outcome holding `value` plus success annotations.
    #[must_use]
    pub fn ok_with(value: T, successes: impl IntoIterator<Item = Success>) -> Self {
        Self {
            value: Some(value),
            successes: successes.into_iter().collect(),
            errors: SmallVec::new(),
        }
    }

    /// A failed outcome with a single error reason.
    #[must_use]
    pub fn fail(error: impl Into<AnyError>) -> Self {
        Self {
            value: None,
            successes: SmallVec::new(),
            errors: smallvec![error.into()],
        }
    }

    /// A failed outcome carrying every provided error.
    ///
    /// A failed outcome must expose at least one reason; an empty iterator
    /// is replaced by a generic error rather than producing an
    /// unrepresentable state.
    #[must_use]
    pub fn fail_with(errors: impl IntoIterator<Item = AnyError>) -> Self {
        let mut errors: ErrorVec = errors.into_iter().collect();
        if errors.is_empty() {
            errors.push(AnyError::from(Error::new("failure with no reasons given")));
        }
        Self {
            value: None,
            successes: SmallVec::new(),
            errors,
        }
    }

    /// A failed outcome whose single reason wraps `message`.
    #[must_use]
    pub fn fail_message(message: impl Into<String>) -> Self {
        Self::fail(Error::new(message))
    }

    /// `ok(value)` when `condition` holds, otherwise a failure with
    /// `error`.
    #[must_use]
    pub fn ok_if(condition: bool, value: T, error: impl Into<AnyError>) -> Self {
        if condition {
            Self::ok(value)
        } else {
            Self::fail(error)
        }
    }

    /// A failure with `error` when `condition` holds, otherwise
    /// `ok(value)`.
    #[must_use]
    pub fn fail_if(condition: bool, value: T, error: impl Into<AnyError>) -> Self {
        Self::ok_if(!condition, value, error)
    }

    /// Lazy [`ok_if`](Self::ok_if): the condition is a fallible closure.
    ///
    /// A condition that returns `Err` produces a failure wrapping the
    /// fault, not a panic and not `error`.
    #[must_use]
    pub fn ok_if_with<E>(
        condition: impl FnOnce() -> Result<bool, E>,
        value: T,
        error: impl Into<AnyError>,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match condition() {
            Ok(flag) => Self::ok_if(flag, value, error),
            Err(fault) => Self::fail(ExceptionError::from_error(fault)),
        }
    }

    /// Lazy [`fail_if`](Self::fail_if); see [`ok_if_with`](Self::ok_if_with).
    #[must_use]
    pub fn fail_if_with<E>(
        condition: impl FnOnce() -> Result<bool, E>,
        value: T,
        error: impl Into<AnyError>,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match condition() {
            Ok(flag) => Self::fail_if(flag, value, error),
            Err(fault) => Self::fail(ExceptionError::from_error(fault)),
        }
    }

    /// Async [`ok_if`](Self::ok_if) over a fallible condition future.
    pub async fn ok_if_async<E>(
        condition: impl Future<Output = Result<bool, E>>,
        value: T,
        error: impl Into<AnyError>,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match condition.await {
            Ok(flag) => Self::ok_if(flag, value, error),
            Err(fault) => Self::fail(ExceptionError::from_error(fault)),
        }
    }

    /// Run a fallible operation, capturing its `Err` as an
    /// [`ExceptionError`].
    ///
    /// ```
    /// use outcome_rust_core::outcome::Outcome;
    ///
    /// let outcome = Outcome::try_fn(|| "21".parse::<i32>());
    /// assert_eq!(outcome.value(), Some(&21));
    ///
    /// let failed = Outcome::try_fn(|| "x".parse::<i32>());
    /// assert!(failed.is_failed());
    /// ```
    #[must_use]
    pub fn try_fn<E>(operation: impl FnOnce() -> Result<T, E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::try_fn_with(operation, |fault| {
            AnyError::from(ExceptionError::from_error(fault))
        })
    }

    /// [`try_fn`](Self::try_fn) with a caller-supplied fault handler.
    #[must_use]
    pub fn try_fn_with<E>(
        operation: impl FnOnce() -> Result<T, E>,
        handler: impl FnOnce(E) -> AnyError,
    ) -> Self {
        match operation() {
            Ok(value) => Self::ok(value),
            Err(fault) => {
                let error = handler(fault);
                tracing::debug!(error = %error, "captured foreign fault");
                Self::fail(error)
            },
        }
    }

    /// Await a fallible future, capturing its `Err` as an
    /// [`ExceptionError`].
    ///
    /// A fault already classified as cancellation stays recognizable to
    /// the retry loop; nothing re-wraps it as an ordinary failure.
    pub async fn try_future<E>(operation: impl Future<Output = Result<T, E>>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::try_future_with(operation, |fault| {
            AnyError::from(ExceptionError::from_error(fault))
        })
        .await
    }

    /// [`try_future`](Self::try_future) with a caller-supplied fault
    /// handler.
    pub async fn try_future_with<E>(
        operation: impl Future<Output = Result<T, E>>,
        handler: impl FnOnce(E) -> AnyError,
    ) -> Self {
        match operation.await {
            Ok(value) => Self::ok(value),
            Err(fault) => {
                let error = handler(fault);
                tracing::debug!(error = %error, "captured foreign fault");
                Self::fail(error)
            },
        }
    }

    /// Whether the outcome is successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the outcome is failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// The value, present only on success.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consume the outcome, yielding the value only on success.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Error reasons, in the order they were attached. Empty on success.
    #[must_use]
    pub fn errors(&self) -> &[AnyError] {
        &self.errors
    }

    /// Success annotations, in the order they were attached.
    #[must_use]
    pub fn successes(&self) -> &[Success] {
        &self.successes
    }

    /// Exhaustive consumption: exactly one of the two branches runs.
    pub fn match_with<R>(
        self,
        on_ok: impl FnOnce(T) -> R,
        on_err: impl FnOnce(Vec<AnyError>) -> R,
    ) -> R {
        match self.value {
            Some(value) => on_ok(value),
            None => on_err(self.errors.into_vec()),
        }
    }

    /// Convert into a plain `Result`, dropping success annotations.
    ///
    /// # Errors
    ///
    /// Returns the accumulated error reasons when the outcome is failed.
    pub fn into_result(self) -> Result<T, Vec<AnyError>> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(self.errors.into_vec()),
        }
    }

    /// Transform the value on success; reasons ride along unchanged.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: self.value.map(f),
            successes: self.successes,
            errors: self.errors,
        }
    }

    /// Chain a dependent operation; failure short-circuits untouched.
    ///
    /// Success annotations gathered so far stay at the front of the
    /// resulting outcome's annotations.
    #[must_use]
    pub fn bind<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.value {
            Some(value) => {
                let mut bound = f(value);
                let mut successes = self.successes;
                successes.extend(bound.successes);
                bound.successes = successes;
                bound
            },
            None => Outcome {
                value: None,
                successes: self.successes,
                errors: self.errors,
            },
        }
    }

    /// Fail with `error` when the predicate rejects the value.
    ///
    /// On an already failed outcome the predicate is never evaluated and
    /// the outcome passes through unchanged.
    #[must_use]
    pub fn ensure(self, predicate: impl FnOnce(&T) -> bool, error: impl Into<AnyError>) -> Self {
        if let Some(value) = &self.value {
            if !predicate(value) {
                return Self {
                    value: None,
                    successes: self.successes,
                    errors: smallvec![error.into()],
                };
            }
        }
        self
    }

    /// Append a success annotation.
    #[must_use]
    pub fn with_success(mut self, success: Success) -> Self {
        self.successes.push(success);
        self
    }

    /// Append an error reason, failing the outcome.
    ///
    /// A successful outcome gives up its value: a failed outcome never
    /// exposes a usable `T`.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<AnyError>) -> Self {
        self.value = None;
        self.errors.push(error.into());
        self
    }

    /// Aggregate outcomes into one holding the values in input order.
    ///
    /// All successful: the values are collected and every success
    /// annotation is kept. Any failure: the result carries only the error
    /// reasons, from every failed input, in input order; success
    /// annotations are dropped. Compare [`merge`](Self::merge).
    #[must_use]
    pub fn combine(outcomes: impl IntoIterator<Item = Self>) -> Outcome<Vec<T>> {
        Self::aggregate(outcomes, false)
    }

    /// Aggregate outcomes, always preserving every reason from every
    /// input.
    ///
    /// Unlike [`combine`](Self::combine), a failed merge still carries the
    /// success annotations contributed by the successful inputs.
    #[must_use]
    pub fn merge(outcomes: impl IntoIterator<Item = Self>) -> Outcome<Vec<T>> {
        Self::aggregate(outcomes, true)
    }

    fn aggregate(
        outcomes: impl IntoIterator<Item = Self>,
        keep_successes_on_failure: bool,
    ) -> Outcome<Vec<T>> {
        let mut values = Vec::new();
        let mut successes = SuccessVec::new();
        let mut errors = ErrorVec::new();

        for outcome in outcomes {
            successes.extend(outcome.successes);
            errors.extend(outcome.errors);
            if let Some(value) = outcome.value {
                values.push(value);
            }
        }

        if errors.is_empty() {
            Outcome {
                value: Some(values),
                successes,
                errors,
            }
        } else {
            Outcome {
                value: None,
                successes: if keep_successes_on_failure {
                    successes
                } else {
                    SuccessVec::new()
                },
                errors,
            }
        }
    }

    pub(crate) fn from_parts(
        value: Option<T>,
        successes: impl IntoIterator<Item = Success>,
        errors: impl IntoIterator<Item = AnyError>,
    ) -> Self {
        Self {
            value,
            successes: successes.into_iter().collect(),
            errors: errors.into_iter().collect(),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 4)?;
        state.serialize_field("isSuccess", &self.is_success())?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("errors", &self.errors[..])?;
        state.serialize_field("successes", &self.successes[..])?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct OutcomeWire<T> {
    is_success: bool,
    #[serde(default)]
    value: Option<T>,
    #[serde(default)]
    errors: Vec<AnyError>,
    #[serde(default)]
    successes: Vec<Success>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Outcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::value::UnitDeserializer;

        let wire = OutcomeWire::<T>::deserialize(deserializer)?;
        if wire.is_success {
            if !wire.errors.is_empty() {
                return Err(serde::de::Error::custom(
                    "successful outcome cannot carry errors",
                ));
            }
            // A unit value serializes as null; recover it before giving up.
            let value = match wire.value {
                Some(value) => value,
                None => T::deserialize(UnitDeserializer::<D::Error>::new()).map_err(|_| {
                    serde::de::Error::custom("successful outcome is missing its value")
                })?,
            };
            Ok(Self::from_parts(Some(value), wire.successes, []))
        } else {
            if wire.errors.is_empty() {
                return Err(serde::de::Error::custom(
                    "failed outcome must carry at least one error",
                ));
            }
            Ok(Self::from_parts(None, wire.successes, wire.errors))
        }
    }
}
