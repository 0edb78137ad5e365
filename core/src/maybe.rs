//! Optional values under the same union discipline as `OneOf`.
//!
//! [`Maybe<T>`] is the binary specialization: `Some(value)` or `None`,
//! with exhaustive [`match_with`](Maybe::match_with) and an explicit,
//! error-producing bridge into the outcome railway via
//! [`ok_or_else`](Maybe::ok_or_else). It converts freely to and from
//! `Option<T>`; it exists as its own type for the fixed wire shape
//! (`{hasValue, value?}`) and the union-style method surface.
//!
//! # Example
//!
//! ```
//! use outcome_rust_core::maybe::Maybe;
//! use outcome_rust_core::error::Error;
//!
//! let found = Maybe::Some(3).map(|n| n * 2).filter(|n| *n > 4);
//! assert_eq!(found.value(), Some(&6));
//!
//! let outcome = Maybe::<i32>::None.ok_or_else(|| Error::new("missing"));
//! assert!(outcome.is_failed());
//! ```

use crate::error::AnyError;
use crate::outcome::Outcome;
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional value: `Some(value)` or `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// A value is present.
    Some(T),
    /// No value.
    #[default]
    None,
}

impl<T> Maybe<T> {
    /// Whether a value is present.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// The value, defined only when [`has_value`](Self::has_value).
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    /// Consume, yielding the value if present.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    /// Transform the value; `None` passes through.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Self::Some(value) => Maybe::Some(f(value)),
            Self::None => Maybe::None,
        }
    }

    /// Alias of [`map`](Self::map), matching the source model's naming.
    #[must_use]
    pub fn select<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        self.map(f)
    }

    /// Chain a maybe-producing function; `None` passes through.
    #[must_use]
    pub fn bind<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
        match self {
            Self::Some(value) => f(value),
            Self::None => Maybe::None,
        }
    }

    /// Keep the value only if the predicate accepts it.
    #[must_use]
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Some(value) if predicate(&value) => Self::Some(value),
            _ => Self::None,
        }
    }

    /// Exhaustive dispatch: one handler per state, no default.
    pub fn match_with<R>(self, on_some: impl FnOnce(T) -> R, on_none: impl FnOnce() -> R) -> R {
        match self {
            Self::Some(value) => on_some(value),
            Self::None => on_none(),
        }
    }

    /// Cross into the outcome railway, producing the error for the
    /// `None` case explicitly.
    #[must_use]
    pub fn ok_or_else<E: Into<AnyError>>(self, error: impl FnOnce() -> E) -> Outcome<T> {
        match self {
            Self::Some(value) => Outcome::ok(value),
            Self::None => Outcome::fail(error()),
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::None, Self::Some)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_value()
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Some(value) => {
                let mut state = serializer.serialize_struct("Maybe", 2)?;
                state.serialize_field("hasValue", &true)?;
                state.serialize_field("value", value)?;
                state.end()
            },
            Self::None => {
                let mut state = serializer.serialize_struct("Maybe", 1)?;
                state.serialize_field("hasValue", &false)?;
                state.end()
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct MaybeWire<T> {
    has_value: bool,
    #[serde(default)]
    value: Option<T>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::value::UnitDeserializer;

        let wire = MaybeWire::<T>::deserialize(deserializer)?;
        if wire.has_value {
            let value = match wire.value {
                Some(value) => value,
                None => T::deserialize(UnitDeserializer::<D::Error>::new())
                    .map_err(|_| serde::de::Error::custom("maybe with hasValue is missing its value"))?,
            };
            Ok(Self::Some(value))
        } else {
            Ok(Self::None)
        }
    }
}
