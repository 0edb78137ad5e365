//! Closed discriminated unions over two, three, or four types.
//!
//! Each union is a native sum type, so the compiler enforces what the
//! source model enforced by convention: exactly one alternative is ever
//! populated, `match` is exhaustive, and equality compares the
//! discriminant plus the active value only. The fixed method surface
//! ([`match_with`](OneOf2::match_with), per-slot `map_*`/`bind_*`,
//! `Option`-returning accessors) exists for callers that treat the union
//! generically; direct pattern matching on the variants is equally valid.
//!
//! The three arities are written out by hand. Per-slot `map_*`/`bind_*`
//! rewrite a single type parameter of the enum, which `macro_rules!`
//! cannot express without a token DSL costlier than the duplication.
//!
//! `From<T>` conversions are deliberately absent: with two slots
//! instantiated at the same type they would be ambiguous, and Rust's
//! coherence rules reject the overlapping impls outright. The variant
//! constructors are always unambiguous.
//!
//! # Example
//!
//! ```
//! use outcome_rust_core::oneof::OneOf2;
//!
//! let value: OneOf2<String, i32> = OneOf2::Second(5);
//!
//! assert_eq!(value.match_with(|_s| -1, |n| n * 2), 10);
//! ```

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is exactly one of two types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OneOf2<T1, T2> {
    /// The first alternative.
    First(T1),
    /// The second alternative.
    Second(T2),
}

impl<T1, T2> OneOf2<T1, T2> {
    /// 0-based discriminant of the active alternative.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::First(_) => 0,
            Self::Second(_) => 1,
        }
    }

    /// Whether the first alternative is active.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        matches!(self, Self::First(_))
    }

    /// Whether the second alternative is active.
    #[must_use]
    pub const fn is_second(&self) -> bool {
        matches!(self, Self::Second(_))
    }

    /// The first alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn first(&self) -> Option<&T1> {
        match self {
            Self::First(value) => Some(value),
            Self::Second(_) => None,
        }
    }

    /// The second alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn second(&self) -> Option<&T2> {
        match self {
            Self::Second(value) => Some(value),
            Self::First(_) => None,
        }
    }

    /// Consume the union, yielding the first alternative if active.
    #[must_use]
    pub fn into_first(self) -> Option<T1> {
        match self {
            Self::First(value) => Some(value),
            Self::Second(_) => None,
        }
    }

    /// Consume the union, yielding the second alternative if active.
    #[must_use]
    pub fn into_second(self) -> Option<T2> {
        match self {
            Self::Second(value) => Some(value),
            Self::First(_) => None,
        }
    }

    /// Exhaustive dispatch: one handler per alternative, no default.
    pub fn match_with<R>(
        self,
        on_first: impl FnOnce(T1) -> R,
        on_second: impl FnOnce(T2) -> R,
    ) -> R {
        match self {
            Self::First(value) => on_first(value),
            Self::Second(value) => on_second(value),
        }
    }

    /// Side-effecting dispatch; same exhaustiveness as
    /// [`match_with`](Self::match_with).
    pub fn switch_with(self, on_first: impl FnOnce(T1), on_second: impl FnOnce(T2)) {
        match self {
            Self::First(value) => on_first(value),
            Self::Second(value) => on_second(value),
        }
    }

    /// Transform the first slot's type; an active second slot passes
    /// through re-wrapped.
    #[must_use]
    pub fn map_first<U>(self, f: impl FnOnce(T1) -> U) -> OneOf2<U, T2> {
        match self {
            Self::First(value) => OneOf2::First(f(value)),
            Self::Second(value) => OneOf2::Second(value),
        }
    }

    /// Transform the second slot's type; an active first slot passes
    /// through re-wrapped.
    #[must_use]
    pub fn map_second<U>(self, f: impl FnOnce(T2) -> U) -> OneOf2<T1, U> {
        match self {
            Self::First(value) => OneOf2::First(value),
            Self::Second(value) => OneOf2::Second(f(value)),
        }
    }

    /// Chain a union-producing function on the first slot.
    #[must_use]
    pub fn bind_first<U>(self, f: impl FnOnce(T1) -> OneOf2<U, T2>) -> OneOf2<U, T2> {
        match self {
            Self::First(value) => f(value),
            Self::Second(value) => OneOf2::Second(value),
        }
    }

    /// Chain a union-producing function on the second slot.
    #[must_use]
    pub fn bind_second<U>(self, f: impl FnOnce(T2) -> OneOf2<T1, U>) -> OneOf2<T1, U> {
        match self {
            Self::First(value) => OneOf2::First(value),
            Self::Second(value) => f(value),
        }
    }

    /// Demote an active first slot that fails the predicate into the
    /// second slot via `fallback`; anything else is unchanged.
    #[must_use]
    pub fn filter(
        self,
        predicate: impl FnOnce(&T1) -> bool,
        fallback: impl FnOnce(T1) -> T2,
    ) -> Self {
        match self {
            Self::First(value) if !predicate(&value) => Self::Second(fallback(value)),
            other => other,
        }
    }
}

/// A value that is exactly one of three types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OneOf3<T1, T2, T3> {
    /// The first alternative.
    First(T1),
    /// The second alternative.
    Second(T2),
    /// The third alternative.
    Third(T3),
}

impl<T1, T2, T3> OneOf3<T1, T2, T3> {
    /// 0-based discriminant of the active alternative.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::First(_) => 0,
            Self::Second(_) => 1,
            Self::Third(_) => 2,
        }
    }

    /// Whether the first alternative is active.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        matches!(self, Self::First(_))
    }

    /// Whether the second alternative is active.
    #[must_use]
    pub const fn is_second(&self) -> bool {
        matches!(self, Self::Second(_))
    }

    /// Whether the third alternative is active.
    #[must_use]
    pub const fn is_third(&self) -> bool {
        matches!(self, Self::Third(_))
    }

    /// The first alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn first(&self) -> Option<&T1> {
        match self {
            Self::First(value) => Some(value),
            _ => None,
        }
    }

    /// The second alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn second(&self) -> Option<&T2> {
        match self {
            Self::Second(value) => Some(value),
            _ => None,
        }
    }

    /// The third alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn third(&self) -> Option<&T3> {
        match self {
            Self::Third(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the first alternative if active.
    #[must_use]
    pub fn into_first(self) -> Option<T1> {
        match self {
            Self::First(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the second alternative if active.
    #[must_use]
    pub fn into_second(self) -> Option<T2> {
        match self {
            Self::Second(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the third alternative if active.
    #[must_use]
    pub fn into_third(self) -> Option<T3> {
        match self {
            Self::Third(value) => Some(value),
            _ => None,
        }
    }

    /// Exhaustive dispatch: one handler per alternative, no default.
    pub fn match_with<R>(
        self,
        on_first: impl FnOnce(T1) -> R,
        on_second: impl FnOnce(T2) -> R,
        on_third: impl FnOnce(T3) -> R,
    ) -> R {
        match self {
            Self::First(value) => on_first(value),
            Self::Second(value) => on_second(value),
            Self::Third(value) => on_third(value),
        }
    }

    /// Side-effecting dispatch; same exhaustiveness as
    /// [`match_with`](Self::match_with).
    pub fn switch_with(
        self,
        on_first: impl FnOnce(T1),
        on_second: impl FnOnce(T2),
        on_third: impl FnOnce(T3),
    ) {
        match self {
            Self::First(value) => on_first(value),
            Self::Second(value) => on_second(value),
            Self::Third(value) => on_third(value),
        }
    }

    /// Transform the first slot's type; other active slots pass through.
    #[must_use]
    pub fn map_first<U>(self, f: impl FnOnce(T1) -> U) -> OneOf3<U, T2, T3> {
        match self {
            Self::First(value) => OneOf3::First(f(value)),
            Self::Second(value) => OneOf3::Second(value),
            Self::Third(value) => OneOf3::Third(value),
        }
    }

    /// Transform the second slot's type; other active slots pass through.
    #[must_use]
    pub fn map_second<U>(self, f: impl FnOnce(T2) -> U) -> OneOf3<T1, U, T3> {
        match self {
            Self::First(value) => OneOf3::First(value),
            Self::Second(value) => OneOf3::Second(f(value)),
            Self::Third(value) => OneOf3::Third(value),
        }
    }

    /// Transform the third slot's type; other active slots pass through.
    #[must_use]
    pub fn map_third<U>(self, f: impl FnOnce(T3) -> U) -> OneOf3<T1, T2, U> {
        match self {
            Self::First(value) => OneOf3::First(value),
            Self::Second(value) => OneOf3::Second(value),
            Self::Third(value) => OneOf3::Third(f(value)),
        }
    }

    /// Chain a union-producing function on the first slot.
    #[must_use]
    pub fn bind_first<U>(self, f: impl FnOnce(T1) -> OneOf3<U, T2, T3>) -> OneOf3<U, T2, T3> {
        match self {
            Self::First(value) => f(value),
            Self::Second(value) => OneOf3::Second(value),
            Self::Third(value) => OneOf3::Third(value),
        }
    }

    /// Chain a union-producing function on the second slot.
    #[must_use]
    pub fn bind_second<U>(self, f: impl FnOnce(T2) -> OneOf3<T1, U, T3>) -> OneOf3<T1, U, T3> {
        match self {
            Self::First(value) => OneOf3::First(value),
            Self::Second(value) => f(value),
            Self::Third(value) => OneOf3::Third(value),
        }
    }

    /// Chain a union-producing function on the third slot.
    #[must_use]
    pub fn bind_third<U>(self, f: impl FnOnce(T3) -> OneOf3<T1, T2, U>) -> OneOf3<T1, T2, U> {
        match self {
            Self::First(value) => OneOf3::First(value),
            Self::Second(value) => OneOf3::Second(value),
            Self::Third(value) => f(value),
        }
    }
}

/// A value that is exactly one of four types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OneOf4<T1, T2, T3, T4> {
    /// The first alternative.
    First(T1),
    /// The second alternative.
    Second(T2),
    /// The third alternative.
    Third(T3),
    /// The fourth alternative.
    Fourth(T4),
}

impl<T1, T2, T3, T4> OneOf4<T1, T2, T3, T4> {
    /// 0-based discriminant of the active alternative.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::First(_) => 0,
            Self::Second(_) => 1,
            Self::Third(_) => 2,
            Self::Fourth(_) => 3,
        }
    }

    /// Whether the first alternative is active.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        matches!(self, Self::First(_))
    }

    /// Whether the second alternative is active.
    #[must_use]
    pub const fn is_second(&self) -> bool {
        matches!(self, Self::Second(_))
    }

    /// Whether the third alternative is active.
    #[must_use]
    pub const fn is_third(&self) -> bool {
        matches!(self, Self::Third(_))
    }

    /// Whether the fourth alternative is active.
    #[must_use]
    pub const fn is_fourth(&self) -> bool {
        matches!(self, Self::Fourth(_))
    }

    /// The first alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn first(&self) -> Option<&T1> {
        match self {
            Self::First(value) => Some(value),
            _ => None,
        }
    }

    /// The second alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn second(&self) -> Option<&T2> {
        match self {
            Self::Second(value) => Some(value),
            _ => None,
        }
    }

    /// The third alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn third(&self) -> Option<&T3> {
        match self {
            Self::Third(value) => Some(value),
            _ => None,
        }
    }

    /// The fourth alternative, or `None` if another slot is active.
    #[must_use]
    pub const fn fourth(&self) -> Option<&T4> {
        match self {
            Self::Fourth(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the first alternative if active.
    #[must_use]
    pub fn into_first(self) -> Option<T1> {
        match self {
            Self::First(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the second alternative if active.
    #[must_use]
    pub fn into_second(self) -> Option<T2> {
        match self {
            Self::Second(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the third alternative if active.
    #[must_use]
    pub fn into_third(self) -> Option<T3> {
        match self {
            Self::Third(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the union, yielding the fourth alternative if active.
    #[must_use]
    pub fn into_fourth(self) -> Option<T4> {
        match self {
            Self::Fourth(value) => Some(value),
            _ => None,
        }
    }

    /// Exhaustive dispatch: one handler per alternative, no default.
    pub fn match_with<R>(
        self,
        on_first: impl FnOnce(T1) -> R,
        on_second: impl FnOnce(T2) -> R,
        on_third: impl FnOnce(T3) -> R,
        on_fourth: impl FnOnce(T4) -> R,
    ) -> R {
        match self {
            Self::First(value) => on_first(value),
            Self::Second(value) => on_second(value),
            Self::Third(value) => on_third(value),
            Self::Fourth(value) => on_fourth(value),
        }
    }

    /// Side-effecting dispatch; same exhaustiveness as
    /// [`match_with`](Self::match_with).
    pub fn switch_with(
        self,
        on_first: impl FnOnce(T1),
        on_second: impl FnOnce(T2),
        on_third: impl FnOnce(T3),
        on_fourth: impl FnOnce(T4),
    ) {
        match self {
            Self::First(value) => on_first(value),
            Self::Second(value) => on_second(value),
            Self::Third(value) => on_third(value),
            Self::Fourth(value) => on_fourth(value),
        }
    }

    /// Transform the first slot's type; other active slots pass through.
    #[must_use]
    pub fn map_first<U>(self, f: impl FnOnce(T1) -> U) -> OneOf4<U, T2, T3, T4> {
        match self {
            Self::First(value) => OneOf4::First(f(value)),
            Self::Second(value) => OneOf4::Second(value),
            Self::Third(value) => OneOf4::Third(value),
            Self::Fourth(value) => OneOf4::Fourth(value),
        }
    }

    /// Transform the second slot's type; other active slots pass through.
    #[must_use]
    pub fn map_second<U>(self, f: impl FnOnce(T2) -> U) -> OneOf4<T1, U, T3, T4> {
        match self {
            Self::First(value) => OneOf4::First(value),
            Self::Second(value) => OneOf4::Second(f(value)),
            Self::Third(value) => OneOf4::Third(value),
            Self::Fourth(value) => OneOf4::Fourth(value),
        }
    }

    /// Transform the third slot's type; other active slots pass through.
    #[must_use]
    pub fn map_third<U>(self, f: impl FnOnce(T3) -> U) -> OneOf4<T1, T2, U, T4> {
        match self {
            Self::First(value) => OneOf4::First(value),
            Self::Second(value) => OneOf4::Second(value),
            Self::Third(value) => OneOf4::Third(f(value)),
            Self::Fourth(value) => OneOf4::Fourth(value),
        }
    }

    /// Transform the fourth slot's type; other active slots pass through.
    #[must_use]
    pub fn map_fourth<U>(self, f: impl FnOnce(T4) -> U) -> OneOf4<T1, T2, T3, U> {
        match self {
            Self::First(value) => OneOf4::First(value),
            Self::Second(value) => OneOf4::Second(value),
            Self::Third(value) => OneOf4::Third(value),
            Self::Fourth(value) => OneOf4::Fourth(f(value)),
        }
    }

    /// Chain a union-producing function on the first slot.
    #[must_use]
    pub fn bind_first<U>(
        self,
        f: impl FnOnce(T1) -> OneOf4<U, T2, T3, T4>,
    ) -> OneOf4<U, T2, T3, T4> {
        match self {
            Self::First(value) => f(value),
            Self::Second(value) => OneOf4::Second(value),
            Self::Third(value) => OneOf4::Third(value),
            Self::Fourth(value) => OneOf4::Fourth(value),
        }
    }

    /// Chain a union-producing function on the second slot.
    #[must_use]
    pub fn bind_second<U>(
        self,
        f: impl FnOnce(T2) -> OneOf4<T1, U, T3, T4>,
    ) -> OneOf4<T1, U, T3, T4> {
        match self {
            Self::First(value) => OneOf4::First(value),
            Self::Second(value) => f(value),
            Self::Third(value) => OneOf4::Third(value),
            Self::Fourth(value) => OneOf4::Fourth(value),
        }
    }

    /// Chain a union-producing function on the third slot.
    #[must_use]
    pub fn bind_third<U>(
        self,
        f: impl FnOnce(T3) -> OneOf4<T1, T2, U, T4>,
    ) -> OneOf4<T1, T2, U, T4> {
        match self {
            Self::First(value) => OneOf4::First(value),
            Self::Second(value) => OneOf4::Second(value),
            Self::Third(value) => f(value),
            Self::Fourth(value) => OneOf4::Fourth(value),
        }
    }

    /// Chain a union-producing function on the fourth slot.
    #[must_use]
    pub fn bind_fourth<U>(
        self,
        f: impl FnOnce(T4) -> OneOf4<T1, T2, T3, U>,
    ) -> OneOf4<T1, T2, T3, U> {
        match self {
            Self::First(value) => OneOf4::First(value),
            Self::Second(value) => OneOf4::Second(value),
            Self::Third(value) => OneOf4::Third(value),
            Self::Fourth(value) => f(value),
        }
    }
}

// Wire shape {index, value}, 0-based index. Deserialization buffers the
// value as JSON until the index tells it which slot type to decode into.

fn serialize_union<S, V>(serializer: S, index: usize, value: &V) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let mut state = serializer.serialize_struct("OneOf", 2)?;
    state.serialize_field("index", &index)?;
    state.serialize_field("value", value)?;
    state.end()
}

#[derive(Deserialize)]
struct UnionWire {
    index: usize,
    value: serde_json::Value,
}

fn decode_slot<'de, D, T>(value: serde_json::Value) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}

impl<T1: Serialize, T2: Serialize> Serialize for OneOf2<T1, T2> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::First(value) => serialize_union(serializer, 0, value),
            Self::Second(value) => serialize_union(serializer, 1, value),
        }
    }
}

impl<'de, T1, T2> Deserialize<'de> for OneOf2<T1, T2>
where
    T1: DeserializeOwned,
    T2: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = UnionWire::deserialize(deserializer)?;
        match wire.index {
            0 => Ok(Self::First(decode_slot::<D, T1>(wire.value)?)),
            1 => Ok(Self::Second(decode_slot::<D, T2>(wire.value)?)),
            other => Err(serde::de::Error::custom(format!(
                "union index {other} out of range for OneOf2"
            ))),
        }
    }
}

impl<T1: Serialize, T2: Serialize, T3: Serialize> Serialize for OneOf3<T1, T2, T3> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::First(value) => serialize_union(serializer, 0, value),
            Self::Second(value) => serialize_union(serializer, 1, value),
            Self::Third(value) => serialize_union(serializer, 2, value),
        }
    }
}

impl<'de, T1, T2, T3> Deserialize<'de> for OneOf3<T1, T2, T3>
where
    T1: DeserializeOwned,
    T2: DeserializeOwned,
    T3: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = UnionWire::deserialize(deserializer)?;
        match wire.index {
            0 => Ok(Self::First(decode_slot::<D, T1>(wire.value)?)),
            1 => Ok(Self::Second(decode_slot::<D, T2>(wire.value)?)),
            2 => Ok(Self::Third(decode_slot::<D, T3>(wire.value)?)),
            other => Err(serde::de::Error::custom(format!(
                "union index {other} out of range for OneOf3"
            ))),
        }
    }
}

impl<T1, T2, T3, T4> Serialize for OneOf4<T1, T2, T3, T4>
where
    T1: Serialize,
    T2: Serialize,
    T3: Serialize,
    T4: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::First(value) => serialize_union(serializer, 0, value),
            Self::Second(value) => serialize_union(serializer, 1, value),
            Self::Third(value) => serialize_union(serializer, 2, value),
            Self::Fourth(value) => serialize_union(serializer, 3, value),
        }
    }
}

impl<'de, T1, T2, T3, T4> Deserialize<'de> for OneOf4<T1, T2, T3, T4>
where
    T1: DeserializeOwned,
    T2: DeserializeOwned,
    T3: DeserializeOwned,
    T4: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = UnionWire::deserialize(deserializer)?;
        match wire.index {
            0 => Ok(Self::First(decode_slot::<D, T1>(wire.value)?)),
            1 => Ok(Self::Second(decode_slot::<D, T2>(wire.value)?)),
            2 => Ok(Self::Third(decode_slot::<D, T3>(wire.value)?)),
            3 => Ok(Self::Fourth(decode_slot::<D, T4>(wire.value)?)),
            other => Err(serde::de::Error::custom(format!(
                "union index {other} out of range for OneOf4"
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn exactly_one_slot_is_active() {
        let value: OneOf2<String, i32> = OneOf2::Second(5);

        assert!(!value.is_first());
        assert!(value.is_second());
        assert_eq!(value.index(), 1);
        assert_eq!(value.first(), None);
        assert_eq!(value.second(), Some(&5));
    }

    #[test]
    fn match_with_dispatches_on_the_discriminant() {
        let value: OneOf2<String, i32> = OneOf2::Second(5);
        assert_eq!(value.match_with(|_s| -1, |n| n * 2), 10);

        let value: OneOf2<String, i32> = OneOf2::First("hi".to_owned());
        assert_eq!(value.match_with(|s| s.len(), |_n| 0), 2);
    }

    #[test]
    fn switch_with_runs_exactly_one_branch() {
        let hits = Cell::new(0);
        let value: OneOf3<i32, &str, bool> = OneOf3::Third(true);

        value.switch_with(
            |_| hits.set(hits.get() + 10),
            |_| hits.set(hits.get() + 100),
            |_| hits.set(hits.get() + 1),
        );
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn map_changes_only_the_named_slot() {
        let active: OneOf2<i32, &str> = OneOf2::First(4);
        assert_eq!(active.map_first(|n| n * 2), OneOf2::First(8));

        // Mapping a slot that is not active re-wraps the value unchanged.
        let inactive: OneOf2<i32, &str> = OneOf2::Second("s");
        assert_eq!(inactive.map_first(|n| n * 2), OneOf2::Second("s"));
    }

    #[test]
    fn bind_chains_on_the_active_slot_only() {
        let active: OneOf2<i32, String> = OneOf2::First(7);
        let bound = active.bind_first(|n| {
            if n > 5 {
                OneOf2::First(f64::from(n))
            } else {
                OneOf2::Second("too small".to_owned())
            }
        });
        assert_eq!(bound, OneOf2::First(7.0));

        let inactive: OneOf2<i32, String> = OneOf2::Second("already".to_owned());
        let bound = inactive.bind_first(|n| OneOf2::First(f64::from(n)));
        assert_eq!(bound, OneOf2::Second("already".to_owned()));
    }

    #[test]
    fn filter_demotes_on_predicate_failure() {
        let value: OneOf2<i32, String> = OneOf2::First(3);
        let filtered = value.filter(|n| *n > 5, |n| format!("{n} rejected"));
        assert_eq!(filtered, OneOf2::Second("3 rejected".to_owned()));

        let value: OneOf2<i32, String> = OneOf2::First(9);
        let kept = value.filter(|n| *n > 5, |n| format!("{n} rejected"));
        assert_eq!(kept, OneOf2::First(9));
    }

    #[test]
    fn equality_is_structural() {
        let a: OneOf3<i32, i32, &str> = OneOf3::First(1);
        let b: OneOf3<i32, i32, &str> = OneOf3::Second(1);

        // Same value, different discriminant: not equal.
        assert_ne!(a, b);
        assert_eq!(a, OneOf3::First(1));
    }

    #[test]
    fn four_arity_reaches_every_slot() {
        let value: OneOf4<i32, &str, bool, f64> = OneOf4::Fourth(2.5);

        assert_eq!(value.index(), 3);
        assert_eq!(value.fourth(), Some(&2.5));
        assert_eq!(
            value.match_with(|_| "i32", |_| "str", |_| "bool", |_| "f64"),
            "f64"
        );
    }

    #[test]
    fn wire_shape_is_index_and_value() {
        let value: OneOf2<String, i32> = OneOf2::Second(5);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!({"index": 1, "value": 5}));

        let back: OneOf2<String, i32> = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn wire_rejects_out_of_range_index() {
        let result: Result<OneOf2<String, i32>, _> =
            serde_json::from_value(json!({"index": 2, "value": 5}));
        assert!(result.is_err());
    }

    #[test]
    fn wire_round_trips_every_arity() {
        let three: OneOf3<i32, String, bool> = OneOf3::Third(true);
        let json = serde_json::to_value(&three).unwrap();
        assert_eq!(json, json!({"index": 2, "value": true}));
        let back: OneOf3<i32, String, bool> = serde_json::from_value(json).unwrap();
        assert_eq!(back, three);

        let four: OneOf4<i32, String, bool, f64> = OneOf4::Second("s".to_owned());
        let json = serde_json::to_value(&four).unwrap();
        assert_eq!(json, json!({"index": 1, "value": "s"}));
        let back: OneOf4<i32, String, bool, f64> = serde_json::from_value(json).unwrap();
        assert_eq!(back, four);
    }
}
