//! Immutable tag maps attached to reasons.
//!
//! A [`Tags`] map carries structured, machine-readable context on a reason
//! (for example an HTTP status hint). Keys are unique and writes are
//! copy-on-write: every mutator returns a new map and leaves the original
//! untouched. Insertion order is preserved for display and iteration, but
//! two maps with the same entries compare equal regardless of the order
//! they were built in.
//!
//! # Example
//!
//! ```
//! use outcome_rust_core::tags::Tags;
//! use serde_json::json;
//!
//! let tags = Tags::new().with("HttpStatusCode", json!(404)).unwrap();
//! assert_eq!(tags.get("HttpStatusCode"), Some(&json!(404)));
//!
//! // Duplicate keys are rejected, and the original map is unchanged.
//! assert!(tags.with("HttpStatusCode", json!(500)).is_err());
//! assert_eq!(tags.get("HttpStatusCode"), Some(&json!(404)));
//! ```

use crate::reason::ReasonError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// The value side of a tag entry.
///
/// Tags are open-ended metadata, so values are arbitrary JSON values rather
/// than a closed enum.
pub type TagValue = serde_json::Value;

/// Well-known tag keys shared with external consumers.
///
/// The HTTP generation layer and the concurrency combinators communicate
/// exclusively through these keys; they are the entire coupling surface.
pub mod keys {
    /// Integer HTTP status hint read by response generators.
    pub const HTTP_STATUS_CODE: &str = "HttpStatusCode";

    /// Error classification (`"Conversion"`, `"Cancellation"`, `"Timeout"`).
    pub const ERROR_TYPE: &str = "ErrorType";

    /// Severity hint (`"Warning"`, ...).
    pub const SEVERITY: &str = "Severity";

    /// RFC 3339 timestamp of when the reason was created.
    pub const TIMESTAMP: &str = "Timestamp";

    /// Type name of a wrapped foreign fault.
    pub const EXCEPTION_TYPE: &str = "ExceptionType";

    /// Message of the wrapped fault's own source, when present.
    pub const INNER_MESSAGE: &str = "InnerMessage";

    /// 1-based attempt number stamped on errors accumulated by `retry`.
    pub const RETRY_ATTEMPT: &str = "RetryAttempt";

    /// Configured timeout, in milliseconds, on timeout errors.
    pub const TIMEOUT_MILLISECONDS: &str = "TimeoutMilliseconds";
}

/// An immutable, insertion-ordered map of unique tag keys to values.
#[derive(Clone, Debug, Default)]
pub struct Tags {
    entries: SmallVec<[(String, TagValue); 4]>,
}

impl Tags {
    /// Create an empty tag map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Look up a tag value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return a new map with one entry added.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::BlankTagKey`] if `key` is empty or whitespace,
    /// or [`ReasonError::DuplicateTagKey`] if `key` is already present.
    pub fn with(
        &self,
        key: impl Into<String>,
        value: impl Into<TagValue>,
    ) -> Result<Self, ReasonError> {
        let key = key.into();
        Self::validate_key(&key)?;
        if self.contains_key(&key) {
            return Err(ReasonError::DuplicateTagKey { key });
        }
        let mut next = self.clone();
        next.entries.push((key, value.into()));
        Ok(next)
    }

    /// Return a new map with a batch of entries added, all-or-nothing.
    ///
    /// Every key is validated before any entry is applied: a blank key, a
    /// key already present in the map, or a key repeated within the batch
    /// causes the whole call to fail and leaves the map unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::BlankTagKey`] or
    /// [`ReasonError::DuplicateTagKey`] without applying any entry.
    pub fn with_all<K, V, I>(&self, pairs: I) -> Result<Self, ReasonError>
    where
        K: Into<String>,
        V: Into<TagValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(String, TagValue)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (i, (key, _)) in pairs.iter().enumerate() {
            Self::validate_key(key)?;
            if self.contains_key(key) || pairs[..i].iter().any(|(k, _)| k == key) {
                return Err(ReasonError::DuplicateTagKey { key: key.clone() });
            }
        }

        let mut next = self.clone();
        next.entries.extend(pairs);
        Ok(next)
    }

    /// Insert without validation. Only for construction sites inside the
    /// crate that stamp fresh, known-unique keys.
    pub(crate) fn insert_unchecked(&mut self, key: impl Into<String>, value: impl Into<TagValue>) {
        self.entries.push((key.into(), value.into()));
    }

    fn validate_key(key: &str) -> Result<(), ReasonError> {
        if key.trim().is_empty() {
            return Err(ReasonError::BlankTagKey);
        }
        Ok(())
    }
}

// Equality is set-based: insertion order matters for display only.
impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Tags {}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagsVisitor;

        impl<'de> Visitor<'de> for TagsVisitor {
            type Value = Tags;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of tag keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tags, A::Error> {
                let mut tags = Tags::new();
                while let Some((key, value)) = access.next_entry::<String, TagValue>()? {
                    tags = tags
                        .with(key, value)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(tags)
            }
        }

        deserializer.deserialize_map(TagsVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_adds_entry_and_preserves_original() {
        let empty = Tags::new();
        let tagged = empty.with("k", json!(1)).unwrap();

        assert!(empty.is_empty());
        assert_eq!(tagged.get("k"), Some(&json!(1)));
        assert_eq!(tagged.len(), 1);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let tags = Tags::new().with("k", json!(1)).unwrap();
        let err = tags.with("k", json!(2)).unwrap_err();

        assert_eq!(err, ReasonError::DuplicateTagKey { key: "k".into() });
        assert_eq!(tags.get("k"), Some(&json!(1)));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert_eq!(
            Tags::new().with("  ", json!(1)).unwrap_err(),
            ReasonError::BlankTagKey
        );
    }

    #[test]
    fn batch_insert_is_atomic() {
        let tags = Tags::new().with("existing", json!(0)).unwrap();

        // One bad key in the batch means nothing from the batch lands.
        let err = tags
            .with_all(vec![("a", json!(1)), ("existing", json!(2))])
            .unwrap_err();
        assert_eq!(
            err,
            ReasonError::DuplicateTagKey {
                key: "existing".into()
            }
        );
        assert_eq!(tags.len(), 1);
        assert!(!tags.contains_key("a"));
    }

    #[test]
    fn batch_rejects_duplicates_within_the_batch() {
        let err = Tags::new()
            .with_all(vec![("k", json!(1)), ("k", json!(2))])
            .unwrap_err();
        assert_eq!(err, ReasonError::DuplicateTagKey { key: "k".into() });
    }

    #[test]
    fn batch_applies_all_entries_on_success() {
        let tags = Tags::new()
            .with_all(vec![("a", json!(1)), ("b", json!("two"))])
            .unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("b"), Some(&json!("two")));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let ab = Tags::new()
            .with("a", json!(1))
            .unwrap()
            .with("b", json!(2))
            .unwrap();
        let ba = Tags::new()
            .with("b", json!(2))
            .unwrap()
            .with("a", json!(1))
            .unwrap();

        assert_eq!(ab, ba);
    }

    #[test]
    fn display_follows_insertion_order() {
        let tags = Tags::new()
            .with("z", json!(1))
            .unwrap()
            .with("a", json!(2))
            .unwrap();
        assert_eq!(tags.to_string(), "{z=1, a=2}");
    }

    #[test]
    fn serializes_as_json_object() {
        let tags = Tags::new().with("k", json!(1)).unwrap();
        let value = serde_json::to_value(&tags).unwrap();
        assert_eq!(value, json!({"k": 1}));

        let back: Tags = serde_json::from_value(value).unwrap();
        assert_eq!(back, tags);
    }

    #[test]
    fn deserialization_rejects_duplicate_keys() {
        let result: Result<Tags, _> = serde_json::from_str(r#"{"k": 1, "k": 2}"#);
        assert!(result.is_err());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn distinct_entries() -> impl Strategy<Value = Vec<(String, i64)>> {
        proptest::collection::hash_map("[a-z]{1,8}", any::<i64>(), 0..8)
            .prop_map(|map| map.into_iter().collect())
    }

    fn build(entries: Vec<(String, i64)>) -> Tags {
        Tags::new()
            .with_all(entries.into_iter().map(|(k, v)| (k, serde_json::json!(v))))
            .unwrap()
    }

    proptest! {
        #[test]
        fn equality_is_order_insensitive(entries in distinct_entries()) {
            let mut reversed = entries.clone();
            reversed.reverse();
            prop_assert_eq!(build(entries), build(reversed));
        }

        #[test]
        fn wire_round_trip_preserves_entries(entries in distinct_entries()) {
            let tags = build(entries);
            let back: Tags =
                serde_json::from_value(serde_json::to_value(&tags).unwrap()).unwrap();
            prop_assert_eq!(back, tags);
        }
    }
}
