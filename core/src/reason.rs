//! The reason contract shared by every success and failure annotation.
//!
//! A reason is an immutable value describing why an outcome succeeded or
//! failed: a message plus a [`Tags`] map. Fluent "mutators" never change a
//! reason in place; they funnel through a single rebuild seam that produces
//! a fresh instance of the same concrete type.
//!
//! # The rebuild seam
//!
//! [`Reason::rebuild`] is the only place a concrete reason may construct
//! itself from parts. Types carrying state beyond message and tags (such as
//! the wrapped fault on [`ExceptionError`](crate::error::ExceptionError))
//! must reproduce all of that state in their `rebuild` impl; dropping it
//! there silently corrupts every fluent call.
//!
//! # Example
//!
//! ```
//! use outcome_rust_core::error::Error;
//! use outcome_rust_core::reason::Reason;
//! use serde_json::json;
//!
//! let base = Error::new("record not found");
//! let tagged = base.with_tag("HttpStatusCode", json!(404)).unwrap();
//!
//! // `base` is untouched; `tagged` is a new value.
//! assert!(base.tags().is_empty());
//! assert_eq!(tagged.tags().get("HttpStatusCode"), Some(&json!(404)));
//! ```

use crate::tags::{TagValue, Tags};
use thiserror::Error as ThisError;

/// Caller contract violations on reason construction and tagging.
///
/// These are misuse signals, not domain failures: they surface immediately
/// at the violating call instead of flowing through an outcome.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ReasonError {
    /// A reason message must be non-empty.
    #[error("reason message must not be empty")]
    EmptyMessage,

    /// Tag keys must contain at least one non-whitespace character.
    #[error("tag key must not be blank")]
    BlankTagKey,

    /// Tag keys are write-once; adding an existing key is a caller bug.
    #[error("tag key '{key}' is already present")]
    DuplicateTagKey {
        /// The offending key.
        key: String,
    },
}

/// An immutable message-plus-tags annotation.
///
/// All provided combinators return a new instance built through
/// [`Reason::rebuild`]; the receiver is never modified.
pub trait Reason: Sized {
    /// Human-readable description of the reason.
    fn message(&self) -> &str;

    /// Structured context attached to the reason.
    fn tags(&self) -> &Tags;

    /// Construct a new instance of the concrete type from parts.
    ///
    /// Implementations must carry over 100% of any state beyond message
    /// and tags.
    #[must_use]
    fn rebuild(&self, message: String, tags: Tags) -> Self;

    /// Return a copy with a different message.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::EmptyMessage`] if `message` is empty or
    /// whitespace.
    fn with_message(&self, message: impl Into<String>) -> Result<Self, ReasonError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ReasonError::EmptyMessage);
        }
        Ok(self.rebuild(message, self.tags().clone()))
    }

    /// Return a copy with one tag added.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::BlankTagKey`] or
    /// [`ReasonError::DuplicateTagKey`]; the receiver is unchanged either
    /// way.
    fn with_tag(
        &self,
        key: impl Into<String>,
        value: impl Into<TagValue>,
    ) -> Result<Self, ReasonError> {
        let tags = self.tags().with(key, value)?;
        Ok(self.rebuild(self.message().to_owned(), tags))
    }

    /// Return a copy with a batch of tags added, all-or-nothing.
    ///
    /// Validation covers the whole batch before anything is applied: if any
    /// key is blank, already present, or repeated within the batch, no tag
    /// from the call lands.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::BlankTagKey`] or
    /// [`ReasonError::DuplicateTagKey`] without applying any entry.
    fn with_tags<K, V, I>(&self, pairs: I) -> Result<Self, ReasonError>
    where
        K: Into<String>,
        V: Into<TagValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let tags = self.tags().with_all(pairs)?;
        Ok(self.rebuild(self.message().to_owned(), tags))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn with_message_rejects_empty_input() {
        let error = Error::new("original");
        assert_eq!(error.with_message("").unwrap_err(), ReasonError::EmptyMessage);
        assert_eq!(error.with_message("  ").unwrap_err(), ReasonError::EmptyMessage);
        assert_eq!(error.message(), "original");
    }

    #[test]
    fn with_message_keeps_tags() {
        let error = Error::new("original").with_tag("k", json!(1)).unwrap();
        let renamed = error.with_message("renamed").unwrap();

        assert_eq!(renamed.message(), "renamed");
        assert_eq!(renamed.tags().get("k"), Some(&json!(1)));
    }

    #[test]
    fn with_tag_returns_new_instance() {
        let error = Error::new("m");
        let tagged = error.with_tag("k", json!("v")).unwrap();

        assert!(error.tags().is_empty());
        assert_eq!(tagged.tags().get("k"), Some(&json!("v")));
    }

    #[test]
    fn duplicate_key_fails_on_second_write() {
        let error = Error::new("m").with_tag("k", json!("1")).unwrap();
        let err = error.with_tag("k", json!("2")).unwrap_err();

        assert_eq!(err, ReasonError::DuplicateTagKey { key: "k".into() });
        assert_eq!(error.tags().get("k"), Some(&json!("1")));
    }

    #[test]
    fn batch_tagging_is_all_or_nothing() {
        let error = Error::new("m");
        let err = error
            .with_tags(vec![("k", json!("1")), ("k", json!("2"))])
            .unwrap_err();

        assert_eq!(err, ReasonError::DuplicateTagKey { key: "k".into() });
        assert!(error.tags().is_empty());
    }
}
