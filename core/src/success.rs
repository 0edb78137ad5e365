//! Success annotations attached to successful outcomes.

use crate::reason::Reason;
use crate::tags::Tags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An annotation describing why (or in what way) an outcome succeeded.
///
/// Successes never affect the success/failure state of an outcome; they
/// carry context such as "served from cache" or "created new record".
///
/// # Example
///
/// ```
/// use outcome_rust_core::success::Success;
/// use outcome_rust_core::reason::Reason;
///
/// let success = Success::new("served from cache");
/// assert_eq!(success.message(), "served from cache");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Success {
    message: String,
    tags: Tags,
}

impl Success {
    /// Create a success annotation with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tags: Tags::new(),
        }
    }

    pub(crate) fn from_parts(message: String, tags: Tags) -> Self {
        Self { message, tags }
    }
}

impl Reason for Success {
    fn message(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn rebuild(&self, message: String, tags: Tags) -> Self {
        Self { message, tags }
    }
}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Success: {}", self.message)?;
        if !self.tags.is_empty() {
            write!(f, " {}", self.tags)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuccessWire {
    #[serde(rename = "type")]
    kind: String,
    message: String,
    tags: Tags,
}

impl Serialize for Success {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SuccessWire {
            kind: "Success".to_owned(),
            message: self.message.clone(),
            tags: self.tags.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Success {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = SuccessWire::deserialize(deserializer)?;
        if wire.kind != "Success" {
            return Err(serde::de::Error::custom(format!(
                "expected reason type 'Success', got '{}'",
                wire.kind
            )));
        }
        Ok(Self {
            message: wire.message,
            tags: wire.tags,
        })
    }
}
