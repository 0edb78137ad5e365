//! Failure reasons: domain errors, conversion errors, and wrapped faults.
//!
//! Three concrete failure reasons share the [`Reason`] contract:
//!
//! - [`Error`]: a general domain failure with message and tags.
//! - [`ConversionError`]: stamped automatically when a permissive
//!   conversion receives invalid input instead of rejecting the call.
//! - [`ExceptionError`]: wraps a foreign fault (any `std::error::Error`),
//!   preserving its type name and source message as tags. The wrapped
//!   fault is state beyond message and tags and is threaded through every
//!   rebuild.
//!
//! Outcomes store failure reasons as [`AnyError`], the closed union over
//! the three concrete types.

use crate::reason::{Reason, ReasonError};
use crate::tags::{keys, TagValue, Tags};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A wrapped foreign fault, shared so rebuilds stay cheap.
pub type Fault = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A general domain failure.
///
/// # Example
///
/// ```
/// use outcome_rust_core::error::Error;
/// use outcome_rust_core::reason::Reason;
/// use serde_json::json;
///
/// let error = Error::new("record not found").with_http_status(404).unwrap();
/// assert_eq!(error.tags().get("HttpStatusCode"), Some(&json!(404)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    message: String,
    tags: Tags,
}

impl Error {
    /// Create a domain failure with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tags: Tags::new(),
        }
    }

    /// Return a copy carrying the `HttpStatusCode` tag read by response
    /// generators.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::DuplicateTagKey`] if a status hint is
    /// already present.
    pub fn with_http_status(&self, code: u16) -> Result<Self, ReasonError> {
        self.with_tag(keys::HTTP_STATUS_CODE, code)
    }

    pub(crate) fn from_parts(message: String, tags: Tags) -> Self {
        Self { message, tags }
    }
}

impl Reason for Error {
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

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)?;
        if !self.tags.is_empty() {
            write!(f, " {}", self.tags)?;
        }
        Ok(())
    }
}

/// A failure produced by a permissive conversion receiving invalid input.
///
/// Construction stamps `ErrorType="Conversion"`, `Severity="Warning"`, and
/// an RFC 3339 `Timestamp` so downstream consumers can classify and age
/// these without inspecting messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionError {
    message: String,
    tags: Tags,
}

impl ConversionError {
    /// Create a conversion failure with the classification tags stamped.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let mut tags = Tags::new();
        tags.insert_unchecked(keys::ERROR_TYPE, "Conversion");
        tags.insert_unchecked(keys::SEVERITY, "Warning");
        tags.insert_unchecked(keys::TIMESTAMP, Utc::now().to_rfc3339());
        Self {
            message: message.into(),
            tags,
        }
    }

    pub(crate) fn from_parts(message: String, tags: Tags) -> Self {
        Self { message, tags }
    }
}

impl Reason for ConversionError {
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

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConversionError: {} {}", self.message, self.tags)
    }
}

/// A failure wrapping a foreign fault.
///
/// The fault's type name and (when present) its source's message are
/// preserved as tags; the fault itself rides along as extra state so the
/// original error remains inspectable. Equality compares message and tags
/// only; faults carry no usable equality of their own.
#[derive(Clone, Debug)]
pub struct ExceptionError {
    message: String,
    tags: Tags,
    fault: Option<Fault>,
}

impl ExceptionError {
    /// Wrap a foreign fault, preserving its type name and source message.
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut tags = Tags::new();
        tags.insert_unchecked(keys::EXCEPTION_TYPE, std::any::type_name::<E>());
        if let Some(source) = error.source() {
            tags.insert_unchecked(keys::INNER_MESSAGE, source.to_string());
        }
        Self {
            message: error.to_string(),
            tags,
            fault: Some(Arc::new(error)),
        }
    }

    /// The distinguished cancellation failure.
    ///
    /// Cancellation is never an ordinary error: `retry` refuses to retry
    /// past it and `when_all` reports aborted tasks with it.
    #[must_use]
    pub fn cancelled() -> Self {
        let mut tags = Tags::new();
        tags.insert_unchecked(keys::ERROR_TYPE, "Cancellation");
        Self {
            message: "operation was cancelled".to_owned(),
            tags,
            fault: None,
        }
    }

    /// The wrapped fault, when one is attached.
    ///
    /// Deserialized instances have no fault; only the tags survive the
    /// wire.
    #[must_use]
    pub fn fault(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.fault.as_deref()
    }

    pub(crate) fn from_parts(message: String, tags: Tags) -> Self {
        Self {
            message,
            tags,
            fault: None,
        }
    }
}

impl Reason for ExceptionError {
    fn message(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn rebuild(&self, message: String, tags: Tags) -> Self {
        // The fault must survive every rebuild.
        Self {
            message,
            tags,
            fault: self.fault.clone(),
        }
    }
}

impl PartialEq for ExceptionError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.tags == other.tags
    }
}

impl Eq for ExceptionError {}

impl fmt::Display for ExceptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExceptionError: {} {}", self.message, self.tags)
    }
}

/// The closed set of failure reasons an outcome can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyError {
    /// A general domain failure.
    General(Error),
    /// A conversion failure.
    Conversion(ConversionError),
    /// A wrapped foreign fault.
    Exception(ExceptionError),
}

impl AnyError {
    /// The reason's message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::General(e) => e.message(),
            Self::Conversion(e) => e.message(),
            Self::Exception(e) => e.message(),
        }
    }

    /// The reason's tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        match self {
            Self::General(e) => e.tags(),
            Self::Conversion(e) => e.tags(),
            Self::Exception(e) => e.tags(),
        }
    }

    /// Stable type name used on the wire.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::General(_) => "Error",
            Self::Conversion(_) => "ConversionError",
            Self::Exception(_) => "ExceptionError",
        }
    }

    /// Whether this failure represents a cancellation signal.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        self.tags()
            .get(keys::ERROR_TYPE)
            .and_then(TagValue::as_str)
            == Some("Cancellation")
    }

    /// Return a copy with one tag added, dispatching to the concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`ReasonError::BlankTagKey`] or
    /// [`ReasonError::DuplicateTagKey`].
    pub fn with_tag(
        &self,
        key: impl Into<String>,
        value: impl Into<TagValue>,
    ) -> Result<Self, ReasonError> {
        Ok(match self {
            Self::General(e) => Self::General(e.with_tag(key, value)?),
            Self::Conversion(e) => Self::Conversion(e.with_tag(key, value)?),
            Self::Exception(e) => Self::Exception(e.with_tag(key, value)?),
        })
    }
}

impl fmt::Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General(e) => e.fmt(f),
            Self::Conversion(e) => e.fmt(f),
            Self::Exception(e) => e.fmt(f),
        }
    }
}

impl From<Error> for AnyError {
    fn from(error: Error) -> Self {
        Self::General(error)
    }
}

impl From<ConversionError> for AnyError {
    fn from(error: ConversionError) -> Self {
        Self::Conversion(error)
    }
}

impl From<ExceptionError> for AnyError {
    fn from(error: ExceptionError) -> Self {
        Self::Exception(error)
    }
}

#[derive(Serialize, Deserialize)]
struct ErrorWire {
    #[serde(rename = "type")]
    kind: String,
    message: String,
    tags: Tags,
}

impl Serialize for AnyError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorWire {
            kind: self.kind().to_owned(),
            message: self.message().to_owned(),
            tags: self.tags().clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnyError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ErrorWire::deserialize(deserializer)?;
        match wire.kind.as_str() {
            "Error" => Ok(Self::General(Error::from_parts(wire.message, wire.tags))),
            "ConversionError" => Ok(Self::Conversion(ConversionError::from_parts(
                wire.message,
                wire.tags,
            ))),
            // The fault does not cross the wire; tags carry what it stamped.
            "ExceptionError" => Ok(Self::Exception(ExceptionError::from_parts(
                wire.message,
                wire.tags,
            ))),
            other => Err(serde::de::Error::custom(format!(
                "unknown error reason type '{other}'"
            ))),
        }
    }
}
