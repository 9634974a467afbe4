use std::fmt;

use jk_reflect::info::TypeInfo;
use serde_json::Value;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// The error returned by every dump and load operation.
///
/// Converters report failures they cannot classify as [`Error::Custom`]; the
/// dispatch core wraps those into a [`SerializationError`] or a
/// [`DeserializationError`] carrying the value and the target. All other
/// variants pass through the core unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The API was called with arguments that cannot work.
    #[error("{0}")]
    Usage(String),

    /// A string or byte input was not valid JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An unclassified failure raised inside a converter.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an [`Error::Custom`] from any displayable message.
    ///
    /// ```
    /// use jk_json::Error;
    ///
    /// let err = Error::custom(format_args!("bad value {}", 3));
    /// assert_eq!(err.to_string(), "bad value 3");
    /// ```
    #[inline]
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    #[inline]
    pub(crate) fn usage(message: impl fmt::Display) -> Self {
        Self::Usage(message.to_string())
    }

    /// Returns the serialization error, if this is one.
    pub fn as_serialization(&self) -> Option<&SerializationError> {
        match self {
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the deserialization error, if this is one.
    pub fn as_deserialization(&self) -> Option<&DeserializationError> {
        match self {
            Self::Deserialization(err) => Some(err),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// DecodeError

/// Text that could not be parsed as JSON.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
    text: String,
    target: Option<&'static str>,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(text: String, target: Option<&TypeInfo>, source: serde_json::Error) -> Self {
        Self {
            message: format!("Could not load a value, the given text is not valid JSON: {source}."),
            text,
            target: target.map(TypeInfo::type_path),
            source,
        }
    }

    /// Returns the text that failed to parse.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the type path of the requested target, if one was given.
    #[inline]
    pub fn target(&self) -> Option<&'static str> {
        self.target
    }
}

// -----------------------------------------------------------------------------
// SerializationError

/// What went wrong while dumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SerializationErrorKind {
    /// No converter is registered for the type or any of its families.
    NoSerializer,
    /// A value was reached again while it was still being dumped.
    RecursionDetected,
    /// An attribute of an object failed to dump in strict mode.
    Attribute,
    /// A converter failed with an unclassified error.
    Converter,
}

/// A failure to turn a value into JSON.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SerializationError {
    kind: SerializationErrorKind,
    message: String,
    type_path: Option<&'static str>,
    attribute: Option<String>,
    #[source]
    cause: Option<Box<Error>>,
}

impl SerializationError {
    /// Creates an error of `kind` about a value of type `info`.
    pub fn new(kind: SerializationErrorKind, message: impl Into<String>, info: Option<&TypeInfo>) -> Self {
        Self {
            kind,
            message: message.into(),
            type_path: info.map(TypeInfo::type_path),
            attribute: None,
            cause: None,
        }
    }

    #[inline]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[inline]
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    #[inline]
    pub fn kind(&self) -> SerializationErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the type path of the value being dumped.
    #[inline]
    pub fn type_path(&self) -> Option<&'static str> {
        self.type_path
    }

    /// Returns the attribute name, for [`SerializationErrorKind::Attribute`].
    #[inline]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the error that caused this one, if any.
    #[inline]
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }
}

// -----------------------------------------------------------------------------
// DeserializationError

/// What went wrong while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeserializationErrorKind {
    /// `null` met a target that cannot stand for "no value".
    NullNotAllowed,
    /// A required constructor field had no value, no getter and no default.
    UnfulfilledArgument,
    /// Strict mode met a key the target does not expect.
    SignatureMismatch,
    /// A tuple or a fixed-size array got the wrong number of items.
    LengthMismatch,
    /// Metadata named a type that cannot be resolved.
    UnknownClass,
    /// No member of a union accepted the value.
    NoMatchInUnion,
    /// No converter is registered for the target or any of its families.
    NoDeserializer,
    /// The JSON value has the wrong shape for the target.
    InvalidShape,
    /// The target's constructor refused the loaded parts.
    Construct,
    /// A converter failed with an unclassified error.
    Converter,
}

/// A failure to build a value from JSON.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DeserializationError {
    kind: DeserializationErrorKind,
    message: String,
    json: Value,
    target: Option<&'static str>,
    attribute: Option<String>,
    #[source]
    cause: Option<Box<Error>>,
}

impl DeserializationError {
    /// Creates an error of `kind` about loading `json` into `target`.
    pub fn new(
        kind: DeserializationErrorKind,
        message: impl Into<String>,
        json: &Value,
        target: Option<&TypeInfo>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            json: json.clone(),
            target: target.map(TypeInfo::type_path),
            attribute: None,
            cause: None,
        }
    }

    #[inline]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[inline]
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    #[inline]
    pub fn kind(&self) -> DeserializationErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the JSON value that failed to load.
    #[inline]
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Returns the type path of the target, `None` for open targets.
    #[inline]
    pub fn target(&self) -> Option<&'static str> {
        self.target
    }

    /// Returns the attribute name, for object-level failures.
    #[inline]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the error that caused this one, if any.
    #[inline]
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }
}

// -----------------------------------------------------------------------------
// ValidationError

/// A loaded value was rejected by a registered validator.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    target: &'static str,
}

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>, target: &TypeInfo) -> Self {
        Self {
            message: message.into(),
            target: target.type_path(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the type path of the validated value.
    #[inline]
    pub fn target(&self) -> &'static str {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use jk_reflect::info::Typed;
    use serde_json::json;

    use super::{DeserializationError, DeserializationErrorKind, Error};

    #[test]
    fn deserialization_error_keeps_context() {
        let err = DeserializationError::new(
            DeserializationErrorKind::InvalidShape,
            "expected an array",
            &json!({"a": 1}),
            Some(<Vec<u8>>::type_info()),
        )
        .with_attribute("items")
        .with_cause(Error::custom("inner"));

        assert_eq!(err.to_string(), "expected an array");
        assert_eq!(err.json(), &json!({"a": 1}));
        assert_eq!(err.target(), Some("alloc::vec::Vec<u8>"));
        assert_eq!(err.attribute(), Some("items"));
        assert_eq!(err.source().unwrap().to_string(), "inner");

        let err = Error::from(err);
        assert_eq!(
            err.as_deserialization().unwrap().kind(),
            DeserializationErrorKind::InvalidShape
        );
        assert!(err.as_serialization().is_none());
    }
}
