//! The default converters.
//!
//! Each module holds the serializer and the deserializer of one family of
//! types. They are registered by [`Namespace::new`](crate::Namespace::new)
//! and are public so custom converters can delegate to them.

// -----------------------------------------------------------------------------
// Modules

pub mod enums;
pub mod mapping;
pub mod object;
pub mod pointer;
pub mod primitive;
pub mod sequence;
pub mod union;

#[cfg(feature = "chrono")]
pub mod time;

pub(crate) mod serde;

// -----------------------------------------------------------------------------
// Shared errors

use jk_reflect::info::TypeInfo;
use jk_reflect::ops::ConstructError;
use serde_json::Value;

use crate::error::{DeserializationError, DeserializationErrorKind, Error};
use crate::name::short_name;

/// The JSON value does not have the shape `expected` for `target`.
pub(crate) fn invalid_shape(json: &Value, target: &TypeInfo, expected: &str) -> Error {
    DeserializationError::new(
        DeserializationErrorKind::InvalidShape,
        format!(
            "Could not deserialize {} into \"{}\": expected {expected}.",
            describe(json),
            short_name(target)
        ),
        json,
        Some(target),
    )
    .into()
}

/// The constructor of `target` refused the loaded parts.
pub(crate) fn construct_failed(json: &Value, target: &TypeInfo, err: ConstructError) -> Error {
    let kind = match err {
        ConstructError::InvalidLength { .. } => DeserializationErrorKind::LengthMismatch,
        _ => DeserializationErrorKind::Construct,
    };
    DeserializationError::new(
        kind,
        format!("Could not build \"{}\": {err}.", short_name(target)),
        json,
        Some(target),
    )
    .into()
}

/// A short description of a JSON value's kind, for messages.
pub(crate) fn describe(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
