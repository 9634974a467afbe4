use std::borrow::Cow;
use std::{error, fmt};

/// An error building a value from loaded parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// A required struct field was not provided.
    MissingField { field: Cow<'static, str> },
    /// A part has the wrong type.
    MismatchedType {
        field: Option<Cow<'static, str>>,
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },
    /// A fixed-size container got the wrong number of items.
    InvalidLength { expected: usize, found: usize },
    /// No variant or member at this index.
    UnknownVariant { index: usize },
    /// A non-nullable wrapper got no value.
    MissingValue,
}

impl ConstructError {
    /// A type mismatch of an unnamed part.
    #[inline]
    pub fn mismatched(expected: &'static str, found: &'static str) -> Self {
        Self::MismatchedType {
            field: None,
            expected: Cow::Borrowed(expected),
            found: Cow::Borrowed(found),
        }
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing field `{field}`"),
            Self::MismatchedType {
                field: Some(field),
                expected,
                found,
            } => write!(f, "field `{field}` expects `{expected}`, found `{found}`"),
            Self::MismatchedType {
                field: None,
                expected,
                found,
            } => write!(f, "expected `{expected}`, found `{found}`"),
            Self::InvalidLength { expected, found } => {
                write!(f, "expected {expected} items, found {found}")
            }
            Self::UnknownVariant { index } => write!(f, "no variant at index {index}"),
            Self::MissingValue => f.write_str("a value is required"),
        }
    }
}

impl error::Error for ConstructError {}
