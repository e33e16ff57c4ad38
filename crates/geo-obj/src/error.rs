//! Error types for geometry normalization, validation and encoding.

use thiserror::Error;

/// Broad failure categories, each with a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// E001: Input is not container-shaped
    UnsupportedFormat,
    /// E002: Geometry type unknown or without a serializer
    UnsupportedType,
    /// E003: Malformed leaf data or bad encoder configuration
    UnexpectedValue,
    /// E004: Nested structural violation inside a composite
    Range,
    /// E005: Conflicting explicit and inferred metadata
    Runtime,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedFormat => "E001",
            ErrorKind::UnsupportedType => "E002",
            ErrorKind::UnexpectedValue => "E003",
            ErrorKind::Range => "E004",
            ErrorKind::Runtime => "E005",
        }
    }
}

/// Error raised anywhere between raw input and encoded output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported type \"{0}\"")]
    UnsupportedType(String),

    #[error("{0}")]
    UnexpectedValue(String),

    /// A child failure re-raised with the context of its container.
    #[error("{message}")]
    Range {
        message: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Error::UnexpectedValue(_) => ErrorKind::UnexpectedValue,
            Error::Range { .. } => ErrorKind::Range,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Wraps `cause` in a [`Error::Range`] whose message is `context`
    /// followed by the cause's own message.
    pub fn range(context: &str, cause: Error) -> Error {
        Error::Range {
            message: format!("{context} {cause}"),
            source: Box::new(cause),
        }
    }

    /// Follows the chain of [`Error::Range`] wrappers to the original failure.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Range { source, .. } = current {
            current = &**source;
        }
        current
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ErrorKind::UnsupportedFormat.code(), "E001");
        assert_eq!(ErrorKind::Runtime.code(), "E005");
        assert_eq!(Error::UnexpectedValue(String::new()).kind().code(), "E003");
    }

    #[test]
    fn test_range_chains_cause() {
        let inner = Error::UnexpectedValue("Point value must be array".to_string());
        let outer = Error::range("Bad point value in MultiPoint.", inner.clone());

        assert_eq!(outer.kind(), ErrorKind::Range);
        assert_eq!(
            outer.to_string(),
            "Bad point value in MultiPoint. Point value must be array"
        );
        assert_eq!(outer.root_cause(), &inner);

        let source = outer.source().unwrap();
        assert_eq!(source.to_string(), inner.to_string());
    }

    #[test]
    fn test_root_cause_of_nested_range() {
        let inner = Error::UnexpectedValue("bad".to_string());
        let outer = Error::range("a.", Error::range("b.", inner.clone()));
        assert_eq!(outer.to_string(), "a. b. bad");
        assert_eq!(outer.root_cause(), &inner);
    }
}
