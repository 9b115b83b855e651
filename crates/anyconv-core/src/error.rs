//! Error types for anyconv
//!
//! Coercion failures share one reporting shape regardless of whether the
//! literal was malformed, out of range, aimed at an unsupported target, or
//! rejected by the JSON decoder. Path shape errors only come out of
//! `get_item`; best-effort extraction never fails.
//!
//! Copyright (c) 2025 Anyconv Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use thiserror::Error;

use crate::value::Value;

/// Main error type for anyconv operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A value could not be coerced into the requested type
    #[error("Conversion failed: cannot convert {from} to {to} ({kind}): {value}")]
    Conversion {
        from: String,
        to: String,
        value: String,
        kind: ConversionKind,
    },

    /// A path segment required a different container than the one found
    #[error("Type mismatch: expected {expected} to get key '{segment}' in '{path}', found {found}: {node}")]
    Shape {
        segment: String,
        path: String,
        expected: String,
        found: String,
        node: String,
    },

    /// Sequence index outside the sequence
    #[error("Index out of bounds: {index} in sequence of length {length} at '{segment}' in '{path}'")]
    IndexOutOfBounds {
        index: i64,
        length: usize,
        segment: String,
        path: String,
    },

    /// JSON encode/decode failures
    #[error("JSON error: {message}")]
    Json { message: String },
}

/// Why a conversion was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    /// The literal is not valid for the target
    Syntax,
    /// The literal is valid but does not fit the target width
    Range,
    /// The target type can never be produced by coercion
    Unsupported,
    /// The text was not a JSON document of the target's shape
    Decode,
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionKind::Syntax => write!(f, "invalid syntax"),
            ConversionKind::Range => write!(f, "value out of range"),
            ConversionKind::Unsupported => write!(f, "unsupported target"),
            ConversionKind::Decode => write!(f, "decode failed"),
        }
    }
}

/// Result type alias for anyconv operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a conversion error for `value` aimed at the type named `to`
    pub fn conversion(value: &Value, to: impl Into<String>, kind: ConversionKind) -> Self {
        Self::Conversion {
            from: value.type_name().to_string(),
            to: to.into(),
            value: value.to_string(),
            kind,
        }
    }

    /// Create a shape error for a segment that hit the wrong container
    pub fn shape(segment: &str, path: &str, expected: &str, node: &Value) -> Self {
        Self::Shape {
            segment: segment.to_string(),
            path: path.to_string(),
            expected: expected.to_string(),
            found: node.type_name().to_string(),
            node: node.to_string(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: i64, length: usize, segment: &str, path: &str) -> Self {
        Self::IndexOutOfBounds {
            index,
            length,
            segment: segment.to_string(),
            path: path.to_string(),
        }
    }

    /// The conversion failure kind, if this is a conversion error
    pub fn conversion_kind(&self) -> Option<ConversionKind> {
        match self {
            Error::Conversion { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether this error came from path resolution rather than coercion
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Shape { .. } | Error::IndexOutOfBounds { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
        }
    }
}
