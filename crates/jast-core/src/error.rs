//! Error types for JSON AST encoding and decoding operations.

use std::fmt;
use thiserror::Error;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JastError {
    /// The input text violates the JSON grammar (decoding path).
    /// Positions are 1-based; `column` counts characters, not bytes.
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    MalformedInput {
        line: usize,
        column: usize,
        message: String,
    },

    /// The document nests more containers than the decoder allows.
    #[error("nesting depth exceeds limit of {limit} at line {line}, column {column}")]
    DepthExceeded {
        limit: usize,
        line: usize,
        column: usize,
    },

    /// The value tree contains something JSON cannot represent (encoding path).
    #[error("cannot encode {0}")]
    UnencodableValue(Unencodable),
}

impl JastError {
    /// True for failures raised while decoding, i.e. the ones lenient mode
    /// turns into `Value::Nothing`.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            JastError::MalformedInput { .. } | JastError::DepthExceeded { .. }
        )
    }

    /// The 1-based `(line, column)` of a decode failure.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            JastError::MalformedInput { line, column, .. }
            | JastError::DepthExceeded { line, column, .. } => Some((*line, *column)),
            JastError::UnencodableValue(_) => None,
        }
    }
}

/// What made a value unencodable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unencodable {
    /// `Value::Nothing` reached the encoder.
    Nothing,
    /// A `Value::Double` holding NaN or an infinity.
    NonFinite(f64),
}

impl fmt::Display for Unencodable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unencodable::Nothing => f.write_str("Nothing (no value)"),
            Unencodable::NonFinite(n) => write!(f, "non-finite number {n}"),
        }
    }
}

/// Convenience alias used throughout jast-core.
pub type Result<T> = std::result::Result<T, JastError>;
