//! Error types for catalog decoding and documentation parsing.

use thiserror::Error;

/// Error type for ApiDef text-format parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Unexpected character or token.
    #[error("line {line}, column {column}: unexpected {found}, expected {expected}")]
    Unexpected {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        /// What was found.
        found: String,
        /// What the parser was looking for.
        expected: String,
    },

    /// String literal or heredoc without a terminator.
    #[error("line {line}: unterminated {kind}")]
    Unterminated {
        /// Line where the literal starts.
        line: usize,
        /// Kind of literal (string, heredoc).
        kind: &'static str,
    },

    /// Invalid escape sequence inside a string literal.
    #[error("line {line}: invalid escape sequence '\\{sequence}'")]
    InvalidEscape {
        /// Line of the escape.
        line: usize,
        /// Escape sequence without the backslash.
        sequence: String,
    },

    /// An `op` block without a `graph_op_name`.
    #[error("op block starting at line {line} has no graph_op_name")]
    MissingOpName {
        /// Line where the block starts.
        line: usize,
    },
}

/// Error type for operation catalog handling.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Protobuf decoding error.
    #[error("failed to decode operation list: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Operation with an empty name.
    #[error("operation #{index} has an empty name")]
    EmptyName {
        /// Position of the operation in the catalog.
        index: usize,
    },

    /// Two operations share a name.
    #[error("duplicate operation definition: '{name}'")]
    DuplicateOp {
        /// Name of the duplicate.
        name: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected(
        line: usize,
        column: usize,
        found: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::Unexpected {
            line,
            column,
            found: found.into(),
            expected: expected.into(),
        }
    }
}

impl CatalogError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
