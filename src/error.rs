//! Error types for TOML parsing and tree deserialization.
//!
//! Every parse error is terminal: the parser stops at the first problem and
//! returns no partial tree.
//!
//! ## Error Categories
//!
//! - **Lexical errors**: a character the current parser state does not accept
//! - **String errors**: raw line breaks, undefined escapes, unterminated strings
//! - **Missing values**: a key followed by a comment, a newline or end of input
//! - **Unsupported input**: TOML constructs outside the accepted subset
//! - **I/O errors**: failures reading or decoding the character source
//!
//! Positions are 1-based line and column numbers counted in characters.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlstream::{parse_str, Error};
//!
//! let err = parse_str("name = 42").unwrap_err();
//! assert!(matches!(err, Error::UnsupportedValueType { line: 1, col: 8, .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing or mapping a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading the character source
    #[error("IO error: {0}")]
    Io(String),

    /// A character the current state's grammar forbids
    #[error("Unexpected character {found:?} at line {line}, column {col}")]
    UnexpectedCharacter { line: usize, col: usize, found: char },

    /// A raw line break inside a single-line string
    #[error("Unexpected newline in single-line string at line {line}, column {col}")]
    UnexpectedNewline { line: usize, col: usize },

    /// A key with no value before a comment, newline or end of input
    #[error("Missing value for key `{key}` at line {line}, column {col}")]
    MissingValue {
        line: usize,
        col: usize,
        key: String,
    },

    /// A backslash escape outside the supported table
    #[error("Undefined escape sequence `{sequence}` in string starting at line {line}, column {col}")]
    UndefinedEscapeSequence {
        line: usize,
        col: usize,
        sequence: String,
    },

    /// Structural string problems not covered by the other variants
    #[error("Malformed string at line {line}, column {col}: {msg}")]
    MalformedString {
        line: usize,
        col: usize,
        msg: String,
    },

    /// A value that is not a quoted string
    #[error("Unsupported value type starting with {found:?} at line {line}, column {col}\nHelp: only quoted string values are supported")]
    UnsupportedValueType { line: usize, col: usize, found: char },

    /// A TOML construct the parser recognizes but does not implement
    #[error("Unsupported feature at line {line}, column {col}: {feature}")]
    UnsupportedFeature {
        line: usize,
        col: usize,
        feature: String,
    },

    /// A dotted key walks through an existing leaf value
    #[error("Key `{key}` at line {line}, column {col} is already defined as a value")]
    KeyConflict {
        line: usize,
        col: usize,
        key: String,
    },

    /// Custom error, raised by serde mapping
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unexpected character error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlstream::Error;
    ///
    /// let err = Error::unexpected_character(3, 1, '=');
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn unexpected_character(line: usize, col: usize, found: char) -> Self {
        Error::UnexpectedCharacter { line, col, found }
    }

    pub fn unexpected_newline(line: usize, col: usize) -> Self {
        Error::UnexpectedNewline { line, col }
    }

    /// Creates a missing value error for the dotted form of `key`.
    pub fn missing_value(line: usize, col: usize, key: &str) -> Self {
        Error::MissingValue {
            line,
            col,
            key: key.to_string(),
        }
    }

    /// Creates an undefined escape error. `sequence` includes the backslash.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlstream::Error;
    ///
    /// let err = Error::undefined_escape(1, 5, "\\q");
    /// assert!(err.to_string().contains("`\\q`"));
    /// ```
    pub fn undefined_escape(line: usize, col: usize, sequence: &str) -> Self {
        Error::UndefinedEscapeSequence {
            line,
            col,
            sequence: sequence.to_string(),
        }
    }

    pub fn malformed_string(line: usize, col: usize, msg: &str) -> Self {
        Error::MalformedString {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    pub fn unsupported_value(line: usize, col: usize, found: char) -> Self {
        Error::UnsupportedValueType { line, col, found }
    }

    /// Creates an error for a recognized but unimplemented TOML construct.
    pub fn unsupported_feature(line: usize, col: usize, feature: &str) -> Self {
        Error::UnsupportedFeature {
            line,
            col,
            feature: feature.to_string(),
        }
    }

    pub fn key_conflict(line: usize, col: usize, key: &str) -> Self {
        Error::KeyConflict {
            line,
            col,
            key: key.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlstream::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for source reading or decoding failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` position of the error, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::UnexpectedCharacter { line, col, .. }
            | Error::UnexpectedNewline { line, col }
            | Error::MissingValue { line, col, .. }
            | Error::UndefinedEscapeSequence { line, col, .. }
            | Error::MalformedString { line, col, .. }
            | Error::UnsupportedValueType { line, col, .. }
            | Error::UnsupportedFeature { line, col, .. }
            | Error::KeyConflict { line, col, .. } => Some((*line, *col)),
            Error::Io(_) | Error::Custom(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
