//! Accepted TOML syntax
//!
//! This module documents the subset of TOML the parser accepts and how each
//! construct is decoded.
//!
//! # Overview
//!
//! A document is a sequence of lines. Each non-blank line is either a comment
//! or a single `key = "value"` assignment, optionally followed by a comment.
//!
//! ```text
//! # Comments run to the end of the line
//! title = "Example"          # basic string
//! path  = 'C:\Users\demo'    # literal string
//! server.host = "localhost"  # dotted key
//! "quoted key" = "ok"
//! ```
//!
//! # Keys
//!
//! | Form | Example | Result |
//! |------|---------|--------|
//! | Bare | `user_name-2` | one segment of `A-Z a-z 0-9 _ -` |
//! | Quoted | `"a b"`, `'a.b'` | one segment, decoded like a single-line string |
//! | Dotted | `a.b."c d"` | a path; each segment but the last names a table |
//!
//! **Rules**:
//! - Spaces and tabs may surround `=` and `.`, but not split a bare segment
//! - Assigning a key twice keeps the last value (no duplicate-key error)
//! - A dotted key may not walk through a key that already holds a string
//!
//! # Values
//!
//! Only quoted strings are values. Every other TOML value (integers, floats,
//! booleans, dates, arrays, inline tables) is rejected with
//! [`Error::UnsupportedValueType`](crate::Error::UnsupportedValueType).
//!
//! ## Basic strings
//!
//! ```text
//! greeting = "Hello,\tworld\n"
//! ```
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\b` | backspace (U+0008) |
//! | `\t` | tab |
//! | `\n` | line feed |
//! | `\f` | form feed (U+000C) |
//! | `\r` | carriage return |
//! | `\'` | apostrophe |
//! | `\"` | quote |
//! | `\\` | backslash |
//!
//! Any other escape, including `\uXXXX` and `\UXXXXXXXX`, is an
//! [`Error::UndefinedEscapeSequence`](crate::Error::UndefinedEscapeSequence).
//! A raw line break is an [`Error::UnexpectedNewline`](crate::Error::UnexpectedNewline).
//!
//! ## Literal strings
//!
//! ```text
//! regex = '<\i\c*\s*>'
//! ```
//!
//! Content is taken verbatim; there is no way to write `'` inside one.
//!
//! ## Multi-line strings
//!
//! ```text
//! poem = """
//! Roses are red \
//!     violets are blue"""
//! ```
//!
//! - A newline directly after the opening `"""` or `'''` is dropped
//! - In basic multi-line strings, a backslash followed by whitespace or a
//!   newline removes itself and all whitespace and newlines after it
//! - Up to two quote characters in a row are content; the third closes
//!
//! The example above decodes to `Roses are red violets are blue`.
//!
//! # After a value
//!
//! Only spaces, tabs and a comment may follow the closing quote on the same
//! line. [`ParseOptions::lenient`](crate::ParseOptions::lenient) discards the
//! rest of the line instead.
//!
//! # Not supported
//!
//! - Table headers `[table]` and array tables `[[table]]`
//! - Non-string values
//! - Unicode escapes

// This module contains only documentation; no implementation code
