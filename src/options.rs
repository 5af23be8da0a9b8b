//! Configuration options for TOML parsing.
//!
//! This module provides types to adjust how strictly the parser treats input
//! beyond the core grammar:
//!
//! - [`ParseOptions`]: Main configuration struct
//! - [`TrailingContent`]: What to do with characters after a closing quote
//! - [`DottedKeys`]: Whether `a.b = "x"` builds nested tables or is rejected
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlstream::{parse_with_options, DottedKeys, ParseOptions, TrailingContent};
//!
//! let options = ParseOptions::new().with_trailing_content(TrailingContent::Ignore);
//! let tree = parse_with_options("name = \"Alice\" junk", options).unwrap();
//! assert_eq!(tree.get("name").and_then(|n| n.raw_value()), Some("Alice"));
//!
//! let options = ParseOptions::new().with_dotted_keys(DottedKeys::Reject);
//! assert!(parse_with_options("a.b = \"x\"", options).is_err());
//! ```

/// Policy for characters that follow a closing quote on the same line.
///
/// - **Reject**: Default, only whitespace or a comment may follow
/// - **Ignore**: The rest of the line is discarded without inspection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrailingContent {
    #[default]
    Reject,
    Ignore,
}

/// Policy for dotted keys such as `server.host = "..."`.
///
/// - **Nest**: Default, each segment walks or creates a container node
/// - **Reject**: The `.` separator fails with an unsupported feature error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DottedKeys {
    #[default]
    Nest,
    Reject,
}

/// Configuration options for TOML parsing.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::{DottedKeys, ParseOptions, TrailingContent};
///
/// // Default strict options
/// let options = ParseOptions::new();
/// assert_eq!(options.trailing_content, TrailingContent::Reject);
///
/// // Flat keys only
/// let options = ParseOptions::new().with_dotted_keys(DottedKeys::Reject);
/// assert_eq!(options.dotted_keys, DottedKeys::Reject);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub trailing_content: TrailingContent,
    pub dotted_keys: DottedKeys,
}

impl ParseOptions {
    /// Creates default options (trailing content rejected, dotted keys nested).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that accept trailing content after string values,
    /// the way older hand-written configs sometimes rely on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlstream::{ParseOptions, TrailingContent};
    ///
    /// let options = ParseOptions::lenient();
    /// assert_eq!(options.trailing_content, TrailingContent::Ignore);
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        ParseOptions {
            trailing_content: TrailingContent::Ignore,
            ..Default::default()
        }
    }

    /// Sets the policy for content after a closing quote.
    #[must_use]
    pub fn with_trailing_content(mut self, trailing_content: TrailingContent) -> Self {
        self.trailing_content = trailing_content;
        self
    }

    /// Sets the policy for dotted keys.
    #[must_use]
    pub fn with_dotted_keys(mut self, dotted_keys: DottedKeys) -> Self {
        self.dotted_keys = dotted_keys;
        self
    }
}
