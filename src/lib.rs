//! # serde_tomlstream
//!
//! A streaming, character-oriented parser for the key/value core of TOML.
//!
//! ## What does it parse?
//!
//! Top-level `key = "value"` assignments, comments, and all four TOML string
//! flavors (basic, literal, and their multi-line forms) with exact escape and
//! newline-trimming rules. Keys may be bare, quoted or dotted. The result is a
//! tree of [`Node`]s whose leaves carry the decoded string payloads. See
//! [`syntax`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Single pass**: one forward read over the input, no tokenizer, no AST
//! - **Streaming**: reads from any [`source::CharSource`], including `io::Read`
//! - **Bounded memory**: one key buffer and one string buffer at a time
//! - **Strict errors**: every problem is reported with its line and column
//! - **Serde mapping**: map the parsed tree onto your own types
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_tomlstream::{parse_str, Node};
//!
//! let tree = parse_str(r#"
//! name = "api"  # service name
//! banner = """
//! Welcome \
//!   aboard"""
//! "#).unwrap();
//!
//! assert_eq!(tree.get("name"), Some(&Node::leaf("api")));
//! assert_eq!(tree.get("banner"), Some(&Node::leaf("Welcome aboard")));
//! ```
//!
//! ### Mapping onto Rust types
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_tomlstream::from_str;
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct Database {
//!     url: String,
//!     pool: u32,
//! }
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct Config {
//!     database: Database,
//! }
//!
//! let config: Config = from_str("database.url = 'postgres://db'\ndatabase.pool = \"8\"").unwrap();
//! assert_eq!(config.database.pool, 8);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: O(n) in the number of input characters
//! - **Memory**: O(longest key + longest string) besides the result tree
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - No panics in public API
//!
//! ## Logging
//!
//! Enable the `tracing` feature to get `trace`/`debug` events for state
//! transitions and inserted keys.

#[macro_use]
mod tracing_macros;

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod source;
pub mod string;
pub mod syntax;

pub use de::NodeDeserializer;
pub use error::{Error, Result};
pub use map::Table;
pub use node::Node;
pub use options::{DottedKeys, ParseOptions, TrailingContent};
pub use parser::{Parser, State};

use serde::de::DeserializeOwned;
use source::{CharSource, ReadSource, StrSource};
use std::io;

/// Parse a TOML string into a tree with default options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::{parse_str, Node};
///
/// let tree = parse_str("k = \"a\"\nk = \"b\"").unwrap();
/// assert_eq!(tree.get("k"), Some(&Node::leaf("b")));
/// ```
///
/// # Errors
///
/// Returns the first syntax error in the input, with its line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(s: &str) -> Result<Table> {
    parse_with_options(s, ParseOptions::default())
}

/// Parse a TOML string into a tree with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::{parse_with_options, ParseOptions};
///
/// let tree = parse_with_options("k = 'v' ; legacy", ParseOptions::lenient()).unwrap();
/// assert_eq!(tree.len(), 1);
/// ```
///
/// # Errors
///
/// Returns the first syntax error in the input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(s: &str, options: ParseOptions) -> Result<Table> {
    parse_source(StrSource::new(s), options)
}

/// Parse TOML bytes into a tree.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(v: &[u8]) -> Result<Table> {
    let s = std::str::from_utf8(v).map_err(|e| Error::io(&e.to_string()))?;
    parse_str(s)
}

/// Parse TOML from an I/O stream, decoding UTF-8 as it goes.
///
/// The reader is read to its end but not closed.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::{parse_reader, Node};
/// use std::io::Cursor;
///
/// let tree = parse_reader(Cursor::new(b"greeting = 'hi'\n")).unwrap();
/// assert_eq!(tree.get("greeting"), Some(&Node::leaf("hi")));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the stream is not UTF-8, or the input
/// is not valid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R>(reader: R) -> Result<Table>
where
    R: io::Read,
{
    parse_source(
        ReadSource::new(io::BufReader::new(reader)),
        ParseOptions::default(),
    )
}

/// Parse from any character source.
///
/// # Errors
///
/// Returns the first error raised by the source or the parser.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_source<S>(source: S, options: ParseOptions) -> Result<Table>
where
    S: CharSource,
{
    Parser::with_options(source, options).parse()
}

/// Map a parsed tree onto `T`.
///
/// # Errors
///
/// Returns an error if the tree does not have the shape `T` expects, or a
/// leaf cannot be converted to the field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_tree<T>(tree: Table) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(NodeDeserializer::new(Node::table(tree)))
}

/// Deserialize an instance of type `T` from a string of TOML text.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = \"1\"\ny = \"-2\"").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid or cannot be mapped onto `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_tree(parse_str(s)?)
}

/// Deserialize an instance of type `T` from bytes of TOML text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid input, or
/// cannot be mapped onto `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_tree(parse_slice(v)?)
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid, or it cannot
/// be mapped onto `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_tree(parse_reader(reader)?)
}
