//! The document parser.
//!
//! A three-state machine walks the input one character at a time:
//!
//! ```text
//!            bare key char / quote                 '='
//!   Idle ─────────────────────────▶ ReadingKey ─────────▶ ReadingValue
//!    ▲                                                        │
//!    └──────────────── quoted value decoded, line finished ───┘
//! ```
//!
//! Each state has its own transition function taking the current character and
//! returning the next state. Quoted values are handed to [`crate::string`]
//! after a two-character block read that tells `"` from `"""`.
//!
//! Memory use is bounded by the longest key and the longest string value; the
//! tree is the only thing that grows with the document.

use crate::options::{DottedKeys, TrailingContent};
use crate::source::{CharSource, Cursor, Located, Position};
use crate::string::{self, Quote};
use crate::{Error, Node, ParseOptions, Result, Table};
use std::collections::VecDeque;
use std::mem;

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between entries: skipping whitespace, newlines and comments.
    Idle,
    /// Accumulating a (possibly dotted) key until `=`.
    ReadingKey,
    /// After `=`, waiting for the value.
    ReadingValue,
}

/// Streaming TOML parser over a [`CharSource`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::source::StrSource;
/// use serde_tomlstream::{Node, Parser};
///
/// let tree = Parser::new(StrSource::new("# config\ntitle = 'demo'\n"))
///     .parse()
///     .unwrap();
/// assert_eq!(tree.get("title"), Some(&Node::leaf("demo")));
/// ```
pub struct Parser<S> {
    cursor: Cursor<S>,
    options: ParseOptions,
    state: State,
    // characters handed back by the string decoder, read before the cursor
    pending: VecDeque<Located>,
    key: KeyPath,
    root: Table,
}

impl<S: CharSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: S, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(source),
            options,
            state: State::Idle,
            pending: VecDeque::new(),
            key: KeyPath::default(),
            root: Table::new(),
        }
    }

    /// Reads the source to its end and returns the root table.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; no partial tree is produced.
    pub fn parse(mut self) -> Result<Table> {
        while let Some(located) = self.next_char()? {
            let next = match self.state {
                State::Idle => self.on_idle(located)?,
                State::ReadingKey => self.on_key(located)?,
                State::ReadingValue => self.on_value(located)?,
            };
            if next != self.state {
                trace!(from = ?self.state, to = ?next, line = located.pos.line, "transition");
            }
            self.state = next;
        }

        match self.state {
            State::Idle => {
                debug!(entries = self.root.len(), "parsed document");
                Ok(self.root)
            }
            State::ReadingKey | State::ReadingValue => {
                let pos = self.cursor.position();
                Err(Error::missing_value(pos.line, pos.col, &self.key.dotted()))
            }
        }
    }

    fn on_idle(&mut self, Located { ch, pos }: Located) -> Result<State> {
        match ch {
            ' ' | '\t' | '\n' | '\r' => Ok(State::Idle),
            '#' => {
                self.skip_line()?;
                Ok(State::Idle)
            }
            c if is_bare_key_char(c) => {
                self.key = KeyPath::starting_at(pos);
                self.key.push_bare(c);
                Ok(State::ReadingKey)
            }
            '"' | '\'' => {
                self.key = KeyPath::starting_at(pos);
                self.read_quoted_key(ch, pos)?;
                Ok(State::ReadingKey)
            }
            '[' => Err(Error::unsupported_feature(pos.line, pos.col, "table headers")),
            _ => Err(Error::unexpected_character(pos.line, pos.col, ch)),
        }
    }

    fn on_key(&mut self, Located { ch, pos }: Located) -> Result<State> {
        match ch {
            c if is_bare_key_char(c) => {
                if !self.key.push_bare(c) {
                    return Err(Error::unexpected_character(pos.line, pos.col, c));
                }
                Ok(State::ReadingKey)
            }
            ' ' | '\t' => {
                self.key.whitespace();
                Ok(State::ReadingKey)
            }
            '"' | '\'' if self.key.at_segment_start() => {
                self.read_quoted_key(ch, pos)?;
                Ok(State::ReadingKey)
            }
            '.' => {
                if self.options.dotted_keys == DottedKeys::Reject {
                    return Err(Error::unsupported_feature(pos.line, pos.col, "dotted keys"));
                }
                if !self.key.end_segment() {
                    return Err(Error::unexpected_character(pos.line, pos.col, ch));
                }
                Ok(State::ReadingKey)
            }
            '=' => {
                if !self.key.end_segment() {
                    return Err(Error::unexpected_character(pos.line, pos.col, ch));
                }
                Ok(State::ReadingValue)
            }
            '#' | '\n' | '\r' => Err(Error::missing_value(pos.line, pos.col, &self.key.dotted())),
            _ => Err(Error::unexpected_character(pos.line, pos.col, ch)),
        }
    }

    fn on_value(&mut self, Located { ch, pos }: Located) -> Result<State> {
        match ch {
            ' ' | '\t' => Ok(State::ReadingValue),
            '#' | '\n' | '\r' => Err(Error::missing_value(pos.line, pos.col, &self.key.dotted())),
            '"' | '\'' => {
                let quote = if ch == '"' { Quote::Basic } else { Quote::Literal };
                let value = self.read_value(quote, pos)?;
                self.insert(value)?;
                self.finish_line()?;
                Ok(State::Idle)
            }
            _ => Err(Error::unsupported_value(pos.line, pos.col, ch)),
        }
    }

    /// Decodes a quoted value whose opening quote was just read.
    fn read_value(&mut self, quote: Quote, start: Position) -> Result<String> {
        let probed = self.read_block(2)?;
        let multi_line = probed.len() == 2 && probed.iter().all(|l| l.ch == quote.as_char());
        let leftover = if multi_line { Vec::new() } else { probed };

        let decoded = string::decode(quote, multi_line, &mut self.cursor, leftover, start)?;
        self.pending.extend(decoded.excess);
        Ok(decoded.value)
    }

    fn read_quoted_key(&mut self, ch: char, start: Position) -> Result<()> {
        let quote = if ch == '"' { Quote::Basic } else { Quote::Literal };
        let leftover: Vec<Located> = self.pending.drain(..).collect();
        let decoded = string::decode(quote, false, &mut self.cursor, leftover, start)?;
        self.pending.extend(decoded.excess);
        self.key.push_quoted(decoded.value);
        Ok(())
    }

    fn insert(&mut self, raw: String) -> Result<()> {
        let start = self.key.start;
        let (parents, last) = match mem::take(&mut self.key).finish() {
            Some(path) => path,
            None => return Err(Error::missing_value(start.line, start.col, "")),
        };

        let mut table = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            table = match table.child_table_mut(segment) {
                Some(child) => child,
                None => {
                    return Err(Error::key_conflict(
                        start.line,
                        start.col,
                        &parents[..=depth].join("."),
                    ))
                }
            };
        }

        debug!(key = %last, depth = parents.len(), "insert leaf");
        table.insert(last, Node::leaf(raw));
        Ok(())
    }

    /// After a value only whitespace, a comment or the end of the line may follow.
    fn finish_line(&mut self) -> Result<()> {
        loop {
            match self.next_char()? {
                None => return Ok(()),
                Some(Located { ch: '\n', .. }) => return Ok(()),
                Some(Located {
                    ch: ' ' | '\t' | '\r',
                    ..
                }) => {}
                Some(Located { ch: '#', .. }) => return self.skip_line(),
                Some(Located { ch, pos }) => {
                    return match self.options.trailing_content {
                        TrailingContent::Reject => {
                            Err(Error::unexpected_character(pos.line, pos.col, ch))
                        }
                        TrailingContent::Ignore => {
                            trace!(line = pos.line, "ignoring trailing content");
                            self.skip_line()
                        }
                    }
                }
            }
        }
    }

    fn next_char(&mut self) -> Result<Option<Located>> {
        match self.pending.pop_front() {
            Some(located) => Ok(Some(located)),
            None => self.cursor.read(),
        }
    }

    fn read_block(&mut self, n: usize) -> Result<Vec<Located>> {
        let take = n.min(self.pending.len());
        let mut block: Vec<Located> = self.pending.drain(..take).collect();
        if block.len() < n {
            block.extend(self.cursor.read_block(n - block.len())?);
        }
        Ok(block)
    }

    fn skip_line(&mut self) -> Result<()> {
        while let Some(located) = self.pending.pop_front() {
            if located.ch == '\n' {
                return Ok(());
            }
        }
        self.cursor.skip_line()
    }
}

/// Bare keys are ASCII letters, digits, `_` and `-`.
#[must_use]
pub fn is_bare_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// The key being read: finished segments plus the one in progress.
#[derive(Debug, Default)]
struct KeyPath {
    segments: Vec<String>,
    buffer: String,
    // the current segment is complete; only `.` or `=` may follow
    closed: bool,
    start: Position,
}

impl KeyPath {
    fn starting_at(start: Position) -> Self {
        KeyPath {
            start,
            ..Default::default()
        }
    }

    fn at_segment_start(&self) -> bool {
        self.buffer.is_empty() && !self.closed
    }

    fn push_bare(&mut self, ch: char) -> bool {
        if self.closed {
            return false;
        }
        self.buffer.push(ch);
        true
    }

    fn push_quoted(&mut self, segment: String) {
        self.buffer = segment;
        self.closed = true;
    }

    fn whitespace(&mut self) {
        if !self.buffer.is_empty() {
            self.closed = true;
        }
    }

    fn end_segment(&mut self) -> bool {
        if self.at_segment_start() {
            return false;
        }
        self.segments.push(mem::take(&mut self.buffer));
        self.closed = false;
        true
    }

    fn finish(mut self) -> Option<(Vec<String>, String)> {
        let last = self.segments.pop()?;
        Some((self.segments, last))
    }

    fn dotted(&self) -> String {
        let mut parts = self.segments.clone();
        if !self.at_segment_start() {
            parts.push(self.buffer.clone());
        }
        parts.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn parse(input: &str) -> Result<Table> {
        Parser::new(StrSource::new(input)).parse()
    }

    fn leaf<'t>(table: &'t Table, key: &str) -> Option<&'t str> {
        table.get(key).and_then(Node::raw_value)
    }

    #[test]
    fn test_simple_pairs() {
        let tree = parse("a = \"1\"\nb='2'\n\n  c   =   \"3\"").unwrap();
        assert_eq!(leaf(&tree, "a"), Some("1"));
        assert_eq!(leaf(&tree, "b"), Some("2"));
        assert_eq!(leaf(&tree, "c"), Some("3"));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_empty_and_comment_only_documents() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n\t\n").unwrap().is_empty());
        assert!(parse("# only a comment").unwrap().is_empty());
    }

    #[test]
    fn test_empty_string_followed_by_comment() {
        let tree = parse("a = \"\"# note\nb = \"x\"").unwrap();
        assert_eq!(leaf(&tree, "a"), Some(""));
        assert_eq!(leaf(&tree, "b"), Some("x"));

        let tree = parse("a = ''\nb = ''").unwrap();
        assert_eq!(leaf(&tree, "a"), Some(""));
        assert_eq!(leaf(&tree, "b"), Some(""));
    }

    #[test]
    fn test_short_value_at_end_of_input() {
        assert_eq!(leaf(&parse("a = \"\"").unwrap(), "a"), Some(""));
        assert_eq!(leaf(&parse("a = \"x\"").unwrap(), "a"), Some("x"));
        assert!(matches!(
            parse("a = \""),
            Err(Error::MalformedString { .. })
        ));
        assert!(matches!(
            parse("a = \"x"),
            Err(Error::MalformedString { .. })
        ));
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse("key =").unwrap_err(),
            Error::MissingValue {
                line: 1,
                col: 6,
                key: "key".to_string()
            }
        );
        assert!(matches!(
            parse("key = # nothing"),
            Err(Error::MissingValue { line: 1, col: 7, .. })
        ));
        assert!(matches!(
            parse("key\n= \"v\""),
            Err(Error::MissingValue { line: 1, col: 4, .. })
        ));
        assert!(matches!(
            parse("key = \n\"v\""),
            Err(Error::MissingValue { .. })
        ));
        assert!(matches!(parse("key"), Err(Error::MissingValue { .. })));
    }

    #[test]
    fn test_unexpected_character_at_idle() {
        assert_eq!(
            parse("= \"v\"").unwrap_err(),
            Error::UnexpectedCharacter {
                line: 1,
                col: 1,
                found: '='
            }
        );
        assert!(matches!(
            parse("a = \"1\"\n\n  !b = \"2\""),
            Err(Error::UnexpectedCharacter {
                line: 3,
                col: 3,
                found: '!'
            })
        ));
    }

    #[test]
    fn test_space_inside_bare_key() {
        assert!(matches!(
            parse("my key = \"v\""),
            Err(Error::UnexpectedCharacter {
                line: 1,
                col: 4,
                found: 'k'
            })
        ));
    }

    #[test]
    fn test_unsupported_values() {
        for (input, found) in [
            ("n = 42", '4'),
            ("b = true", 't'),
            ("arr = [\"a\"]", '['),
            ("t = { x = \"1\" }", '{'),
            ("d = 1979-05-27", '1'),
        ] {
            assert!(
                matches!(parse(input), Err(Error::UnsupportedValueType { found: f, .. }) if f == found),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_table_header_is_unsupported() {
        assert!(matches!(
            parse("[server]\nhost = \"x\""),
            Err(Error::UnsupportedFeature { line: 1, col: 1, .. })
        ));
    }

    #[test]
    fn test_dotted_keys_nest() {
        let tree = parse("server.host = \"localhost\"\nserver . port = \"8080\"\nname = \"x\"").unwrap();
        let server = tree.get("server").unwrap().children().unwrap();
        assert_eq!(leaf(server, "host"), Some("localhost"));
        assert_eq!(leaf(server, "port"), Some("8080"));
        assert_eq!(leaf(&tree, "name"), Some("x"));
    }

    #[test]
    fn test_dotted_key_through_leaf_conflicts() {
        assert_eq!(
            parse("a = \"x\"\na.b = \"y\"").unwrap_err(),
            Error::KeyConflict {
                line: 2,
                col: 1,
                key: "a".to_string()
            }
        );
    }

    #[test]
    fn test_leaf_overwrites_container() {
        let tree = parse("a.b = \"y\"\na = \"x\"").unwrap();
        assert_eq!(leaf(&tree, "a"), Some("x"));
    }

    #[test]
    fn test_malformed_dotted_keys() {
        assert!(matches!(parse("a..b = \"x\""), Err(Error::UnexpectedCharacter { found: '.', .. })));
        assert!(matches!(parse(".a = \"x\""), Err(Error::UnexpectedCharacter { found: '.', .. })));
        assert!(matches!(parse("a. = \"x\""), Err(Error::UnexpectedCharacter { found: '=', .. })));
    }

    #[test]
    fn test_dotted_keys_rejected_by_option() {
        let options = ParseOptions::new().with_dotted_keys(DottedKeys::Reject);
        let err = Parser::with_options(StrSource::new("a.b = \"x\""), options)
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFeature { line: 1, col: 2, .. }));
    }

    #[test]
    fn test_quoted_keys() {
        let tree = parse("\"a b\" = \"1\"\n'c.d' = \"2\"\nsite.\"example.com\" = \"3\"\n\"\" = \"4\"").unwrap();
        assert_eq!(leaf(&tree, "a b"), Some("1"));
        assert_eq!(leaf(&tree, "c.d"), Some("2"));
        let site = tree.get("site").unwrap();
        assert_eq!(site.get("example.com"), Some(&Node::leaf("3")));
        assert_eq!(leaf(&tree, ""), Some("4"));
    }

    #[test]
    fn test_quoted_key_must_be_whole_segment() {
        assert!(matches!(
            parse("ab\"c\" = \"1\""),
            Err(Error::UnexpectedCharacter { found: '"', .. })
        ));
        assert!(matches!(
            parse("\"a\"b = \"1\""),
            Err(Error::UnexpectedCharacter { found: 'b', .. })
        ));
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(
            parse("a = \"x\" b = \"y\"").unwrap_err(),
            Error::UnexpectedCharacter {
                line: 1,
                col: 9,
                found: 'b'
            }
        );

        let tree = Parser::with_options(
            StrSource::new("a = \"x\" junk\nb = \"y\""),
            ParseOptions::lenient(),
        )
        .parse()
        .unwrap();
        assert_eq!(leaf(&tree, "a"), Some("x"));
        assert_eq!(leaf(&tree, "b"), Some("y"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let tree = parse("a = \"1\"\r\n# c\r\nb = '2'\r\n").unwrap();
        assert_eq!(leaf(&tree, "a"), Some("1"));
        assert_eq!(leaf(&tree, "b"), Some("2"));
    }

    #[test]
    fn test_multi_line_value_positions_following_lines() {
        let err = parse("a = \"\"\"\none\ntwo\"\"\"\n  ?").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedCharacter {
                line: 4,
                col: 3,
                found: '?'
            }
        );
    }

    #[test]
    fn test_bare_key_chars() {
        assert!(is_bare_key_char('a'));
        assert!(is_bare_key_char('Z'));
        assert!(is_bare_key_char('0'));
        assert!(is_bare_key_char('_'));
        assert!(is_bare_key_char('-'));
        assert!(!is_bare_key_char('.'));
        assert!(!is_bare_key_char('é'));
    }
}
