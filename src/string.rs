//! Quoted string decoding.
//!
//! Decodes the four TOML string flavors from a [`Cursor`], starting right after
//! the opening quote (or triple quote):
//!
//! | Flavor | Opener | Escapes | Line breaks |
//! |---|---|---|---|
//! | Basic | `"` | yes | rejected |
//! | Literal | `'` | no | rejected |
//! | Multi-line basic | `"""` | yes, plus line splicing | kept, first one trimmed |
//! | Multi-line literal | `'''` | no | kept, first one trimmed |
//!
//! Characters are accumulated raw; basic strings then go through a single
//! unescape pass over the fixed table `\b \t \n \f \r \' \" \\`.
//!
//! The caller may already have consumed up to two characters while probing for
//! a triple-quote opener. Those are passed in as `leftover` and read first. If
//! the string closes before the leftover is used up, the rest comes back in
//! [`Decoded::excess`].

use crate::source::{CharSource, Cursor, Located, Position};
use crate::{Error, Result};
use std::collections::VecDeque;

/// The quote character that opened a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `"`, escapes are processed
    Basic,
    /// `'`, content is verbatim
    Literal,
}

impl Quote {
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(Quote::Basic),
            '\'' => Some(Quote::Literal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Quote::Basic => '"',
            Quote::Literal => '\'',
        }
    }
}

/// A decoded string plus any probed characters it did not need.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: String,
    pub excess: Vec<Located>,
}

/// Decodes one string literal.
///
/// `start` is the position of the opening quote and is used for errors that
/// concern the string as a whole.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::source::{Cursor, Position, StrSource};
/// use serde_tomlstream::string::{decode, Quote};
///
/// let mut cursor = Cursor::new(StrSource::new("a\\tb\" # rest"));
/// let decoded = decode(Quote::Basic, false, &mut cursor, Vec::new(), Position::start()).unwrap();
/// assert_eq!(decoded.value, "a\tb");
/// assert!(decoded.excess.is_empty());
/// ```
pub fn decode<S: CharSource>(
    quote: Quote,
    multi_line: bool,
    cursor: &mut Cursor<S>,
    leftover: Vec<Located>,
    start: Position,
) -> Result<Decoded> {
    let mut input = Input {
        leftover: leftover.into(),
        cursor,
    };

    let raw = if multi_line {
        read_multi_line(quote, &mut input, start)?
    } else {
        read_single_line(quote, &mut input, start)?
    };

    let value = match quote {
        Quote::Basic => unescape(&raw, start)?,
        Quote::Literal => raw,
    };

    trace!(?quote, multi_line, len = value.len(), "decoded string");

    Ok(Decoded {
        value,
        excess: input.leftover.into_iter().collect(),
    })
}

/// Probed characters first, then the cursor.
struct Input<'c, S> {
    leftover: VecDeque<Located>,
    cursor: &'c mut Cursor<S>,
}

impl<S: CharSource> Input<'_, S> {
    fn next(&mut self) -> Result<Option<Located>> {
        match self.leftover.pop_front() {
            Some(located) => Ok(Some(located)),
            None => self.cursor.read(),
        }
    }

    fn peek(&mut self) -> Result<Option<char>> {
        match self.leftover.front() {
            Some(located) => Ok(Some(located.ch)),
            None => self.cursor.peek(),
        }
    }
}

fn unterminated(start: Position) -> Error {
    Error::malformed_string(start.line, start.col, "unterminated string")
}

fn read_single_line<S: CharSource>(
    quote: Quote,
    input: &mut Input<'_, S>,
    start: Position,
) -> Result<String> {
    let mut buf = String::new();
    let mut escaped = false;

    loop {
        let Some(Located { ch, pos }) = input.next()? else {
            return Err(unterminated(start));
        };

        if ch == '\n' || ch == '\r' {
            return Err(Error::unexpected_newline(pos.line, pos.col));
        }

        if escaped {
            buf.push(ch);
            escaped = false;
        } else if ch == quote.as_char() {
            return Ok(buf);
        } else {
            if ch == '\\' && quote == Quote::Basic {
                escaped = true;
            }
            buf.push(ch);
        }
    }
}

fn read_multi_line<S: CharSource>(
    quote: Quote,
    input: &mut Input<'_, S>,
    start: Position,
) -> Result<String> {
    let closing = quote.as_char();
    let mut buf = String::new();
    let mut quote_run = 0;
    let mut escaped = false;
    let mut trimming = true;

    loop {
        let Some(Located { ch, .. }) = input.next()? else {
            return Err(unterminated(start));
        };

        // A newline right after the opener is not content. CR is dropped
        // without closing the window.
        if trimming {
            match ch {
                '\r' => continue,
                '\n' => {
                    trimming = false;
                    continue;
                }
                _ => trimming = false,
            }
        }

        if escaped {
            buf.push(ch);
            escaped = false;
            quote_run = 0;
            continue;
        }

        if ch == closing {
            quote_run += 1;
            if quote_run == 3 {
                // the two quotes before this one were accumulated as content
                buf.truncate(buf.len() - 2);
                return Ok(buf);
            }
            buf.push(ch);
            continue;
        }
        quote_run = 0;

        if ch == '\\' && quote == Quote::Basic {
            if input.peek()?.is_some_and(is_splice_whitespace) {
                while input.peek()?.is_some_and(is_splice_whitespace) {
                    input.next()?;
                }
            } else {
                buf.push(ch);
                escaped = true;
            }
            continue;
        }

        buf.push(ch);
    }
}

fn is_splice_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Replaces backslash escapes in a basic string body.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::source::Position;
/// use serde_tomlstream::string::unescape;
///
/// assert_eq!(unescape(r#"say \"hi\"\n"#, Position::start()).unwrap(), "say \"hi\"\n");
/// assert!(unescape(r"\u00e9", Position::start()).is_err());
/// ```
pub fn unescape(raw: &str, start: Position) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let unescaped = match chars.next() {
            Some('b') => '\u{0008}',
            Some('t') => '\t',
            Some('n') => '\n',
            Some('f') => '\u{000C}',
            Some('r') => '\r',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('\\') => '\\',
            Some(other) => {
                return Err(Error::undefined_escape(
                    start.line,
                    start.col,
                    &format!("\\{}", other),
                ))
            }
            None => {
                return Err(Error::malformed_string(
                    start.line,
                    start.col,
                    "dangling backslash",
                ))
            }
        };
        out.push(unescaped);
    }

    Ok(out)
}
