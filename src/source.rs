//! Character sources consumed by the parser.
//!
//! The parser reads through four primitives only, collected in [`CharSource`]:
//! single-character read, one-character peek, a block read of N characters and
//! "read to end of line" (used to discard comments). There is no seeking.
//!
//! Two sources are provided:
//!
//! - [`StrSource`]: reads from an in-memory `&str`
//! - [`ReadSource`]: decodes UTF-8 incrementally from any [`io::BufRead`]
//!
//! [`Cursor`] wraps a source and tracks the 1-based line and column of every
//! character handed out, which is what error positions are built from.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlstream::source::{CharSource, StrSource};
//!
//! let mut source = StrSource::new("ab\ncd");
//! assert_eq!(source.peek_char().unwrap(), Some('a'));
//! assert_eq!(source.read_line().unwrap(), "ab\n");
//!
//! let mut block = ['\0'; 3];
//! assert_eq!(source.read_block(&mut block).unwrap(), 2);
//! assert_eq!(&block[..2], &['c', 'd']);
//! ```

use crate::{Error, Result};
use std::io::{self, BufRead, Read};

/// A forward-only character stream.
///
/// End of input is reported as `Ok(None)` (or a short count) rather than an
/// error. Only `read_char` and `peek_char` are required; the block and line
/// reads have default implementations on top of them.
pub trait CharSource {
    /// Consumes and returns the next character.
    fn read_char(&mut self) -> Result<Option<char>>;

    /// Returns the next character without consuming it.
    fn peek_char(&mut self) -> Result<Option<char>>;

    /// Fills `buf` with up to `buf.len()` characters and returns how many were
    /// read. A short count means the input ended.
    fn read_block(&mut self, buf: &mut [char]) -> Result<usize> {
        for (read, slot) in buf.iter_mut().enumerate() {
            match self.read_char()? {
                Some(ch) => *slot = ch,
                None => return Ok(read),
            }
        }
        Ok(buf.len())
    }

    /// Consumes the rest of the current line, including its `\n` when present,
    /// and returns the consumed text.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        while let Some(ch) = self.read_char()? {
            line.push(ch);
            if ch == '\n' {
                break;
            }
        }
        Ok(line)
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> Result<Option<char>> {
        (**self).read_char()
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        (**self).peek_char()
    }

    fn read_block(&mut self, buf: &mut [char]) -> Result<usize> {
        (**self).read_block(buf)
    }

    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }
}

/// A [`CharSource`] over an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> StrSource<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        StrSource { input, position: 0 }
    }

    /// Returns the part of the input that has not been read yet.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> Result<Option<char>> {
        let next = self.remaining().chars().next();
        if let Some(ch) = next {
            self.position += ch.len_utf8();
        }
        Ok(next)
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        Ok(self.remaining().chars().next())
    }

    fn read_line(&mut self) -> Result<String> {
        let rest = self.remaining();
        let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
        self.position += end;
        Ok(rest[..end].to_string())
    }
}

/// A [`CharSource`] decoding UTF-8 from a buffered reader.
///
/// Invalid UTF-8 surfaces as [`Error::Io`]. The reader is never closed by the
/// source; it is handed back by [`ReadSource::into_inner`].
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    peeked: Option<char>,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        ReadSource {
            reader,
            peeked: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn decode_char(&mut self) -> Result<Option<char>> {
        let lead = match self.reader.fill_buf()?.first() {
            Some(&b) => b,
            None => return Ok(None),
        };
        let width = utf8_width(lead)
            .ok_or_else(|| Error::io(&format!("invalid UTF-8 lead byte 0x{:02x}", lead)))?;

        let mut bytes = [0u8; 4];
        self.reader
            .read_exact(&mut bytes[..width])
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::io("truncated UTF-8 sequence"),
                _ => Error::from(e),
            })?;
        let text = std::str::from_utf8(&bytes[..width]).map_err(|e| Error::io(&e.to_string()))?;
        Ok(text.chars().next())
    }
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn read_char(&mut self) -> Result<Option<char>> {
        match self.peeked.take() {
            Some(ch) => Ok(Some(ch)),
            None => self.decode_char(),
        }
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.decode_char()?;
        }
        Ok(self.peeked)
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// A 1-based line and column, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn start() -> Self {
        Position { line: 1, col: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A character together with the position it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub ch: char,
    pub pos: Position,
}

/// Position-tracking wrapper around a [`CharSource`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::source::{Cursor, Position, StrSource};
///
/// let mut cursor = Cursor::new(StrSource::new("a\nb"));
/// cursor.read().unwrap();
/// cursor.read().unwrap();
/// let b = cursor.read().unwrap().unwrap();
/// assert_eq!(b.pos, Position { line: 2, col: 1 });
/// ```
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    next: Position,
}

impl<S: CharSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Cursor {
            source,
            next: Position::start(),
        }
    }

    /// Position of the next character to be read.
    #[must_use]
    pub fn position(&self) -> Position {
        self.next
    }

    pub fn read(&mut self) -> Result<Option<Located>> {
        Ok(self.source.read_char()?.map(|ch| Located {
            ch,
            pos: self.advance(ch),
        }))
    }

    pub fn peek(&mut self) -> Result<Option<char>> {
        self.source.peek_char()
    }

    /// Reads up to `n` characters in one block read.
    pub fn read_block(&mut self, n: usize) -> Result<Vec<Located>> {
        let mut buf = vec!['\0'; n];
        let read = self.source.read_block(&mut buf)?;
        Ok(buf[..read]
            .iter()
            .map(|&ch| Located {
                ch,
                pos: self.advance(ch),
            })
            .collect())
    }

    /// Discards the rest of the current line, including its line feed.
    pub fn skip_line(&mut self) -> Result<()> {
        let line = self.source.read_line()?;
        for ch in line.chars() {
            self.advance(ch);
        }
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn advance(&mut self, ch: char) -> Position {
        let pos = self.next;
        if ch == '\n' {
            self.next.line += 1;
            self.next.col = 1;
        } else {
            self.next.col += 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_source_multibyte() {
        let mut source = StrSource::new("é🦀x");
        assert_eq!(source.read_char().unwrap(), Some('é'));
        assert_eq!(source.peek_char().unwrap(), Some('🦀'));
        assert_eq!(source.read_char().unwrap(), Some('🦀'));
        assert_eq!(source.remaining(), "x");
    }

    #[test]
    fn test_str_source_read_line_without_newline() {
        let mut source = StrSource::new("# trailing comment");
        assert_eq!(source.read_line().unwrap(), "# trailing comment");
        assert_eq!(source.read_char().unwrap(), None);
        assert_eq!(source.read_line().unwrap(), "");
    }

    #[test]
    fn test_read_source_decodes_utf8() {
        let mut source = ReadSource::new("a=ü\n漢".as_bytes());
        let mut chars = Vec::new();
        while let Some(ch) = source.read_char().unwrap() {
            chars.push(ch);
        }
        assert_eq!(chars, vec!['a', '=', 'ü', '\n', '漢']);
    }

    #[test]
    fn test_read_source_peek_then_line() {
        let mut source = ReadSource::new(&b"xy\nz"[..]);
        assert_eq!(source.peek_char().unwrap(), Some('x'));
        assert_eq!(source.read_line().unwrap(), "xy\n");
        assert_eq!(source.read_char().unwrap(), Some('z'));
        assert_eq!(source.peek_char().unwrap(), None);
    }

    #[test]
    fn test_read_source_rejects_invalid_utf8() {
        let mut source = ReadSource::new(&[0xFFu8, 0x41][..]);
        assert!(matches!(source.read_char(), Err(Error::Io(_))));

        let mut truncated = ReadSource::new(&[0xE6u8, 0xBC][..]);
        assert!(matches!(truncated.read_char(), Err(Error::Io(_))));
    }

    #[test]
    fn test_short_block_read() {
        let mut cursor = Cursor::new(StrSource::new("\""));
        let block = cursor.read_block(2).unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block[0].ch, '"');
        assert_eq!(cursor.position(), Position { line: 1, col: 2 });
    }

    #[test]
    fn test_cursor_skip_line_tracks_position() {
        let mut cursor = Cursor::new(StrSource::new("# note\nk"));
        cursor.skip_line().unwrap();
        assert_eq!(cursor.position(), Position { line: 2, col: 1 });
        let k = cursor.read().unwrap().unwrap();
        assert_eq!(k.ch, 'k');
        assert_eq!(k.pos, Position { line: 2, col: 1 });
    }
}
