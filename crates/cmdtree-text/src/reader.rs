//! Cursor-based scanning over a single command line.
//!
//! Offsets are byte offsets into the input. Every token the grammar
//! recognises is ASCII, so a cursor only ever lands inside a multi-byte
//! character when a custom argument type puts it there.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::{CommandSyntaxError, SyntaxErrorKind};

/// The escape character inside quoted strings.
pub const ESCAPE: char = '\\';
/// Double quote.
pub const DOUBLE_QUOTE: char = '"';
/// Single quote.
pub const SINGLE_QUOTE: char = '\'';
/// The only separator accepted between two tokens.
pub const ARGUMENT_SEPARATOR: char = ' ';

/// True for characters that may appear in a numeric literal.
#[inline]
pub fn is_allowed_number(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// True for characters that may open a quoted string.
#[inline]
pub fn is_quoted_string_start(c: char) -> bool {
    c == DOUBLE_QUOTE || c == SINGLE_QUOTE
}

/// True for characters allowed in an unquoted string.
#[inline]
pub fn is_allowed_in_unquoted_string(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

/// A command line plus a read cursor.
///
/// Cloning is cheap: the input is shared, only the cursor is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReader {
    string: Arc<str>,
    cursor: usize,
}

impl StringReader {
    /// Create a reader positioned at the start of `input`.
    pub fn new(input: impl Into<Arc<str>>) -> Self {
        Self {
            string: input.into(),
            cursor: 0,
        }
    }

    /// The whole input.
    #[inline]
    pub fn string(&self) -> &str {
        &self.string
    }

    /// The whole input as a shared handle.
    #[inline]
    pub fn shared_string(&self) -> Arc<str> {
        Arc::clone(&self.string)
    }

    /// Current byte offset.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor. Offsets past the end are clamped to the end, and
    /// offsets inside a multi-byte character to the start of that character.
    #[inline]
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.string.len());
        while !self.string.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining_len(&self) -> usize {
        self.string.len() - self.cursor
    }

    /// Length of the whole input in bytes.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.string.len()
    }

    /// Everything before the cursor.
    #[inline]
    pub fn read_so_far(&self) -> &str {
        self.string.get(..self.cursor).unwrap_or("")
    }

    /// Everything from the cursor on.
    #[inline]
    pub fn remaining(&self) -> &str {
        self.string.get(self.cursor..).unwrap_or("")
    }

    /// True when at least `len` more bytes can be read.
    #[inline]
    pub fn can_read_len(&self, len: usize) -> bool {
        self.cursor + len <= self.string.len()
    }

    /// True when anything is left to read.
    #[inline]
    pub fn can_read(&self) -> bool {
        self.can_read_len(1)
    }

    /// The character at the cursor, or `None` at end of input.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The character `offset` bytes past the cursor, or `None` when out of range.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.string
            .get(self.cursor + offset..)
            .and_then(|rest| rest.chars().next())
    }

    /// Consume and return the character at the cursor, or `None` at end of input.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Step over the character at the cursor. Does nothing at end of input.
    #[inline]
    pub fn skip(&mut self) {
        let _ = self.read();
    }

    /// Step over any run of whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip();
        }
    }

    /// Run `step`, putting the cursor back where it was if `step` fails.
    pub fn attempt<T, E>(
        &mut self,
        step: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let start = self.cursor;
        let result = step(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Consume while `pred` holds, returning the consumed slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &str {
        let start = self.cursor;
        while self.peek().is_some_and(&pred) {
            self.skip();
        }
        &self.string[start..self.cursor]
    }

    fn read_number<T: FromStr>(
        &mut self,
        expected: SyntaxErrorKind,
        invalid: fn(String) -> SyntaxErrorKind,
    ) -> Result<T, CommandSyntaxError> {
        let start = self.cursor;
        let number = self.take_while(is_allowed_number).to_owned();
        if number.is_empty() {
            return Err(expected.with_context(self));
        }
        match number.parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.cursor = start;
                Err(invalid(number).with_context(self))
            }
        }
    }

    /// Read a 32-bit integer.
    pub fn read_int(&mut self) -> Result<i32, CommandSyntaxError> {
        self.read_number(SyntaxErrorKind::ExpectedInt, SyntaxErrorKind::InvalidInt)
    }

    /// Read a 64-bit integer.
    pub fn read_long(&mut self) -> Result<i64, CommandSyntaxError> {
        self.read_number(SyntaxErrorKind::ExpectedLong, SyntaxErrorKind::InvalidLong)
    }

    /// Read a 64-bit float.
    pub fn read_double(&mut self) -> Result<f64, CommandSyntaxError> {
        self.read_number(
            SyntaxErrorKind::ExpectedDouble,
            SyntaxErrorKind::InvalidDouble,
        )
    }

    /// Read a 32-bit float.
    pub fn read_float(&mut self) -> Result<f32, CommandSyntaxError> {
        self.read_number(SyntaxErrorKind::ExpectedFloat, SyntaxErrorKind::InvalidFloat)
    }

    /// Read the longest run of `[0-9A-Za-z_.+-]`, possibly empty.
    pub fn read_unquoted_string(&mut self) -> &str {
        self.take_while(is_allowed_in_unquoted_string)
    }

    /// Read a string opened by `"` or `'`. Empty input yields an empty string.
    pub fn read_quoted_string(&mut self) -> Result<String, CommandSyntaxError> {
        let Some(next) = self.peek() else {
            return Ok(String::new());
        };
        if !is_quoted_string_start(next) {
            return Err(SyntaxErrorKind::ExpectedStartOfQuote.with_context(self));
        }
        self.skip();
        self.read_string_until(next)
    }

    /// Read up to an unescaped `terminator`, consuming it.
    ///
    /// Only `\\` and `\<terminator>` are valid escapes. On an invalid escape
    /// the cursor is left on the escaped character.
    pub fn read_string_until(&mut self, terminator: char) -> Result<String, CommandSyntaxError> {
        let mut result = String::new();
        let mut escaped = false;

        while let Some(c) = self.read() {
            if escaped {
                if c == terminator || c == ESCAPE {
                    result.push(c);
                    escaped = false;
                } else {
                    self.cursor -= c.len_utf8();
                    return Err(SyntaxErrorKind::InvalidEscape(c).with_context(self));
                }
            } else if c == ESCAPE {
                escaped = true;
            } else if c == terminator {
                return Ok(result);
            } else {
                result.push(c);
            }
        }

        Err(SyntaxErrorKind::ExpectedEndOfQuote.with_context(self))
    }

    /// Read a quoted string if one starts at the cursor, else an unquoted one.
    pub fn read_string(&mut self) -> Result<String, CommandSyntaxError> {
        match self.peek() {
            None => Ok(String::new()),
            Some(next) if is_quoted_string_start(next) => {
                self.skip();
                self.read_string_until(next)
            }
            Some(_) => Ok(self.read_unquoted_string().to_owned()),
        }
    }

    /// Read `true` or `false` as an unquoted word.
    pub fn read_boolean(&mut self) -> Result<bool, CommandSyntaxError> {
        let start = self.cursor;
        let value = self.read_unquoted_string().to_owned();
        match value.as_str() {
            "" => Err(SyntaxErrorKind::ExpectedBool.with_context(self)),
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                self.cursor = start;
                Err(SyntaxErrorKind::InvalidBool(value).with_context(self))
            }
        }
    }

    /// Consume `c` or fail without moving.
    pub fn expect(&mut self, c: char) -> Result<(), CommandSyntaxError> {
        if self.peek() != Some(c) {
            return Err(SyntaxErrorKind::ExpectedSymbol(c).with_context(self));
        }
        self.skip();
        Ok(())
    }
}

impl From<&str> for StringReader {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StringReader {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
