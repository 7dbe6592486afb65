//! Syntax errors raised while reading and parsing command input.
//!
//! Every failure is described by a [`SyntaxErrorKind`], a closed set of
//! built-in failures plus [`SyntaxErrorKind::Custom`] for errors declared by
//! host argument types (see [`custom`]). A [`CommandSyntaxError`] pairs a kind
//! with the input and cursor it occurred at, so a front end can point at the
//! offending text.

pub mod custom;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::reader::StringReader;

pub use custom::{
    format_template, CustomError, Dynamic1ErrorType, Dynamic2ErrorType, Dynamic3ErrorType,
    Dynamic4ErrorType, DynamicErrorType, DynamicNErrorType, ErrorArg, SimpleErrorType,
};

/// Convenience type alias for Results using [`CommandSyntaxError`].
pub type Result<T, E = CommandSyntaxError> = std::result::Result<T, E>;

/// Number of characters shown before the cursor in a rendered error.
pub const CONTEXT_AMOUNT: usize = 10;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// Integer below the argument's minimum.
    #[error("Integer must not be less than {min}, found {found}")]
    IntegerTooLow {
        /// Parsed value.
        found: i32,
        /// Inclusive minimum.
        min: i32,
    },

    /// Integer above the argument's maximum.
    #[error("Integer must not be more than {max}, found {found}")]
    IntegerTooHigh {
        /// Parsed value.
        found: i32,
        /// Inclusive maximum.
        max: i32,
    },

    /// Long below the argument's minimum.
    #[error("Long must not be less than {min}, found {found}")]
    LongTooLow {
        /// Parsed value.
        found: i64,
        /// Inclusive minimum.
        min: i64,
    },

    /// Long above the argument's maximum.
    #[error("Long must not be more than {max}, found {found}")]
    LongTooHigh {
        /// Parsed value.
        found: i64,
        /// Inclusive maximum.
        max: i64,
    },

    /// Double below the argument's minimum.
    #[error("Double must not be less than {min}, found {found}")]
    DoubleTooLow {
        /// Parsed value.
        found: f64,
        /// Inclusive minimum.
        min: f64,
    },

    /// Double above the argument's maximum.
    #[error("Double must not be more than {max}, found {found}")]
    DoubleTooHigh {
        /// Parsed value.
        found: f64,
        /// Inclusive maximum.
        max: f64,
    },

    /// Float below the argument's minimum.
    #[error("Float must not be less than {min}, found {found}")]
    FloatTooLow {
        /// Parsed value.
        found: f32,
        /// Inclusive minimum.
        min: f32,
    },

    /// Float above the argument's maximum.
    #[error("Float must not be more than {max}, found {found}")]
    FloatTooHigh {
        /// Parsed value.
        found: f32,
        /// Inclusive maximum.
        max: f32,
    },

    /// A literal node did not match.
    #[error("Expected literal {0}")]
    ExpectedLiteral(String),

    /// A quoted string was required but no quote was found.
    #[error("Expected quote to start a string")]
    ExpectedStartOfQuote,

    /// A quoted string ran to the end of input.
    #[error("Unclosed quoted string")]
    ExpectedEndOfQuote,

    /// A backslash escaped something other than a backslash or the quote.
    #[error("Invalid escape sequence '{0}' in quoted string")]
    InvalidEscape(char),

    /// A boolean token was neither `true` nor `false`.
    #[error("Invalid bool, expected true or false but found '{0}'")]
    InvalidBool(String),

    /// A boolean was required but nothing was read.
    #[error("Expected bool")]
    ExpectedBool,

    /// Numeric literal did not parse as an integer.
    #[error("Invalid integer '{0}'")]
    InvalidInt(String),

    /// An integer was required but nothing numeric was read.
    #[error("Expected integer")]
    ExpectedInt,

    /// Numeric literal did not parse as a long.
    #[error("Invalid long '{0}'")]
    InvalidLong(String),

    /// A long was required but nothing numeric was read.
    #[error("Expected long")]
    ExpectedLong,

    /// Numeric literal did not parse as a double.
    #[error("Invalid double '{0}'")]
    InvalidDouble(String),

    /// A double was required but nothing numeric was read.
    #[error("Expected double")]
    ExpectedDouble,

    /// Numeric literal did not parse as a float.
    #[error("Invalid float '{0}'")]
    InvalidFloat(String),

    /// A float was required but nothing numeric was read.
    #[error("Expected float")]
    ExpectedFloat,

    /// [`StringReader::expect`] did not find its symbol.
    #[error("Expected '{0}'")]
    ExpectedSymbol(char),

    /// Nothing in the grammar matched the input.
    #[error("Unknown command")]
    UnknownCommand,

    /// Part of the input matched but the rest did not.
    #[error("Incorrect argument for command")]
    UnknownArgument,

    /// An argument parsed but was followed by something other than a space.
    #[error("Expected whitespace to end one argument, but found trailing data")]
    ExpectedArgumentSeparator,

    /// An argument type failed in a way it could not describe.
    #[error("Could not parse command: {0}")]
    ParseFailure(String),

    /// Error declared by a host argument type.
    #[error("{0}")]
    Custom(CustomError),
}

impl SyntaxErrorKind {
    /// Stable identifier for matching and metrics labeling.
    pub fn id(&self) -> &'static str {
        match self {
            Self::IntegerTooLow { .. } => "argument.integer.low",
            Self::IntegerTooHigh { .. } => "argument.integer.big",
            Self::LongTooLow { .. } => "argument.long.low",
            Self::LongTooHigh { .. } => "argument.long.big",
            Self::DoubleTooLow { .. } => "argument.double.low",
            Self::DoubleTooHigh { .. } => "argument.double.big",
            Self::FloatTooLow { .. } => "argument.float.low",
            Self::FloatTooHigh { .. } => "argument.float.big",
            Self::ExpectedLiteral(_) => "argument.literal.incorrect",
            Self::ExpectedStartOfQuote => "parsing.quote.expected.start",
            Self::ExpectedEndOfQuote => "parsing.quote.expected.end",
            Self::InvalidEscape(_) => "parsing.quote.escape",
            Self::InvalidBool(_) => "parsing.bool.invalid",
            Self::ExpectedBool => "parsing.bool.expected",
            Self::InvalidInt(_) => "parsing.int.invalid",
            Self::ExpectedInt => "parsing.int.expected",
            Self::InvalidLong(_) => "parsing.long.invalid",
            Self::ExpectedLong => "parsing.long.expected",
            Self::InvalidDouble(_) => "parsing.double.invalid",
            Self::ExpectedDouble => "parsing.double.expected",
            Self::InvalidFloat(_) => "parsing.float.invalid",
            Self::ExpectedFloat => "parsing.float.expected",
            Self::ExpectedSymbol(_) => "parsing.expected",
            Self::UnknownCommand => "command.unknown.command",
            Self::UnknownArgument => "command.unknown.argument",
            Self::ExpectedArgumentSeparator => "command.expected.separator",
            Self::ParseFailure(_) => "command.exception",
            Self::Custom(custom) => custom.id(),
        }
    }

    /// Turn this kind into an error without input context.
    #[inline]
    pub fn create(self) -> CommandSyntaxError {
        CommandSyntaxError::new(self)
    }

    /// Turn this kind into an error located at the reader's cursor.
    #[inline]
    pub fn with_context(self, reader: &StringReader) -> CommandSyntaxError {
        CommandSyntaxError::with_context(self, reader)
    }
}

/// A syntax error, optionally located in the input it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSyntaxError {
    kind: SyntaxErrorKind,
    input: Option<Arc<str>>,
    cursor: Option<usize>,
}

impl CommandSyntaxError {
    /// An error with no location.
    pub fn new(kind: SyntaxErrorKind) -> Self {
        Self {
            kind,
            input: None,
            cursor: None,
        }
    }

    /// An error located at the reader's current cursor.
    pub fn with_context(kind: SyntaxErrorKind, reader: &StringReader) -> Self {
        Self {
            kind,
            input: Some(reader.shared_string()),
            cursor: Some(reader.cursor()),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Consume the error, keeping only its kind.
    pub fn into_kind(self) -> SyntaxErrorKind {
        self.kind
    }

    /// The raw message, without location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// The full input, if known.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Byte offset into [`input`](Self::input) the error points at, if known.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The `...text<--[HERE]` window, if input and cursor are known.
    ///
    /// Shows up to [`CONTEXT_AMOUNT`] characters before the cursor, prefixed
    /// with `...` when more was cut off.
    pub fn context(&self) -> Option<String> {
        let input = self.input.as_deref()?;
        let mut cursor = self.cursor?.min(input.len());
        while !input.is_char_boundary(cursor) {
            cursor -= 1;
        }

        let before = &input[..cursor];
        let count = before.chars().count();
        let mut out = String::with_capacity(CONTEXT_AMOUNT + 12);
        if count > CONTEXT_AMOUNT {
            out.push_str("...");
        }
        out.extend(before.chars().skip(count.saturating_sub(CONTEXT_AMOUNT)));
        out.push_str("<--[HERE]");
        Some(out)
    }
}

impl fmt::Display for CommandSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let (Some(cursor), Some(context)) = (self.cursor, self.context()) {
            write!(f, " at position {cursor}: {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CommandSyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<SyntaxErrorKind> for CommandSyntaxError {
    fn from(kind: SyntaxErrorKind) -> Self {
        Self::new(kind)
    }
}
