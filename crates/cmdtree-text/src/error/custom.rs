//! Descriptors for syntax errors defined outside this crate.
//!
//! Argument types written by a host application describe their failures with
//! a [`SimpleErrorType`] (fixed message) or a [`DynamicErrorType`] /
//! [`DynamicNErrorType`] (message rendered from typed arguments). Declaring
//! them as `const` items gives each failure family a stable identity that a UI
//! can match on through [`CustomError::id`] instead of the message text.
//!
//! ```
//! use cmdtree_text::error::{Dynamic2ErrorType, SimpleErrorType};
//!
//! const NOT_A_PLAYER: SimpleErrorType = SimpleErrorType::new("game.not_a_player", "Only players may do that");
//! const OUT_OF_WORLD: Dynamic2ErrorType =
//!     Dynamic2ErrorType::new("game.out_of_world", "Position {0},{1} is outside the world");
//!
//! assert_eq!(NOT_A_PLAYER.create().to_string(), "Only players may do that");
//! assert_eq!(OUT_OF_WORLD.create([3i32.into(), (-7i32).into()]).to_string(), "Position 3,-7 is outside the world");
//! ```

use std::fmt;

use super::{CommandSyntaxError, SyntaxErrorKind};
use crate::reader::StringReader;

/// A typed argument captured by a dynamic error.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorArg {
    /// Free text, e.g. the offending token.
    Text(String),
    /// A single character.
    Char(char),
    /// An integral value.
    Int(i64),
    /// A floating point value.
    Float(f64),
}

impl fmt::Display for ErrorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{c}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ErrorArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ErrorArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<char> for ErrorArg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<i32> for ErrorArg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for ErrorArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for ErrorArg {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f32> for ErrorArg {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for ErrorArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// An occurrence of a host-defined error.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomError {
    id: &'static str,
    template: &'static str,
    args: Vec<ErrorArg>,
}

impl CustomError {
    /// Identifier of the descriptor that produced this error.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Arguments the message was rendered from.
    pub fn args(&self) -> &[ErrorArg] {
        &self.args
    }

    /// Number of arguments (0 for errors built from a [`SimpleErrorType`]).
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_template(self.template, &self.args))
    }
}

/// Render a message template.
///
/// `{0}`..`{9}` are replaced by the argument at that index, `{*}` by all
/// arguments joined with `", "`. Placeholders without a matching argument
/// are kept verbatim.
pub fn format_template(template: &str, args: &[ErrorArg]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match key {
            "*" => {
                let joined: Vec<String> = args.iter().map(ToString::to_string).collect();
                out.push_str(&joined.join(", "));
            }
            _ => match key.parse::<usize>().ok().and_then(|i| args.get(i)) {
                Some(arg) => out.push_str(&arg.to_string()),
                None => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            },
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Descriptor for an error with a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleErrorType {
    id: &'static str,
    message: &'static str,
}

impl SimpleErrorType {
    /// Declare a new error family.
    pub const fn new(id: &'static str, message: &'static str) -> Self {
        Self { id, message }
    }

    /// Identifier shared by every error this descriptor creates.
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Create an error without input context.
    pub fn create(&self) -> CommandSyntaxError {
        CommandSyntaxError::new(self.kind())
    }

    /// Create an error pointing at the reader's current cursor.
    pub fn create_with_context(&self, reader: &StringReader) -> CommandSyntaxError {
        CommandSyntaxError::with_context(self.kind(), reader)
    }

    fn kind(&self) -> SyntaxErrorKind {
        SyntaxErrorKind::Custom(CustomError {
            id: self.id,
            template: self.message,
            args: Vec::new(),
        })
    }
}

/// Descriptor for an error whose message is rendered from exactly `N` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DynamicErrorType<const N: usize> {
    id: &'static str,
    template: &'static str,
}

/// Dynamic error with one argument.
pub type Dynamic1ErrorType = DynamicErrorType<1>;
/// Dynamic error with two arguments.
pub type Dynamic2ErrorType = DynamicErrorType<2>;
/// Dynamic error with three arguments.
pub type Dynamic3ErrorType = DynamicErrorType<3>;
/// Dynamic error with four arguments.
pub type Dynamic4ErrorType = DynamicErrorType<4>;

impl<const N: usize> DynamicErrorType<N> {
    /// Declare a new error family. See [`format_template`] for the template syntax.
    pub const fn new(id: &'static str, template: &'static str) -> Self {
        Self { id, template }
    }

    /// Identifier shared by every error this descriptor creates.
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Create an error without input context.
    pub fn create(&self, args: [ErrorArg; N]) -> CommandSyntaxError {
        CommandSyntaxError::new(self.kind(args))
    }

    /// Create an error pointing at the reader's current cursor.
    pub fn create_with_context(
        &self,
        reader: &StringReader,
        args: [ErrorArg; N],
    ) -> CommandSyntaxError {
        CommandSyntaxError::with_context(self.kind(args), reader)
    }

    fn kind(&self, args: [ErrorArg; N]) -> SyntaxErrorKind {
        SyntaxErrorKind::Custom(CustomError {
            id: self.id,
            template: self.template,
            args: args.into(),
        })
    }
}

/// Descriptor for an error rendered from any number of arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DynamicNErrorType {
    id: &'static str,
    template: &'static str,
}

impl DynamicNErrorType {
    /// Declare a new error family. See [`format_template`] for the template syntax.
    pub const fn new(id: &'static str, template: &'static str) -> Self {
        Self { id, template }
    }

    /// Identifier shared by every error this descriptor creates.
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Create an error without input context.
    pub fn create(&self, args: Vec<ErrorArg>) -> CommandSyntaxError {
        CommandSyntaxError::new(self.kind(args))
    }

    /// Create an error pointing at the reader's current cursor.
    pub fn create_with_context(
        &self,
        reader: &StringReader,
        args: Vec<ErrorArg>,
    ) -> CommandSyntaxError {
        CommandSyntaxError::with_context(self.kind(args), reader)
    }

    fn kind(&self, args: Vec<ErrorArg>) -> SyntaxErrorKind {
        SyntaxErrorKind::Custom(CustomError {
            id: self.id,
            template: self.template,
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNKNOWN_ITEM: Dynamic1ErrorType = Dynamic1ErrorType::new("item.unknown", "Unknown item '{0}'");
    const ONE_OF: DynamicNErrorType = DynamicNErrorType::new("choice", "Expected one of: {*}");

    #[test]
    fn test_format_template_positional() {
        let args = vec![ErrorArg::from("a"), ErrorArg::from(2i64)];
        assert_eq!(format_template("{1} then {0}", &args), "2 then a");
    }

    #[test]
    fn test_format_template_missing_arg_kept() {
        assert_eq!(format_template("value {3}", &[]), "value {3}");
        assert_eq!(format_template("open { brace", &[]), "open { brace");
    }

    #[test]
    fn test_dynamic_error_message_and_id() {
        let err = UNKNOWN_ITEM.create(["stick".into()]);
        assert_eq!(err.to_string(), "Unknown item 'stick'");
        match err.kind() {
            SyntaxErrorKind::Custom(custom) => {
                assert_eq!(custom.id(), "item.unknown");
                assert_eq!(custom.arity(), 1);
            }
            other => panic!("Expected custom error, got {other:?}"),
        }
    }

    #[test]
    fn test_variadic_error_joins_all() {
        let err = ONE_OF.create(vec!["red".into(), "green".into(), "blue".into()]);
        assert_eq!(err.message(), "Expected one of: red, green, blue");
    }

    #[test]
    fn test_simple_error_with_context() {
        const NOPE: SimpleErrorType = SimpleErrorType::new("nope", "Nope");
        let mut reader = StringReader::new("abc");
        reader.skip();
        let err = NOPE.create_with_context(&reader);
        assert_eq!(err.cursor(), Some(1));
        assert_eq!(err.to_string(), "Nope at position 1: a<--[HERE]");
    }
}
