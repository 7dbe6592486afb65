//! String arguments: one unquoted word, a quotable phrase, or the rest of the
//! line.

use cmdtree_text::reader::{is_allowed_in_unquoted_string, DOUBLE_QUOTE, ESCAPE};
use cmdtree_text::{CommandSyntaxError, StringReader};

use super::ArgumentType;
use crate::Source;

/// How much input a [`StringArgument`] consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// Characters allowed in unquoted strings, up to the first other one.
    SingleWord,
    /// A quoted string (with escapes), or a single word.
    QuotablePhrase,
    /// Everything left in the input, verbatim.
    GreedyPhrase,
}

/// A string parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringArgument {
    kind: StringKind,
}

impl StringArgument {
    /// A string argument of the given kind.
    pub fn new(kind: StringKind) -> Self {
        Self { kind }
    }

    /// How much input this argument consumes.
    pub fn kind(&self) -> StringKind {
        self.kind
    }
}

impl<S: Source> ArgumentType<S> for StringArgument {
    type Value = String;

    fn parse(&self, reader: &mut StringReader) -> Result<String, CommandSyntaxError> {
        match self.kind {
            StringKind::SingleWord => Ok(reader.read_unquoted_string().to_owned()),
            StringKind::QuotablePhrase => reader.read_string(),
            StringKind::GreedyPhrase => {
                let text = reader.remaining().to_owned();
                reader.set_cursor(reader.total_len());
                Ok(text)
            }
        }
    }

    fn examples(&self) -> Vec<String> {
        let examples: &[&str] = match self.kind {
            StringKind::SingleWord => &["word", "words_with_underscores"],
            StringKind::QuotablePhrase => &["\"quoted phrase\"", "word", "\"\""],
            StringKind::GreedyPhrase => &["word", "words with spaces", "\"and symbols\""],
        };
        examples.iter().map(|s| (*s).to_owned()).collect()
    }
}

/// A single unquoted word.
pub fn word() -> StringArgument {
    StringArgument::new(StringKind::SingleWord)
}

/// A quoted phrase or a single word.
pub fn string() -> StringArgument {
    StringArgument::new(StringKind::QuotablePhrase)
}

/// The rest of the input.
pub fn greedy_string() -> StringArgument {
    StringArgument::new(StringKind::GreedyPhrase)
}

/// Quote `input` if a quotable-phrase argument could not read it back as a
/// single word.
pub fn escape_if_required(input: &str) -> String {
    if !input.is_empty() && input.chars().all(is_allowed_in_unquoted_string) {
        return input.to_owned();
    }
    let mut out = String::with_capacity(input.len() + 2);
    out.push(DOUBLE_QUOTE);
    for c in input.chars() {
        if c == ESCAPE || c == DOUBLE_QUOTE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(DOUBLE_QUOTE);
    out
}
