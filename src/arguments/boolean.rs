//! `true` / `false`.

use async_trait::async_trait;
use cmdtree_text::{CommandSyntaxError, StringReader, Suggestions, SuggestionsBuilder};

use super::ArgumentType;
use crate::Source;
use crate::context::CommandContext;

/// A boolean parameter, written `true` or `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoolArgument;

#[async_trait]
impl<S: Source> ArgumentType<S> for BoolArgument {
    type Value = bool;

    fn parse(&self, reader: &mut StringReader) -> Result<bool, CommandSyntaxError> {
        reader.read_boolean()
    }

    async fn list_suggestions(
        &self,
        _context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError> {
        for candidate in ["true", "false"] {
            if candidate.starts_with(builder.remaining_lower_case()) {
                builder.suggest(candidate);
            }
        }
        Ok(builder.build())
    }

    fn examples(&self) -> Vec<String> {
        vec!["true".to_owned(), "false".to_owned()]
    }
}

/// A boolean argument.
pub fn boolean() -> BoolArgument {
    BoolArgument
}
