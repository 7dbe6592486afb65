use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cmdtree_text::{CommandSyntaxError, StringReader, SyntaxErrorKind, ARGUMENT_SEPARATOR};
use tracing::trace;

use super::Dispatcher;
use crate::Source;
use crate::context::CommandContextBuilder;
use crate::tree::NodeId;

/// The outcome of [`Dispatcher::parse`]: how far the input matched, and why
/// the nodes that were tried at the point parsing stopped failed.
pub struct ParseResult<S> {
    pub(crate) context: CommandContextBuilder<S>,
    pub(crate) reader: StringReader,
    pub(crate) errors: HashMap<NodeId, CommandSyntaxError>,
}

impl<S> ParseResult<S> {
    /// The matched chain.
    pub fn context(&self) -> &CommandContextBuilder<S> {
        &self.context
    }

    /// The reader, left where matching stopped.
    pub fn reader(&self) -> &StringReader {
        &self.reader
    }

    /// Why each candidate node failed, by node.
    pub fn errors(&self) -> &HashMap<NodeId, CommandSyntaxError> {
        &self.errors
    }

    /// True if the whole input matched.
    pub fn is_complete(&self) -> bool {
        !self.reader.can_read()
    }
}

impl<S: fmt::Debug> fmt::Debug for ParseResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResult")
            .field("context", &self.context)
            .field("reader", &self.reader)
            .field("errors", &self.errors)
            .finish()
    }
}

impl<S: Source> Dispatcher<S> {
    /// Match `input` against the grammar on behalf of `source`.
    ///
    /// Never fails: a parse that stops early is reported through
    /// [`ParseResult::reader`] and [`ParseResult::errors`], and turned into
    /// an error by [`execute_parsed`](Self::execute_parsed).
    pub fn parse(&self, input: impl Into<Arc<str>>, source: S) -> ParseResult<S> {
        self.parse_reader(StringReader::new(input), source)
    }

    /// Match from the reader's cursor.
    pub fn parse_reader(&self, reader: StringReader, source: S) -> ParseResult<S> {
        let context = CommandContextBuilder::new(source, self.root(), reader.cursor());
        let result = self.parse_nodes(self.root(), &reader, context);
        trace!(
            input = %reader.string(),
            consumed = result.reader.cursor(),
            errors = result.errors.len(),
            "Parsed input"
        );
        result
    }

    fn parse_nodes(
        &self,
        node: NodeId,
        original: &StringReader,
        context_so_far: CommandContextBuilder<S>,
    ) -> ParseResult<S> {
        let source = context_so_far.source();
        let mut errors = HashMap::new();
        let mut potentials: Vec<ParseResult<S>> = Vec::new();

        for &child_id in self.node(node).relevant_children(original) {
            let child = self.node(child_id);
            if !child.can_use(source) {
                continue;
            }
            let mut context = context_so_far.clone();
            let mut reader = original.clone();

            let matched = child
                .parse(child_id, &mut reader, &mut context)
                .and_then(|()| {
                    // Exactly one separator between tokens, or the end of input.
                    let bad_separator = match reader.peek() {
                        None => false,
                        Some(ARGUMENT_SEPARATOR) => reader.peek_at(1) == Some(ARGUMENT_SEPARATOR),
                        Some(_) => true,
                    };
                    if bad_separator {
                        Err(SyntaxErrorKind::ExpectedArgumentSeparator.with_context(&reader))
                    } else {
                        Ok(())
                    }
                });
            if let Err(err) = matched {
                trace!(node = %child_id, error = %err, "Candidate rejected");
                errors.insert(child_id, err);
                continue;
            }

            context.with_command(child.command().cloned());
            let needed = if child.redirect().is_some() { 1 } else { 2 };
            if !reader.can_read_len(needed) {
                potentials.push(ParseResult {
                    context,
                    reader,
                    errors: HashMap::new(),
                });
                continue;
            }

            reader.skip();
            if let Some(target) = child.redirect() {
                let child_context =
                    CommandContextBuilder::new(source.clone(), target, reader.cursor());
                let parse = self.parse_nodes(target, &reader, child_context);
                context.with_child(parse.context);
                return ParseResult {
                    context,
                    reader: parse.reader,
                    errors: parse.errors,
                };
            }
            potentials.push(self.parse_nodes(child_id, &reader, context));
        }

        // Stable sort: among equally good outcomes registration order wins.
        potentials.sort_by(|a, b| {
            a.reader
                .can_read()
                .cmp(&b.reader.can_read())
                .then_with(|| (!a.errors.is_empty()).cmp(&!b.errors.is_empty()))
        });
        match potentials.into_iter().next() {
            Some(best) => best,
            None => ParseResult {
                context: context_so_far,
                reader: original.clone(),
                errors,
            },
        }
    }
}
