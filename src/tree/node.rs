//! A single grammar node and the work it does on its own: matching itself
//! against input, proposing completions, and describing itself.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cmdtree_text::{
    CommandSyntaxError, StringRange, StringReader, Suggestions, SuggestionsBuilder,
    SyntaxErrorKind, ARGUMENT_SEPARATOR,
};
use futures_util::future::{self, BoxFuture, FutureExt};

use super::{Command, NodeId, RedirectModifier, Requirement};
use crate::Source;
use crate::arguments::{ErasedArgumentType, SuggestionProvider};
use crate::context::{CommandContext, CommandContextBuilder, ParsedArgument};

/// A keyword node, matched exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNode {
    literal: String,
    literal_lower: String,
}

impl LiteralNode {
    pub(crate) fn new(literal: String) -> Self {
        let literal_lower = literal.to_lowercase();
        Self {
            literal,
            literal_lower,
        }
    }

    /// The keyword.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Byte offset where the literal ends if it matches at the cursor. The
    /// match must be followed by a separator or the end of input.
    fn matches(&self, reader: &mut StringReader) -> Option<usize> {
        let start = reader.cursor();
        if !reader.can_read_len(self.literal.len()) {
            return None;
        }
        let end = start + self.literal.len();
        if reader.string().get(start..end) != Some(self.literal.as_str()) {
            return None;
        }
        reader.set_cursor(end);
        if !reader.can_read() || reader.peek() == Some(ARGUMENT_SEPARATOR) {
            Some(end)
        } else {
            reader.set_cursor(start);
            None
        }
    }
}

/// A typed parameter node.
pub struct ArgumentNode<S: Source> {
    name: String,
    pub(crate) ty: Arc<dyn ErasedArgumentType<S>>,
    pub(crate) custom_suggestions: Option<Arc<dyn SuggestionProvider<S>>>,
}

impl<S: Source> ArgumentNode<S> {
    pub(crate) fn new(
        name: String,
        ty: Arc<dyn ErasedArgumentType<S>>,
        custom_suggestions: Option<Arc<dyn SuggestionProvider<S>>>,
    ) -> Self {
        Self {
            name,
            ty,
            custom_suggestions,
        }
    }

    /// The argument name commands look the value up by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the Rust type this argument parses into.
    pub fn value_type_name(&self) -> &'static str {
        self.ty.value_type_name()
    }

    /// True when a suggestion provider replaces the type's own suggestions.
    pub fn has_custom_suggestions(&self) -> bool {
        self.custom_suggestions.is_some()
    }
}

/// What kind of node this is.
pub enum NodeKind<S: Source> {
    /// The unique root. Matches nothing itself.
    Root,
    /// A keyword.
    Literal(LiteralNode),
    /// A typed parameter.
    Argument(ArgumentNode<S>),
}

impl<S: Source> fmt::Debug for NodeKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("Root"),
            Self::Literal(lit) => f.debug_tuple("Literal").field(&lit.literal).finish(),
            Self::Argument(arg) => f
                .debug_struct("Argument")
                .field("name", &arg.name)
                .field("type", &arg.value_type_name())
                .finish(),
        }
    }
}

/// One node of a [`CommandTree`](super::CommandTree).
pub struct CommandNode<S: Source> {
    pub(crate) kind: NodeKind<S>,
    /// Child ids by name.
    pub(crate) children: HashMap<String, NodeId>,
    /// Child ids in registration order.
    pub(crate) order: Vec<NodeId>,
    pub(crate) literals: HashMap<String, NodeId>,
    pub(crate) arguments: Vec<NodeId>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) requirement: Option<Requirement<S>>,
    pub(crate) redirect: Option<NodeId>,
    pub(crate) modifier: Option<RedirectModifier<S>>,
    pub(crate) forks: bool,
}

impl<S: Source> CommandNode<S> {
    pub(crate) fn new(kind: NodeKind<S>) -> Self {
        Self {
            kind,
            children: HashMap::new(),
            order: Vec::new(),
            literals: HashMap::new(),
            arguments: Vec::new(),
            command: None,
            requirement: None,
            redirect: None,
            modifier: None,
            forks: false,
        }
    }

    pub(crate) fn insert_child(&mut self, name: String, id: NodeId, is_literal: bool) {
        if is_literal {
            self.literals.insert(name.clone(), id);
        } else {
            self.arguments.push(id);
        }
        self.children.insert(name, id);
        self.order.push(id);
    }

    /// What kind of node this is.
    pub fn kind(&self) -> &NodeKind<S> {
        &self.kind
    }

    /// True for keyword nodes.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    /// The node's name: the keyword, the argument name, or `""` for the root.
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "",
            NodeKind::Literal(lit) => &lit.literal,
            NodeKind::Argument(arg) => &arg.name,
        }
    }

    /// How the node appears in usage strings: the keyword, or `<name>`.
    pub fn usage_text(&self) -> String {
        match &self.kind {
            NodeKind::Root => String::new(),
            NodeKind::Literal(lit) => lit.literal.clone(),
            NodeKind::Argument(arg) => format!("<{}>", arg.name),
        }
    }

    /// The callback run when parsing ends on this node.
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// The visibility predicate, if any.
    pub fn requirement(&self) -> Option<&Requirement<S>> {
        self.requirement.as_ref()
    }

    /// Whether `source` may see and use this node.
    pub fn can_use(&self, source: &S) -> bool {
        self.requirement.as_ref().is_none_or(|req| req(source))
    }

    /// Where parsing continues after this node, if it redirects.
    pub fn redirect(&self) -> Option<NodeId> {
        self.redirect
    }

    /// How the source is transformed when following the redirect.
    pub fn redirect_modifier(&self) -> Option<&RedirectModifier<S>> {
        self.modifier.as_ref()
    }

    /// True when following the redirect fans out over several sources.
    pub fn is_fork(&self) -> bool {
        self.forks
    }

    /// Children in registration order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.order.len()
    }

    /// Child by name.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    /// The children worth trying at the reader's position.
    ///
    /// If the next word is exactly one of this node's keywords, only that
    /// literal is relevant. Otherwise every argument child is.
    pub fn relevant_children(&self, reader: &StringReader) -> &[NodeId] {
        if !self.literals.is_empty() {
            let word = reader
                .remaining()
                .split(ARGUMENT_SEPARATOR)
                .next()
                .unwrap_or_default();
            if let Some(id) = self.literals.get(word) {
                return std::slice::from_ref(id);
            }
        }
        &self.arguments
    }

    /// Match this node at the reader's cursor, recording it (and its argument
    /// value) in `context`.
    ///
    /// On failure the cursor is left where it was.
    pub fn parse(
        &self,
        id: NodeId,
        reader: &mut StringReader,
        context: &mut CommandContextBuilder<S>,
    ) -> Result<(), CommandSyntaxError> {
        let start = reader.cursor();
        match &self.kind {
            NodeKind::Root => Ok(()),
            NodeKind::Literal(lit) => match lit.matches(reader) {
                Some(end) => {
                    context.with_node(id, self, StringRange::between(start, end));
                    Ok(())
                }
                None => Err(SyntaxErrorKind::ExpectedLiteral(lit.literal.clone()).with_context(reader)),
            },
            NodeKind::Argument(arg) => {
                let value = reader.attempt(|r| arg.ty.parse_value(r))?;
                let range = StringRange::between(start, reader.cursor());
                context.with_argument(
                    &arg.name,
                    ParsedArgument::new(range, value, arg.ty.value_type_name()),
                );
                context.with_node(id, self, range);
                Ok(())
            }
        }
    }

    /// Completions this node offers for the text in `builder`.
    pub fn list_suggestions<'a>(
        &'a self,
        context: &'a CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Result<Suggestions, CommandSyntaxError>> {
        match &self.kind {
            NodeKind::Root => future::ready(Ok(Suggestions::empty())).boxed(),
            NodeKind::Literal(lit) => {
                let suggestions = if lit.literal_lower.starts_with(builder.remaining_lower_case()) {
                    builder.suggest(lit.literal.as_str());
                    builder.build()
                } else {
                    Suggestions::empty()
                };
                future::ready(Ok(suggestions)).boxed()
            }
            NodeKind::Argument(arg) => match &arg.custom_suggestions {
                Some(provider) => provider.suggestions(context, builder),
                None => arg.ty.suggest(context, builder),
            },
        }
    }

    /// Representative inputs this node accepts.
    pub fn examples(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Root => Vec::new(),
            NodeKind::Literal(lit) => vec![lit.literal.clone()],
            NodeKind::Argument(arg) => arg.ty.example_inputs(),
        }
    }

    /// Whether this node alone would accept `input` as one whole token.
    pub fn is_valid_input(&self, input: &str) -> bool {
        let mut reader = StringReader::new(input);
        match &self.kind {
            NodeKind::Root => false,
            NodeKind::Literal(lit) => lit.matches(&mut reader).is_some(),
            NodeKind::Argument(arg) => {
                arg.ty.parse_value(&mut reader).is_ok()
                    && (!reader.can_read() || reader.peek() == Some(ARGUMENT_SEPARATOR))
            }
        }
    }

    /// Literals before arguments, then by name.
    pub fn compare(&self, other: &CommandNode<S>) -> Ordering {
        self.sort_rank()
            .cmp(&other.sort_rank())
            .then_with(|| self.name().cmp(other.name()))
    }

    fn sort_rank(&self) -> u8 {
        match self.kind {
            NodeKind::Literal(_) => 0,
            _ => 1,
        }
    }
}

/// Structural equality: same kind and name, the same command callback, and
/// the same children.
impl<S: Source> PartialEq for CommandNode<S> {
    fn eq(&self, other: &Self) -> bool {
        let same_kind = match (&self.kind, &other.kind) {
            (NodeKind::Root, NodeKind::Root) => true,
            (NodeKind::Literal(a), NodeKind::Literal(b)) => a == b,
            (NodeKind::Argument(a), NodeKind::Argument(b)) => {
                a.name == b.name && a.value_type_name() == b.value_type_name()
            }
            _ => false,
        };
        let same_command = match (&self.command, &other.command) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_kind && same_command && self.children == other.children
    }
}

impl<S: Source> fmt::Debug for CommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("kind", &self.kind)
            .field("children", &self.order)
            .field("executable", &self.command.is_some())
            .field("redirect", &self.redirect)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}
