//! What a parse produced and what a command sees when it runs.
//!
//! A [`CommandContextBuilder`] accumulates matched nodes and argument values
//! during parsing. Redirects start a fresh builder at the target and hang it
//! off the current one, so a parse produces a chain of builders. Executing
//! freezes the chain into [`CommandContext`]s.

mod builder;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cmdtree_text::StringRange;

use crate::arguments::ArgumentValue;
use crate::error::ArgumentError;
use crate::tree::{Command, NodeId, RedirectModifier};

pub use builder::{CommandContextBuilder, SuggestionContext};

/// One argument value and the input it was read from.
#[derive(Clone)]
pub struct ParsedArgument {
    range: StringRange,
    value: ArgumentValue,
    type_name: &'static str,
}

impl ParsedArgument {
    pub(crate) fn new(range: StringRange, value: ArgumentValue, type_name: &'static str) -> Self {
        Self {
            range,
            value,
            type_name,
        }
    }

    /// Where in the input the value was read.
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// The value, if it has type `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Name of the value's type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ParsedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedArgument")
            .field("range", &self.range)
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A node matched during parsing and the input it consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommandNode {
    node: NodeId,
    range: StringRange,
}

impl ParsedCommandNode {
    pub(crate) fn new(node: NodeId, range: StringRange) -> Self {
        Self { node, range }
    }

    /// The matched node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The input it consumed.
    pub fn range(&self) -> StringRange {
        self.range
    }
}

/// Everything a command callback can see: its source, the full input, the
/// parsed arguments, and the rest of the redirect chain.
pub struct CommandContext<S> {
    pub(crate) source: S,
    pub(crate) input: Arc<str>,
    pub(crate) arguments: HashMap<String, ParsedArgument>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) root: NodeId,
    pub(crate) nodes: Vec<ParsedCommandNode>,
    pub(crate) range: StringRange,
    pub(crate) child: Option<Box<CommandContext<S>>>,
    pub(crate) modifier: Option<RedirectModifier<S>>,
    pub(crate) forks: bool,
}

impl<S: Clone> CommandContext<S> {
    /// The same context running on behalf of another source.
    pub fn copy_for(&self, source: S) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }
}

impl<S> CommandContext<S> {
    /// The source the command runs for.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The full input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The typed value of argument `name`.
    ///
    /// ```rust
    /// # use cmdtree::{argument, literal, Dispatcher};
    /// # use cmdtree::arguments::word;
    /// let mut dispatcher = Dispatcher::<()>::new();
    /// dispatcher
    ///     .register(literal("hi").then(argument("who", word()).executes(|ctx| {
    ///         let who: &String = ctx.argument("who")?;
    ///         Ok(who.len() as i32)
    ///     })))
    ///     .unwrap();
    /// assert_eq!(dispatcher.execute("hi alice", ()).unwrap(), 5);
    /// ```
    pub fn argument<T: 'static>(&self, name: &str) -> Result<&T, ArgumentError> {
        let parsed = self
            .arguments
            .get(name)
            .ok_or_else(|| ArgumentError::Missing(name.to_owned()))?;
        parsed.value::<T>().ok_or_else(|| ArgumentError::WrongType {
            name: name.to_owned(),
            expected: std::any::type_name::<T>(),
            actual: parsed.type_name,
        })
    }

    /// The raw parsed argument, if present.
    pub fn parsed_argument(&self, name: &str) -> Option<&ParsedArgument> {
        self.arguments.get(name)
    }

    /// All parsed arguments by name.
    pub fn arguments(&self) -> &HashMap<String, ParsedArgument> {
        &self.arguments
    }

    /// The command at the end of this link, if any.
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// The node this link started parsing from.
    pub fn root_node(&self) -> NodeId {
        self.root
    }

    /// Matched nodes in order.
    pub fn nodes(&self) -> &[ParsedCommandNode] {
        &self.nodes
    }

    /// True if this link matched at least one node.
    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Input consumed by this link.
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// The next link of the redirect chain.
    pub fn child(&self) -> Option<&CommandContext<S>> {
        self.child.as_deref()
    }

    /// The final link of the redirect chain.
    pub fn last_child(&self) -> &CommandContext<S> {
        let mut result = self;
        while let Some(child) = result.child() {
            result = child;
        }
        result
    }

    /// How the source changes when following into [`child`](Self::child).
    pub fn redirect_modifier(&self) -> Option<&RedirectModifier<S>> {
        self.modifier.as_ref()
    }

    /// True if following into the child fans out over several sources.
    pub fn is_forked(&self) -> bool {
        self.forks
    }
}

impl<S: Clone> Clone for CommandContext<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            input: Arc::clone(&self.input),
            arguments: self.arguments.clone(),
            command: self.command.clone(),
            root: self.root,
            nodes: self.nodes.clone(),
            range: self.range,
            child: self.child.clone(),
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for CommandContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("source", &self.source)
            .field("input", &self.input)
            .field("arguments", &self.arguments)
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("child", &self.child)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}
