use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cmdtree_text::StringRange;

use super::{CommandContext, ParsedArgument, ParsedCommandNode};
use crate::Source;
use crate::tree::{Command, CommandNode, NodeId, RedirectModifier};

/// The node whose children should be asked for completions, and where the
/// text being completed starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionContext {
    /// The node whose children are candidates.
    pub parent: NodeId,
    /// Byte offset where the replaced text starts.
    pub start: usize,
}

/// Mutable parse state for one link of the redirect chain.
pub struct CommandContextBuilder<S> {
    source: S,
    root: NodeId,
    arguments: HashMap<String, ParsedArgument>,
    nodes: Vec<ParsedCommandNode>,
    command: Option<Command<S>>,
    child: Option<Box<CommandContextBuilder<S>>>,
    range: StringRange,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
}

impl<S> CommandContextBuilder<S> {
    /// An empty link that starts parsing at `root`, at byte offset `start`.
    pub fn new(source: S, root: NodeId, start: usize) -> Self {
        Self {
            source,
            root,
            arguments: HashMap::new(),
            nodes: Vec::new(),
            command: None,
            child: None,
            range: StringRange::at(start),
            modifier: None,
            forks: false,
        }
    }

    /// Replace the source.
    pub fn with_source(&mut self, source: S) -> &mut Self {
        self.source = source;
        self
    }

    /// The source parsing runs for.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The node this link started from.
    pub fn root_node(&self) -> NodeId {
        self.root
    }

    /// Record a parsed argument.
    pub fn with_argument(&mut self, name: &str, argument: ParsedArgument) -> &mut Self {
        self.arguments.insert(name.to_owned(), argument);
        self
    }

    /// Arguments parsed so far.
    pub fn arguments(&self) -> &HashMap<String, ParsedArgument> {
        &self.arguments
    }

    /// Set (or clear) the command to run.
    pub fn with_command(&mut self, command: Option<Command<S>>) -> &mut Self {
        self.command = command;
        self
    }

    /// The command to run, if the last matched node has one.
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// Matched nodes in order.
    pub fn nodes(&self) -> &[ParsedCommandNode] {
        &self.nodes
    }

    /// Attach the next link of the redirect chain.
    pub fn with_child(&mut self, child: CommandContextBuilder<S>) -> &mut Self {
        self.child = Some(Box::new(child));
        self
    }

    /// The next link, if a redirect was followed.
    pub fn child(&self) -> Option<&CommandContextBuilder<S>> {
        self.child.as_deref()
    }

    /// The final link.
    pub fn last_child(&self) -> &CommandContextBuilder<S> {
        let mut result = self;
        while let Some(child) = result.child() {
            result = child;
        }
        result
    }

    /// Input consumed by this link.
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// Where completion should happen for `cursor`.
    ///
    /// Walks into the redirect chain when the cursor lies past this link,
    /// otherwise finds the matched node the cursor falls in and reports its
    /// parent. Returns `None` if the cursor lies before this link.
    pub fn find_suggestion_context(&self, cursor: usize) -> Option<SuggestionContext> {
        if self.range.start() > cursor {
            return None;
        }
        if self.range.end() < cursor {
            if let Some(child) = &self.child {
                return child.find_suggestion_context(cursor);
            }
            return Some(match self.nodes.last() {
                Some(last) => SuggestionContext {
                    parent: last.node(),
                    start: last.range().end() + 1,
                },
                None => SuggestionContext {
                    parent: self.root,
                    start: self.range.start(),
                },
            });
        }
        let mut prev = self.root;
        for node in &self.nodes {
            let range = node.range();
            if range.start() <= cursor && cursor <= range.end() {
                return Some(SuggestionContext {
                    parent: prev,
                    start: range.start(),
                });
            }
            prev = node.node();
        }
        Some(SuggestionContext {
            parent: prev,
            start: self.range.start(),
        })
    }
}

impl<S: Source> CommandContextBuilder<S> {
    /// Record that `node` matched `range`. Widens this link's range and
    /// takes over the node's redirect modifier and fork flag.
    pub fn with_node(&mut self, id: NodeId, node: &CommandNode<S>, range: StringRange) -> &mut Self {
        self.nodes.push(ParsedCommandNode::new(id, range));
        self.range = StringRange::encompassing(self.range, range);
        self.modifier = node.redirect_modifier().cloned();
        self.forks = node.is_fork();
        self
    }
}

impl<S: Clone> CommandContextBuilder<S> {
    /// Freeze the chain into a [`CommandContext`] over `input`.
    pub fn build(&self, input: Arc<str>) -> CommandContext<S> {
        CommandContext {
            source: self.source.clone(),
            input: Arc::clone(&input),
            arguments: self.arguments.clone(),
            command: self.command.clone(),
            root: self.root,
            nodes: self.nodes.clone(),
            range: self.range,
            child: self.child.as_ref().map(|child| Box::new(child.build(input))),
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

impl<S: Clone> Clone for CommandContextBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            root: self.root,
            arguments: self.arguments.clone(),
            nodes: self.nodes.clone(),
            command: self.command.clone(),
            child: self.child.clone(),
            range: self.range,
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for CommandContextBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContextBuilder")
            .field("source", &self.source)
            .field("root", &self.root)
            .field("arguments", &self.arguments)
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("child", &self.child)
            .field("executable", &self.command.is_some())
            .finish_non_exhaustive()
    }
}
