//! The dispatcher: one grammar, and the operations that run input through it.
//!
//! - [`parse`](Dispatcher::parse) matches input against the tree, trying
//!   every relevant child at each step and keeping the best outcome
//! - [`execute`](Dispatcher::execute) runs what a parse matched, following
//!   redirects and forks
//! - [`completion_suggestions`](Dispatcher::completion_suggestions) asks the
//!   nodes around the cursor for completions
//!
//! Registration needs `&mut self` while the other operations take `&self`,
//! so a dispatcher shared behind an `Arc` is read-only for its lifetime.

mod execute;
mod parse;
mod suggest;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::Source;
use crate::context::CommandContext;
use crate::error::{CommandError, GrammarError};
use crate::tree::{Ambiguity, CommandNode, CommandTree, NodeBuilder, NodeId, ResultConsumer};

pub use parse::ParseResult;

/// Owns a grammar tree and runs input through it.
pub struct Dispatcher<S: Source> {
    tree: CommandTree<S>,
    consumer: Option<ResultConsumer<S>>,
}

impl<S: Source> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Source> Dispatcher<S> {
    /// A dispatcher with an empty grammar.
    pub fn new() -> Self {
        Self {
            tree: CommandTree::new(),
            consumer: None,
        }
    }

    /// The grammar.
    pub fn tree(&self) -> &CommandTree<S> {
        &self.tree
    }

    /// The grammar, for direct edits.
    pub fn tree_mut(&mut self) -> &mut CommandTree<S> {
        &mut self.tree
    }

    /// The root id.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// A node of the grammar.
    pub fn node(&self, id: NodeId) -> &CommandNode<S> {
        self.tree.node(id)
    }

    /// Add a top-level command, merging with any existing command of the
    /// same name. Returns the node now holding the name.
    pub fn register(&mut self, builder: NodeBuilder<S>) -> Result<NodeId, GrammarError> {
        let name = builder.name().to_owned();
        let id = self.tree.register(builder)?;
        debug!(command = %name, node = %id, "Registered command");
        Ok(id)
    }

    /// Add a fragment under an existing node.
    pub fn attach(&mut self, parent: NodeId, builder: NodeBuilder<S>) -> Result<NodeId, GrammarError> {
        self.tree.attach(parent, builder)
    }

    /// Make an existing node a child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, GrammarError> {
        self.tree.add_child(parent, child)
    }

    /// Overwrite a node's command, bypassing the merge rule that keeps the
    /// first one.
    pub fn replace_command(
        &mut self,
        node: NodeId,
        command: impl Fn(&CommandContext<S>) -> Result<i32, CommandError> + Send + Sync + 'static,
    ) -> Result<(), GrammarError> {
        self.tree.replace_command(node, Some(Arc::new(command)))
    }

    /// Observe every command outcome.
    pub fn set_consumer(&mut self, consumer: impl Fn(&CommandContext<S>, bool, i32) + Send + Sync + 'static) {
        self.consumer = Some(Arc::new(consumer));
    }

    pub(crate) fn notify(&self, context: &CommandContext<S>, success: bool, result: i32) {
        if let Some(consumer) = &self.consumer {
            consumer(context, success, result);
        }
    }

    /// Every ambiguous sibling pair in the grammar.
    pub fn find_ambiguities(&self) -> Vec<Ambiguity> {
        self.tree.find_ambiguities()
    }

    /// Every usage under `node` (see [`CommandTree::all_usage`]).
    pub fn all_usage(&self, node: NodeId, source: &S, restricted: bool) -> Vec<String> {
        self.tree.all_usage(node, source, restricted)
    }

    /// Condensed usage per child of `node` (see [`CommandTree::smart_usage`]).
    pub fn smart_usage(&self, node: NodeId, source: &S) -> Vec<(NodeId, String)> {
        self.tree.smart_usage(node, source)
    }

    /// Names leading from the root to `node`.
    pub fn path(&self, node: NodeId) -> Vec<String> {
        self.tree.path(node)
    }

    /// The node reached by following `path` from the root.
    pub fn find_node<I, N>(&self, path: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.tree.find_node(path)
    }
}

impl<S: Source> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("nodes", &self.tree.len())
            .field("consumer", &self.consumer.is_some())
            .finish()
    }
}
