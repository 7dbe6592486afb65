//! The command grammar tree.
//!
//! Nodes live in an arena ([`CommandTree`]) and refer to each other by
//! [`NodeId`]. The root is always [`NodeId::ROOT`]. Children are owned edges
//! that form a DAG (a node may be attached under several parents); redirects
//! are plain ids and may point anywhere, including back at the root.
//!
//! - [`node`]: [`CommandNode`] and how a single node parses and suggests
//! - [`builder`]: fluent [`literal`] / [`argument`] builders
//! - [`registry`]: the arena, registration and merging
//! - [`ambiguity`]: overlap detection between sibling nodes
//! - [`usage`]: usage strings

pub mod ambiguity;
pub mod builder;
pub mod node;
pub mod registry;
pub mod usage;

use std::fmt;
use std::sync::Arc;

use crate::context::CommandContext;
use crate::error::CommandError;

pub use ambiguity::Ambiguity;
pub use builder::{argument, literal, NodeBuilder};
pub use node::{ArgumentNode, CommandNode, LiteralNode, NodeKind};
pub use registry::CommandTree;

/// Handle to a node inside a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A command callback. Returns a result code.
pub type Command<S> =
    Arc<dyn Fn(&CommandContext<S>) -> Result<i32, CommandError> + Send + Sync>;

/// Decides whether a source may use a node.
pub type Requirement<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Called after every command invocation with `(context, success, result)`.
pub type ResultConsumer<S> = Arc<dyn Fn(&CommandContext<S>, bool, i32) + Send + Sync>;

/// Maps the source of a redirecting node to the source(s) the redirect
/// target runs with.
pub enum RedirectModifier<S> {
    /// Exactly one derived source.
    Single(Arc<dyn Fn(&CommandContext<S>) -> Result<S, CommandError> + Send + Sync>),
    /// Any number of derived sources, possibly none.
    Multi(Arc<dyn Fn(&CommandContext<S>) -> Result<Vec<S>, CommandError> + Send + Sync>),
}

impl<S> RedirectModifier<S> {
    /// Derive the sources for `context`.
    pub fn apply(&self, context: &CommandContext<S>) -> Result<Vec<S>, CommandError> {
        match self {
            Self::Single(f) => f(context).map(|source| vec![source]),
            Self::Multi(f) => f(context),
        }
    }
}

impl<S> Clone for RedirectModifier<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Single(f) => Self::Single(Arc::clone(f)),
            Self::Multi(f) => Self::Multi(Arc::clone(f)),
        }
    }
}

impl<S> fmt::Debug for RedirectModifier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(_) => f.write_str("RedirectModifier::Single"),
            Self::Multi(_) => f.write_str("RedirectModifier::Multi"),
        }
    }
}
