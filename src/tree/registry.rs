//! The node arena: registration, merging and lookup.
//!
//! Adding a child whose name is already taken merges instead of replacing:
//! the existing node keeps its command (or adopts the incoming one if it had
//! none) and the incoming node's children are merged into it recursively.
//! [`CommandTree::replace_command`] is the explicit way to overwrite.

use tracing::{debug, trace};

use super::builder::{BuilderKind, ChildSpec, NodeBuilder};
use super::node::{ArgumentNode, CommandNode, LiteralNode, NodeKind};
use super::{Command, NodeId};
use crate::Source;
use crate::error::GrammarError;

/// Owns every node of a grammar.
pub struct CommandTree<S: Source> {
    nodes: Vec<CommandNode<S>>,
}

impl<S: Source> Default for CommandTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Source> CommandTree<S> {
    /// A tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![CommandNode::new(NodeKind::Root)],
        }
    }

    /// The root id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included. Merged-away nodes stay counted.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Look a node up. Ids from this tree are always valid.
    pub fn get(&self, id: NodeId) -> Option<&CommandNode<S>> {
        self.nodes.get(id.index())
    }

    /// The node for an id handed out by this tree.
    ///
    /// # Panics
    ///
    /// If `id` came from another tree.
    pub fn node(&self, id: NodeId) -> &CommandNode<S> {
        &self.nodes[id.index()]
    }

    fn check(&self, id: NodeId) -> Result<(), GrammarError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(GrammarError::UnknownNode(id))
        }
    }

    /// Register a fragment under the root. Returns the node that now holds
    /// the fragment's name, which is an existing node if it was merged.
    pub fn register(&mut self, builder: NodeBuilder<S>) -> Result<NodeId, GrammarError> {
        self.attach(NodeId::ROOT, builder)
    }

    /// Register a fragment under `parent`.
    pub fn attach(&mut self, parent: NodeId, builder: NodeBuilder<S>) -> Result<NodeId, GrammarError> {
        self.check(parent)?;
        let built = self.build(builder)?;
        self.add_child(parent, built)
    }

    /// Turn a builder into detached nodes, returning the fragment's root.
    fn build(&mut self, builder: NodeBuilder<S>) -> Result<NodeId, GrammarError> {
        let NodeBuilder {
            kind,
            children,
            command,
            requirement,
            target,
            modifier,
            forks,
            suggestions,
        } = builder;

        let kind = match kind {
            BuilderKind::Literal(literal) => {
                if suggestions.is_some() {
                    return Err(GrammarError::SuggestionsOnLiteral(literal));
                }
                NodeKind::Literal(LiteralNode::new(literal))
            }
            BuilderKind::Argument { name, ty } => {
                NodeKind::Argument(ArgumentNode::new(name, ty, suggestions))
            }
        };
        let mut node = CommandNode::new(kind);
        if let Some(target) = target {
            self.check(target)?;
            if !children.is_empty() {
                return Err(GrammarError::RedirectWithChildren(node.name().to_owned()));
            }
        }
        node.command = command;
        node.requirement = requirement;
        node.redirect = target;
        node.modifier = modifier;
        node.forks = forks;

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        for child in children {
            let child = match child {
                ChildSpec::Build(builder) => self.build(builder)?,
                ChildSpec::Existing(existing) => existing,
            };
            self.add_child(id, child)?;
        }
        Ok(id)
    }

    /// Make `child` a child of `parent`, merging with a same-named child.
    /// Returns the id that holds the name afterwards.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, GrammarError> {
        self.check(parent)?;
        self.check(child)?;
        if matches!(self.node(child).kind, NodeKind::Root) {
            return Err(GrammarError::RootAsChild);
        }
        if self.node(parent).redirect.is_some() {
            return Err(GrammarError::RedirectWithChildren(
                self.node(parent).name().to_owned(),
            ));
        }

        let name = self.node(child).name().to_owned();
        match self.node(parent).child(&name) {
            Some(existing) if existing == child => Ok(existing),
            Some(existing) => {
                self.merge(existing, child)?;
                Ok(existing)
            }
            None => {
                if self.reaches(child, parent) {
                    return Err(GrammarError::ChildCycle {
                        parent: self.node(parent).name().to_owned(),
                        child: name,
                    });
                }
                let is_literal = self.node(child).is_literal();
                trace!(parent = %parent, child = %child, name = %name, "Attached node");
                self.nodes[parent.index()].insert_child(name, child, is_literal);
                Ok(child)
            }
        }
    }

    /// Whether `to` is `from` or one of its descendants. Child edges never
    /// form a cycle, so the walk terminates.
    fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            stack.extend(self.node(id).children());
        }
        false
    }

    fn merge(&mut self, existing: NodeId, incoming: NodeId) -> Result<(), GrammarError> {
        if self.node(existing).command.is_none() {
            if let Some(command) = self.node(incoming).command.clone() {
                self.nodes[existing.index()].command = Some(command);
            }
        }
        debug!(
            node = %existing,
            name = %self.node(existing).name(),
            "Merged registration into existing node"
        );
        let grandchildren: Vec<NodeId> = self.node(incoming).children().collect();
        for grandchild in grandchildren {
            self.add_child(existing, grandchild)?;
        }
        Ok(())
    }

    /// Overwrite (or clear) a node's command.
    pub fn replace_command(&mut self, node: NodeId, command: Option<Command<S>>) -> Result<(), GrammarError> {
        self.check(node)?;
        self.nodes[node.index()].command = command;
        Ok(())
    }

    /// Children of `node` with literals first, each group sorted by name.
    pub fn sorted_children(&self, node: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.node(node).children().collect();
        children.sort_by(|a, b| self.node(*a).compare(self.node(*b)));
        children
    }

    /// Follow child names from the root.
    pub fn find_node<I, N>(&self, path: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        path.into_iter()
            .try_fold(NodeId::ROOT, |node, name| self.node(node).child(name.as_ref()))
    }

    /// Child names leading from the root to `target`, or empty if it is
    /// unreachable (or is the root).
    pub fn path(&self, target: NodeId) -> Vec<String> {
        let mut trail = Vec::new();
        if self.path_to(NodeId::ROOT, target, &mut trail) {
            trail
                .iter()
                .map(|id| self.node(*id).name().to_owned())
                .collect()
        } else {
            Vec::new()
        }
    }

    fn path_to(&self, from: NodeId, target: NodeId, trail: &mut Vec<NodeId>) -> bool {
        if from == target {
            return true;
        }
        for child in self.node(from).children() {
            trail.push(child);
            if self.path_to(child, target, trail) {
                return true;
            }
            trail.pop();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{integer, word};
    use crate::tree::{argument, literal};
    use std::sync::Arc;

    #[test]
    fn test_register_literal() {
        let mut tree = CommandTree::<()>::new();
        let id = tree.register(literal("foo")).unwrap();
        assert_eq!(tree.node(NodeId::ROOT).child("foo"), Some(id));
        assert_eq!(tree.node(id).name(), "foo");
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_merge_keeps_first_command() {
        let mut tree = CommandTree::<()>::new();
        let first = tree.register(literal("foo").executes(|_| Ok(1))).unwrap();
        let again = tree.register(literal("foo").executes(|_| Ok(2))).unwrap();
        assert_eq!(first, again);
        assert_eq!(tree.node(NodeId::ROOT).child_count(), 1);
    }

    #[test]
    fn test_merge_adopts_command_and_children() {
        let mut tree = CommandTree::<()>::new();
        let foo = tree.register(literal("foo").then(literal("a"))).unwrap();
        assert!(tree.node(foo).command().is_none());

        tree.register(literal("foo").executes(|_| Ok(1)).then(literal("b")))
            .unwrap();
        assert!(tree.node(foo).command().is_some());
        let names: Vec<&str> = tree.node(foo).children().map(|c| tree.node(c).name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_merge_recurses_into_grandchildren() {
        let mut tree = CommandTree::<()>::new();
        tree.register(literal("foo").then(literal("bar").then(literal("x"))))
            .unwrap();
        tree.register(literal("foo").then(literal("bar").then(literal("y"))))
            .unwrap();
        let bar = tree.find_node(["foo", "bar"]).unwrap();
        assert_eq!(tree.node(bar).child_count(), 2);
    }

    #[test]
    fn test_redirect_with_children_rejected() {
        let mut tree = CommandTree::<()>::new();
        let err = tree
            .register(literal("alias").then(literal("x")).redirect(NodeId::ROOT))
            .unwrap_err();
        assert_eq!(err, GrammarError::RedirectWithChildren("alias".into()));
    }

    #[test]
    fn test_adding_child_to_redirect_rejected() {
        let mut tree = CommandTree::<()>::new();
        let alias = tree.register(literal("alias").redirect(NodeId::ROOT)).unwrap();
        assert!(matches!(
            tree.attach(alias, literal("x")),
            Err(GrammarError::RedirectWithChildren(_))
        ));
    }

    #[test]
    fn test_root_as_child_rejected() {
        let mut tree = CommandTree::<()>::new();
        let foo = tree.register(literal("foo")).unwrap();
        assert_eq!(
            tree.add_child(foo, NodeId::ROOT),
            Err(GrammarError::RootAsChild)
        );
    }

    #[test]
    fn test_suggestions_on_literal_rejected() {
        let mut tree = CommandTree::<()>::new();
        let err = tree
            .register(literal("foo").suggests_with(|_, b| Ok(b.build())))
            .unwrap_err();
        assert_eq!(err, GrammarError::SuggestionsOnLiteral("foo".into()));
    }

    #[test]
    fn test_unknown_redirect_target() {
        let mut tree = CommandTree::<()>::new();
        let err = tree
            .register(literal("foo").redirect(NodeId::new(99)))
            .unwrap_err();
        assert_eq!(err, GrammarError::UnknownNode(NodeId::new(99)));
    }

    #[test]
    fn test_path_and_find_node() {
        let mut tree = CommandTree::<()>::new();
        tree.register(literal("a").then(literal("b").then(argument("c", integer()))))
            .unwrap();
        let c = tree.find_node(["a", "b", "c"]).unwrap();
        assert_eq!(tree.path(c), vec!["a", "b", "c"]);
        assert!(tree.find_node(["a", "x"]).is_none());
        assert!(tree.path(NodeId::ROOT).is_empty());
    }

    #[test]
    fn test_shared_child_node() {
        let mut tree = CommandTree::<()>::new();
        let shared = tree.register(literal("shared").executes(|_| Ok(1))).unwrap();
        let other = tree.register(literal("other").then_node(shared)).unwrap();
        assert_eq!(tree.node(other).child("shared"), Some(shared));
    }

    #[test]
    fn test_child_cycle_rejected() {
        let mut tree = CommandTree::<()>::new();
        let foo = tree.register(literal("foo")).unwrap();
        let err = tree
            .attach(foo, literal("x").then_node(foo))
            .unwrap_err();
        assert_eq!(
            err,
            GrammarError::ChildCycle {
                parent: "foo".into(),
                child: "x".into(),
            }
        );
        assert_eq!(tree.node(foo).child_count(), 0);

        // Re-registering through a merge is caught as well.
        let err = tree
            .register(literal("foo").then(literal("bar").then_node(foo)))
            .unwrap_err();
        assert!(matches!(err, GrammarError::ChildCycle { .. }));

        // The walks still terminate.
        assert_eq!(tree.path(foo), vec!["foo"]);
        assert!(tree.find_ambiguities().is_empty());
    }

    #[test]
    fn test_shared_child_outside_ancestry_allowed() {
        let mut tree = CommandTree::<()>::new();
        let leaf = tree.register(literal("leaf").executes(|_| Ok(1))).unwrap();
        let a = tree.register(literal("a").then_node(leaf)).unwrap();
        let b = tree.register(literal("b").then_node(leaf)).unwrap();
        tree.attach(a, literal("deeper").then_node(leaf)).unwrap();
        assert_eq!(tree.node(b).child("leaf"), Some(leaf));
        assert_eq!(tree.node(a).child_count(), 2);
    }

    #[test]
    fn test_sorted_children_literals_first() {
        let mut tree = CommandTree::<()>::new();
        tree.register(literal("b")).unwrap();
        tree.register(argument("arg", word())).unwrap();
        tree.register(literal("a")).unwrap();
        let names: Vec<String> = tree
            .sorted_children(NodeId::ROOT)
            .into_iter()
            .map(|c| tree.node(c).usage_text())
            .collect();
        assert_eq!(names, vec!["a", "b", "<arg>"]);
    }

    #[test]
    fn test_replace_command() {
        let mut tree = CommandTree::<()>::new();
        let foo = tree.register(literal("foo").executes(|_| Ok(1))).unwrap();
        let command: Command<()> = Arc::new(|_| Ok(2));
        tree.replace_command(foo, Some(Arc::clone(&command))).unwrap();
        assert!(Arc::ptr_eq(tree.node(foo).command().unwrap(), &command));
    }

    #[test]
    fn test_structural_equality() {
        let mut left = CommandTree::<()>::new();
        let mut right = CommandTree::<()>::new();
        let l = left.register(literal("foo")).unwrap();
        let r = right.register(literal("foo")).unwrap();
        assert_eq!(left.node(l), right.node(r));

        let command: Command<()> = Arc::new(|_| Ok(1));
        left.replace_command(l, Some(command)).unwrap();
        assert_ne!(left.node(l), right.node(r));
    }
}
