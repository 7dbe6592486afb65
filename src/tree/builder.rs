//! Fluent construction of grammar fragments.
//!
//! ```rust
//! use cmdtree::{argument, literal, Dispatcher};
//! use cmdtree::arguments::{integer, word};
//!
//! let mut dispatcher = Dispatcher::<()>::new();
//! dispatcher
//!     .register(
//!         literal("give")
//!             .then(argument("item", word())
//!                 .executes(|_| Ok(1))
//!                 .then(argument("count", integer()).executes(|ctx| {
//!                     Ok(*ctx.argument::<i32>("count")?)
//!                 }))),
//!     )
//!     .unwrap();
//! assert_eq!(dispatcher.execute("give apple 3", ()).unwrap(), 3);
//! ```
//!
//! Builders never fail. Combinations the tree cannot hold (children plus a
//! redirect, custom suggestions on a literal) are reported when the builder
//! is registered.

use std::sync::Arc;

use cmdtree_text::{CommandSyntaxError, Suggestions, SuggestionsBuilder};

use super::{Command, NodeId, RedirectModifier, Requirement};
use crate::Source;
use crate::arguments::{ArgumentType, ErasedArgumentType, SuggestionProvider};
use crate::context::CommandContext;
use crate::error::CommandError;

pub(crate) enum BuilderKind<S: Source> {
    Literal(String),
    Argument {
        name: String,
        ty: Arc<dyn ErasedArgumentType<S>>,
    },
}

pub(crate) enum ChildSpec<S: Source> {
    Build(NodeBuilder<S>),
    Existing(NodeId),
}

/// An unregistered grammar fragment: one node plus the children built under it.
pub struct NodeBuilder<S: Source> {
    pub(crate) kind: BuilderKind<S>,
    pub(crate) children: Vec<ChildSpec<S>>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) requirement: Option<Requirement<S>>,
    pub(crate) target: Option<NodeId>,
    pub(crate) modifier: Option<RedirectModifier<S>>,
    pub(crate) forks: bool,
    pub(crate) suggestions: Option<Arc<dyn SuggestionProvider<S>>>,
}

/// Start a keyword node.
pub fn literal<S: Source>(literal: impl Into<String>) -> NodeBuilder<S> {
    NodeBuilder::new(BuilderKind::Literal(literal.into()))
}

/// Start a typed parameter node.
pub fn argument<S: Source, T: ArgumentType<S>>(name: impl Into<String>, ty: T) -> NodeBuilder<S> {
    NodeBuilder::new(BuilderKind::Argument {
        name: name.into(),
        ty: Arc::new(ty),
    })
}

impl<S: Source> NodeBuilder<S> {
    fn new(kind: BuilderKind<S>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            command: None,
            requirement: None,
            target: None,
            modifier: None,
            forks: false,
            suggestions: None,
        }
    }

    /// The name the node will have.
    pub fn name(&self) -> &str {
        match &self.kind {
            BuilderKind::Literal(literal) => literal,
            BuilderKind::Argument { name, .. } => name,
        }
    }

    /// Add a child fragment.
    pub fn then(mut self, child: NodeBuilder<S>) -> Self {
        self.children.push(ChildSpec::Build(child));
        self
    }

    /// Add an already registered node as a child. The node is shared, not
    /// copied.
    pub fn then_node(mut self, child: NodeId) -> Self {
        self.children.push(ChildSpec::Existing(child));
        self
    }

    /// Make the node executable.
    pub fn executes(
        mut self,
        command: impl Fn(&CommandContext<S>) -> Result<i32, CommandError> + Send + Sync + 'static,
    ) -> Self {
        self.command = Some(Arc::new(command));
        self
    }

    /// Attach an already shared command callback.
    pub fn executes_shared(mut self, command: Command<S>) -> Self {
        self.command = Some(command);
        self
    }

    /// Hide the node from sources that fail `requirement`.
    pub fn requires(mut self, requirement: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.requirement = Some(Arc::new(requirement));
        self
    }

    /// Continue parsing at `target` after this node, with the same source.
    pub fn redirect(self, target: NodeId) -> Self {
        self.forward(target, None, false)
    }

    /// Continue parsing at `target`, running it with the source `modifier`
    /// derives.
    pub fn redirect_with(
        self,
        target: NodeId,
        modifier: impl Fn(&CommandContext<S>) -> Result<S, CommandError> + Send + Sync + 'static,
    ) -> Self {
        self.forward(
            target,
            Some(RedirectModifier::Single(Arc::new(modifier))),
            false,
        )
    }

    /// Continue parsing at `target` and run it once for every source
    /// `modifier` produces. One failing source does not stop the others.
    pub fn fork(
        self,
        target: NodeId,
        modifier: impl Fn(&CommandContext<S>) -> Result<Vec<S>, CommandError> + Send + Sync + 'static,
    ) -> Self {
        self.forward(
            target,
            Some(RedirectModifier::Multi(Arc::new(modifier))),
            true,
        )
    }

    /// The general form of [`redirect`](Self::redirect) and [`fork`](Self::fork).
    pub fn forward(
        mut self,
        target: NodeId,
        modifier: Option<RedirectModifier<S>>,
        fork: bool,
    ) -> Self {
        self.target = Some(target);
        self.modifier = modifier;
        self.forks = fork;
        self
    }

    /// Replace the argument type's suggestions with `provider`.
    pub fn suggests(mut self, provider: impl SuggestionProvider<S> + 'static) -> Self {
        self.suggestions = Some(Arc::new(provider));
        self
    }

    /// [`suggests`](Self::suggests) for a synchronous closure.
    pub fn suggests_with(
        self,
        provider: impl Fn(&CommandContext<S>, SuggestionsBuilder) -> Result<Suggestions, CommandSyntaxError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.suggests(provider)
    }
}
