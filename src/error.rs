//! Error types raised by the engine.
//!
//! Parsing problems are [`CommandSyntaxError`]s from the text layer. This
//! module adds what can go wrong above it: a command failing while it runs
//! ([`CommandError`]), a command asking for an argument that was never parsed
//! ([`ArgumentError`]), and a grammar that cannot be built ([`GrammarError`]).

use std::error::Error as StdError;

use cmdtree_text::CommandSyntaxError;
use thiserror::Error;

use crate::tree::NodeId;

// ============================================================================
// Execution errors
// ============================================================================

/// Errors surfaced by [`Dispatcher::execute`](crate::Dispatcher::execute)
/// and by command callbacks.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input did not match the grammar, or a callback reported a syntax error.
    #[error(transparent)]
    Syntax(#[from] CommandSyntaxError),

    /// A callback read an argument that is missing or of another type.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A callback failed for a reason of its own.
    #[error("{0}")]
    Failed(Box<dyn StdError + Send + Sync>),
}

impl CommandError {
    /// Wrap any error (or message) raised by host code.
    pub fn failed(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Failed(error.into())
    }

    /// The syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&CommandSyntaxError> {
        match self {
            Self::Syntax(e) => Some(e),
            _ => None,
        }
    }

    /// A static code for logs: the syntax error id, or a category.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax(e) => e.kind().id(),
            Self::Argument(ArgumentError::Missing(_)) => "argument.missing",
            Self::Argument(ArgumentError::WrongType { .. }) => "argument.wrong_type",
            Self::Failed(_) => "command.failed",
        }
    }
}

/// Raised by [`CommandContext::argument`](crate::CommandContext::argument).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No argument with this name was parsed for the command.
    #[error("No such argument '{0}' exists on this command")]
    Missing(String),

    /// The argument exists but holds a value of another type.
    #[error("Argument '{name}' is defined as {actual}, not {expected}")]
    WrongType {
        /// Argument name.
        name: String,
        /// Requested type.
        expected: &'static str,
        /// Type the argument parsed into.
        actual: &'static str,
    },
}

// ============================================================================
// Grammar construction errors
// ============================================================================

/// Raised when a builder cannot be turned into (or attached to) the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Cannot add the root node as a child of another node")]
    RootAsChild,

    #[error("Node '{0}' cannot have both children and a redirect")]
    RedirectWithChildren(String),

    #[error("Custom suggestions are only allowed on argument nodes, not literal '{0}'")]
    SuggestionsOnLiteral(String),

    #[error("No node {0} in this tree")]
    UnknownNode(NodeId),

    #[error("Adding '{child}' under '{parent}' would make '{parent}' its own descendant")]
    ChildCycle {
        /// Name of the node the child was being added to.
        parent: String,
        /// Name of the child, which already leads back to the parent.
        child: String,
    },
}

impl GrammarError {
    /// A static code for logs.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RootAsChild => "root_as_child",
            Self::RedirectWithChildren(_) => "redirect_with_children",
            Self::SuggestionsOnLiteral(_) => "suggestions_on_literal",
            Self::UnknownNode(_) => "unknown_node",
            Self::ChildCycle { .. } => "child_cycle",
        }
    }
}
