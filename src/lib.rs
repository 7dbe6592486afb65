//! # cmdtree
//!
//! A command grammar engine. Hosts describe their command language as a tree
//! of literal and typed-argument nodes, then use one [`Dispatcher`] to parse
//! input against it, execute the matched command, and compute completions.
//!
//! ## Features
//!
//! - Fluent [`literal`] / [`argument`] builders that merge into the tree on
//!   registration, so several registrations can extend the same command
//! - Backtracking parse that records why each candidate node failed
//! - Redirects (aliases, loops back to the root) and forks (fan one command
//!   out over many sources)
//! - Async completion suggestions from every argument type, merged and sorted
//! - Ambiguity detection and human readable usage strings
//!
//! The character level machinery lives in [`cmdtree_text`] and is re-exported
//! from [`text`].
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdtree::{argument, literal, Dispatcher};
//! use cmdtree::arguments::integer;
//!
//! let mut dispatcher = Dispatcher::<()>::new();
//! dispatcher
//!     .register(literal("double").then(argument("n", integer()).executes(|ctx| {
//!         Ok(*ctx.argument::<i32>("n")? * 2)
//!     })))
//!     .unwrap();
//!
//! assert_eq!(dispatcher.execute("double 21", ()).unwrap(), 42);
//! ```

pub mod arguments;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod tree;

pub use cmdtree_text as text;

pub use self::arguments::{ArgumentType, SuggestionProvider};
pub use self::context::{
    CommandContext, CommandContextBuilder, ParsedArgument, ParsedCommandNode, SuggestionContext,
};
pub use self::dispatcher::{Dispatcher, ParseResult};
pub use self::error::{ArgumentError, CommandError, GrammarError};
pub use self::tree::{
    argument, literal, Ambiguity, Command, CommandNode, CommandTree, NodeBuilder, NodeId,
    NodeKind, RedirectModifier, Requirement, ResultConsumer,
};
pub use cmdtree_text::{
    CommandSyntaxError, StringRange, StringReader, Suggestion, Suggestions, SuggestionsBuilder,
    SyntaxErrorKind,
};

/// The type of the value a command runs on behalf of.
///
/// Sources are cloned into every parse attempt and every forked execution,
/// so they should be cheap to clone (plain data or an `Arc`).
pub trait Source: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Source for T {}
