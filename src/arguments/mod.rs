//! Argument types: how a typed parameter reads itself from input and what it
//! suggests while the user is still typing.
//!
//! ## Traits
//!
//! - [`ArgumentType<S>`]: parse one value, list suggestions, give examples.
//!   Implemented by the built-ins ([`integer`], [`word`], [`boolean`], ...) and
//!   by host types.
//! - [`SuggestionProvider<S>`]: a per-registration override for suggestions.
//!   Plain closures `Fn(&CommandContext<S>, SuggestionsBuilder)` implement it.
//!
//! Tree nodes hold argument types behind an object safe wrapper so that one
//! tree can mix arguments of any value type. Parsed values are stored type
//! erased and recovered with [`CommandContext::argument`].

mod boolean;
mod numeric;
mod string;

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use cmdtree_text::{CommandSyntaxError, StringReader, Suggestions, SuggestionsBuilder};

use crate::Source;
use crate::context::CommandContext;

pub use boolean::{boolean, BoolArgument};
pub use numeric::{
    double, double_between, double_min, float, float_between, float_min, integer,
    integer_between, integer_min, long, long_between, long_min, DoubleArgument, FloatArgument,
    IntegerArgument, LongArgument,
};
pub use string::{escape_if_required, greedy_string, string, word, StringArgument, StringKind};

/// A parsed argument value with its type erased.
pub type ArgumentValue = Arc<dyn Any + Send + Sync>;

// ============================================================================
// Host facing traits
// ============================================================================

/// A typed command parameter.
///
/// `parse` must leave the reader just past the value on success. On failure
/// the caller restores the cursor, so implementations may return early
/// without cleaning up.
#[async_trait]
pub trait ArgumentType<S: Source>: Send + Sync + 'static {
    /// What a successful parse produces.
    type Value: Send + Sync + 'static;

    /// Read one value.
    fn parse(&self, reader: &mut StringReader) -> Result<Self::Value, CommandSyntaxError>;

    /// Suggestions for the partially typed value in `builder`.
    async fn list_suggestions(
        &self,
        _context: &CommandContext<S>,
        _builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError> {
        Ok(Suggestions::empty())
    }

    /// Representative inputs, used for ambiguity detection.
    fn examples(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Custom suggestions attached to one argument node, replacing the type's own.
#[async_trait]
pub trait SuggestionProvider<S: Source>: Send + Sync {
    /// Suggestions for the partially typed value in `builder`.
    async fn suggestions(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError>;
}

#[async_trait]
impl<S, F> SuggestionProvider<S> for F
where
    S: Source,
    F: Fn(&CommandContext<S>, SuggestionsBuilder) -> Result<Suggestions, CommandSyntaxError>
        + Send
        + Sync,
{
    async fn suggestions(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError> {
        (self)(context, builder)
    }
}

// ============================================================================
// Type erasure for tree nodes
// ============================================================================

/// Object safe view of an [`ArgumentType`], used inside tree nodes.
#[async_trait]
pub(crate) trait ErasedArgumentType<S: Source>: Send + Sync {
    fn parse_value(&self, reader: &mut StringReader) -> Result<ArgumentValue, CommandSyntaxError>;

    async fn suggest(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError>;

    fn example_inputs(&self) -> Vec<String>;

    /// Name of the value type, for equality and error messages.
    fn value_type_name(&self) -> &'static str;
}

#[async_trait]
impl<S: Source, T: ArgumentType<S>> ErasedArgumentType<S> for T {
    fn parse_value(&self, reader: &mut StringReader) -> Result<ArgumentValue, CommandSyntaxError> {
        let value = ArgumentType::<S>::parse(self, reader)?;
        Ok(Arc::new(value))
    }

    async fn suggest(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError> {
        ArgumentType::<S>::list_suggestions(self, context, builder).await
    }

    fn example_inputs(&self) -> Vec<String> {
        ArgumentType::<S>::examples(self)
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<<T as ArgumentType<S>>::Value>()
    }
}
