//! Line-oriented console over the demo grammar.
//!
//! - `?<partial input>` prints completions for the partial input
//! - `!usage` prints one condensed usage line per top-level command
//! - anything else is executed

mod grammar;
mod source;

use cmdtree::{literal, Dispatcher, GrammarError};
use thiserror::Error;
use tracing::{debug, trace, warn};

use self::grammar::ConsoleState;
use self::source::ConsoleSource;
use crate::config::{AliasConfig, Config};

/// Errors building the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error("alias '{alias}' targets unknown command '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
    #[error("alias '{0}' would shadow an existing command")]
    AliasShadowsCommand(String),
}

/// A dispatcher, its state and the source every line runs as.
#[derive(Debug)]
pub struct Console {
    dispatcher: Dispatcher<ConsoleSource>,
    state: ConsoleState,
    source: ConsoleSource,
    suggestion_limit: usize,
}

impl Console {
    /// Build the grammar and register the configured aliases.
    pub fn new(config: &Config) -> Result<Self, ConsoleError> {
        let state = ConsoleState::default();
        let mut dispatcher = Dispatcher::new();
        grammar::register(&mut dispatcher, &state)?;

        for alias in &config.alias {
            register_alias(&mut dispatcher, alias)?;
        }

        dispatcher.set_consumer(|ctx, success, result| {
            trace!(input = ctx.input(), success, result, "Command finished");
        });

        for ambiguity in dispatcher.find_ambiguities() {
            warn!(
                child = ?dispatcher.path(ambiguity.child),
                sibling = ?dispatcher.path(ambiguity.sibling),
                inputs = ?ambiguity.inputs,
                "Ambiguous grammar"
            );
        }

        let source = ConsoleSource::new(config.console.name.as_str(), config.console.operator);
        let help = dispatcher
            .smart_usage(dispatcher.root(), &source)
            .into_iter()
            .map(|(_, line)| line)
            .collect();
        // Only ever set here.
        let _ = state.help.set(help);

        Ok(Self {
            dispatcher,
            state,
            source,
            suggestion_limit: config.console.suggestion_limit.max(1),
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher<ConsoleSource> {
        &self.dispatcher
    }

    /// Handle one input line, returning what should be printed.
    pub async fn handle_line(&self, line: &str) -> Vec<String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Vec::new();
        }
        if let Some(partial) = line.strip_prefix('?') {
            return self.suggest(partial).await;
        }
        if line.trim() == "!usage" {
            return self.usage();
        }
        self.execute(line)
    }

    fn execute(&self, line: &str) -> Vec<String> {
        let result = self.dispatcher.execute(line, self.source.clone());
        let mut lines = self.state.output.drain();
        match result {
            Ok(value) => lines.push(format!("=> {value}")),
            Err(e) => {
                debug!(input = line, code = e.error_code(), error = %e, "Command failed");
                lines.push(format!("error[{}]: {e}", e.error_code()));
            }
        }
        lines
    }

    async fn suggest(&self, partial: &str) -> Vec<String> {
        let parse = self.dispatcher.parse(partial, self.source.clone());
        let suggestions = self.dispatcher.completion_suggestions(&parse).await;
        if suggestions.is_empty() {
            return vec!["no suggestions".to_owned()];
        }

        let range = suggestions.range();
        let total = suggestions.list().len();
        let mut lines = vec![format!(
            "{total} suggestion(s) for [{}..{}]",
            range.start(),
            range.end()
        )];
        lines.extend(
            suggestions
                .list()
                .iter()
                .take(self.suggestion_limit)
                .map(|s| match s.tooltip() {
                    Some(tooltip) => format!("  {} ({tooltip})", s.text()),
                    None => format!("  {}", s.text()),
                }),
        );
        if total > self.suggestion_limit {
            lines.push(format!("  ... {} more", total - self.suggestion_limit));
        }
        lines
    }

    fn usage(&self) -> Vec<String> {
        self.dispatcher
            .smart_usage(self.dispatcher.root(), &self.source)
            .into_iter()
            .map(|(_, line)| line)
            .collect()
    }
}

/// `name` becomes a top-level literal redirecting to the target node. The
/// target's command and requirement are copied so the alias also runs bare.
fn register_alias(
    dispatcher: &mut Dispatcher<ConsoleSource>,
    alias: &AliasConfig,
) -> Result<(), ConsoleError> {
    if dispatcher.node(dispatcher.root()).child(&alias.name).is_some() {
        return Err(ConsoleError::AliasShadowsCommand(alias.name.clone()));
    }
    let target = dispatcher
        .find_node(alias.target_path())
        .ok_or_else(|| ConsoleError::UnknownAliasTarget {
            alias: alias.name.clone(),
            target: alias.target.clone(),
        })?;

    let node = dispatcher.node(target);
    let mut builder = literal::<ConsoleSource>(alias.name.as_str()).redirect(target);
    if let Some(command) = node.command() {
        builder = builder.executes_shared(command.clone());
    }
    if let Some(requirement) = node.requirement().cloned() {
        builder = builder.requires(move |source| requirement(source));
    }
    dispatcher.register(builder)?;
    debug!(alias = %alias.name, target = %alias.target, "Registered alias");
    Ok(())
}
