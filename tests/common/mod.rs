//! Integration test common infrastructure.
//!
//! Shared grammars and small helpers for asserting on execution traces and
//! suggestion lists.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cmdtree::arguments::{integer, word};
use cmdtree::{
    argument, literal, CommandContext, CommandError, Dispatcher, Suggestion, Suggestions,
};

/// Records every source a command ran for.
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Suggestion texts in order.
pub fn texts(suggestions: &Suggestions) -> Vec<String> {
    suggestions
        .list()
        .iter()
        .map(Suggestion::text)
        .map(str::to_owned)
        .collect()
}

/// A grammar modelled on a game's `execute` command, over string sources:
///
/// - `foo` runs and records its source
/// - `execute run ...` continues at the root
/// - `execute as <targets> ...` forks, one source per `+`-separated target
/// - `execute at <target> ...` redirects with the source replaced
/// - `fail` always fails
pub fn execute_grammar(trace: &Trace) -> Dispatcher<String> {
    let mut dispatcher = Dispatcher::new();
    let root = dispatcher.root();

    let foo_trace = trace.clone();
    dispatcher
        .register(literal("foo").executes(move |ctx: &CommandContext<String>| {
            foo_trace.push(ctx.source().clone());
            Ok(1)
        }))
        .unwrap();
    dispatcher
        .register(literal("fail").executes(|ctx: &CommandContext<String>| {
            Err(CommandError::failed(format!("failed for {}", ctx.source())))
        }))
        .unwrap();

    let execute = dispatcher.register(literal("execute")).unwrap();
    dispatcher
        .attach(execute, literal("run").redirect(root))
        .unwrap();
    let as_node = dispatcher.attach(execute, literal("as")).unwrap();
    dispatcher
        .attach(
            as_node,
            argument("targets", word()).fork(execute, |ctx| {
                let targets: &String = ctx.argument("targets")?;
                Ok(targets
                    .split('+')
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned)
                    .collect())
            }),
        )
        .unwrap();
    let at_node = dispatcher.attach(execute, literal("at")).unwrap();
    dispatcher
        .attach(
            at_node,
            argument("target", word()).redirect_with(execute, |ctx: &CommandContext<String>| {
                let target: &String = ctx.argument("target")?;
                Ok(format!("{}@{}", ctx.source(), target))
            }),
        )
        .unwrap();

    dispatcher
}

/// `give <item> [count]` plus a few siblings, for parse and usage checks.
pub fn give_grammar() -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register(
            literal("give").then(
                argument("item", word())
                    .executes(|_| Ok(1))
                    .then(argument("count", integer()).executes(|ctx| {
                        Ok(*ctx.argument::<i32>("count")?)
                    })),
            ),
        )
        .unwrap();
    dispatcher
        .register(literal("gamemode").then(literal("creative").executes(|_| Ok(1))).then(literal("survival").executes(|_| Ok(1))))
        .unwrap();
    dispatcher
}
