use std::sync::Arc;

use cmdtree_text::SyntaxErrorKind;
use tracing::{debug, instrument};

use super::{Dispatcher, ParseResult};
use crate::Source;
use crate::context::CommandContext;
use crate::error::CommandError;

impl<S: Source> Dispatcher<S> {
    /// Parse and run `input` on behalf of `source`. Returns the command's
    /// result code, or the sum over all sources if a fork was followed.
    pub fn execute(&self, input: impl Into<Arc<str>>, source: S) -> Result<i32, CommandError> {
        let parse = self.parse(input, source);
        self.execute_parsed(&parse)
    }

    /// Run an earlier parse. A parse can be executed any number of times.
    #[instrument(skip_all, fields(input = %parse.reader().string()))]
    pub fn execute_parsed(&self, parse: &ParseResult<S>) -> Result<i32, CommandError> {
        let reader = parse.reader();
        if reader.can_read() {
            let err = if parse.errors().len() == 1 {
                parse
                    .errors()
                    .values()
                    .next()
                    .cloned()
                    .unwrap_or_else(|| SyntaxErrorKind::UnknownArgument.with_context(reader))
            } else if parse.context().range().is_empty() {
                SyntaxErrorKind::UnknownCommand.with_context(reader)
            } else {
                SyntaxErrorKind::UnknownArgument.with_context(reader)
            };
            debug!(error = %err, "Input did not match");
            return Err(err.into());
        }

        let context = parse.context().build(reader.shared_string());
        let mut found = false;
        let result = self.run_link(&context, &mut found);
        if !found {
            self.notify(&context, false, 0);
            debug!("No command at end of input");
            return Err(SyntaxErrorKind::UnknownCommand.with_context(reader).into());
        }
        result
    }

    /// Run one link of the chain. `found` is set once a command or redirect
    /// modifier has been reached.
    fn run_link(&self, context: &CommandContext<S>, found: &mut bool) -> Result<i32, CommandError> {
        let Some(child) = context.child() else {
            let Some(command) = context.command() else {
                return Ok(0);
            };
            *found = true;
            return match command(context) {
                Ok(result) => {
                    self.notify(context, true, result);
                    Ok(result)
                }
                Err(err) => {
                    self.notify(context, false, 0);
                    debug!(code = err.error_code(), error = %err, "Command failed");
                    Err(err)
                }
            };
        };

        if !child.has_nodes() {
            return Ok(0);
        }
        *found = true;

        let sources = match context.redirect_modifier() {
            None => vec![context.source().clone()],
            Some(modifier) => match modifier.apply(context) {
                Ok(sources) => sources,
                Err(err) => {
                    self.notify(context, false, 0);
                    debug!(code = err.error_code(), error = %err, "Redirect modifier failed");
                    return Err(err);
                }
            },
        };

        if !context.is_forked() {
            let mut total: i32 = 0;
            for source in sources {
                total = total.saturating_add(self.run_link(&child.copy_for(source), found)?);
            }
            return Ok(total);
        }

        debug!(sources = sources.len(), "Forking");
        let mut total: i32 = 0;
        let mut deferred: Option<CommandError> = None;
        for source in sources {
            match self.run_link(&child.copy_for(source), found) {
                Ok(result) => total = total.saturating_add(result),
                Err(err) => {
                    debug!(error = %err, "Forked branch failed, continuing");
                    deferred.get_or_insert(err);
                }
            }
        }
        match deferred {
            Some(err) => Err(err),
            None => Ok(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::integer;
    use crate::tree::{argument, literal};
    use std::sync::Mutex;

    #[test]
    fn test_execute_simple() {
        let mut dispatcher = Dispatcher::<()>::new();
        dispatcher.register(literal("foo").executes(|_| Ok(42))).unwrap();
        assert_eq!(dispatcher.execute("foo", ()).unwrap(), 42);
    }

    #[test]
    fn test_unknown_command() {
        let dispatcher = Dispatcher::<()>::new();
        let err = dispatcher.execute("foo", ()).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.kind(), &SyntaxErrorKind::UnknownCommand);
        assert_eq!(syntax.cursor(), Some(0));
    }

    #[test]
    fn test_matched_but_not_executable() {
        let mut dispatcher = Dispatcher::<()>::new();
        dispatcher
            .register(literal("foo").then(literal("bar").executes(|_| Ok(1))))
            .unwrap();
        let err = dispatcher.execute("foo", ()).unwrap_err();
        assert_eq!(
            err.as_syntax().unwrap().kind(),
            &SyntaxErrorKind::UnknownCommand
        );
    }

    #[test]
    fn test_incorrect_argument() {
        let mut dispatcher = Dispatcher::<()>::new();
        dispatcher
            .register(
                literal("foo")
                    .then(literal("a").executes(|_| Ok(1)))
                    .then(literal("b").executes(|_| Ok(2))),
            )
            .unwrap();
        let err = dispatcher.execute("foo c", ()).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.kind(), &SyntaxErrorKind::UnknownArgument);
        assert_eq!(syntax.cursor(), Some(4));
    }

    #[test]
    fn test_single_candidate_error_is_surfaced() {
        let mut dispatcher = Dispatcher::<()>::new();
        dispatcher
            .register(literal("foo").then(argument("n", integer()).executes(|_| Ok(1))))
            .unwrap();
        let err = dispatcher.execute("foo x", ()).unwrap_err();
        assert_eq!(err.as_syntax().unwrap().kind(), &SyntaxErrorKind::ExpectedInt);
    }

    #[test]
    fn test_consumer_sees_outcomes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = Dispatcher::<()>::new();
        dispatcher.register(literal("ok").executes(|_| Ok(3))).unwrap();
        dispatcher
            .register(literal("bad").executes(|_| Err(CommandError::failed("nope"))))
            .unwrap();
        let log = Arc::clone(&seen);
        dispatcher.set_consumer(move |_, success, result| {
            log.lock().unwrap().push((success, result));
        });

        dispatcher.execute("ok", ()).unwrap();
        assert!(dispatcher.execute("bad", ()).is_err());
        assert_eq!(*seen.lock().unwrap(), vec![(true, 3), (false, 0)]);
    }

    #[test]
    fn test_parse_is_reusable() {
        let mut dispatcher = Dispatcher::<()>::new();
        dispatcher.register(literal("foo").executes(|_| Ok(7))).unwrap();
        let parse = dispatcher.parse("foo", ());
        assert_eq!(dispatcher.execute_parsed(&parse).unwrap(), 7);
        assert_eq!(dispatcher.execute_parsed(&parse).unwrap(), 7);
    }
}
