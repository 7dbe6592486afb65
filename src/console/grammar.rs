//! The demo grammar the console ships with.
//!
//! ```text
//! echo <text>                      print a (quotable) string
//! say <message...>                 print a line as the current source
//! math (add|sub|mul|div) <a> <b>   integer arithmetic
//! var set <name> <value>           store a variable
//! var get <name>                   read a variable (names are suggested)
//! var list | var clear             list / drop variables (clear is op only)
//! execute as <a+b+..> ...         run the rest once per name
//! execute deop ...                 run the rest without operator rights
//! execute run ...                  continue at the top level
//! help                             condensed usage
//! ```

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use async_trait::async_trait;
use cmdtree::arguments::{greedy_string, long, string, word};
use cmdtree::{
    argument, literal, CommandContext, CommandError, CommandSyntaxError, Dispatcher,
    GrammarError, SuggestionProvider, Suggestions, SuggestionsBuilder,
};
use dashmap::DashMap;

use super::source::ConsoleSource;

// ============================================================================
// Shared state
// ============================================================================

/// Lines written by commands, collected per input line.
#[derive(Debug, Clone, Default)]
pub struct Output(Arc<Mutex<Vec<String>>>);

impl Output {
    pub fn line(&self, line: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    /// Take everything written so far.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// State the grammar's commands close over.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    pub vars: Arc<DashMap<String, i64>>,
    pub output: Output,
    /// Filled once the whole grammar (aliases included) is registered.
    pub help: Arc<OnceLock<Vec<String>>>,
}

/// Command results are `i32`; wider values saturate.
fn clamp_result(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ============================================================================
// math
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl MathOp {
    const ALL: [MathOp; 4] = [MathOp::Add, MathOp::Sub, MathOp::Mul, MathOp::Div];

    fn name(self) -> &'static str {
        match self {
            MathOp::Add => "add",
            MathOp::Sub => "sub",
            MathOp::Mul => "mul",
            MathOp::Div => "div",
        }
    }

    fn apply(self, a: i64, b: i64) -> Result<i64, CommandError> {
        let value = match self {
            MathOp::Add => a.checked_add(b),
            MathOp::Sub => a.checked_sub(b),
            MathOp::Mul => a.checked_mul(b),
            MathOp::Div if b == 0 => return Err(CommandError::failed("division by zero")),
            MathOp::Div => a.checked_div(b),
        };
        value.ok_or_else(|| CommandError::failed(format!("{} {a} {b} overflows", self.name())))
    }
}

// ============================================================================
// var
// ============================================================================

/// Suggests the names of stored variables.
struct VariableNames(Arc<DashMap<String, i64>>);

#[async_trait]
impl SuggestionProvider<ConsoleSource> for VariableNames {
    async fn suggestions(
        &self,
        _context: &CommandContext<ConsoleSource>,
        mut builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError> {
        let prefix = builder.remaining_lower_case().to_owned();
        for entry in self.0.iter() {
            if entry.key().to_lowercase().starts_with(&prefix) {
                builder.suggest_with_tooltip(entry.key().clone(), entry.value().to_string());
            }
        }
        Ok(builder.build())
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Register every demo command on `dispatcher`.
pub fn register(
    dispatcher: &mut Dispatcher<ConsoleSource>,
    state: &ConsoleState,
) -> Result<(), GrammarError> {
    let root = dispatcher.root();

    let out = state.output.clone();
    dispatcher.register(literal("echo").then(argument("text", string()).executes(
        move |ctx| {
            let text: &String = ctx.argument("text")?;
            out.line(text.clone());
            Ok(1)
        },
    )))?;

    let out = state.output.clone();
    dispatcher.register(literal("say").then(argument("message", greedy_string()).executes(
        move |ctx: &CommandContext<ConsoleSource>| {
            let message: &String = ctx.argument("message")?;
            out.line(format!("[{}] {message}", ctx.source().name()));
            Ok(1)
        },
    )))?;

    let mut math = literal("math");
    for op in MathOp::ALL {
        let out = state.output.clone();
        math = math.then(literal(op.name()).then(argument("a", long()).then(
            argument("b", long()).executes(move |ctx| {
                let value = op.apply(*ctx.argument::<i64>("a")?, *ctx.argument::<i64>("b")?)?;
                out.line(value.to_string());
                Ok(clamp_result(value))
            }),
        )));
    }
    dispatcher.register(math)?;

    register_var(dispatcher, state)?;

    let execute = dispatcher.register(literal("execute"))?;
    dispatcher.attach(execute, literal("run").redirect(root))?;
    dispatcher.attach(
        execute,
        literal("deop").redirect_with(execute, |ctx: &CommandContext<ConsoleSource>| {
            Ok(ctx.source().without_operator())
        }),
    )?;
    let as_node = dispatcher.attach(execute, literal("as"))?;
    dispatcher.attach(
        as_node,
        argument("names", word()).fork(execute, |ctx: &CommandContext<ConsoleSource>| {
            let names: &String = ctx.argument("names")?;
            Ok(names
                .split('+')
                .filter(|name| !name.is_empty())
                .map(|name| ctx.source().with_name(name))
                .collect())
        }),
    )?;

    let out = state.output.clone();
    let help = Arc::clone(&state.help);
    dispatcher.register(literal("help").executes(move |_| {
        let lines = help.get().map(Vec::as_slice).unwrap_or_default();
        for line in lines {
            out.line(line.clone());
        }
        Ok(clamp_result(lines.len() as i64))
    }))?;

    Ok(())
}

fn register_var(
    dispatcher: &mut Dispatcher<ConsoleSource>,
    state: &ConsoleState,
) -> Result<(), GrammarError> {
    let var = dispatcher.register(literal("var"))?;

    let vars = Arc::clone(&state.vars);
    dispatcher.attach(
        var,
        literal("set").then(argument("name", word()).then(argument("value", long()).executes(
            move |ctx| {
                let name: &String = ctx.argument("name")?;
                let value = *ctx.argument::<i64>("value")?;
                vars.insert(name.clone(), value);
                Ok(clamp_result(value))
            },
        ))),
    )?;

    let vars = Arc::clone(&state.vars);
    let out = state.output.clone();
    dispatcher.attach(
        var,
        literal("get").then(
            argument("name", word())
                .suggests(VariableNames(Arc::clone(&state.vars)))
                .executes(move |ctx| {
                    let name: &String = ctx.argument("name")?;
                    let value = vars
                        .get(name)
                        .map(|entry| *entry.value())
                        .ok_or_else(|| CommandError::failed(format!("unknown variable '{name}'")))?;
                    out.line(format!("{name} = {value}"));
                    Ok(clamp_result(value))
                }),
        ),
    )?;

    let vars = Arc::clone(&state.vars);
    let out = state.output.clone();
    dispatcher.attach(
        var,
        literal("list").executes(move |_| {
            let mut entries: Vec<(String, i64)> = vars
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect();
            entries.sort();
            for (name, value) in &entries {
                out.line(format!("{name} = {value}"));
            }
            Ok(clamp_result(entries.len() as i64))
        }),
    )?;

    let vars = Arc::clone(&state.vars);
    dispatcher.attach(
        var,
        literal("clear")
            .requires(ConsoleSource::is_operator)
            .executes(move |ctx: &CommandContext<ConsoleSource>| {
                if !ctx.source().is_operator() {
                    return Err(CommandError::failed(format!(
                        "{} may not clear variables",
                        ctx.source().name()
                    )));
                }
                let count = vars.len();
                vars.clear();
                Ok(clamp_result(count as i64))
            }),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> (Dispatcher<ConsoleSource>, ConsoleState) {
        let state = ConsoleState::default();
        let mut dispatcher = Dispatcher::new();
        register(&mut dispatcher, &state).unwrap();
        (dispatcher, state)
    }

    fn op() -> ConsoleSource {
        ConsoleSource::new("console", true)
    }

    #[test]
    fn test_math_ops() {
        let (dispatcher, state) = grammar();
        assert_eq!(dispatcher.execute("math add 2 3", op()).unwrap(), 5);
        assert_eq!(dispatcher.execute("math sub 2 3", op()).unwrap(), -1);
        assert_eq!(dispatcher.execute("math mul -4 3", op()).unwrap(), -12);
        assert_eq!(dispatcher.execute("math div 7 2", op()).unwrap(), 3);
        assert_eq!(state.output.drain(), vec!["5", "-1", "-12", "3"]);
    }

    #[test]
    fn test_math_failures() {
        let (dispatcher, _) = grammar();
        let err = dispatcher.execute("math div 1 0", op()).unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
        let err = dispatcher
            .execute("math mul 9223372036854775807 2", op())
            .unwrap_err();
        assert_eq!(err.error_code(), "command.failed");
    }

    #[test]
    fn test_large_results_saturate() {
        let (dispatcher, _) = grammar();
        assert_eq!(
            dispatcher.execute("math add 4000000000 1", op()).unwrap(),
            i32::MAX
        );
    }

    #[test]
    fn test_variables() {
        let (dispatcher, state) = grammar();
        dispatcher.execute("var set b 2", op()).unwrap();
        dispatcher.execute("var set a 1", op()).unwrap();
        assert_eq!(dispatcher.execute("var get b", op()).unwrap(), 2);
        assert_eq!(dispatcher.execute("var list", op()).unwrap(), 2);
        assert_eq!(state.output.drain(), vec!["b = 2", "a = 1", "b = 2"]);

        let err = dispatcher.execute("var get c", op()).unwrap_err();
        assert_eq!(err.to_string(), "unknown variable 'c'");
    }

    #[test]
    fn test_clear_requires_operator() {
        let (dispatcher, state) = grammar();
        dispatcher.execute("var set a 1", op()).unwrap();
        let guest = ConsoleSource::new("guest", false);
        assert!(dispatcher.execute("var clear", guest).is_err());
        let err = dispatcher
            .execute("execute deop run var clear", op())
            .unwrap_err();
        assert_eq!(err.to_string(), "console may not clear variables");
        assert_eq!(state.vars.len(), 1);
        assert_eq!(dispatcher.execute("var clear", op()).unwrap(), 1);
        assert!(state.vars.is_empty());
    }

    #[test]
    fn test_execute_as_forks_per_name() {
        let (dispatcher, state) = grammar();
        let result = dispatcher
            .execute("execute as alice+bob run say hi there", op())
            .unwrap();
        assert_eq!(result, 2);
        assert_eq!(state.output.drain(), vec!["[alice] hi there", "[bob] hi there"]);
    }

    #[test]
    fn test_echo_quoted() {
        let (dispatcher, state) = grammar();
        dispatcher.execute("echo \"two words\"", op()).unwrap();
        dispatcher.execute("echo plain", op()).unwrap();
        assert_eq!(state.output.drain(), vec!["two words", "plain"]);
    }

    #[test]
    fn test_grammar_is_unambiguous() {
        let (dispatcher, _) = grammar();
        assert!(dispatcher.find_ambiguities().is_empty());
    }

    #[tokio::test]
    async fn test_variable_name_suggestions() {
        let (dispatcher, state) = grammar();
        state.vars.insert("speed".to_owned(), 3);
        state.vars.insert("size".to_owned(), 9);
        state.vars.insert("health".to_owned(), 20);

        let parse = dispatcher.parse("var get s", op());
        let suggestions = dispatcher.completion_suggestions(&parse).await;
        let texts: Vec<&str> = suggestions.list().iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["size", "speed"]);
        assert_eq!(suggestions.list()[0].tooltip(), Some("9"));
    }
}
