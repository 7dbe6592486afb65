//! Integration tests for completion suggestions.

mod common;

use async_trait::async_trait;
use cmdtree::arguments::{boolean, integer, word};
use cmdtree::{
    argument, literal, CommandContext, CommandSyntaxError, Dispatcher, StringRange,
    SuggestionProvider, Suggestions, SuggestionsBuilder, SyntaxErrorKind,
};
use common::{execute_grammar, texts, Trace};

fn root_commands() -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(literal("foo")).unwrap();
    dispatcher.register(literal("bar")).unwrap();
    dispatcher.register(literal("baz")).unwrap();
    dispatcher
}

#[tokio::test]
async fn test_root_commands() {
    let dispatcher = root_commands();
    let parse = dispatcher.parse("", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::at(0));
    assert_eq!(texts(&result), vec!["bar", "baz", "foo"]);
}

#[tokio::test]
async fn test_root_commands_partial() {
    let dispatcher = root_commands();
    let parse = dispatcher.parse("b", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::between(0, 1));
    assert_eq!(texts(&result), vec!["bar", "baz"]);
}

#[tokio::test]
async fn test_literal_prefix_is_case_insensitive() {
    let dispatcher = root_commands();
    let parse = dispatcher.parse("BA", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(texts(&result), vec!["bar", "baz"]);
}

#[tokio::test]
async fn test_sub_commands() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(
            literal("parent")
                .then(literal("foo"))
                .then(literal("bar"))
                .then(literal("baz")),
        )
        .unwrap();

    let parse = dispatcher.parse("parent ", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::at(7));
    assert_eq!(texts(&result), vec!["bar", "baz", "foo"]);

    let parse = dispatcher.parse("parent b", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::between(7, 8));
    assert_eq!(texts(&result), vec!["bar", "baz"]);
}

#[tokio::test]
async fn test_moving_cursor() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(
            literal("parent_one")
                .then(literal("faz"))
                .then(literal("fbz"))
                .then(literal("gaz")),
        )
        .unwrap();
    dispatcher.register(literal("parent_two")).unwrap();

    let parse = dispatcher.parse("parent_one faz ", ());

    let at_start = dispatcher.completion_suggestions_at(&parse, 0).await;
    assert_eq!(at_start.range(), StringRange::at(0));
    assert_eq!(texts(&at_start), vec!["parent_one", "parent_two"]);

    let in_first_word = dispatcher.completion_suggestions_at(&parse, 3).await;
    assert_eq!(in_first_word.range(), StringRange::between(0, 3));
    assert_eq!(texts(&in_first_word), vec!["parent_one", "parent_two"]);

    let at_second_word = dispatcher.completion_suggestions_at(&parse, 11).await;
    assert_eq!(at_second_word.range(), StringRange::at(11));
    assert_eq!(texts(&at_second_word), vec!["faz", "fbz", "gaz"]);

    let in_second_word = dispatcher.completion_suggestions_at(&parse, 12).await;
    assert_eq!(in_second_word.range(), StringRange::between(11, 12));
    assert_eq!(texts(&in_second_word), vec!["faz", "fbz"]);

    let past_everything = dispatcher.completion_suggestions_at(&parse, 15).await;
    assert!(past_everything.is_empty());
}

#[tokio::test]
async fn test_boolean_argument() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(literal("set").then(argument("flag", boolean()).executes(|_| Ok(1))))
        .unwrap();

    let parse = dispatcher.parse("set ", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::at(4));
    assert_eq!(texts(&result), vec!["false", "true"]);

    let parse = dispatcher.parse("set f", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(texts(&result), vec!["false"]);
}

#[tokio::test]
async fn test_literal_and_argument_siblings_merge() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(
            literal("toggle")
                .then(literal("all"))
                .then(argument("value", boolean())),
        )
        .unwrap();
    let parse = dispatcher.parse("toggle ", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(texts(&result), vec!["all", "false", "true"]);
    assert!(result.list().iter().all(|s| s.range() == result.range()));
}

#[tokio::test]
async fn test_redirect_target_children() {
    let mut dispatcher = Dispatcher::<()>::new();
    let actual = dispatcher
        .register(literal("actual").then(literal("sub")))
        .unwrap();
    dispatcher
        .register(literal("redirect").redirect(actual))
        .unwrap();

    let parse = dispatcher.parse("redirect ", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::at(9));
    assert_eq!(texts(&result), vec!["sub"]);
}

#[tokio::test]
async fn test_redirect_chain_to_root() {
    let trace = Trace::default();
    let dispatcher = execute_grammar(&trace);
    let parse = dispatcher.parse("execute at home run f", "me".to_owned());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(result.range(), StringRange::between(20, 21));
    assert_eq!(texts(&result), vec!["fail", "foo"]);
}

struct Warps;

#[async_trait]
impl SuggestionProvider<()> for Warps {
    async fn suggestions(
        &self,
        _context: &CommandContext<()>,
        mut builder: SuggestionsBuilder,
    ) -> Result<Suggestions, CommandSyntaxError> {
        tokio::task::yield_now().await;
        for name in ["home", "harbor", "spawn"] {
            if name.starts_with(builder.remaining_lower_case()) {
                builder.suggest_with_tooltip(name, format!("Warp to {name}"));
            }
        }
        Ok(builder.build())
    }
}

#[tokio::test]
async fn test_custom_provider_replaces_type_suggestions() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(literal("warp").then(argument("name", word()).suggests(Warps)))
        .unwrap();

    let parse = dispatcher.parse("warp h", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(texts(&result), vec!["harbor", "home"]);
    assert_eq!(result.list()[1].tooltip(), Some("Warp to home"));
}

#[tokio::test]
async fn test_failing_provider_contributes_nothing() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(
            literal("pick")
                .then(literal("first"))
                .then(argument("n", integer()).suggests_with(|_, _| {
                    Err(SyntaxErrorKind::ParseFailure("offline".into()).create())
                })),
        )
        .unwrap();

    let parse = dispatcher.parse("pick ", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(texts(&result), vec!["first"]);
}

#[tokio::test]
async fn test_integer_suggestions_sort_by_value() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(literal("roll").then(argument("sides", integer()).suggests_with(
            |_, mut builder| {
                for sides in [20, 4, 100, 6] {
                    builder.suggest_integer(sides);
                }
                Ok(builder.build())
            },
        )))
        .unwrap();
    let parse = dispatcher.parse("roll ", ());
    let result = dispatcher.completion_suggestions(&parse).await;
    assert_eq!(texts(&result), vec!["4", "6", "20", "100"]);
}
