use std::sync::Arc;

use cmdtree_text::{Suggestions, SuggestionsBuilder};
use futures_util::future::join_all;
use tracing::trace;

use super::{Dispatcher, ParseResult};
use crate::Source;
use crate::context::SuggestionContext;

impl<S: Source> Dispatcher<S> {
    /// Completions at the end of the parsed input.
    pub async fn completion_suggestions(&self, parse: &ParseResult<S>) -> Suggestions {
        self.completion_suggestions_at(parse, parse.reader().total_len())
            .await
    }

    /// Completions for the text around byte offset `cursor`.
    ///
    /// Every child of the node before the cursor is asked concurrently with
    /// the input truncated at the cursor. Providers that fail contribute
    /// nothing.
    pub async fn completion_suggestions_at(&self, parse: &ParseResult<S>, cursor: usize) -> Suggestions {
        let full_input = parse.reader().string();
        let mut cursor = cursor.min(full_input.len());
        while !full_input.is_char_boundary(cursor) {
            cursor -= 1;
        }

        let SuggestionContext { parent, start } = parse
            .context()
            .find_suggestion_context(cursor)
            .unwrap_or(SuggestionContext {
                parent: self.root(),
                start: 0,
            });
        let start = start.min(cursor);
        let truncated: Arc<str> = Arc::from(&full_input[..cursor]);
        let context = parse.context().build(Arc::clone(&truncated));

        let requests = self.node(parent).children().map(|child| {
            self.node(child)
                .list_suggestions(&context, SuggestionsBuilder::new(&*truncated, start))
        });
        let results: Vec<Suggestions> = join_all(requests)
            .await
            .into_iter()
            .filter_map(|result| {
                result
                    .map_err(|err| trace!(error = %err, "Suggestion provider failed"))
                    .ok()
            })
            .collect();

        Suggestions::merge(full_input, results)
    }
}
