use super::{Suggestion, Suggestions};
use crate::range::StringRange;

/// Collects suggestions for the text from `start` to the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionsBuilder {
    input: String,
    start: usize,
    remaining: String,
    remaining_lower: String,
    result: Vec<Suggestion>,
}

impl SuggestionsBuilder {
    /// Suggest replacements for `input[start..]`.
    ///
    /// `start` is clamped to the input length.
    pub fn new(input: impl Into<String>, start: usize) -> Self {
        let input = input.into();
        let start = start.min(input.len());
        let remaining = input.get(start..).unwrap_or("").to_owned();
        let remaining_lower = remaining.to_lowercase();
        Self {
            input,
            start,
            remaining,
            remaining_lower,
            result: Vec::new(),
        }
    }

    /// The (possibly truncated) input suggestions are computed for.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Where the text being completed starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The text being completed.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// [`remaining`](Self::remaining), lowercased.
    pub fn remaining_lower_case(&self) -> &str {
        &self.remaining_lower
    }

    fn range(&self) -> StringRange {
        StringRange::between(self.start, self.input.len())
    }

    /// Suggest `text`, unless it is exactly what was already typed.
    pub fn suggest(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text != self.remaining {
            self.result.push(Suggestion::new(self.range(), text));
        }
        self
    }

    /// Suggest `text` with a tooltip, unless it is exactly what was already typed.
    pub fn suggest_with_tooltip(
        &mut self,
        text: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> &mut Self {
        let text = text.into();
        if text != self.remaining {
            self.result
                .push(Suggestion::new(self.range(), text).with_tooltip(tooltip));
        }
        self
    }

    /// Suggest an integer. Integer suggestions sort by value.
    pub fn suggest_integer(&mut self, value: i32) -> &mut Self {
        self.result.push(Suggestion::integer(self.range(), value));
        self
    }

    /// Suggest an integer with a tooltip.
    pub fn suggest_integer_with_tooltip(
        &mut self,
        value: i32,
        tooltip: impl Into<String>,
    ) -> &mut Self {
        self.result
            .push(Suggestion::integer(self.range(), value).with_tooltip(tooltip));
        self
    }

    /// Take over everything `other` collected.
    pub fn add(&mut self, other: SuggestionsBuilder) -> &mut Self {
        self.result.extend(other.result);
        self
    }

    /// A fresh builder over the same input starting at `start`.
    pub fn create_offset(&self, start: usize) -> SuggestionsBuilder {
        SuggestionsBuilder::new(self.input.clone(), start)
    }

    /// A fresh builder over the same input and start.
    pub fn restart(&self) -> SuggestionsBuilder {
        self.create_offset(self.start)
    }

    /// Finish, producing the sorted group.
    pub fn build(self) -> Suggestions {
        Suggestions::create(&self.input, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_appends() {
        let mut builder = SuggestionsBuilder::new("Hello w", 6);
        builder.suggest("world!");
        let result = builder.build();
        assert_eq!(result.list().len(), 1);
        assert_eq!(result.list()[0].text(), "world!");
        assert_eq!(result.range(), StringRange::between(6, 7));
        assert_eq!(result.list()[0].apply("Hello w"), "Hello world!");
    }

    #[test]
    fn test_suggest_skips_exact_remaining() {
        let mut builder = SuggestionsBuilder::new("Hello w", 6);
        builder.suggest("w");
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_suggest_replacement_and_insertion() {
        let mut builder = SuggestionsBuilder::new("Hello w", 6);
        builder.suggest("orld!").suggest("Everybody");
        let result = builder.build();
        let texts: Vec<&str> = result.list().iter().map(Suggestion::text).collect();
        assert_eq!(texts, vec!["Everybody", "orld!"]);
    }

    #[test]
    fn test_remaining_lower_case() {
        let builder = SuggestionsBuilder::new("say HeLLo", 4);
        assert_eq!(builder.remaining(), "HeLLo");
        assert_eq!(builder.remaining_lower_case(), "hello");
    }

    #[test]
    fn test_restart_and_offset() {
        let mut builder = SuggestionsBuilder::new("Hello w", 6);
        builder.suggest("won't be kept");
        let restarted = builder.restart();
        assert_eq!(restarted.start(), 6);
        assert!(restarted.build().is_empty());

        let offset = builder.create_offset(0);
        assert_eq!(offset.remaining(), "Hello w");
    }

    #[test]
    fn test_add_merges_results() {
        let mut a = SuggestionsBuilder::new("x", 0);
        a.suggest("alpha");
        let mut b = a.restart();
        b.suggest("beta");
        a.add(b);
        assert_eq!(a.build().list().len(), 2);
    }

    #[test]
    fn test_start_is_clamped() {
        let builder = SuggestionsBuilder::new("ab", 10);
        assert_eq!(builder.start(), 2);
        assert_eq!(builder.remaining(), "");
    }
}
