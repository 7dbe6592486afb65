//! Completion suggestions.
//!
//! A [`Suggestion`] proposes replacing one [`StringRange`] of the input with
//! new text. [`Suggestions`] groups the suggestions computed for one cursor
//! position and [`Suggestions::merge`] combines the groups produced by
//! several grammar nodes into a single, sorted, de-duplicated list over a
//! common range.

mod builder;

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::range::StringRange;

pub use builder::SuggestionsBuilder;

/// A proposed replacement for part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    range: StringRange,
    text: String,
    tooltip: Option<String>,
    /// Set for numeric suggestions, which sort by value.
    value: Option<i32>,
}

impl Suggestion {
    /// Suggest `text` in place of `range`.
    pub fn new(range: StringRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: None,
            value: None,
        }
    }

    /// Suggest an integer in place of `range`.
    pub fn integer(range: StringRange, value: i32) -> Self {
        Self {
            range,
            text: value.to_string(),
            tooltip: None,
            value: Some(value),
        }
    }

    /// Attach a tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// The range being replaced.
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// The replacement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Optional explanation shown next to the suggestion.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Numeric value, for integer suggestions.
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// Apply the suggestion to `input`.
    pub fn apply(&self, input: &str) -> String {
        if self.range.start() == 0 && self.range.end() == input.len() {
            return self.text.clone();
        }
        let before = input.get(..self.range.start()).unwrap_or(input);
        let after = input.get(self.range.end()..).unwrap_or("");
        let mut out = String::with_capacity(before.len() + self.text.len() + after.len());
        out.push_str(before);
        out.push_str(&self.text);
        out.push_str(after);
        out
    }

    /// Re-express this suggestion against a wider `range` of `command`.
    ///
    /// Text of `command` that lies inside `range` but outside the
    /// suggestion's own range is copied around the replacement text.
    pub fn expand(&self, command: &str, range: StringRange) -> Suggestion {
        if range == self.range {
            return self.clone();
        }
        let mut text = String::new();
        if range.start() < self.range.start() {
            text.push_str(StringRange::between(range.start(), self.range.start()).get(command));
        }
        text.push_str(&self.text);
        if range.end() > self.range.end() {
            text.push_str(StringRange::between(self.range.end(), range.end()).get(command));
        }
        Suggestion {
            range,
            text,
            tooltip: self.tooltip.clone(),
            value: self.value,
        }
    }

    /// Case-insensitive ordering; two integer suggestions compare by value.
    pub fn compare_ignore_case(&self, other: &Suggestion) -> Ordering {
        match (self.value, other.value) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.text.to_lowercase().cmp(&other.text.to_lowercase()),
        }
    }

    /// [`compare_ignore_case`](Self::compare_ignore_case) refined into a total order.
    fn total_cmp(&self, other: &Suggestion) -> Ordering {
        self.compare_ignore_case(other)
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.tooltip.cmp(&other.tooltip))
            .then_with(|| self.range.start().cmp(&other.range.start()))
            .then_with(|| self.range.end().cmp(&other.range.end()))
    }
}

/// The suggestions computed for one position, sharing a common range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestions {
    range: StringRange,
    list: Vec<Suggestion>,
}

impl Suggestions {
    /// No suggestions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already merged list.
    pub fn new(range: StringRange, list: Vec<Suggestion>) -> Self {
        Self { range, list }
    }

    /// The range every suggestion in the list replaces.
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// The sorted suggestions.
    pub fn list(&self) -> &[Suggestion] {
        &self.list
    }

    /// Consume, keeping the list.
    pub fn into_list(self) -> Vec<Suggestion> {
        self.list
    }

    /// True when there is nothing to suggest.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Merge the results of several providers for the same `command`.
    pub fn merge(command: &str, input: Vec<Suggestions>) -> Suggestions {
        match input.len() {
            0 => Suggestions::empty(),
            1 => input.into_iter().next().unwrap_or_default(),
            _ => {
                let all = input.into_iter().flat_map(|s| s.list).collect();
                Suggestions::create(command, all)
            }
        }
    }

    /// Build a sorted, de-duplicated group from loose suggestions.
    ///
    /// The group's range is the union of every suggestion's range; each
    /// suggestion is expanded to it before de-duplication.
    pub fn create(command: &str, suggestions: Vec<Suggestion>) -> Suggestions {
        let Some(range) = suggestions
            .iter()
            .map(Suggestion::range)
            .reduce(StringRange::encompassing)
        else {
            return Suggestions::empty();
        };

        let mut seen = HashSet::with_capacity(suggestions.len());
        let mut list: Vec<Suggestion> = suggestions
            .iter()
            .map(|s| s.expand(command, range))
            .filter(|s| seen.insert(s.clone()))
            .collect();
        list.sort_by(Suggestion::total_cmp);

        Suggestions { range, list }
    }
}
