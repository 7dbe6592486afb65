//! Half-open byte ranges into a command line.

use std::fmt;

/// A half-open `[start, end)` byte range into the input a command was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringRange {
    start: usize,
    end: usize,
}

impl StringRange {
    /// An empty range positioned at `pos`.
    #[inline]
    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// The range `[start, end)`.
    #[inline]
    pub fn between(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} is past its end {end}");
        Self { start, end }
    }

    /// The smallest range covering both `a` and `b`.
    #[inline]
    pub fn encompassing(a: StringRange, b: StringRange) -> Self {
        Self {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }

    /// Start offset (inclusive).
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of bytes covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the range covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice `input` by this range, clamped to the input length.
    ///
    /// Returns an empty string when the range does not fall on character
    /// boundaries of `input`.
    pub fn get<'a>(&self, input: &'a str) -> &'a str {
        let end = self.end.min(input.len());
        let start = self.start.min(end);
        input.get(start..end).unwrap_or("")
    }
}

impl fmt::Display for StringRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
