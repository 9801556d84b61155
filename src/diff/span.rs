//! Half-open index intervals over one input sequence.

use crate::error::DiffErrorKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open interval `[start, end)` of indices into one sequence.
///
/// An empty span (`start == end`) carries no content. Intermediate recursion
/// levels keep empty spans as boundary markers; final results never contain
/// them.
///
/// Deserializing rejects spans whose `start` is past their `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    /// First index covered by the span
    pub start: usize,
    /// One past the last index covered by the span
    pub end: usize,
}

impl Span {
    /// Create a span. `start` must not exceed `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Create a span, or `None` when `start` is past `end`.
    #[must_use]
    pub const fn try_new(start: usize, end: usize) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// A zero-length span at `at`.
    #[must_use]
    pub const fn empty_at(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Number of covered indices; a reversed span covers none.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Move the span by `base` positions.
    #[must_use]
    pub const fn shift(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
        }
    }

    /// Whether `[start, end)` lies inside this span.
    ///
    /// Empty spans contain nothing, and `start` must point at an element of
    /// the span (so an empty target is only accepted strictly inside).
    #[must_use]
    pub const fn contains_span(&self, start: usize, end: usize) -> bool {
        self.end > self.start && self.start <= start && start < self.end && end <= self.end
    }

    /// The span as a `Range`, for slicing.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl<'de> Deserialize<'de> for Span {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            start: usize,
            end: usize,
        }

        let Raw { start, end } = Raw::deserialize(deserializer)?;
        Self::try_new(start, end)
            .ok_or_else(|| serde::de::Error::custom(DiffErrorKind::InvalidSpan { start, end }))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
