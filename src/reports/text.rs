//! Char-indexed views of the compared texts.
//!
//! Spans produced by [`DiffEngine::diff_str`](crate::diff::DiffEngine::diff_str)
//! count `char`s, so reporters go through [`IndexedText`] to turn them back
//! into string slices.

use crate::diff::{DiffResult, Span};
use crate::error::{ReportErrorKind, SpanDiffError};

/// Which input of a diff a span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl Side {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Spans of this side in a diff result
    #[must_use]
    pub fn spans(self, result: &DiffResult) -> &[Span] {
        match self {
            Self::Old => &result.old,
            Self::New => &result.new,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A string plus the byte offset of every char boundary.
#[derive(Debug, Clone)]
pub struct IndexedText<'a> {
    text: &'a str,
    /// `offsets[i]` is the byte offset of char `i`; the last entry is `text.len()`
    offsets: Vec<usize>,
}

impl<'a> IndexedText<'a> {
    pub fn new(text: &'a str) -> Self {
        let offsets = text
            .char_indices()
            .map(|(at, _)| at)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, offsets }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The text covered by a char span.
    pub fn slice(&self, span: Span) -> crate::error::Result<&'a str> {
        if span.start > span.end || span.end > self.char_len() {
            return Err(SpanDiffError::report(
                "slicing changed text",
                ReportErrorKind::SpanOutOfBounds {
                    start: span.start,
                    end: span.end,
                    len: self.char_len(),
                },
            ));
        }
        Ok(&self.text[self.offsets[span.start]..self.offsets[span.end]])
    }
}

/// The two compared texts.
#[derive(Debug, Clone)]
pub struct TextPair<'a> {
    pub old: IndexedText<'a>,
    pub new: IndexedText<'a>,
}

impl<'a> TextPair<'a> {
    pub fn new(old: &'a str, new: &'a str) -> Self {
        Self {
            old: IndexedText::new(old),
            new: IndexedText::new(new),
        }
    }

    pub fn side(&self, side: Side) -> &IndexedText<'a> {
        match side {
            Side::Old => &self.old,
            Side::New => &self.new,
        }
    }
}

/// Single-line preview of changed text, cut at `max_chars`.
///
/// Control characters are escaped so a span never breaks the report layout.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).flat_map(char::escape_debug).collect();
    if text.chars().nth(max_chars).is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_ascii() {
        let text = IndexedText::new("kitten");
        assert_eq!(text.char_len(), 6);
        assert_eq!(text.slice(Span::new(1, 4)).unwrap(), "itt");
        assert_eq!(text.slice(Span::new(6, 6)).unwrap(), "");
    }

    #[test]
    fn test_slice_multibyte() {
        let text = IndexedText::new("añb€c");
        assert_eq!(text.char_len(), 5);
        assert_eq!(text.slice(Span::new(1, 4)).unwrap(), "ñb€");
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let text = IndexedText::new("abc");
        let err = text.slice(Span::new(2, 5)).unwrap_err();
        assert!(matches!(err, SpanDiffError::Report { .. }));
    }

    #[test]
    fn test_preview_truncates_and_escapes() {
        assert_eq!(preview("a\nb", 10), "a\\nb");
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("abc", 3), "abc");
    }

    #[test]
    fn test_side_spans() {
        let result = DiffResult {
            old: vec![Span::new(0, 1)],
            new: vec![Span::new(2, 3), Span::new(4, 5)],
            ..DiffResult::default()
        };
        assert_eq!(Side::Old.spans(&result).len(), 1);
        assert_eq!(Side::New.spans(&result).len(), 2);
        assert_eq!(Side::New.to_string(), "new");
    }
}
