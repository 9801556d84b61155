//! Ordered sets of disjoint spans still undecided during recursion.

use super::Span;

/// Remove `[start, end)` from the first span in `regions` that contains it.
///
/// The containing span is replaced by its left remainder `[span.start, start)`
/// and right remainder `[end, span.end)`. With `final_pass` set, zero-length
/// remainders are dropped; otherwise they are kept as boundary markers so the
/// caller can still pair remainders index by index. Only the first containing
/// span is touched and a target contained by no span is a no-op.
pub fn subtract_region(regions: &mut Vec<Span>, start: usize, end: usize, final_pass: bool) {
    let Some(index) = regions
        .iter()
        .position(|span| span.contains_span(start, end))
    else {
        return;
    };

    let span = regions[index];
    let left = Span::new(span.start, start);
    let right = Span::new(end, span.end);
    let remainders = [left, right]
        .into_iter()
        .filter(|r| !final_pass || !r.is_empty());

    regions.splice(index..=index, remainders);
}

/// The undecided portion of one sequence, as an ordered list of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    spans: Vec<Span>,
}

impl RegionSet {
    /// A set holding one span over the whole sequence.
    #[must_use]
    pub fn whole(len: usize) -> Self {
        Self {
            spans: vec![Span::new(0, len)],
        }
    }

    #[must_use]
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Exclude `[start, end)`; see [`subtract_region`].
    pub fn subtract(&mut self, start: usize, end: usize, final_pass: bool) {
        subtract_region(&mut self.spans, start, end, final_pass);
    }

    /// Replace the span at `index` with `spans`.
    pub fn splice(&mut self, index: usize, spans: impl IntoIterator<Item = Span>) {
        self.spans.splice(index..=index, spans);
    }

    pub fn remove(&mut self, index: usize) -> Span {
        self.spans.remove(index)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Consume the set, shifting every span by `base` and dropping empty
    /// spans when `final_pass` is set.
    #[must_use]
    pub fn into_spans(self, base: usize, final_pass: bool) -> Vec<Span> {
        self.spans
            .into_iter()
            .filter(|s| !final_pass || !s.is_empty())
            .map(|s| s.shift(base))
            .collect()
    }
}
