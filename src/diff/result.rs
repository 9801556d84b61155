//! Diff result structures.

use super::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a diff stopped before the recursion converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteReason {
    /// The time budget ran out during an alignment search
    DeadlineExceeded,
    /// Recursion reached the configured depth limit
    DepthLimit,
}

impl IncompleteReason {
    /// Combine two reasons; a deadline hit dominates a depth cut.
    #[must_use]
    pub fn merge(current: Option<Self>, other: Option<Self>) -> Option<Self> {
        match (current, other) {
            (Some(Self::DeadlineExceeded), _) | (_, Some(Self::DeadlineExceeded)) => {
                Some(Self::DeadlineExceeded)
            }
            (Some(reason), _) | (None, Some(reason)) => Some(reason),
            (None, None) => None,
        }
    }
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadlineExceeded => write!(f, "time's up, unfinished"),
            Self::DepthLimit => write!(f, "recursion depth limit reached"),
        }
    }
}

/// Counters collected while diffing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Number of recursive calls, the outermost included
    pub calls: usize,
    /// Deepest recursion level reached
    pub max_depth: usize,
    /// Times the chunked strategy was tried after a fishy direct result
    pub escalations: usize,
    /// Wall-clock time spent, in milliseconds
    pub elapsed_ms: u64,
}

/// Complete result of a diff between an old and a new sequence.
///
/// Each span list is sorted, non-overlapping and free of empty spans. The
/// spans name the parts of each input that have no common counterpart in the
/// other one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Differing spans in the old sequence
    pub old: Vec<Span>,
    /// Differing spans in the new sequence
    pub new: Vec<Span>,
    /// Set when the spans are a conservative partial answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<IncompleteReason>,
    /// Search statistics
    #[serde(default)]
    pub stats: DiffStats,
}

impl DiffResult {
    /// Whether the recursion converged. When it did not, the spans may
    /// over-report differences.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_none()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.old.is_empty() || !self.new.is_empty()
    }

    /// Number of old elements inside differing spans
    #[must_use]
    pub fn old_changed_len(&self) -> usize {
        self.old.iter().map(Span::len).sum()
    }

    /// Number of new elements inside differing spans
    #[must_use]
    pub fn new_changed_len(&self) -> usize {
        self.new.iter().map(Span::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = DiffResult::default();
        assert!(result.is_complete());
        assert!(!result.has_changes());
        assert_eq!(result.old_changed_len(), 0);
    }

    #[test]
    fn test_changed_len() {
        let result = DiffResult {
            old: vec![Span::new(0, 2), Span::new(5, 6)],
            new: vec![Span::new(1, 4)],
            ..DiffResult::default()
        };
        assert!(result.has_changes());
        assert_eq!(result.old_changed_len(), 3);
        assert_eq!(result.new_changed_len(), 3);
    }

    #[test]
    fn test_merge_reasons() {
        use IncompleteReason::{DeadlineExceeded, DepthLimit};
        assert_eq!(IncompleteReason::merge(None, None), None);
        assert_eq!(IncompleteReason::merge(None, Some(DepthLimit)), Some(DepthLimit));
        assert_eq!(
            IncompleteReason::merge(Some(DepthLimit), Some(DeadlineExceeded)),
            Some(DeadlineExceeded)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let result = DiffResult {
            old: vec![Span::new(0, 1)],
            incomplete: Some(IncompleteReason::DeadlineExceeded),
            ..DiffResult::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["old"][0]["start"], 0);
        assert_eq!(json["old"][0]["end"], 1);
        assert_eq!(json["incomplete"], "deadline_exceeded");

        let complete = serde_json::to_value(DiffResult::default()).unwrap();
        assert!(complete.get("incomplete").is_none());
    }
}
