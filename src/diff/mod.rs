//! Recursive common-substring exclusion diff.
//!
//! Given two sequences, the engine reports the disjoint spans of each one
//! that are not part of any common substring it managed to exclude.
//!
//! # Architecture
//!
//! The engine is composed bottom-up:
//!
//! - [`RegionSet`]: the still-undecided spans of one input, shrunk by
//!   [`subtract_region`] as common runs are excluded
//! - [`align_direct`] and [`align_chunked`]: the two alignment strategies
//!   producing a [`MatchProfile`]
//! - [`longest_run`]: the longest stretch of matches in a profile
//! - [`DiffEngine`]: the recursion tying them together under one [`Deadline`]
//!
//! The search is heuristic and time-bounded. When the deadline elapses (or
//! the depth limit is hit) the result still carries every span found so far,
//! flagged with an [`IncompleteReason`]; differing regions may then be
//! over-reported.
//!
//! # Example
//!
//! ```
//! use span_diff::diff::{diff, Span};
//! use std::time::Duration;
//!
//! let old: Vec<char> = "abcdef".chars().collect();
//! let new: Vec<char> = "abcXYZdef".chars().collect();
//! let result = diff(&old, &new, Duration::from_secs(3));
//!
//! assert!(result.old.is_empty());
//! assert_eq!(result.new, vec![Span::new(3, 6)]);
//! assert!(result.is_complete());
//! ```

mod deadline;
mod engine;
mod engine_config;
mod likeness;
mod region;
mod result;
mod runs;
mod search;
mod span;

pub use deadline::{Deadline, DeadlineExceeded};
pub use engine::DiffEngine;
pub use engine_config::{DEFAULT_MAX_TIME, EngineConfig, EscalationPolicy};
pub use likeness::{Alignment, ChunkAlignment, CommonRun, align_chunked, align_direct};
pub use region::{RegionSet, subtract_region};
pub use result::{DiffResult, DiffStats, IncompleteReason};
pub use runs::{LongestRun, MatchProfile, ProfileRun, longest_run};
pub use search::find_subslice;
pub use span::Span;

use std::hash::Hash;
use std::time::Duration;

/// Diff two sequences with default settings and the given time budget.
pub fn diff<T: Eq + Hash>(old: &[T], new: &[T], max_time: Duration) -> DiffResult {
    DiffEngine::new().with_max_time(max_time).diff(old, new)
}

/// Diff two strings character by character with the default time budget.
///
/// Span indices count `char`s.
pub fn diff_str(old: &str, new: &str) -> DiffResult {
    DiffEngine::new().diff_str(old, new)
}
