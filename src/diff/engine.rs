//! Recursive common-substring exclusion.
//!
//! The engine finds one long common run between the two inputs, removes it
//! from both, and recurses into the pieces left of and right of it. Whatever
//! never gets matched is reported as differing spans.

use super::engine_config::{EngineConfig, EscalationPolicy};
use super::likeness::{Alignment, CommonRun, align_chunked, align_direct};
use super::region::RegionSet;
use super::runs::{MatchProfile, longest_run};
use super::search::find_subslice;
use super::{Deadline, DeadlineExceeded, DiffResult, DiffStats, IncompleteReason, Span};
use rayon::prelude::*;
use std::hash::Hash;
use std::ops::Range;
use std::time::Duration;

/// Diff engine producing the non-common spans of two sequences.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: EngineConfig,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the wall-clock budget of one diff
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.config.max_time = max_time;
        self
    }

    /// Stop searching below `max_depth` levels of recursion.
    ///
    /// Unlimited by default; the time budget alone bounds the work.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = Some(max_depth);
        self
    }

    /// Set the outermost-level strategy escalation policy
    pub fn with_escalation(mut self, escalation: EscalationPolicy) -> Self {
        self.config.escalation = escalation;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compare two sequences, starting a fresh deadline from the configured
    /// budget.
    pub fn diff<T: Eq + Hash>(&self, old: &[T], new: &[T]) -> DiffResult {
        let deadline = Deadline::starting_now(self.config.max_time);
        self.diff_with_deadline(old, new, &deadline)
    }

    /// Compare two strings character by character.
    ///
    /// Span indices count `char`s, not bytes.
    pub fn diff_str(&self, old: &str, new: &str) -> DiffResult {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        self.diff(&old, &new)
    }

    /// Compare two sequences under an existing deadline.
    pub fn diff_with_deadline<T: Eq + Hash>(
        &self,
        old: &[T],
        new: &[T],
        deadline: &Deadline,
    ) -> DiffResult {
        let mut search = Search {
            deadline,
            config: &self.config,
            stats: DiffStats::default(),
        };
        let exclusion = search.exclude(old, new);

        let mut stats = search.stats;
        stats.elapsed_ms = u64::try_from(deadline.elapsed().as_millis()).unwrap_or(u64::MAX);

        if let Some(reason) = exclusion.incomplete {
            tracing::warn!(
                "Diff of {} vs {} elements is incomplete ({}); differences shown may be approximate",
                old.len(),
                new.len(),
                reason
            );
        }

        DiffResult {
            old: exclusion.a,
            new: exclusion.b,
            incomplete: exclusion.incomplete,
            stats,
        }
    }

    /// Diff many independent pairs in parallel.
    ///
    /// Each pair gets its own deadline, so one slow pair cannot starve the
    /// others.
    pub fn diff_batch<T: Eq + Hash + Sync>(&self, pairs: &[(&[T], &[T])]) -> Vec<DiffResult> {
        pairs
            .par_iter()
            .map(|(old, new)| self.diff(old, new))
            .collect()
    }
}

/// Per-call bookkeeping of the recursion.
#[derive(Debug, Clone, Copy)]
struct Frame {
    depth: usize,
    /// Position of this call's first input inside its parent's first input
    a_base: usize,
    /// Position of this call's second input inside its parent's second input
    b_base: usize,
    /// Only the outermost call drops boundary markers
    final_pass: bool,
}

impl Frame {
    const OUTERMOST: Self = Self {
        depth: 0,
        a_base: 0,
        b_base: 0,
        final_pass: true,
    };

    const fn child(&self, a_base: usize, b_base: usize) -> Self {
        Self {
            depth: self.depth + 1,
            a_base,
            b_base,
            final_pass: false,
        }
    }
}

/// One call of the recursion: a pair of windows into the outermost inputs.
#[derive(Debug, Clone)]
struct Call {
    a: Range<usize>,
    b: Range<usize>,
    frame: Frame,
}

impl Call {
    fn outermost(a_len: usize, b_len: usize) -> Self {
        Self {
            a: 0..a_len,
            b: 0..b_len,
            frame: Frame::OUTERMOST,
        }
    }

    /// The call resolving one remainder pair, given in this call's coordinates.
    fn remainder(&self, sa: Span, sb: Span) -> Self {
        Self {
            a: self.a.start + sa.start..self.a.start + sa.end,
            b: self.b.start + sb.start..self.b.start + sb.end,
            frame: self.frame.child(sa.start, sb.start),
        }
    }
}

/// A call whose common run is excluded, waiting for its remainder calls.
#[derive(Debug)]
struct Pending {
    call: Call,
    regions_a: RegionSet,
    regions_b: RegionSet,
    /// Whether the left and right remainders were scheduled
    scheduled: [bool; 2],
}

enum Task {
    Visit(Call),
    Assemble(Pending),
}

enum Step {
    Done(Exclusion),
    Split(Pending, [Option<Call>; 2]),
}

/// Span lists produced by one call, in the parent's coordinates.
///
/// Both lists always have the same length and are paired index by index.
#[derive(Debug, Default)]
struct Exclusion {
    a: Vec<Span>,
    b: Vec<Span>,
    incomplete: Option<IncompleteReason>,
}

impl Exclusion {
    fn from_regions(
        frame: Frame,
        regions_a: RegionSet,
        regions_b: RegionSet,
        incomplete: Option<IncompleteReason>,
    ) -> Self {
        debug_assert_eq!(regions_a.len(), regions_b.len());
        Self {
            a: regions_a.into_spans(frame.a_base, frame.final_pass),
            b: regions_b.into_spans(frame.b_base, frame.final_pass),
            incomplete,
        }
    }
}

/// Two zero-length markers at the edges of a fully common input, or nothing
/// on the final pass.
fn boundary_markers(base: usize, len: usize, final_pass: bool) -> Vec<Span> {
    if final_pass {
        Vec::new()
    } else {
        vec![Span::empty_at(base), Span::empty_at(base + len)]
    }
}

/// The spans of `len` elements left over around a contained match at `at`.
fn around_match(at: usize, matched: usize, len: usize, base: usize, final_pass: bool) -> Vec<Span> {
    [Span::new(0, at), Span::new(at + matched, len)]
        .into_iter()
        .filter(|s| !final_pass || !s.is_empty())
        .map(|s| s.shift(base))
        .collect()
}

/// Whether a remainder pair holds the same content on both sides.
fn settled<T: PartialEq>(a: &[T], b: &[T], sa: Span, sb: Span) -> bool {
    a[sa.range()] == b[sb.range()]
}

struct Search<'s> {
    deadline: &'s Deadline,
    config: &'s EngineConfig,
    stats: DiffStats,
}

impl Search<'_> {
    /// Run the whole exclusion over `a` and `b`.
    ///
    /// Calls are kept on an explicit task stack rather than the native one,
    /// so recursion depth is bounded by memory only. A call that excluded a
    /// run schedules its remainders above its own `Assemble` task; their
    /// results land on `done` in left-then-right order and are popped back
    /// off when the parent assembles.
    fn exclude<T: Eq + Hash>(&mut self, a: &[T], b: &[T]) -> Exclusion {
        let mut tasks = vec![Task::Visit(Call::outermost(a.len(), b.len()))];
        let mut done: Vec<Exclusion> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(call) => match self.visit(a, b, call) {
                    Step::Done(exclusion) => done.push(exclusion),
                    Step::Split(pending, [left, right]) => {
                        tasks.push(Task::Assemble(pending));
                        tasks.extend(right.map(Task::Visit));
                        tasks.extend(left.map(Task::Visit));
                    }
                },
                Task::Assemble(pending) => {
                    let right = if pending.scheduled[1] { done.pop() } else { None };
                    let left = if pending.scheduled[0] { done.pop() } else { None };
                    done.push(Self::assemble(a, b, pending, left, right));
                }
            }
        }

        debug_assert_eq!(done.len(), 1);
        done.pop().unwrap_or_default()
    }

    /// Handle the base cases of one call, or exclude its best common run and
    /// hand back the remainder calls still to be resolved.
    fn visit<T: Eq + Hash>(&mut self, a_all: &[T], b_all: &[T], call: Call) -> Step {
        let frame = call.frame;
        let a = &a_all[call.a.clone()];
        let b = &b_all[call.b.clone()];
        self.stats.calls += 1;
        self.stats.max_depth = self.stats.max_depth.max(frame.depth);

        if a == b {
            return Step::Done(Exclusion {
                a: boundary_markers(frame.a_base, a.len(), frame.final_pass),
                b: boundary_markers(frame.b_base, b.len(), frame.final_pass),
                incomplete: None,
            });
        }
        if let Some(at) = find_subslice(b, a) {
            return Step::Done(Exclusion {
                a: boundary_markers(frame.a_base, a.len(), frame.final_pass),
                b: around_match(at, a.len(), b.len(), frame.b_base, frame.final_pass),
                incomplete: None,
            });
        }
        if let Some(at) = find_subslice(a, b) {
            return Step::Done(Exclusion {
                a: around_match(at, b.len(), a.len(), frame.a_base, frame.final_pass),
                b: boundary_markers(frame.b_base, b.len(), frame.final_pass),
                incomplete: None,
            });
        }

        let mut regions_a = RegionSet::whole(a.len());
        let mut regions_b = RegionSet::whole(b.len());

        // a single element that is not contained in the other side shares nothing
        if a.len() <= 1 || b.len() <= 1 {
            return Step::Done(Exclusion::from_regions(frame, regions_a, regions_b, None));
        }
        if let Some(limit) = self.config.max_depth
            && frame.depth > limit
        {
            tracing::debug!("Depth limit {limit} reached, keeping remainder");
            return Step::Done(Exclusion::from_regions(
                frame,
                regions_a,
                regions_b,
                Some(IncompleteReason::DepthLimit),
            ));
        }

        let run = match self.find_common_run(a, b, frame.depth) {
            Ok(run) => run,
            Err(DeadlineExceeded) => {
                return Step::Done(Exclusion::from_regions(
                    frame,
                    regions_a,
                    regions_b,
                    Some(IncompleteReason::DeadlineExceeded),
                ));
            }
        };
        if run.is_empty() {
            return Step::Done(Exclusion::from_regions(frame, regions_a, regions_b, None));
        }

        regions_a.subtract(run.a_start, run.a_start + run.len, false);
        regions_b.subtract(run.b_start, run.b_start + run.len, false);

        let [left, right] = [0, 1].map(|index| {
            let (sa, sb) = (regions_a.get(index)?, regions_b.get(index)?);
            (!settled(a, b, sa, sb)).then(|| call.remainder(sa, sb))
        });
        let pending = Pending {
            call,
            regions_a,
            regions_b,
            scheduled: [left.is_some(), right.is_some()],
        };
        Step::Split(pending, [left, right])
    }

    /// Splice the remainder results into a pending call and drop the pairs
    /// that ended up holding equal content.
    fn assemble<T: PartialEq>(
        a_all: &[T],
        b_all: &[T],
        pending: Pending,
        left: Option<Exclusion>,
        right: Option<Exclusion>,
    ) -> Exclusion {
        let Pending {
            call,
            mut regions_a,
            mut regions_b,
            ..
        } = pending;
        let a = &a_all[call.a];
        let b = &b_all[call.b];

        let mut incomplete = None;
        // right first so the left index stays valid
        for (index, sub) in [(1, right), (0, left)] {
            if let Some(sub) = sub {
                incomplete = IncompleteReason::merge(incomplete, sub.incomplete);
                regions_a.splice(index, sub.a);
                regions_b.splice(index, sub.b);
            }
        }

        for j in (0..regions_a.len()).rev() {
            if let (Some(sa), Some(sb)) = (regions_a.get(j), regions_b.get(j))
                && settled(a, b, sa, sb)
            {
                regions_a.remove(j);
                regions_b.remove(j);
            }
        }

        Exclusion::from_regions(call.frame, regions_a, regions_b, incomplete)
    }

    /// Best common run between `a` and `b`.
    ///
    /// Uses the direct alignment, and at the outermost level retries with the
    /// chunked alignment when the direct answer looks unreliable.
    fn find_common_run<T: Eq + Hash>(
        &mut self,
        a: &[T],
        b: &[T],
        depth: usize,
    ) -> Result<CommonRun, DeadlineExceeded> {
        self.deadline.check()?;

        let alignment = align_direct(a, b, self.deadline)?;
        let longest = longest_run(&alignment.profile);
        let run = alignment.locate(&longest);
        if run.is_empty() || depth > 0 {
            return Ok(run);
        }

        let shorter_len = a.len().min(b.len());
        let fishy = self.config.escalation.is_fishy(
            shorter_len,
            run.len,
            alignment.profile.len(),
            longest.group_count,
        );
        if !fishy {
            return Ok(run);
        }

        self.stats.escalations += 1;
        tracing::debug!(
            "Direct alignment looks unreliable (run {} of {}, {} groups), trying chunked alignment",
            run.len,
            shorter_len,
            longest.group_count
        );
        match self.chunked_common_run(a, b) {
            Ok(Some(candidate)) if candidate.len > run.len => {
                tracing::debug!("Chunked alignment found a longer run of {}", candidate.len);
                Ok(candidate)
            }
            Ok(_) => Ok(run),
            Err(DeadlineExceeded) => {
                tracing::debug!("Chunked alignment ran out of time, keeping direct run");
                Ok(run)
            }
        }
    }

    /// Run of truly equal elements inside the chunked alignment's window.
    fn chunked_common_run<T: Eq + Hash>(
        &self,
        a: &[T],
        b: &[T],
    ) -> Result<Option<CommonRun>, DeadlineExceeded> {
        let Some(chunked) = align_chunked(a, b, self.deadline)? else {
            return Ok(None);
        };
        let window_a = &a[chunked.a_offset..chunked.a_offset + chunked.len];
        let window_b = &b[chunked.b_offset..chunked.b_offset + chunked.len];
        let verified = Alignment {
            profile: MatchProfile::compare(window_a, window_b),
            a_offset: chunked.a_offset,
            b_offset: chunked.b_offset,
        };
        Ok(Some(verified.locate(&longest_run(&verified.profile))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> Vec<Span> {
        pairs.iter().map(|&(s, e)| Span::new(s, e)).collect()
    }

    fn check_disjoint(list: &[Span], len: usize) {
        for pair in list.windows(2) {
            assert!(pair[0].end <= pair[1].start, "overlap in {list:?}");
        }
        for span in list {
            assert!(!span.is_empty());
            assert!(span.end <= len);
        }
    }

    #[test]
    fn test_identical_inputs() {
        let result = DiffEngine::new().diff_str("same text", "same text");
        assert!(result.old.is_empty());
        assert!(result.new.is_empty());
        assert!(result.is_complete());
        assert_eq!(result.stats.calls, 1);
    }

    #[test]
    fn test_contained_old_in_new() {
        let result = DiffEngine::new().diff_str("world", "hello world!");
        assert!(result.old.is_empty());
        assert_eq!(result.new, spans(&[(0, 6), (11, 12)]));
    }

    #[test]
    fn test_contained_new_in_old() {
        let result = DiffEngine::new().diff_str("prefix-core", "core");
        assert_eq!(result.old, spans(&[(0, 7)]));
        assert!(result.new.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let result = DiffEngine::new().diff_str("", "abc");
        assert!(result.old.is_empty());
        assert_eq!(result.new, spans(&[(0, 3)]));

        let result = DiffEngine::new().diff_str("", "");
        assert!(!result.has_changes());
    }

    #[test]
    fn test_disjoint_alphabets() {
        let result = DiffEngine::new().diff_str("abcd", "wxyz12");
        assert_eq!(result.old, spans(&[(0, 4)]));
        assert_eq!(result.new, spans(&[(0, 6)]));
        assert!(result.is_complete());
    }

    #[test]
    fn test_single_element_not_contained() {
        let result = DiffEngine::new().diff_str("x", "yz");
        assert_eq!(result.old, spans(&[(0, 1)]));
        assert_eq!(result.new, spans(&[(0, 2)]));
    }

    #[test]
    fn test_kitten_sitting() {
        let result = DiffEngine::new().diff_str("kitten", "sitting");
        // k/s, e/i and the trailing g
        assert_eq!(result.old, spans(&[(0, 1), (4, 5)]));
        assert_eq!(result.new, spans(&[(0, 1), (4, 5), (6, 7)]));
        check_disjoint(&result.old, 6);
        check_disjoint(&result.new, 7);
    }

    #[test]
    fn test_single_substitution_in_middle() {
        let result = DiffEngine::new().diff_str("the quick fox", "the quack fox");
        assert_eq!(result.old, spans(&[(6, 7)]));
        assert_eq!(result.new, spans(&[(6, 7)]));
    }

    #[test]
    fn test_insertion_is_reported_on_new_side_only() {
        let result = DiffEngine::new().diff_str("abcdef", "abcXYZdef");
        assert!(result.old.is_empty());
        assert_eq!(result.new, spans(&[(3, 6)]));
    }

    #[test]
    fn test_generic_elements() {
        let old = [1, 2, 3, 4, 5];
        let new = [1, 2, 9, 4, 5];
        let result = DiffEngine::new().diff(&old, &new);
        assert_eq!(result.old, spans(&[(2, 3)]));
        assert_eq!(result.new, spans(&[(2, 3)]));
    }

    #[test]
    fn test_expired_deadline_marks_incomplete() {
        let engine = DiffEngine::new().with_max_time(Duration::ZERO);
        let deadline = Deadline::starting_now(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        let result = engine.diff_with_deadline(&['a', 'b', 'c'], &['a', 'x', 'c', 'd'], &deadline);
        assert_eq!(result.incomplete, Some(IncompleteReason::DeadlineExceeded));
        assert_eq!(result.old, spans(&[(0, 3)]));
        assert_eq!(result.new, spans(&[(0, 4)]));
    }

    #[test]
    fn test_depth_limit_marks_incomplete() {
        let engine = DiffEngine::new().with_max_depth(0);
        let result = engine.diff_str("aXbbbbYc", "aZbbbbWc");
        assert_eq!(result.incomplete, Some(IncompleteReason::DepthLimit));
        // the outermost search still excluded the common middle run
        assert!(result.old_changed_len() < 8);
    }

    #[test]
    fn test_deep_recursion_stays_on_the_heap() {
        // every 'a' is its own common run, so the recursion is as deep as the input is long
        let old = "ab".repeat(5000);
        let new = "ac".repeat(5000);
        let result = DiffEngine::new()
            .with_config(EngineConfig::thorough())
            .diff_str(&old, &new);

        assert!(result.is_complete());
        assert_eq!(result.stats.max_depth, 5000);
        assert_eq!(result.old.len(), 5000);
        assert_eq!(result.old_changed_len(), 5000);
        assert_eq!(result.new_changed_len(), 5000);
    }

    fn eager_escalation() -> EngineConfig {
        EngineConfig {
            escalation: EscalationPolicy {
                min_shorter_len: 10,
                ..EscalationPolicy::default()
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_chunked_run_replaces_shorter_direct_run() {
        let a: Vec<char> = "a bb cc d ee f".chars().collect();
        let b: Vec<char> = "bb cc d ee f a".chars().collect();
        let config = eager_escalation();
        let deadline = Deadline::starting_now(Duration::from_secs(60));
        let mut search = Search {
            deadline: &deadline,
            config: &config,
            stats: DiffStats::default(),
        };

        // below the outermost level only the direct alignment runs
        let direct = search.find_common_run(&a, &b, 1).unwrap();
        assert_eq!(direct, CommonRun { a_start: 7, b_start: 7, len: 1 });
        assert_eq!(search.stats.escalations, 0);

        let escalated = search.find_common_run(&a, &b, 0).unwrap();
        assert_eq!(escalated, CommonRun { a_start: 2, b_start: 0, len: 12 });
        assert_eq!(search.stats.escalations, 1);
    }

    #[test]
    fn test_chunked_run_kept_only_when_longer() {
        // chunks line up perfectly, but the verified window is no better than the direct run
        let a: Vec<char> = "abababababab".chars().collect();
        let b: Vec<char> = "acacacacacac".chars().collect();
        let config = eager_escalation();
        let deadline = Deadline::starting_now(Duration::from_secs(60));
        let mut search = Search {
            deadline: &deadline,
            config: &config,
            stats: DiffStats::default(),
        };

        let run = search.find_common_run(&a, &b, 0).unwrap();
        assert_eq!(run, CommonRun { a_start: 0, b_start: 0, len: 1 });
        assert_eq!(search.stats.escalations, 1);
    }

    #[test]
    fn test_escalated_diff_end_to_end() {
        let result = DiffEngine::new()
            .with_config(eager_escalation())
            .diff_str("a bb cc d ee f", "bb cc d ee f a");
        assert_eq!(result.old, spans(&[(0, 2)]));
        assert_eq!(result.new, spans(&[(12, 14)]));
        assert_eq!(result.stats.escalations, 1);
        assert!(result.is_complete());
    }

    #[test]
    fn test_stats_are_collected() {
        let result = DiffEngine::new().diff_str("abcdef", "abXdeY");
        assert!(result.stats.calls > 1);
        assert!(result.stats.max_depth >= 1);
        assert_eq!(result.stats.escalations, 0);
    }

    #[test]
    fn test_diff_batch_matches_sequential() {
        let engine = DiffEngine::new();
        let a: Vec<char> = "one two three".chars().collect();
        let b: Vec<char> = "one too three".chars().collect();
        let c: Vec<char> = "zzz".chars().collect();
        let pairs = vec![
            (a.as_slice(), b.as_slice()),
            (a.as_slice(), c.as_slice()),
        ];
        let results = engine.diff_batch(&pairs);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].old, engine.diff(&a, &b).old);
        assert_eq!(results[1].new, spans(&[(0, 3)]));
    }
}
