//! Configuration types for the diff engine.

use std::time::Duration;

/// Default wall-clock budget for one top-level diff.
pub const DEFAULT_MAX_TIME: Duration = Duration::from_secs(3);

/// When the direct alignment looks unreliable at the outermost level, retry
/// with the chunked alignment.
///
/// The direct result is considered unreliable when the shorter input is
/// longer than `min_shorter_len` and either the common run is tiny compared
/// with it (`shorter_len / run_len > max_length_ratio`) or the match profile
/// is badly fragmented (`profile_len / group_count < min_group_density`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationPolicy {
    /// Whether the chunked retry is attempted at all
    pub enabled: bool,
    /// Largest acceptable ratio of shorter length to common run length
    pub max_length_ratio: f64,
    /// Smallest acceptable average group length in the match profile
    pub min_group_density: f64,
    /// Inputs at or below this length are never escalated
    pub min_shorter_len: usize,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_length_ratio: 10.0,
            min_group_density: 20.0,
            min_shorter_len: 500,
        }
    }
}

impl EscalationPolicy {
    /// Never escalate.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether a direct result over `shorter_len` elements, with a best run
    /// of `run_len` and a profile of `profile_len` positions split into
    /// `group_count` groups, should be recomputed with the chunked strategy.
    #[must_use]
    pub fn is_fishy(
        &self,
        shorter_len: usize,
        run_len: usize,
        profile_len: usize,
        group_count: usize,
    ) -> bool {
        if !self.enabled || shorter_len <= self.min_shorter_len {
            return false;
        }
        let length_ratio = shorter_len as f64 / run_len.max(1) as f64;
        let group_density = profile_len as f64 / group_count.max(1) as f64;
        length_ratio > self.max_length_ratio || group_density < self.min_group_density
    }
}

/// Tunables for [`DiffEngine`](super::DiffEngine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Total wall-clock budget shared by the whole recursion
    pub max_time: Duration,
    /// Deepest recursion level that may still search; `None` leaves the
    /// time budget as the only limit
    pub max_depth: Option<usize>,
    /// Outermost-level strategy escalation
    pub escalation: EscalationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_time: DEFAULT_MAX_TIME,
            max_depth: None,
            escalation: EscalationPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Short budget for interactive use (as-you-type highlighting)
    #[must_use]
    pub fn fast() -> Self {
        Self {
            max_time: Duration::from_millis(250),
            max_depth: None,
            escalation: EscalationPolicy::default(),
        }
    }

    /// Long budget and eager escalation, for batch comparisons
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            max_time: Duration::from_secs(30),
            max_depth: None,
            escalation: EscalationPolicy {
                min_shorter_len: 200,
                ..EscalationPolicy::default()
            },
        }
    }
}
