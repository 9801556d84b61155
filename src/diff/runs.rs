//! Match profiles and longest-run extraction.

/// One maximal group of identical values in a [`MatchProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRun {
    /// Whether the aligned elements in this group are equal
    pub matched: bool,
    /// Number of positions in the group
    pub len: usize,
}

/// Position-aligned equality marks, run-length encoded.
///
/// Position `i` is a match when the elements aligned at `i` in both
/// sequences are equal. Adjacent runs always differ in `matched`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchProfile {
    runs: Vec<ProfileRun>,
    len: usize,
}

impl MatchProfile {
    /// Build a profile from per-position equality marks.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        let mut profile = Self::default();
        for bit in bits {
            profile.push(bit, 1);
        }
        profile
    }

    /// Profile of `a[i] == b[i]` over the common prefix length of both slices.
    pub fn compare<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        Self::from_bits(a.iter().zip(b).map(|(x, y)| x == y))
    }

    /// A profile of `len` identical marks.
    #[must_use]
    pub fn uniform(matched: bool, len: usize) -> Self {
        let mut profile = Self::default();
        profile.push(matched, len);
        profile
    }

    /// Append `len` positions with the given mark, merging with the last run.
    pub fn push(&mut self, matched: bool, len: usize) {
        if len == 0 {
            return;
        }
        self.len += len;
        match self.runs.last_mut() {
            Some(last) if last.matched == matched => last.len += len,
            _ => self.runs.push(ProfileRun { matched, len }),
        }
    }

    /// Number of positions covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of maximal same-value groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.runs.len()
    }

    pub fn runs(&self) -> impl Iterator<Item = &ProfileRun> {
        self.runs.iter()
    }
}

/// The longest stretch of matches in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongestRun {
    /// Offset of the run within the profile
    pub start: usize,
    /// Length of the run; zero when the profile holds no match
    pub len: usize,
    /// Number of maximal same-value groups in the profile
    pub group_count: usize,
}

/// Find the longest run of matches in `profile`.
///
/// Folds over the grouped runs left to right, so the earliest of several
/// equally long runs wins. An empty or all-mismatch profile yields
/// `start == 0, len == 0`.
#[must_use]
pub fn longest_run(profile: &MatchProfile) -> LongestRun {
    let mut best = LongestRun {
        group_count: profile.group_count(),
        ..LongestRun::default()
    };
    let mut position = 0;
    for run in profile.runs() {
        if run.matched && run.len > best.len {
            best.start = position;
            best.len = run.len;
        }
        position += run.len;
    }
    best
}
