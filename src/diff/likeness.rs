//! Alignment search between two sequences.
//!
//! Two strategies produce a [`MatchProfile`] plus the offsets that map
//! profile positions back onto each input:
//!
//! - [`align_direct`] slides the shorter input across the longer one element
//!   by element and keeps the offset with the fewest mismatches.
//! - [`align_chunked`] cuts both inputs into chunks between occurrences of a
//!   separator element and aligns the chunk-length "shapes" on every
//!   diagonal. It is far cheaper on long inputs but only approximate, so its
//!   result is a candidate window that callers verify element by element.
//!
//! Both strategies check the [`Deadline`] on every outer iteration and return
//! [`DeadlineExceeded`] instead of a partial answer.

use super::runs::{LongestRun, MatchProfile};
use super::{Deadline, DeadlineExceeded};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// A common substring located in both inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommonRun {
    /// Start of the run in the first input
    pub a_start: usize,
    /// Start of the run in the second input
    pub b_start: usize,
    /// Number of equal elements
    pub len: usize,
}

impl CommonRun {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Result of the direct alignment search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Equality marks over the aligned overlap
    pub profile: MatchProfile,
    /// Index in the first input aligned with profile position 0
    pub a_offset: usize,
    /// Index in the second input aligned with profile position 0
    pub b_offset: usize,
}

impl Alignment {
    /// Map a run found in the profile back onto both inputs.
    #[must_use]
    pub const fn locate(&self, run: &LongestRun) -> CommonRun {
        CommonRun {
            a_start: self.a_offset + run.start,
            b_start: self.b_offset + run.start,
            len: run.len,
        }
    }
}

/// Align the shorter input as a contiguous window of the longer one.
///
/// Identical inputs align at offset 0 with an all-match profile and
/// equal-length inputs are compared in place. When either input is empty the
/// profile is all mismatches, sized to the sum of both lengths, and both
/// offsets are set to that sum to signal that there is no alignment. Otherwise
/// every window offset from 0 to the length difference is tried, keeping the
/// first offset with the fewest mismatches.
///
/// Cost is `O(length difference × shorter length)`.
pub fn align_direct<T: PartialEq>(
    a: &[T],
    b: &[T],
    deadline: &Deadline,
) -> Result<Alignment, DeadlineExceeded> {
    if a == b {
        return Ok(Alignment {
            profile: MatchProfile::uniform(true, a.len()),
            a_offset: 0,
            b_offset: 0,
        });
    }
    if a.is_empty() || b.is_empty() {
        let total = a.len() + b.len();
        return Ok(Alignment {
            profile: MatchProfile::uniform(false, total),
            a_offset: total,
            b_offset: total,
        });
    }
    if a.len() == b.len() {
        return Ok(Alignment {
            profile: MatchProfile::compare(a, b),
            a_offset: 0,
            b_offset: 0,
        });
    }

    let a_is_shorter = a.len() < b.len();
    let (shorter, longer) = if a_is_shorter { (a, b) } else { (b, a) };
    let best = best_window_offset(shorter, longer, deadline)?;
    let window = &longer[best..best + shorter.len()];

    let (a_offset, b_offset) = if a_is_shorter { (0, best) } else { (best, 0) };
    Ok(Alignment {
        profile: MatchProfile::compare(shorter, window),
        a_offset,
        b_offset,
    })
}

/// Offset of the window of `longer` with the fewest mismatches against
/// `shorter`. Ties keep the smallest offset.
fn best_window_offset<T: PartialEq>(
    shorter: &[T],
    longer: &[T],
    deadline: &Deadline,
) -> Result<usize, DeadlineExceeded> {
    let mut best_offset = 0;
    let mut least_mismatches = shorter.len() + 1;

    for offset in 0..=longer.len() - shorter.len() {
        deadline.check()?;
        let window = &longer[offset..offset + shorter.len()];
        let mut mismatches = 0;
        for (x, y) in shorter.iter().zip(window) {
            if x != y {
                mismatches += 1;
                // cannot beat the current best any more
                if mismatches >= least_mismatches {
                    break;
                }
            }
        }
        if mismatches < least_mismatches {
            least_mismatches = mismatches;
            best_offset = offset;
            if mismatches == 0 {
                break;
            }
        }
    }

    Ok(best_offset)
}

/// Result of the chunked alignment search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkAlignment {
    /// Chunk-length equality marks along the winning diagonal
    pub profile: MatchProfile,
    /// Chunk index in the first input where the winning diagonal starts
    pub a_chunk: usize,
    /// Chunk index in the second input where the winning diagonal starts
    pub b_chunk: usize,
    /// Raw start of the best chunk run in the first input
    pub a_offset: usize,
    /// Raw start of the best chunk run in the second input
    pub b_offset: usize,
    /// Raw length of the best chunk run, separators between chunks included
    pub len: usize,
}

/// Chunk lengths of `seq` split at every `separator`.
fn chunk_shape<T: PartialEq>(seq: &[T], separator: &T) -> Vec<usize> {
    seq.split(|item| item == separator).map(<[T]>::len).collect()
}

/// Raw start position of every chunk in a shape.
fn chunk_starts(shape: &[usize]) -> Vec<usize> {
    shape
        .iter()
        .scan(0, |pos, &len| {
            let start = *pos;
            *pos += len + 1;
            Some(start)
        })
        .collect()
}

/// The most frequent element of `seq`, with its count.
///
/// Ties go to the element that appears first.
fn most_frequent<T: Eq + Hash>(seq: &[T]) -> Option<(&T, usize)> {
    let mut counts: HashMap<&T, (usize, usize)> = HashMap::new();
    for (index, item) in seq.iter().enumerate() {
        match counts.entry(item) {
            Entry::Occupied(mut e) => e.get_mut().0 += 1,
            Entry::Vacant(e) => {
                e.insert((1, index));
            }
        }
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(item, (count, _))| (item, count))
}

/// Best run of equal chunk lengths found so far.
#[derive(Debug, Clone, Copy, Default)]
struct ChunkRun {
    weight: usize,
    a_chunk: usize,
    b_chunk: usize,
    chunks: usize,
    diagonal: (usize, usize),
}

/// Align both inputs by their separator-delimited chunk shapes.
///
/// The separator is the most frequent element of the shorter input. Every
/// diagonal of the two shapes is scanned for the longest stretch of equal
/// chunk lengths, each chunk weighted by its element count plus its
/// separator. The winning stretch is translated back into raw positions.
///
/// Returns `Ok(None)` when the inputs do not chunk: no element repeats in the
/// shorter input, or either input has a single chunk.
pub fn align_chunked<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    deadline: &Deadline,
) -> Result<Option<ChunkAlignment>, DeadlineExceeded> {
    let shorter = if a.len() <= b.len() { a } else { b };
    let Some((separator, count)) = most_frequent(shorter) else {
        return Ok(None);
    };
    if count < 2 {
        return Ok(None);
    }

    let shape_a = chunk_shape(a, separator);
    let shape_b = chunk_shape(b, separator);
    if shape_a.len() < 2 || shape_b.len() < 2 {
        return Ok(None);
    }

    // diagonals where b is consumed first, then those where a is
    let diagonals = (1..shape_b.len())
        .rev()
        .map(|j| (0, j))
        .chain((0..shape_a.len()).map(|i| (i, 0)));

    let mut best = ChunkRun::default();
    for (i0, j0) in diagonals {
        deadline.check()?;
        let mut current = ChunkRun {
            diagonal: (i0, j0),
            ..ChunkRun::default()
        };
        for (step, (la, lb)) in shape_a[i0..].iter().zip(&shape_b[j0..]).enumerate() {
            if la == lb {
                if current.chunks == 0 {
                    current.a_chunk = i0 + step;
                    current.b_chunk = j0 + step;
                }
                current.chunks += 1;
                current.weight += la + 1;
                if current.weight > best.weight {
                    best = current;
                }
            } else {
                current.chunks = 0;
                current.weight = 0;
            }
        }
    }

    if best.chunks == 0 {
        return Ok(None);
    }

    let (i0, j0) = best.diagonal;
    let profile = MatchProfile::from_bits(
        shape_a[i0..]
            .iter()
            .zip(&shape_b[j0..])
            .map(|(la, lb)| la == lb),
    );
    let run_shape = &shape_a[best.a_chunk..best.a_chunk + best.chunks];
    let len = run_shape.iter().sum::<usize>() + best.chunks - 1;

    Ok(Some(ChunkAlignment {
        profile,
        a_chunk: i0,
        b_chunk: j0,
        a_offset: chunk_starts(&shape_a)[best.a_chunk],
        b_offset: chunk_starts(&shape_b)[best.b_chunk],
        len,
    }))
}
