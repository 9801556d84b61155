//! Substring search over arbitrary element slices.

/// Position of the first occurrence of `needle` inside `haystack`.
///
/// Knuth-Morris-Pratt, so the cost stays linear in both lengths whatever the
/// element type. An empty needle is found at position 0.
pub fn find_subslice<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let failure = failure_table(needle);
    let mut matched = 0;
    for (i, item) in haystack.iter().enumerate() {
        while matched > 0 && needle[matched] != *item {
            matched = failure[matched - 1];
        }
        if needle[matched] == *item {
            matched += 1;
        }
        if matched == needle.len() {
            return Some(i + 1 - needle.len());
        }
    }
    None
}

/// `table[i]` is the length of the longest proper prefix of
/// `needle[..=i]` that is also its suffix.
fn failure_table<T: PartialEq>(needle: &[T]) -> Vec<usize> {
    let mut table = vec![0; needle.len()];
    let mut k = 0;
    for i in 1..needle.len() {
        while k > 0 && needle[k] != needle[i] {
            k = table[k - 1];
        }
        if needle[k] == needle[i] {
            k += 1;
        }
        table[i] = k;
    }
    table
}
