//! Sequence alignment
//!
//! Produces edit scripts (opcodes) between two ordered sequences of comparison
//! keys, plus the character-level similarity ratio used by the classifiers.
pub mod lcs;

pub use lcs::LcsAligner;

use std::ops::Range;

/// Kind of alignment decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    /// Both ranges hold equal elements, pairwise
    Equal,
    /// Source range replaced by target range (both non-empty)
    Replace,
    /// Source range has no counterpart in the target
    Delete,
    /// Target range has no counterpart in the source
    Insert,
}

/// One alignment decision over half-open index ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub source: Range<usize>,
    pub target: Range<usize>,
}

impl Opcode {
    pub fn new(tag: OpTag, source: Range<usize>, target: Range<usize>) -> Self {
        Self { tag, source, target }
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }
}

/// Trait for sequence aligners
pub trait SequenceAligner: Send + Sync {
    /// Compute the edit script turning `source` into `target`.
    ///
    /// Opcodes cover both sequences contiguously and in order.
    fn align(&self, source: &[String], target: &[String]) -> Vec<Opcode>;

    /// Get the name of this aligner
    fn name(&self) -> &str;

    /// Clone into a box
    fn clone_box(&self) -> Box<dyn SequenceAligner>;
}

impl Clone for Box<dyn SequenceAligner> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Character-level similarity in `0.0..=1.0`: `2 * lcs / (len_a + len_b)`.
///
/// Two empty strings are identical (1.0).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = lcs_row(&a, b.iter())[b.len()];
    2.0 * matched as f64 / total as f64
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Matched index pairs of a longest common subsequence, in increasing order.
///
/// Every element takes part in matching; there is no popularity-based junk
/// filtering. Ties are broken the same way on every call. After the common
/// prefix and suffix are stripped the middle is solved by Hirschberg's
/// divide and conquer, so memory stays linear in the input while time is
/// O(n * m).
pub(crate) fn longest_common_subsequence<T: PartialEq>(
    original: &[T],
    modified: &[T],
) -> Vec<(usize, usize)> {
    // Common prefix and suffix match trivially
    let prefix = original
        .iter()
        .zip(modified)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = original[prefix..]
        .iter()
        .rev()
        .zip(modified[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let orig_mid = &original[prefix..original.len() - suffix];
    let mod_mid = &modified[prefix..modified.len() - suffix];

    let mut lcs: Vec<(usize, usize)> = (0..prefix).map(|k| (k, k)).collect();
    hirschberg(orig_mid, mod_mid, prefix, prefix, &mut lcs);

    let orig_tail = original.len() - suffix;
    let mod_tail = modified.len() - suffix;
    lcs.extend((0..suffix).map(|k| (orig_tail + k, mod_tail + k)));

    lcs
}

/// Append the LCS of `a` and `b` to `out`, shifting indices by the offsets
fn hirschberg<T: PartialEq>(
    a: &[T],
    b: &[T],
    a_offset: usize,
    b_offset: usize,
    out: &mut Vec<(usize, usize)>,
) {
    if a.is_empty() || b.is_empty() {
        return;
    }
    if a.len() == 1 {
        if let Some(j) = b.iter().position(|item| *item == a[0]) {
            out.push((a_offset, b_offset + j));
        }
        return;
    }

    let mid = a.len() / 2;
    let forward = lcs_row(&a[..mid], b.iter());
    let backward = lcs_row(a[mid..].iter().rev(), b.iter().rev());

    // First split point of `b` with the best combined score
    let m = b.len();
    let mut split = 0;
    let mut best = 0;
    for j in 0..=m {
        let score = forward[j] + backward[m - j];
        if score > best {
            best = score;
            split = j;
        }
    }

    hirschberg(&a[..mid], &b[..split], a_offset, b_offset, out);
    hirschberg(&a[mid..], &b[split..], a_offset + mid, b_offset + split, out);
}

/// Last row of the LCS length table: entry `j` is the LCS length of all of
/// `a` against the first `j` items of `b`. Keeps two rows only.
fn lcs_row<'a, T, A, B>(a: A, b: B) -> Vec<usize>
where
    T: PartialEq + 'a,
    A: IntoIterator<Item = &'a T>,
    B: Iterator<Item = &'a T> + ExactSizeIterator + Clone,
{
    let m = b.len();
    let mut prev = vec![0usize; m + 1];
    let mut cur = vec![0usize; m + 1];

    for x in a {
        for (j, y) in b.clone().enumerate() {
            cur[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev
}

/// Group matched pairs into opcodes covering both sequences
pub(crate) fn opcodes_from_matches(
    original_len: usize,
    modified_len: usize,
    matches: &[(usize, usize)],
) -> Vec<Opcode> {
    let mut opcodes: Vec<Opcode> = Vec::new();
    let mut orig_idx = 0;
    let mut mod_idx = 0;

    for &(orig_match, mod_match) in matches {
        push_gap(&mut opcodes, orig_idx..orig_match, mod_idx..mod_match);

        match opcodes.last_mut() {
            Some(last)
                if last.tag == OpTag::Equal
                    && last.source.end == orig_match
                    && last.target.end == mod_match =>
            {
                last.source.end += 1;
                last.target.end += 1;
            }
            _ => opcodes.push(Opcode::new(
                OpTag::Equal,
                orig_match..orig_match + 1,
                mod_match..mod_match + 1,
            )),
        }

        orig_idx = orig_match + 1;
        mod_idx = mod_match + 1;
    }

    push_gap(&mut opcodes, orig_idx..original_len, mod_idx..modified_len);
    opcodes
}

fn push_gap(opcodes: &mut Vec<Opcode>, source: Range<usize>, target: Range<usize>) {
    let tag = match (source.is_empty(), target.is_empty()) {
        (true, true) => return,
        (false, false) => OpTag::Replace,
        (false, true) => OpTag::Delete,
        (true, false) => OpTag::Insert,
    };
    opcodes.push(Opcode::new(tag, source, target));
}
