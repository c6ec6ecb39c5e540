// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Common-subsequence alignment for ROUGE-L.
//!
//! Two strategies are available:
//!
//! - [`LcsStrategy::MatchingBlocks`] (default): Ratcliff–Obershelp. Find the
//!   longest contiguous block shared by both sequences, then repeat on the
//!   regions to its left and to its right. The total block length is the
//!   alignment length.
//! - [`LcsStrategy::DynamicProgramming`]: classical longest common
//!   subsequence in O(n·m) time and O(min(n, m)) memory.
//!
//! The two agree on most sentence pairs. They diverge when a long block
//! pulls the alignment away from a longer scattered subsequence:
//!
//! ```
//! use rougekit::align::{alignment_len, LcsStrategy};
//!
//! let reference = ["p", "q", "r", "a", "b", "c", "d"];
//! let candidate = ["a", "x", "b", "x", "c", "x", "d", "p", "q", "r"];
//!
//! assert_eq!(alignment_len(&reference, &candidate, LcsStrategy::MatchingBlocks, false), 3);
//! assert_eq!(alignment_len(&reference, &candidate, LcsStrategy::DynamicProgramming, false), 4);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Candidate length from which popular-token pruning applies.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// How the ROUGE-L alignment length is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LcsStrategy {
    /// Recursive longest-matching-block search.
    #[default]
    MatchingBlocks,
    /// Classical dynamic-programming LCS.
    DynamicProgramming,
}

/// A run of `len` tokens equal in both sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchingBlock {
    /// Start index in the reference.
    pub reference_start: usize,
    /// Start index in the candidate.
    pub candidate_start: usize,
    /// Run length.
    pub len: usize,
}

impl MatchingBlock {
    /// Create a block.
    #[inline]
    pub const fn new(reference_start: usize, candidate_start: usize, len: usize) -> Self {
        Self {
            reference_start,
            candidate_start,
            len,
        }
    }

    /// One past the last reference index.
    #[inline]
    pub const fn reference_end(&self) -> usize {
        self.reference_start + self.len
    }

    /// One past the last candidate index.
    #[inline]
    pub const fn candidate_end(&self) -> usize {
        self.candidate_start + self.len
    }
}

/// Longest-matching-block aligner over a reference/candidate pair.
///
/// Construction indexes every candidate position by token, so the longest
/// match in any sub-rectangle is found by walking only the positions that
/// can actually match.
pub struct SequenceAligner<'t, T> {
    reference: &'t [T],
    candidate: &'t [T],
    /// Ascending candidate positions per token.
    positions: HashMap<&'t T, Vec<usize>>,
}

impl<'t, T: Eq + Hash> SequenceAligner<'t, T> {
    /// Index `candidate` for alignment against `reference`.
    pub fn new(reference: &'t [T], candidate: &'t [T]) -> Self {
        Self::with_autojunk(reference, candidate, false)
    }

    /// Like [`new`](Self::new), optionally pruning popular tokens.
    ///
    /// With `autojunk` set and a candidate of at least [`AUTOJUNK_MIN_LEN`]
    /// tokens, any token occurring more than `len / 100 + 1` times in the
    /// candidate can no longer start a match. It can still extend one.
    pub fn with_autojunk(reference: &'t [T], candidate: &'t [T], autojunk: bool) -> Self {
        let mut positions: HashMap<&'t T, Vec<usize>> = HashMap::new();
        for (j, token) in candidate.iter().enumerate() {
            positions.entry(token).or_default().push(j);
        }

        if autojunk && candidate.len() >= AUTOJUNK_MIN_LEN {
            let limit = candidate.len() / 100 + 1;
            positions.retain(|_, idx| idx.len() <= limit);
        }

        Self {
            reference,
            candidate,
            positions,
        }
    }

    /// Longest block inside `reference[r_lo..r_hi]` × `candidate[c_lo..c_hi]`.
    ///
    /// Among blocks of maximal length, the one starting earliest in the
    /// reference wins, then the one starting earliest in the candidate.
    /// Returns a zero-length block at `(r_lo, c_lo)` when nothing matches.
    pub fn longest_match(&self, r_lo: usize, r_hi: usize, c_lo: usize, c_hi: usize) -> MatchingBlock {
        let mut best = MatchingBlock::new(r_lo, c_lo, 0);

        // run length of the match ending at candidate position j, previous row
        let mut run_len: HashMap<usize, usize> = HashMap::new();
        let mut next: HashMap<usize, usize> = HashMap::new();

        for i in r_lo..r_hi {
            next.clear();
            if let Some(js) = self.positions.get(&self.reference[i]) {
                for &j in js {
                    if j < c_lo {
                        continue;
                    }
                    if j >= c_hi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best.len {
                        best = MatchingBlock::new(i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            std::mem::swap(&mut run_len, &mut next);
        }

        // grow across tokens removed from the index by pruning
        while best.reference_start > r_lo
            && best.candidate_start > c_lo
            && self.reference[best.reference_start - 1] == self.candidate[best.candidate_start - 1]
        {
            best.reference_start -= 1;
            best.candidate_start -= 1;
            best.len += 1;
        }
        while best.reference_end() < r_hi
            && best.candidate_end() < c_hi
            && self.reference[best.reference_end()] == self.candidate[best.candidate_end()]
        {
            best.len += 1;
        }

        best
    }

    /// All matching blocks, sorted by position, adjacent runs merged.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut stack = vec![(0, self.reference.len(), 0, self.candidate.len())];
        let mut found = Vec::new();

        while let Some((r_lo, r_hi, c_lo, c_hi)) = stack.pop() {
            let block = self.longest_match(r_lo, r_hi, c_lo, c_hi);
            if block.len == 0 {
                continue;
            }
            found.push(block);
            if r_lo < block.reference_start && c_lo < block.candidate_start {
                stack.push((r_lo, block.reference_start, c_lo, block.candidate_start));
            }
            if block.reference_end() < r_hi && block.candidate_end() < c_hi {
                stack.push((block.reference_end(), r_hi, block.candidate_end(), c_hi));
            }
        }

        found.sort_unstable();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len());
        for block in found {
            match merged.last_mut() {
                Some(last)
                    if last.reference_end() == block.reference_start
                        && last.candidate_end() == block.candidate_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Total length of all matching blocks.
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|b| b.len).sum()
    }
}

/// Matching blocks between `reference` and `candidate` (no pruning).
pub fn matching_blocks<T: Eq + Hash>(reference: &[T], candidate: &[T]) -> Vec<MatchingBlock> {
    SequenceAligner::new(reference, candidate).matching_blocks()
}

/// Classical longest-common-subsequence length.
pub fn lcs_len<T: Eq>(reference: &[T], candidate: &[T]) -> usize {
    let (outer, inner) = if reference.len() >= candidate.len() {
        (reference, candidate)
    } else {
        (candidate, reference)
    };
    if inner.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];
    for a in outer {
        for (j, b) in inner.iter().enumerate() {
            curr[j + 1] = if a == b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[inner.len()]
}

/// ROUGE-L alignment length under `strategy`.
///
/// `autojunk` only affects [`LcsStrategy::MatchingBlocks`].
pub fn alignment_len<T: Eq + Hash>(
    reference: &[T],
    candidate: &[T],
    strategy: LcsStrategy,
    autojunk: bool,
) -> usize {
    match strategy {
        LcsStrategy::MatchingBlocks => {
            SequenceAligner::with_autojunk(reference, candidate, autojunk).matched_len()
        }
        LcsStrategy::DynamicProgramming => lcs_len(reference, candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_mismatch_blocks() {
        let reference = ["A", "B", "C", "D"];
        let candidate = ["A", "X", "C", "D"];
        let blocks = matching_blocks(&reference, &candidate);
        assert_eq!(
            blocks,
            vec![MatchingBlock::new(0, 0, 1), MatchingBlock::new(2, 2, 2)]
        );
        assert_eq!(SequenceAligner::new(&reference, &candidate).matched_len(), 3);
    }

    #[test]
    fn test_identical_is_one_block() {
        let tokens = ["a", "b", "c"];
        assert_eq!(matching_blocks(&tokens, &tokens), vec![MatchingBlock::new(0, 0, 3)]);
    }

    #[test]
    fn test_tie_prefers_earliest_reference() {
        let reference = ["a", "b", "a", "b"];
        let candidate = ["a", "b"];
        let aligner = SequenceAligner::new(&reference, &candidate);
        assert_eq!(aligner.longest_match(0, 4, 0, 2), MatchingBlock::new(0, 0, 2));
    }

    #[test]
    fn test_tie_prefers_earliest_candidate() {
        let reference = ["a", "b"];
        let candidate = ["x", "a", "b", "a", "b"];
        let aligner = SequenceAligner::new(&reference, &candidate);
        assert_eq!(aligner.longest_match(0, 2, 0, 5), MatchingBlock::new(0, 1, 2));
    }

    #[test]
    fn test_longest_match_respects_bounds() {
        let reference = ["a", "b", "c", "d"];
        let candidate = ["a", "b", "c", "d"];
        let aligner = SequenceAligner::new(&reference, &candidate);
        assert_eq!(aligner.longest_match(1, 3, 1, 4), MatchingBlock::new(1, 1, 2));
        assert_eq!(aligner.longest_match(2, 4, 0, 2), MatchingBlock::new(2, 0, 0));
    }

    #[test]
    fn test_no_match() {
        let reference = ["a", "b"];
        let candidate = ["c", "d"];
        assert!(matching_blocks(&reference, &candidate).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        let tokens = ["a"];
        assert_eq!(SequenceAligner::new(&empty, &tokens).matched_len(), 0);
        assert_eq!(SequenceAligner::new(&tokens, &empty).matched_len(), 0);
        assert_eq!(lcs_len(&empty, &tokens), 0);
    }

    #[test]
    fn test_blocks_diverge_from_dp() {
        let reference = ["p", "q", "r", "a", "b", "c", "d"];
        let candidate = ["a", "x", "b", "x", "c", "x", "d", "p", "q", "r"];
        assert_eq!(SequenceAligner::new(&reference, &candidate).matched_len(), 3);
        assert_eq!(lcs_len(&reference, &candidate), 4);
    }

    #[test]
    fn test_lcs_len_classic() {
        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
        assert_eq!(lcs_len(&b, &a), 4);
    }

    #[test]
    fn test_autojunk_only_on_long_candidates() {
        let reference = ["x", "x", "x"];
        let mut candidate = vec!["q"];
        candidate.extend(std::iter::repeat("x").take(250));

        assert_eq!(
            alignment_len(&reference, &candidate, LcsStrategy::MatchingBlocks, false),
            3
        );
        // "x" is popular and cannot seed a match
        assert_eq!(
            alignment_len(&reference, &candidate, LcsStrategy::MatchingBlocks, true),
            0
        );

        let short = ["q", "x", "x"];
        assert_eq!(
            alignment_len(&reference, &short, LcsStrategy::MatchingBlocks, true),
            2
        );
    }

    #[test]
    fn test_autojunk_popular_tokens_still_extend() {
        let reference = ["y", "x", "x"];
        let mut candidate: Vec<&str> = std::iter::repeat("x").take(250).collect();
        candidate.extend(["y", "x", "x"]);
        assert_eq!(
            alignment_len(&reference, &candidate, LcsStrategy::MatchingBlocks, true),
            3
        );
    }

    #[test]
    fn test_blocks_sorted_and_disjoint() {
        let reference = ["a", "b", "c", "a", "b", "d", "e"];
        let candidate = ["c", "a", "b", "e", "a", "b", "d"];
        let blocks = matching_blocks(&reference, &candidate);
        for pair in blocks.windows(2) {
            assert!(pair[0].reference_end() <= pair[1].reference_start);
            assert!(pair[0].candidate_end() <= pair[1].candidate_start);
        }
        let total: usize = blocks.iter().map(|b| b.len).sum();
        assert!(total <= reference.len().min(candidate.len()));
    }

    #[test]
    fn test_matching_blocks_not_symmetric() {
        let left = ["a", "c", "b", "c"];
        let right = ["b", "c", "c", "a", "b", "b", "c", "b"];
        let forward = alignment_len(&left, &right, LcsStrategy::MatchingBlocks, false);
        let backward = alignment_len(&right, &left, LcsStrategy::MatchingBlocks, false);
        assert_eq!(forward, 3);
        assert_eq!(backward, 2);

        assert_eq!(lcs_len(&left, &right), lcs_len(&right, &left));
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&LcsStrategy::DynamicProgramming).unwrap();
        assert_eq!(json, "\"dynamic_programming\"");
        let parsed: LcsStrategy = serde_json::from_str("\"matching_blocks\"").unwrap();
        assert_eq!(parsed, LcsStrategy::MatchingBlocks);
    }
}
