// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! N-gram multisets and clipped overlap counting.

use std::collections::HashMap;
use std::hash::Hash;

/// Number of n-grams a sequence of `len` tokens yields at stride 1.
#[inline]
pub fn ngram_count(len: usize, n: usize) -> usize {
    if n == 0 {
        0
    } else {
        len.saturating_sub(n - 1)
    }
}

/// Multiset of the n-grams of one token sequence.
///
/// Keys borrow windows of the source slice, so building the multiset
/// allocates only the map.
#[derive(Clone, Debug)]
pub struct NgramCounts<'t, T> {
    n: usize,
    counts: HashMap<&'t [T], usize>,
    total: usize,
}

impl<'t, T: Eq + Hash> NgramCounts<'t, T> {
    /// Count every width-`n` window of `tokens`.
    ///
    /// `n == 0` and sequences shorter than `n` produce an empty multiset.
    pub fn new(tokens: &'t [T], n: usize) -> Self {
        let mut counts = HashMap::new();
        let mut total = 0;

        if n > 0 {
            for gram in tokens.windows(n) {
                *counts.entry(gram).or_insert(0) += 1;
                total += 1;
            }
        }

        Self { n, counts, total }
    }

    /// Unigram multiset.
    pub fn unigrams(tokens: &'t [T]) -> Self {
        Self::new(tokens, 1)
    }

    /// Bigram multiset.
    pub fn bigrams(tokens: &'t [T]) -> Self {
        Self::new(tokens, 2)
    }

    /// The arity this multiset was built with.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total n-grams counted, duplicates included.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct n-grams.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True when no n-gram was counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Occurrences of `gram`.
    pub fn count(&self, gram: &[T]) -> usize {
        self.counts.get(gram).copied().unwrap_or(0)
    }

    /// Multiset intersection size: sum over shared n-grams of the smaller count.
    pub fn overlap(&self, other: &Self) -> usize {
        // probe the larger map with the smaller one
        let (small, large) = if self.counts.len() <= other.counts.len() {
            (&self.counts, &other.counts)
        } else {
            (&other.counts, &self.counts)
        };

        small
            .iter()
            .filter_map(|(gram, &count)| large.get(*gram).map(|&c| c.min(count)))
            .sum()
    }
}

/// Clipped n-gram overlap between two sequences.
pub fn overlap<T: Eq + Hash>(reference: &[T], candidate: &[T], n: usize) -> usize {
    NgramCounts::new(reference, n).overlap(&NgramCounts::new(candidate, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngram_count() {
        assert_eq!(ngram_count(4, 1), 4);
        assert_eq!(ngram_count(4, 2), 3);
        assert_eq!(ngram_count(1, 2), 0);
        assert_eq!(ngram_count(0, 1), 0);
        assert_eq!(ngram_count(5, 0), 0);
    }

    #[test]
    fn test_multiset_counts() {
        let tokens = ["a", "b", "a", "b"];
        let bigrams = NgramCounts::bigrams(&tokens);
        assert_eq!(bigrams.total(), 3);
        assert_eq!(bigrams.distinct(), 2);
        assert_eq!(bigrams.count(&["a", "b"]), 2);
        assert_eq!(bigrams.count(&["b", "a"]), 1);
        assert_eq!(bigrams.count(&["b", "b"]), 0);
    }

    #[test]
    fn test_overlap_clipped_by_min_count() {
        let reference = ["a", "a", "b"];
        let candidate = ["a", "b", "b"];
        assert_eq!(overlap(&reference, &candidate, 1), 2);
    }

    #[test]
    fn test_overlap_symmetric() {
        let reference = ["x", "y", "x", "z"];
        let candidate = ["x", "x", "x", "q"];
        assert_eq!(
            overlap(&reference, &candidate, 1),
            overlap(&candidate, &reference, 1)
        );
        assert_eq!(overlap(&reference, &candidate, 1), 2);
    }

    #[test]
    fn test_bigram_overlap() {
        let reference = ["A", "B", "C", "D"];
        let candidate = ["A", "X", "C", "D"];
        assert_eq!(overlap(&reference, &candidate, 2), 1);
    }

    #[test]
    fn test_short_sequence_has_no_bigrams() {
        let single = ["only"];
        let bigrams = NgramCounts::bigrams(&single);
        assert!(bigrams.is_empty());
        assert_eq!(bigrams.n(), 2);
        assert_eq!(overlap(&single, &single, 2), 0);
    }

    #[test]
    fn test_zero_arity_is_empty() {
        let tokens = ["a", "b"];
        let grams = NgramCounts::new(&tokens, 0);
        assert!(grams.is_empty());
        assert_eq!(overlap(&tokens, &tokens, 0), 0);
    }

    #[test]
    fn test_total_matches_ngram_count() {
        let tokens: Vec<u32> = (0..10).map(|i| i % 3).collect();
        for n in 0..12 {
            assert_eq!(NgramCounts::new(&tokens, n).total(), ngram_count(tokens.len(), n));
        }
    }
}
