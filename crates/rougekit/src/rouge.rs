// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! ROUGE-1, ROUGE-2 and ROUGE-L scoring.
//!
//! [`Scorer`] tokenizes both strings, runs each enabled metric and returns a
//! [`RougeScores`] record keyed by metric name.

use std::collections::BTreeMap;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::align::{alignment_len, LcsStrategy};
use crate::config::ScorerConfig;
use crate::error::{Error, Result};
use crate::ngram::NgramCounts;
use crate::score::Score;
use crate::token::TokenSeq;
use crate::tokenize::{Tokenizer, WhitespaceTokenizer};

// ============================================================================
// Metric names
// ============================================================================

/// A ROUGE variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RougeKind {
    /// Unigram overlap.
    #[serde(rename = "rouge1")]
    Rouge1,
    /// Bigram overlap.
    #[serde(rename = "rouge2")]
    Rouge2,
    /// Common-subsequence alignment.
    #[serde(rename = "rougeL")]
    RougeL,
}

impl RougeKind {
    /// All variants in evaluation order.
    pub const ALL: [RougeKind; 3] = [RougeKind::Rouge1, RougeKind::Rouge2, RougeKind::RougeL];

    /// Record key: `"rouge1"`, `"rouge2"` or `"rougeL"`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rouge1 => "rouge1",
            Self::Rouge2 => "rouge2",
            Self::RougeL => "rougeL",
        }
    }
}

impl core::fmt::Display for RougeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RougeKind {
    type Err = Error;

    /// Case-insensitive; accepts `rouge1`, `rouge-1`, `rouge_l`, `l`, ...
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.strip_prefix("rouge").unwrap_or(&key) {
            "1" => Ok(Self::Rouge1),
            "2" => Ok(Self::Rouge2),
            "l" => Ok(Self::RougeL),
            _ => Err(Error::config(format!("unknown metric: {}", s))),
        }
    }
}

// ============================================================================
// Result record
// ============================================================================

/// Scores keyed by metric, iterated in rouge1, rouge2, rougeL order.
///
/// Serializes as a map from metric name to [`Score`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RougeScores {
    entries: SmallVec<[(RougeKind, Score); 3]>,
}

impl RougeScores {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score for `kind`, keeping evaluation order.
    pub fn insert(&mut self, kind: RougeKind, score: Score) {
        match self.entries.binary_search_by_key(&kind, |(k, _)| *k) {
            Ok(idx) => self.entries[idx].1 = score,
            Err(idx) => self.entries.insert(idx, (kind, score)),
        }
    }

    /// Score for `kind`, if computed.
    pub fn get(&self, kind: RougeKind) -> Option<Score> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, score)| *score)
    }

    /// ROUGE-1 score, if computed.
    pub fn rouge1(&self) -> Option<Score> {
        self.get(RougeKind::Rouge1)
    }

    /// ROUGE-2 score, if computed.
    pub fn rouge2(&self) -> Option<Score> {
        self.get(RougeKind::Rouge2)
    }

    /// ROUGE-L score, if computed.
    pub fn rouge_l(&self) -> Option<Score> {
        self.get(RougeKind::RougeL)
    }

    /// Iterate `(metric, score)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (RougeKind, Score)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of metrics in the record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no metric was computed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RougeKind, Score)> for RougeScores {
    fn from_iter<I: IntoIterator<Item = (RougeKind, Score)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (kind, score) in iter {
            scores.insert(kind, score);
        }
        scores
    }
}

impl Serialize for RougeScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(kind, score)| (kind.name(), score)))
    }
}

impl<'de> Deserialize<'de> for RougeScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let map = BTreeMap::<RougeKind, Score>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

// ============================================================================
// Per-metric functions
// ============================================================================

/// ROUGE-N over token slices.
///
/// Denominators are the n-gram counts of each side, so a sequence shorter
/// than `n` contributes 0.0 precision or recall.
pub fn rouge_n<T: Eq + Hash>(reference: &[T], candidate: &[T], n: usize) -> Score {
    let reference = NgramCounts::new(reference, n);
    let candidate = NgramCounts::new(candidate, n);
    Score::from_counts(
        reference.overlap(&candidate),
        reference.total(),
        candidate.total(),
    )
}

/// ROUGE-L over token slices. Denominators are the raw sequence lengths.
pub fn rouge_l<T: Eq + Hash>(reference: &[T], candidate: &[T], strategy: LcsStrategy) -> Score {
    let len = alignment_len(reference, candidate, strategy, false);
    Score::from_counts(len, reference.len(), candidate.len())
}

// ============================================================================
// Scorer
// ============================================================================

/// Tokenizes a reference/candidate pair and scores it.
///
/// A scorer holds no per-call state and can be shared across threads when
/// its tokenizer can.
///
/// # Example
///
/// ```
/// use rougekit::Scorer;
///
/// let scores = Scorer::new().score("A B C D", "A X C D").unwrap();
/// let rouge1 = scores.rouge1().unwrap();
/// assert_eq!(rouge1.f1, 0.75);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scorer<T = WhitespaceTokenizer> {
    tokenizer: T,
    config: ScorerConfig,
}

impl Scorer<WhitespaceTokenizer> {
    /// Whitespace tokenizer, all three metrics.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Tokenizer> Scorer<T> {
    /// Score with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            tokenizer,
            config: ScorerConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ScorerConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// The tokenizer in use.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Tokenize `text`, dropping blank tokens.
    pub fn tokenize<'a>(&self, text: &'a str) -> Result<TokenSeq<'a>> {
        Ok(TokenSeq::new(self.tokenizer.tokenize(text)?))
    }

    /// Score `candidate` against `reference`.
    ///
    /// Fails only when the tokenizer fails.
    pub fn score(&self, reference: &str, candidate: &str) -> Result<RougeScores> {
        let reference = self.tokenize(reference)?;
        let candidate = self.tokenize(candidate)?;
        Ok(self.score_tokens(&reference, &candidate))
    }

    /// Score two already tokenized sequences.
    pub fn score_tokens(&self, reference: &TokenSeq<'_>, candidate: &TokenSeq<'_>) -> RougeScores {
        let reference = reference.as_slice();
        let candidate = candidate.as_slice();
        let mut scores = RougeScores::new();

        for kind in RougeKind::ALL {
            if !self.config.enabled(kind) {
                continue;
            }
            let score = match kind {
                RougeKind::Rouge1 => rouge_n(reference, candidate, 1),
                RougeKind::Rouge2 => rouge_n(reference, candidate, 2),
                RougeKind::RougeL => {
                    let len =
                        alignment_len(reference, candidate, self.config.lcs, self.config.autojunk);
                    Score::from_counts(len, reference.len(), candidate.len())
                }
            };
            scores.insert(kind, score);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            reference_tokens = reference.len(),
            candidate_tokens = candidate.len(),
            metrics = scores.len(),
            "scored pair"
        );

        scores
    }
}

/// Score with the whitespace tokenizer and default configuration.
pub fn score(reference: &str, candidate: &str) -> Result<RougeScores> {
    Scorer::new().score(reference, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenizer_fn;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_partial_mismatch() {
        let scores = score("A B C D", "A X C D").unwrap();

        assert_eq!(scores.rouge1().unwrap().as_tuple(), (0.75, 0.75, 0.75));

        let rouge2 = scores.rouge2().unwrap();
        assert!(approx(rouge2.precision, 1.0 / 3.0));
        assert!(approx(rouge2.recall, 1.0 / 3.0));
        assert!(approx(rouge2.f1, 1.0 / 3.0));

        assert_eq!(scores.rouge_l().unwrap().as_tuple(), (0.75, 0.75, 0.75));
    }

    #[test]
    fn test_record_order_and_names() {
        let scores = score("a b", "a b").unwrap();
        let names: Vec<_> = scores.iter().map(|(k, _)| k.name()).collect();
        assert_eq!(names, vec!["rouge1", "rouge2", "rougeL"]);
    }

    #[test]
    fn test_empty_candidate() {
        let scores = score("a b c", "").unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|(_, s)| s == Score::ZERO));
    }

    #[test]
    fn test_both_empty() {
        let scores = score("", "   ").unwrap();
        assert!(scores.iter().all(|(_, s)| s == Score::ZERO));
    }

    #[test]
    fn test_single_token_has_no_bigram_score() {
        let scores = score("word", "word").unwrap();
        assert_eq!(scores.rouge1().unwrap().f1, 1.0);
        assert_eq!(scores.rouge2().unwrap(), Score::ZERO);
        assert_eq!(scores.rouge_l().unwrap().f1, 1.0);
    }

    #[test]
    fn test_config_subset() {
        let scorer = Scorer::new().with_config(ScorerConfig::default().with_metrics([
            RougeKind::RougeL,
            RougeKind::Rouge1,
        ]));
        let scores = scorer.score("a b", "b a").unwrap();
        let kinds: Vec<_> = scores.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![RougeKind::Rouge1, RougeKind::RougeL]);
        assert!(scores.rouge2().is_none());
    }

    #[test]
    fn test_dp_strategy() {
        let scorer = Scorer::new()
            .with_config(ScorerConfig::default().with_lcs(LcsStrategy::DynamicProgramming));
        let scores = scorer
            .score("p q r a b c d", "a x b x c x d p q r")
            .unwrap();
        let rouge_l = scores.rouge_l().unwrap();
        assert!(approx(rouge_l.recall, 4.0 / 7.0));
        assert!(approx(rouge_l.precision, 4.0 / 10.0));

        let greedy = score("p q r a b c d", "a x b x c x d p q r").unwrap();
        assert!(approx(greedy.rouge_l().unwrap().recall, 3.0 / 7.0));
    }

    #[test]
    fn test_blank_tokens_from_tokenizer_dropped() {
        let scorer = Scorer::with_tokenizer(tokenizer_fn(|text: &str| {
            Ok(text.split(',').map(str::to_string).collect())
        }));
        let scores = scorer.score("a,,b, ", "a,b").unwrap();
        assert_eq!(scores.rouge1().unwrap().as_tuple(), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_tokenizer_error_propagates() {
        let scorer = Scorer::with_tokenizer(tokenizer_fn(|_: &str| {
            Err(Error::tokenizer("dictionary missing"))
        }));
        let err = scorer.score("a", "a").unwrap_err();
        assert!(err.is_tokenizer_error());
    }

    #[test]
    fn test_rouge_kind_from_str() {
        assert_eq!("rouge1".parse::<RougeKind>().unwrap(), RougeKind::Rouge1);
        assert_eq!("ROUGE-2".parse::<RougeKind>().unwrap(), RougeKind::Rouge2);
        assert_eq!("rougeL".parse::<RougeKind>().unwrap(), RougeKind::RougeL);
        assert_eq!("rouge_l".parse::<RougeKind>().unwrap(), RougeKind::RougeL);
        assert_eq!("L".parse::<RougeKind>().unwrap(), RougeKind::RougeL);
        assert!("rouge3".parse::<RougeKind>().is_err());
    }

    #[test]
    fn test_scores_serde() {
        let scores = score("a b c", "a b d").unwrap();
        let json = serde_json::to_value(&scores).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert!(keys.contains(&"rouge1".to_string()));
        assert!(keys.contains(&"rougeL".to_string()));
        assert!(json["rouge1"]["precision"].is_number());

        let back: RougeScores = serde_json::from_value(json).unwrap();
        assert_eq!(back, scores);
    }

    #[test]
    fn test_insert_replaces() {
        let mut scores = RougeScores::new();
        scores.insert(RougeKind::RougeL, Score::ZERO);
        scores.insert(RougeKind::Rouge1, Score::ZERO);
        scores.insert(RougeKind::RougeL, Score::from_counts(1, 1, 1));
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.rouge_l().unwrap().f1, 1.0);
        assert_eq!(scores.iter().next().unwrap().0, RougeKind::Rouge1);
    }
}
