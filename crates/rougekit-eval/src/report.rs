// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Corpus-level ROUGE reports
//!
//! Scores every sample with all configured variants and macro-averages
//! each component across the corpus.

use crate::evaluator::Sample;
use crate::metric::Measure;
use crate::parallel::build_pool;
use anyhow::Context;
use rayon::prelude::*;
use rougekit::{RougeKind, RougeScores, Score, Scorer, Tokenizer};
use serde::{Deserialize, Serialize};

/// Scores for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleScores {
    /// Sample label
    pub id: String,
    /// Per-variant scores
    pub scores: RougeScores,
}

/// Per-sample scores plus their macro average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    /// One entry per input sample, in input order
    pub samples: Vec<SampleScores>,
    /// Mean precision, recall and F1 per variant
    pub average: RougeScores,
}

impl CorpusReport {
    /// Number of scored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the corpus was empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Count samples whose `measure` of `kind` reaches `threshold`.
    ///
    /// Reuses the stored scores; a sample missing `kind` counts as zero.
    pub fn pass_rate(&self, kind: RougeKind, measure: Measure, threshold: f64) -> PassRate {
        let passed = self
            .samples
            .iter()
            .filter(|sample| {
                let score = sample.scores.get(kind).unwrap_or_default();
                measure.of(&score) >= threshold
            })
            .count();

        PassRate {
            metric: kind,
            measure,
            threshold,
            passed,
            total: self.samples.len(),
        }
    }
}

/// Pass/fail tally over a [`CorpusReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRate {
    /// Graded variant
    pub metric: RougeKind,
    /// Graded component
    pub measure: Measure,
    /// Minimum passing value
    pub threshold: f64,
    /// Samples at or above the threshold
    pub passed: usize,
    /// Samples graded
    pub total: usize,
}

impl PassRate {
    /// passed / total, 0.0 on an empty corpus
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// A corpus report together with its pass rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedReport {
    /// Per-sample and averaged scores
    pub report: CorpusReport,
    /// Pass/fail tally
    pub pass_rate: PassRate,
}

/// Score a corpus in parallel.
///
/// `threads` of `None` uses rayon's default pool size. An empty corpus
/// averages to zero on every configured variant.
pub fn score_corpus<T: Tokenizer>(
    scorer: &Scorer<T>,
    samples: &[Sample],
    threads: Option<usize>,
) -> anyhow::Result<CorpusReport> {
    let pool = build_pool(threads)?;

    let scored: Vec<SampleScores> = pool.install(|| {
        samples
            .par_iter()
            .enumerate()
            .map(|(idx, sample)| {
                let id = sample.label(idx);
                let scores = scorer
                    .score(&sample.reference, &sample.candidate)
                    .with_context(|| format!("scoring {}", id))?;
                Ok(SampleScores { id, scores })
            })
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    let kinds: Vec<RougeKind> = RougeKind::ALL
        .into_iter()
        .filter(|kind| scorer.config().enabled(*kind))
        .collect();
    let average = macro_average(&scored, &kinds);

    #[cfg(feature = "tracing")]
    tracing::info!(samples = scored.len(), metrics = kinds.len(), "corpus scored");

    Ok(CorpusReport {
        samples: scored,
        average,
    })
}

fn macro_average(scored: &[SampleScores], kinds: &[RougeKind]) -> RougeScores {
    kinds
        .iter()
        .map(|&kind| {
            if scored.is_empty() {
                return (kind, Score::ZERO);
            }
            let (mut precision, mut recall, mut f1) = (0.0, 0.0, 0.0);
            for sample in scored {
                let score = sample.scores.get(kind).unwrap_or_default();
                precision += score.precision;
                recall += score.recall;
                f1 += score.f1;
            }
            let n = scored.len() as f64;
            (
                kind,
                Score {
                    precision: precision / n,
                    recall: recall / n,
                    f1: f1 / n,
                },
            )
        })
        .collect()
}
