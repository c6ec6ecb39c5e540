// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Metric trait and the ROUGE grading metric

use std::str::FromStr;

use rougekit::{Error, Result, RougeKind, Score, Scorer, Tokenizer, WhitespaceTokenizer};
use serde::{Deserialize, Serialize};

/// Default pass threshold for [`RougeMetric`].
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Result of a metric evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    /// Score (0.0 to 1.0)
    pub score: f64,

    /// Whether the candidate passed
    pub passed: bool,

    /// Optional details
    pub details: Option<String>,
}

impl MetricResult {
    /// Create a result that passes when `score >= threshold`
    pub fn with_threshold(score: f64, threshold: f64) -> Self {
        Self {
            score,
            passed: score >= threshold,
            details: None,
        }
    }

    /// Add details
    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// Metric trait for grading a candidate against its reference
pub trait Metric: Send + Sync {
    /// Evaluate `candidate` against `reference`
    fn evaluate(&self, reference: &str, candidate: &str) -> Result<MetricResult>;

    /// Get metric name
    fn name(&self) -> &str;
}

/// Which component of a [`Score`] a metric reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Matched fraction of the candidate
    Precision,
    /// Matched fraction of the reference
    Recall,
    /// Harmonic mean of the two
    #[default]
    F1,
}

impl Measure {
    /// Pick this component out of `score`.
    #[inline]
    pub fn of(&self, score: &Score) -> f64 {
        match self {
            Self::Precision => score.precision,
            Self::Recall => score.recall,
            Self::F1 => score.f1,
        }
    }

    /// Lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::F1 => "f1",
        }
    }
}

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "precision" => Ok(Self::Precision),
            "r" | "recall" => Ok(Self::Recall),
            "f" | "f1" | "fmeasure" => Ok(Self::F1),
            _ => Err(Error::config(format!("unknown measure: {}", s))),
        }
    }
}

/// Grades with one ROUGE variant and one measure.
///
/// The wrapped scorer is narrowed to the selected variant, so other
/// variants are never computed.
///
/// # Example
///
/// ```
/// use rougekit::RougeKind;
/// use rougekit_eval::{Metric, RougeMetric};
///
/// let metric = RougeMetric::new(RougeKind::RougeL).with_threshold(0.7);
/// let result = metric.evaluate("A B C D", "A X C D").unwrap();
/// assert_eq!(result.score, 0.75);
/// assert!(result.passed);
/// ```
#[derive(Debug, Clone)]
pub struct RougeMetric<T = WhitespaceTokenizer> {
    scorer: Scorer<T>,
    kind: RougeKind,
    measure: Measure,
    threshold: f64,
    name: String,
}

impl RougeMetric<WhitespaceTokenizer> {
    /// F1 of `kind` with the whitespace tokenizer.
    pub fn new(kind: RougeKind) -> Self {
        Self::with_scorer(Scorer::new(), kind)
    }
}

impl<T: Tokenizer> RougeMetric<T> {
    /// Reuse `scorer`'s tokenizer and alignment settings.
    pub fn with_scorer(scorer: Scorer<T>, kind: RougeKind) -> Self {
        let config = scorer.config().clone().with_metrics([kind]);
        Self {
            scorer: scorer.with_config(config),
            kind,
            measure: Measure::default(),
            threshold: DEFAULT_THRESHOLD,
            name: Self::make_name(kind, Measure::default()),
        }
    }

    /// Report `measure` instead of F1.
    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self.name = Self::make_name(self.kind, measure);
        self
    }

    /// Pass when the measure reaches `threshold`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The graded ROUGE variant.
    pub fn kind(&self) -> RougeKind {
        self.kind
    }

    /// The reported measure.
    pub fn measure(&self) -> Measure {
        self.measure
    }

    /// The pass threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn make_name(kind: RougeKind, measure: Measure) -> String {
        format!("{}_{}", kind, measure.name())
    }
}

impl<T: Tokenizer> Metric for RougeMetric<T> {
    fn evaluate(&self, reference: &str, candidate: &str) -> Result<MetricResult> {
        let scores = self.scorer.score(reference, candidate)?;
        let score = scores.get(self.kind).unwrap_or_default();
        let value = self.measure.of(&score);

        Ok(MetricResult::with_threshold(value, self.threshold)
            .with_details(format!("{}: {}", self.kind, score)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
