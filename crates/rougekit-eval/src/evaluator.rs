// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Evaluator for running a metric over a dataset

use crate::metric::{Metric, MetricResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One graded pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Optional identifier; results fall back to `sample_<index>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Gold answer
    pub reference: String,

    /// Answer being graded
    pub candidate: String,
}

impl Sample {
    /// Create an unnamed sample
    pub fn new(reference: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            id: None,
            reference: reference.into(),
            candidate: candidate.into(),
        }
    }

    /// Attach an identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The identifier, or `sample_<index>` when absent
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("sample_{}", index),
        }
    }
}

/// Evaluation results
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// Average score across all samples
    pub score: f64,

    /// Individual results
    pub results: Vec<(MetricResult, String)>, // (result, sample label)

    /// Number of passed samples
    pub passed: usize,

    /// Total samples
    pub total: usize,
}

impl EvaluationResult {
    /// Calculate accuracy (passed / total), 0.0 on an empty dataset
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// Running totals shared by the sequential and parallel evaluators.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    results: Vec<(MetricResult, String)>,
    score_sum: f64,
    passed: usize,
}

impl Tally {
    pub(crate) fn push(mut self, result: MetricResult, label: String) -> Self {
        self.score_sum += result.score;
        if result.passed {
            self.passed += 1;
        }
        self.results.push((result, label));
        self
    }

    pub(crate) fn merge(mut self, other: Tally) -> Self {
        self.results.extend(other.results);
        self.score_sum += other.score_sum;
        self.passed += other.passed;
        self
    }

    pub(crate) fn finish(self) -> EvaluationResult {
        let total = self.results.len();
        let score = if total == 0 {
            0.0
        } else {
            self.score_sum / total as f64
        };

        EvaluationResult {
            score,
            results: self.results,
            passed: self.passed,
            total,
        }
    }
}

/// Grade one sample, tagging failures with its label.
pub(crate) fn grade(
    metric: &dyn Metric,
    index: usize,
    sample: &Sample,
) -> anyhow::Result<(MetricResult, String)> {
    let label = sample.label(index);
    let result = metric
        .evaluate(&sample.reference, &sample.candidate)
        .with_context(|| format!("{} failed on {}", metric.name(), label))?;
    Ok((result, label))
}

/// Sequential evaluator
pub struct Evaluator {
    metric: Arc<dyn Metric>,
}

impl Evaluator {
    /// Create a new evaluator
    pub fn new(metric: Arc<dyn Metric>) -> Self {
        Self { metric }
    }

    /// The metric in use
    pub fn metric(&self) -> &dyn Metric {
        self.metric.as_ref()
    }

    /// Evaluate every sample in order, stopping at the first failure
    pub fn evaluate(&self, samples: &[Sample]) -> anyhow::Result<EvaluationResult> {
        let mut tally = Tally::default();

        for (idx, sample) in samples.iter().enumerate() {
            let (result, label) = grade(self.metric.as_ref(), idx, sample)?;
            tally = tally.push(result, label);
        }

        let result = tally.finish();

        #[cfg(feature = "tracing")]
        tracing::info!(
            metric = self.metric.name(),
            total = result.total,
            passed = result.passed,
            score = result.score,
            "evaluation complete"
        );

        Ok(result)
    }
}
