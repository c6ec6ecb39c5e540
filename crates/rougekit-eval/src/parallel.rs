// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Parallel evaluation using Rayon

use crate::evaluator::{grade, EvaluationResult, Sample, Tally};
use crate::metric::Metric;
use rayon::prelude::*;
use std::sync::Arc;

/// Build a pool with `num_threads` workers, or rayon's default size.
pub(crate) fn build_pool(num_threads: Option<usize>) -> anyhow::Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    Ok(builder.build()?)
}

/// Parallel evaluator using Rayon for CPU-bound scoring
pub struct ParallelEvaluator {
    metric: Arc<dyn Metric>,
    num_threads: Option<usize>,
}

impl ParallelEvaluator {
    /// Create a new parallel evaluator
    pub fn new(metric: Arc<dyn Metric>) -> Self {
        Self {
            metric,
            num_threads: None,
        }
    }

    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Evaluate samples in parallel.
    ///
    /// Results come back in input order. The first failing sample aborts
    /// the run.
    pub fn evaluate(&self, samples: &[Sample]) -> anyhow::Result<EvaluationResult> {
        let pool = build_pool(self.num_threads)?;
        let metric = self.metric.as_ref();

        let tally = pool.install(|| {
            samples
                .par_iter()
                .enumerate()
                .map(|(idx, sample)| grade(metric, idx, sample))
                .try_fold(Tally::default, |tally, graded| {
                    let (result, label) = graded?;
                    anyhow::Ok(tally.push(result, label))
                })
                .try_reduce(Tally::default, |left, right| Ok(left.merge(right)))
        })?;

        let result = tally.finish();

        #[cfg(feature = "tracing")]
        tracing::info!(
            metric = self.metric.name(),
            threads = pool.current_num_threads(),
            total = result.total,
            passed = result.passed,
            "parallel evaluation complete"
        );

        Ok(result)
    }
}
