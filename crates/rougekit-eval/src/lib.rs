// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Evaluation framework for rougekit
//!
//! Grades datasets of reference/candidate pairs with ROUGE metrics,
//! sequentially or with Rayon parallelism.

pub mod dataset;
pub mod evaluator;
pub mod metric;
pub mod parallel;
pub mod report;

pub use dataset::{load_jsonl, read_jsonl};
pub use evaluator::{EvaluationResult, Evaluator, Sample};
pub use metric::{Measure, Metric, MetricResult, RougeMetric, DEFAULT_THRESHOLD};
pub use parallel::ParallelEvaluator;
pub use report::{score_corpus, CorpusReport, GradedReport, PassRate, SampleScores};
