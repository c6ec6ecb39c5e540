// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! End-to-end tests: JSONL dataset to graded report.

use std::io::Write;
use std::sync::Arc;

use rougekit::{DictionaryTokenizer, RougeKind, Scorer};
use rougekit_eval::*;

const DATASET: &str = r#"{"id": "thai", "reference": "เผ่าภูมิ ย้ำวิกฤตเศรษฐกิจ เร่งกระตุ้นผ่าน ดิจิทัลวอลเล็ต", "candidate": "เผ่าภูมิ ยาวิกฤตเศรษฐกิ เร่งกระตุ้นผ่าน ดิจิทัลวอลเล็ต"}
{"id": "exact", "reference": "the cat sat", "candidate": "the cat sat"}
{"id": "miss", "reference": "the cat sat", "candidate": "a dog ran"}
"#;

fn dataset_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_dataset_through_parallel_evaluator() {
    let file = dataset_file();
    let samples = load_jsonl(file.path()).unwrap();

    let metric = Arc::new(RougeMetric::new(RougeKind::Rouge1).with_threshold(0.7));
    let result = ParallelEvaluator::new(metric)
        .with_threads(2)
        .evaluate(&samples)
        .unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.passed, 2);
    let labels: Vec<_> = result.results.iter().map(|(_, id)| id.as_str()).collect();
    assert_eq!(labels, vec!["thai", "exact", "miss"]);
    assert_eq!(result.results[0].0.score, 0.75);
    assert!((result.score - 1.75 / 3.0).abs() < 1e-9);
}

#[test]
fn test_corpus_report_json() {
    let samples = read_jsonl(DATASET.as_bytes()).unwrap();
    let report = score_corpus(&Scorer::new(), &samples, Some(2)).unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.samples[1].scores.rouge_l().unwrap().f1, 1.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["samples"][0]["id"], "thai");
    assert!(json["average"]["rougeL"]["recall"].is_number());

    let back: CorpusReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_dictionary_scorer_metric() {
    let tokenizer = DictionaryTokenizer::from_words(["กิน", "ข้าว", "ปลา", "แมว"]);
    let metric = RougeMetric::with_scorer(Scorer::with_tokenizer(tokenizer), RougeKind::Rouge1);

    let samples = vec![Sample::new("แมวกินปลา", "แมวกินข้าว")];
    let result = Evaluator::new(Arc::new(metric)).evaluate(&samples).unwrap();

    assert!((result.score - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(result.passed, 1);
}
