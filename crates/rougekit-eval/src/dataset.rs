// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! JSON Lines datasets
//!
//! One [`Sample`] object per line. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rougekit::{Error, Result};

use crate::evaluator::Sample;

/// Load samples from a JSON Lines file.
pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let samples = read_jsonl(BufReader::new(File::open(path)?))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), samples = samples.len(), "loaded dataset");

    Ok(samples)
}

/// Parse samples from any buffered reader.
///
/// Malformed lines fail with [`Error::Dataset`] naming the 1-based line.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample = serde_json::from_str(&line)
            .map_err(|e| Error::dataset(format!("line {}: {}", idx + 1, e)))?;
        samples.push(sample);
    }
    Ok(samples)
}
