// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Precision / recall / F1 derivation.
//!
//! Every division by zero resolves to 0.0. A scorer therefore returns a value
//! for any pair of inputs, including empty ones, and never NaN or infinity.

use serde::{Deserialize, Serialize};

/// Precision, recall and F1 for one metric, each in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Overlap divided by the candidate-side count.
    pub precision: f64,
    /// Overlap divided by the reference-side count.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl Score {
    /// All-zero score.
    pub const ZERO: Score = Score {
        precision: 0.0,
        recall: 0.0,
        f1: 0.0,
    };

    /// Derive a score from an overlap count and the two side counts.
    ///
    /// Precision and recall are computed independently, then combined.
    #[inline]
    pub fn from_counts(overlap: usize, reference_len: usize, candidate_len: usize) -> Self {
        let precision = ratio(overlap, candidate_len);
        let recall = ratio(overlap, reference_len);
        Self::from_precision_recall(precision, recall)
    }

    /// Combine precision and recall into a score with F1.
    #[inline]
    pub fn from_precision_recall(precision: f64, recall: f64) -> Self {
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
        }
    }

    /// Score with precision and recall exchanged.
    ///
    /// Scoring `(a, b)` and swapping gives the score of `(b, a)`.
    #[inline]
    pub fn swapped(self) -> Self {
        Self {
            precision: self.recall,
            recall: self.precision,
            f1: self.f1,
        }
    }

    /// `(precision, recall, f1)`.
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.precision, self.recall, self.f1)
    }
}

impl From<Score> for (f64, f64, f64) {
    fn from(score: Score) -> Self {
        score.as_tuple()
    }
}

impl core::fmt::Display for Score {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Precision={:.3}, Recall={:.3}, F1={:.3}",
            self.precision, self.recall, self.f1
        )
    }
}

/// `count / total`, or 0.0 when `total` is zero. Clamped to `[0.0, 1.0]`.
#[inline]
fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64).min(1.0)
    }
}
