// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # rougekit - ROUGE scoring for short-text grading
//!
//! Scores a candidate answer against a gold reference with precision, recall
//! and F1 under three notions of overlap:
//!
//! - **rouge1**: clipped unigram overlap
//! - **rouge2**: clipped bigram overlap
//! - **rougeL**: longest ordered common material, found by recursive
//!   longest-matching-block alignment (or classical LCS, see [`align`])
//!
//! Tokens are compared exactly as the tokenizer produced them: no stemming,
//! case folding or stop-word filtering.
//!
//! ## Quick Start
//!
//! ```
//! use rougekit::{score, RougeKind};
//!
//! let scores = score(
//!     "เผ่าภูมิ ย้ำวิกฤตเศรษฐกิจ เร่งกระตุ้นผ่าน ดิจิทัลวอลเล็ต",
//!     "เผ่าภูมิ ยาวิกฤตเศรษฐกิ เร่งกระตุ้นผ่าน ดิจิทัลวอลเล็ต",
//! )?;
//!
//! for (metric, s) in scores.iter() {
//!     println!("{}: {}", metric, s);
//! }
//! assert_eq!(scores.get(RougeKind::Rouge1).unwrap().f1, 0.75);
//! # Ok::<(), rougekit::Error>(())
//! ```

#![warn(missing_docs)]

pub mod align;
pub mod config;
pub mod error;
pub mod ngram;
pub mod rouge;
pub mod score;
pub mod token;
pub mod tokenize;

pub use align::{LcsStrategy, MatchingBlock, SequenceAligner};
pub use config::ScorerConfig;
pub use error::{Error, Result};
pub use ngram::NgramCounts;
pub use rouge::{rouge_l, rouge_n, score, RougeKind, RougeScores, Scorer};
pub use score::Score;
pub use token::TokenSeq;
pub use tokenize::{
    tokenizer_fn, DictionaryTokenizer, FnTokenizer, Tokenizer, UnicodeWordTokenizer,
    WhitespaceTokenizer,
};
