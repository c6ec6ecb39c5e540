// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Text segmentation for scoring.
//!
//! The scorer only depends on the [`Tokenizer`] trait. Segmentation itself
//! (language rules, dictionaries, models) lives behind it and is swappable.
//!
//! # Example
//!
//! ```
//! use rougekit::tokenize::{DictionaryTokenizer, Tokenizer};
//!
//! let tokenizer = DictionaryTokenizer::from_words(["กิน", "ข้าว"]);
//! let tokens = tokenizer.tokenize("กินข้าว").unwrap();
//! assert_eq!(tokens, vec!["กิน", "ข้าว"]);
//! ```

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

// ============================================================================
// Tokenizer Trait
// ============================================================================

/// Converts raw text into an ordered sequence of tokens.
///
/// Implementations should be thread-safe (`Send + Sync`) so one scorer can be
/// shared across worker threads. Blank tokens in the output are tolerated;
/// the scorer drops them.
pub trait Tokenizer: Send + Sync {
    /// Segment `text` into tokens, borrowing from it where possible.
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Arc<T> {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        (**self).tokenize(text)
    }
}

// ============================================================================
// Whitespace
// ============================================================================

/// Splits on Unicode whitespace.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        Ok(text.split_whitespace().map(Cow::Borrowed).collect())
    }
}

// ============================================================================
// UAX #29 words
// ============================================================================

/// Splits on Unicode word boundaries (UAX #29), keeping only word segments.
///
/// Punctuation and whitespace segments are discarded.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        Ok(text.unicode_words().map(Cow::Borrowed).collect())
    }
}

// ============================================================================
// Dictionary (maximal matching)
// ============================================================================

/// Longest-match dictionary segmenter for scripts written without spaces.
///
/// Each whitespace-delimited chunk is scanned left to right. At every
/// position the longest dictionary word starting there becomes a token.
/// Characters that start no dictionary word are collected into a single
/// unknown-word token that ends where the next dictionary word begins.
#[derive(Clone, Debug, Default)]
pub struct DictionaryTokenizer {
    words: HashSet<String>,
    /// Longest word length, in chars.
    max_chars: usize,
}

impl DictionaryTokenizer {
    /// Build from a list of words. Blank entries are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenizer = Self::default();
        for word in words {
            tokenizer.insert(word.as_ref());
        }
        tokenizer
    }

    /// Load a word list with one word per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let tokenizer = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            path = %path.as_ref().display(),
            words = tokenizer.len(),
            "loaded tokenizer dictionary"
        );

        Ok(tokenizer)
    }

    /// Add a word to the dictionary.
    pub fn insert(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.max_chars = self.max_chars.max(word.chars().count());
        self.words.insert(word.to_string());
    }

    /// Number of dictionary words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether `word` is in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Byte length of the longest dictionary word at the start of `rest`.
    fn longest_prefix(&self, rest: &str) -> Option<usize> {
        // byte offsets of each char end, up to max_chars chars
        let ends = rest
            .char_indices()
            .take(self.max_chars)
            .map(|(i, c)| i + c.len_utf8());

        let mut best = None;
        for end in ends {
            if self.words.contains(&rest[..end]) {
                best = Some(end);
            }
        }
        best
    }

    fn segment_chunk<'a>(&self, chunk: &'a str, out: &mut Vec<Cow<'a, str>>) {
        let mut pos = 0;
        let mut unknown_start: Option<usize> = None;

        while pos < chunk.len() {
            match self.longest_prefix(&chunk[pos..]) {
                Some(len) => {
                    if let Some(start) = unknown_start.take() {
                        out.push(Cow::Borrowed(&chunk[start..pos]));
                    }
                    out.push(Cow::Borrowed(&chunk[pos..pos + len]));
                    pos += len;
                }
                None => {
                    unknown_start.get_or_insert(pos);
                    // advance one char
                    pos += chunk[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if let Some(start) = unknown_start {
            out.push(Cow::Borrowed(&chunk[start..]));
        }
    }
}

impl Tokenizer for DictionaryTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        let mut out = Vec::new();
        for chunk in text.split_whitespace() {
            self.segment_chunk(chunk, &mut out);
        }
        Ok(out)
    }
}

// ============================================================================
// Closure adapter
// ============================================================================

/// Wraps a closure as a [`Tokenizer`].
///
/// Useful for plugging in an external segmenter:
///
/// ```
/// use rougekit::tokenize::{tokenizer_fn, Tokenizer};
///
/// let by_comma = tokenizer_fn(|text: &str| {
///     Ok(text.split(',').map(str::to_string).collect())
/// });
/// assert_eq!(by_comma.tokenize("a,b").unwrap(), vec!["a", "b"]);
/// ```
#[derive(Clone)]
pub struct FnTokenizer<F> {
    f: F,
}

impl<F> FnTokenizer<F>
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Tokenizer for FnTokenizer<F>
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Cow<'a, str>>> {
        Ok((self.f)(text)?.into_iter().map(Cow::Owned).collect())
    }
}

impl<F> std::fmt::Debug for FnTokenizer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTokenizer").finish_non_exhaustive()
    }
}

/// Shorthand for [`FnTokenizer::new`].
pub fn tokenizer_fn<F>(f: F) -> FnTokenizer<F>
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    FnTokenizer::new(f)
}
