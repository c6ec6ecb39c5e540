// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Token sequences.
//!
//! A [`TokenSeq`] is the ordered, immutable token list a scorer compares.
//! Tokens are `Cow<'a, str>` so segmenters can hand back slices of the input
//! without copying, or owned strings when they have to build new text.

use std::borrow::Cow;
use std::ops::Deref;

/// An ordered sequence of non-blank tokens.
///
/// Empty and whitespace-only elements are dropped on construction; every
/// other token is kept verbatim, including any surrounding whitespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenSeq<'a> {
    tokens: Vec<Cow<'a, str>>,
}

impl<'a> TokenSeq<'a> {
    /// Build a sequence, discarding blank tokens.
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'a, str>>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t| !is_blank(t))
                .collect(),
        }
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no tokens survived filtering.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Cow<'a, str>] {
        &self.tokens
    }

    /// Iterate over the tokens as `&str`.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|t| t.as_ref())
    }

    /// Detach from the borrowed input.
    pub fn into_owned(self) -> TokenSeq<'static> {
        TokenSeq {
            tokens: self
                .tokens
                .into_iter()
                .map(|t| Cow::Owned(t.into_owned()))
                .collect(),
        }
    }
}

impl<'a> Deref for TokenSeq<'a> {
    type Target = [Cow<'a, str>];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl<'a, T: Into<Cow<'a, str>>> FromIterator<T> for TokenSeq<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[inline]
fn is_blank(token: &str) -> bool {
    token.trim().is_empty()
}
