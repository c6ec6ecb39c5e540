// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for rougekit
//!
//! Scoring itself never fails: every zero-length denominator resolves to 0.0.
//! The variants below cover the collaborators around the engine (tokenizers,
//! configuration files and datasets).

use thiserror::Error;

/// Result type alias for rougekit operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for rougekit
#[derive(Error, Debug)]
pub enum Error {
    /// The tokenizer could not segment its input
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Invalid scorer or tokenizer configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed evaluation dataset
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a tokenizer error
    pub fn tokenizer(msg: impl Into<String>) -> Self {
        Self::Tokenizer(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Check if the error was raised by a tokenizer.
    #[inline]
    pub fn is_tokenizer_error(&self) -> bool {
        matches!(self, Self::Tokenizer(_))
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Tokenizer(_) => "tokenizer",
            Self::Config(_) => "config",
            Self::Dataset(_) => "dataset",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Yaml(_) => "yaml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tokenizer() {
        let err = Error::tokenizer("segmenter crashed");
        assert!(err.is_tokenizer_error());
        assert_eq!(err.to_string(), "Tokenizer error: segmenter crashed");
    }

    #[test]
    fn test_error_config() {
        let err = Error::config("no metrics selected");
        assert!(!err.is_tokenizer_error());
        assert_eq!(err.to_string(), "Config error: no metrics selected");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(Error::tokenizer("x").category(), "tokenizer");
        assert_eq!(Error::config("x").category(), "config");
        assert_eq!(Error::dataset("x").category(), "dataset");
    }

    #[test]
    fn test_result_type() {
        let ok: Result<usize> = Ok(3);
        assert!(ok.is_ok());

        let err: Result<usize> = Err(Error::dataset("line 1: missing field"));
        assert!(err.is_err());
    }
}
