// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Scorer configuration.
//!
//! Loadable from YAML or JSON:
//!
//! ```yaml
//! metrics: [rouge1, rougeL]
//! lcs: dynamic_programming
//! autojunk: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::align::LcsStrategy;
use crate::error::{Error, Result};
use crate::rouge::RougeKind;

/// Which metrics a [`Scorer`](crate::Scorer) computes, and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScorerConfig {
    /// Metrics to compute. Output order is always rouge1, rouge2, rougeL.
    pub metrics: Vec<RougeKind>,
    /// ROUGE-L alignment strategy.
    pub lcs: LcsStrategy,
    /// Popular-token pruning for the matching-block aligner.
    pub autojunk: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            metrics: RougeKind::ALL.to_vec(),
            lcs: LcsStrategy::default(),
            autojunk: false,
        }
    }
}

impl ScorerConfig {
    /// Select the metrics to compute.
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = RougeKind>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Set the ROUGE-L alignment strategy.
    pub fn with_lcs(mut self, lcs: LcsStrategy) -> Self {
        self.lcs = lcs;
        self
    }

    /// Enable or disable popular-token pruning.
    pub fn with_autojunk(mut self, autojunk: bool) -> Self {
        self.autojunk = autojunk;
        self
    }

    /// Whether `kind` is selected.
    #[inline]
    pub fn enabled(&self, kind: RougeKind) -> bool {
        self.metrics.contains(&kind)
    }

    /// Reject configurations that cannot produce any score.
    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(Error::config("at least one metric must be selected"));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file: `.json` is read as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), ?config, "loaded scorer config");

        Ok(config)
    }
}
