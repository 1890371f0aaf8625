//! Filter configuration files.
//!
//! A config file describes one table view: column kinds, the panel controls,
//! extra criteria, the selector status and the header clicks to replay. The
//! format is picked from the extension: `.json` is JSON, anything else YAML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use claimsift::{ClaimsFilterPanel, ColumnKind, FilterCriterion, StatusFilter};
use serde::Deserialize;
use tracing::debug;

use crate::report::OutputFormat;

/// Everything a config file may set. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiftConfig {
    /// Column kinds by header name. Unlisted columns are inferred.
    pub columns: BTreeMap<String, ColumnKind>,
    pub panel: ClaimsFilterPanel,
    pub criteria: Vec<FilterCriterion>,
    pub status: StatusFilter,
    /// Header clicks, applied in order.
    pub sort: Vec<String>,
    pub format: Option<OutputFormat>,
}

impl SiftConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<SiftConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = if is_json(path) {
            serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON config {}", path.display()))?
        } else {
            serde_yaml::from_str(&text)
                .with_context(|| format!("invalid YAML config {}", path.display()))?
        };
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The kind for `column`: declared if present, inferred otherwise.
    pub fn kind_of(&self, column: &str) -> ColumnKind {
        self.columns
            .get(column)
            .copied()
            .unwrap_or_else(|| ColumnKind::infer(column))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
