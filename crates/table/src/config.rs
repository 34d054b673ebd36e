use std::collections::HashSet;

use serde::Deserialize;

use crate::error::TableError;
use crate::registry::{Comparison, ComparisonRegistry};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TableConfig {
    pub name: String,
    #[serde(default)]
    pub table: TableOptions,
    #[serde(default)]
    pub comparisons: Vec<ComparisonConfig>,
    #[serde(default)]
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

// ---------------------------------------------------------------------------
// Table options
// ---------------------------------------------------------------------------

/// Output shape and stacking policy.
#[derive(Debug, Clone, Deserialize)]
pub struct TableOptions {
    #[serde(default = "default_left_label")]
    pub left_label: String,
    #[serde(default = "default_right_label")]
    pub right_label: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Quote fields that contain the delimiter, quotes or newlines.
    /// `false` reproduces the legacy unquoted output byte for byte.
    #[serde(default = "default_escape")]
    pub escape: bool,
    #[serde(default)]
    pub unknown_comparison: UnknownComparisonPolicy,
}

fn default_left_label() -> String {
    "Human id".into()
}

fn default_right_label() -> String {
    "Plant id".into()
}

fn default_delimiter() -> char {
    ','
}

fn default_escape() -> bool {
    true
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            left_label: default_left_label(),
            right_label: default_right_label(),
            delimiter: default_delimiter(),
            escape: default_escape(),
            unknown_comparison: UnknownComparisonPolicy::default(),
        }
    }
}

impl TableOptions {
    /// Delimiter as a single byte. Only meaningful after `validate`.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.left_label.is_empty() || self.right_label.is_empty() {
            return Err(TableError::ConfigValidation(
                "left_label and right_label must not be empty".into(),
            ));
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(TableError::ConfigValidation(format!(
                "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// What `stack` does with a record whose comparison is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownComparisonPolicy {
    /// Fail the offending `stack` call.
    #[default]
    Reject,
    /// Drop the record and count it as skipped.
    Skip,
}

impl std::fmt::Display for UnknownComparisonPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Comparison for ComparisonConfig {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Input + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub file: String,
    #[serde(default)]
    pub format: InputFormat,
    #[serde(default)]
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    #[default]
    Csv,
    Jsonl,
}

/// CSV header names for each record field.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_left_column")]
    pub left_id: String,
    #[serde(default = "default_right_column")]
    pub right_id: String,
    #[serde(default = "default_comparison_column")]
    pub comparison_id: String,
}

fn default_left_column() -> String {
    "left_id".into()
}

fn default_right_column() -> String {
    "right_id".into()
}

fn default_comparison_column() -> String {
    "comparison_id".into()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            left_id: default_left_column(),
            right_id: default_right_column(),
            comparison_id: default_comparison_column(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub file: String,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl TableConfig {
    pub fn from_toml(input: &str) -> Result<Self, TableError> {
        let config: TableConfig =
            toml::from_str(input).map_err(|e| TableError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.name.trim().is_empty() {
            return Err(TableError::ConfigValidation("name must not be empty".into()));
        }

        self.table.validate()?;

        let mut seen = HashSet::new();
        for c in &self.comparisons {
            if c.id.is_empty() {
                return Err(TableError::ConfigValidation(
                    "comparison id must not be empty".into(),
                ));
            }
            if !seen.insert(c.id.as_str()) {
                return Err(TableError::ConfigValidation(format!(
                    "duplicate comparison id '{}'",
                    c.id
                )));
            }
        }

        Ok(())
    }

    pub fn registry(&self) -> ComparisonRegistry {
        ComparisonRegistry::from_comparisons(self.comparisons.as_slice())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
