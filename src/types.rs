//! Core types shared across the cleaning engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic type assigned per column.
///
/// One tag per column describing how its cells should be interpreted. The tag
/// may change during a pipeline run as normalization upgrades raw text into a
/// narrower type (at most one promotion per column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Identifier,
    String,
    ProductName,
    Location,
    Currency,
    Date,
    Boolean,
    Integer,
    Floating,
    Categorical,
}

impl SemanticType {
    /// Stable string form used in reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Identifier => "identifier",
            SemanticType::String => "string",
            SemanticType::ProductName => "product_name",
            SemanticType::Location => "location",
            SemanticType::Currency => "currency",
            SemanticType::Date => "date",
            SemanticType::Boolean => "boolean",
            SemanticType::Integer => "integer",
            SemanticType::Floating => "floating",
            SemanticType::Categorical => "categorical",
        }
    }

    /// Whether values of this type are numbers after normalization.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Currency | SemanticType::Integer | SemanticType::Floating
        )
    }

    /// Frozen columns are never run through value normalizers.
    pub fn is_frozen(&self) -> bool {
        matches!(self, SemanticType::Identifier | SemanticType::ProductName)
    }

    /// Whether cells remain text after normalization (mode imputation applies).
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            SemanticType::String
                | SemanticType::ProductName
                | SemanticType::Location
                | SemanticType::Categorical
                | SemanticType::Date
        )
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Imputation method applied to a column with missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationMethod {
    Median,
    Mode,
}

impl ImputationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImputationMethod::Median => "median",
            ImputationMethod::Mode => "mode",
        }
    }
}

/// Aggregated outcome of one pipeline run.
///
/// Created fresh per run, owned by the invocation that produced it and
/// immutable once returned. External renderers consume these fields verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Number of exact duplicate rows removed.
    pub duplicates: usize,
    /// Per-column imputation method actually applied.
    pub imputed: BTreeMap<String, ImputationMethod>,
    /// Per-column count of non-missing values that could not be converted.
    pub invalid: BTreeMap<String, usize>,
    /// Per-column ordered "before -> after" entries.
    pub transformations: BTreeMap<String, Vec<String>>,
    /// Free-text warnings, in emission order.
    pub warnings: Vec<String>,
}

impl CleaningReport {
    /// Serialize the report to pretty-printed JSON with stable key order.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when the run changed nothing and raised nothing.
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0
            && self.imputed.is_empty()
            && self.invalid.is_empty()
            && self.transformations.values().all(|t| t.is_empty())
            && self.warnings.is_empty()
    }
}

/// Append-only builder for the transformation/warning log.
///
/// One builder exists per pipeline run and is threaded through every
/// normalizer, keeping log accumulation explicit rather than ambient.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    duplicates: usize,
    imputed: BTreeMap<String, ImputationMethod>,
    invalid: BTreeMap<String, usize>,
    transformations: BTreeMap<String, Vec<String>>,
    warnings: Vec<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_duplicates(&mut self, count: usize) {
        self.duplicates = count;
    }

    /// Append a raw transformation entry to a column's log.
    pub fn log_transformation(&mut self, column: &str, entry: impl Into<String>) {
        self.transformations
            .entry(column.to_string())
            .or_default()
            .push(entry.into());
    }

    /// Append a `"<before> -> <after>"` entry to a column's log.
    pub fn log_conversion(&mut self, column: &str, before: &str, after: &str) {
        self.log_transformation(column, format!("{before} -> {after}"));
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record the invalid (unconvertible) count for a column. Zero counts are
    /// not recorded.
    pub fn record_invalid(&mut self, column: &str, count: usize) {
        if count > 0 {
            self.invalid.insert(column.to_string(), count);
        }
    }

    pub fn record_imputed(&mut self, column: &str, method: ImputationMethod) {
        self.imputed.insert(column.to_string(), method);
    }

    /// Number of entries logged so far for a column.
    pub fn transformation_count(&self, column: &str) -> usize {
        self.transformations.get(column).map_or(0, |t| t.len())
    }

    pub fn finish(self) -> CleaningReport {
        CleaningReport {
            duplicates: self.duplicates,
            imputed: self.imputed,
            invalid: self.invalid,
            transformations: self.transformations,
            warnings: self.warnings,
        }
    }
}
