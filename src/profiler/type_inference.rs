//! Column semantic type inference.
//!
//! Combines column-name heuristics with content sampling. Name rules run
//! first and dominate content rules, keeping the outcome predictable and
//! explainable; content probes on a bounded sample fill in the rest.

use super::product_name;
use crate::config::CleanerConfig;
use crate::types::SemanticType;
use crate::utils::{
    collect_sample_values, is_boolean_probe_token, is_numeric_dtype, is_whole_number,
};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

/// Name-substring hints, tried in order; first match wins.
static NAME_HINTS: Lazy<Vec<(Vec<&'static str>, SemanticType)>> = Lazy::new(|| {
    vec![
        (
            vec!["name", "title", "product", "model"],
            SemanticType::String,
        ),
        (
            vec!["date", "time", "created", "updated"],
            SemanticType::Date,
        ),
        (
            vec!["price", "cost", "amount", "fee"],
            SemanticType::Currency,
        ),
        (
            vec!["location", "address", "city", "store", "country", "street"],
            SemanticType::Location,
        ),
        (
            vec!["active", "enabled", "flag"],
            SemanticType::Boolean,
        ),
    ]
});

static ISO_DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("Invalid regex: ISO date shape"));

static NUMERIC_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("Invalid regex: numeric shape"));

static CURRENCY_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[$€£]?\d+(?:,\d{3})*(\.\d+)?[$€£]?$").expect("Invalid regex: currency shape")
});

// Looser date shapes used by the refinement pass on string columns.
static DATE_CONTENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").expect("Invalid regex: slash date"),
        Regex::new(r"\d{4}[/-]\d{1,2}[/-]\d{1,2}").expect("Invalid regex: year-first date"),
        Regex::new(r"[A-Za-z]{3,9}\s+\d{1,2},?\s+\d{4}").expect("Invalid regex: textual date"),
    ]
});

/// Assigns one semantic type per column from its name and a content sample.
pub struct ColumnTypeInferrer {
    config: CleanerConfig,
}

impl ColumnTypeInferrer {
    pub fn new(config: &CleanerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Infer the semantic type of a column. Name-based rules are applied
    /// first, then content probes over a bounded sample, then a refinement
    /// pass that may narrow or rename the initial guess.
    pub fn infer(&self, series: &Series, col_name: &str) -> SemanticType {
        let samples = collect_sample_values(series, self.config.sample_size);
        let initial = self.infer_initial(series, col_name, &samples);
        let refined = self.refine(initial, col_name, &samples);
        if refined != initial {
            debug!(
                "Column '{}': refined {} -> {}",
                col_name, initial, refined
            );
        }
        refined
    }

    fn infer_initial(
        &self,
        series: &Series,
        col_name: &str,
        samples: &[String],
    ) -> SemanticType {
        let col_lower = col_name.to_lowercase();

        // 1. Name-based rules dominate.
        if is_identifier_name(&col_lower) {
            return SemanticType::Identifier;
        }

        if is_boolean_prefixed(&col_lower) {
            return SemanticType::Boolean;
        }

        for (terms, hint) in NAME_HINTS.iter() {
            if terms.iter().any(|t| col_lower.contains(t)) {
                // Name-leaning string columns may still be product names.
                if *hint == SemanticType::String
                    && product_name::looks_like_product(
                        samples,
                        self.config.product_pattern_threshold,
                    )
                {
                    return SemanticType::ProductName;
                }
                return *hint;
            }
        }

        // 2. Native dtypes short-circuit content probes.
        let dtype = series.dtype();
        if is_numeric_dtype(dtype) {
            return self.numeric_width(samples);
        }
        if dtype == &DataType::Boolean {
            return SemanticType::Boolean;
        }

        // 3. Content-based fallback on the sample.
        if !samples.is_empty() {
            let total = samples.len() as f64;

            let boolean_hits = samples
                .iter()
                .filter(|s| is_boolean_probe_token(s))
                .count() as f64;
            if boolean_hits / total >= self.config.boolean_shape_threshold {
                return SemanticType::Boolean;
            }

            let date_hits = samples.iter().filter(|s| ISO_DATE_SHAPE.is_match(s)).count() as f64;
            if date_hits / total > self.config.date_shape_threshold {
                return SemanticType::Date;
            }

            let numeric_hits = samples.iter().filter(|s| NUMERIC_SHAPE.is_match(s)).count() as f64;
            if numeric_hits / total > self.config.numeric_shape_threshold {
                return self.numeric_width(samples);
            }

            let currency_hits =
                samples.iter().filter(|s| CURRENCY_SHAPE.is_match(s)).count() as f64;
            if currency_hits / total > self.config.currency_shape_threshold {
                return SemanticType::Currency;
            }

            // 4. Product-name detection as a secondary check.
            if product_name::looks_like_product(samples, self.config.product_pattern_threshold) {
                return SemanticType::ProductName;
            }
        }

        // 5. Default.
        SemanticType::String
    }

    /// Integer when every sampled numeric value is whole, floating otherwise.
    fn numeric_width(&self, samples: &[String]) -> SemanticType {
        let mut saw_value = false;
        for sample in samples {
            if let Ok(value) = sample.trim().parse::<f64>() {
                saw_value = true;
                if !is_whole_number(value) {
                    return SemanticType::Floating;
                }
            }
        }
        if saw_value {
            SemanticType::Integer
        } else {
            SemanticType::Floating
        }
    }

    /// Refinement pass: narrow or rename the initial guess on stronger
    /// evidence. Never widens back to `string`.
    fn refine(
        &self,
        initial: SemanticType,
        col_name: &str,
        samples: &[String],
    ) -> SemanticType {
        let col_lower = col_name.to_lowercase();

        match initial {
            SemanticType::Integer => {
                // A single non-integral sample downgrades integer to floating.
                let non_integral = samples.iter().any(|s| {
                    s.trim()
                        .parse::<f64>()
                        .is_ok_and(|v| !is_whole_number(v))
                });
                if non_integral {
                    return self.refine(SemanticType::Floating, col_name, samples);
                }
                if has_currency_term(&col_lower) {
                    return SemanticType::Currency;
                }
                SemanticType::Integer
            }
            SemanticType::Floating => {
                if has_currency_term(&col_lower) {
                    return SemanticType::Currency;
                }
                SemanticType::Floating
            }
            SemanticType::String => {
                if ["date", "time", "day"].iter().any(|t| col_lower.contains(t))
                    && self.date_content_ratio(samples) > self.config.date_shape_threshold
                {
                    return SemanticType::Date;
                }
                if ["location", "address", "city", "country", "street"]
                    .iter()
                    .any(|t| col_lower.contains(t))
                {
                    return SemanticType::Location;
                }
                if ["product", "item", "model"].iter().any(|t| col_lower.contains(t))
                    && product_name::looks_like_product(
                        samples,
                        self.config.product_pattern_threshold,
                    )
                {
                    return SemanticType::ProductName;
                }
                SemanticType::String
            }
            other => other,
        }
    }

    fn date_content_ratio(&self, samples: &[String]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let hits = samples
            .iter()
            .filter(|s| DATE_CONTENT_PATTERNS.iter().any(|p| p.is_match(s)))
            .count();
        hits as f64 / samples.len() as f64
    }
}

/// Identifier/code naming: "id" suffixed names plus explicit code tokens.
fn is_identifier_name(col_lower: &str) -> bool {
    (col_lower.contains("id") && col_lower.ends_with("id"))
        || ["uuid", "guid", "code", "key"]
            .iter()
            .any(|t| col_lower.contains(t))
}

/// is_/has_ prefixes signal boolean flags.
fn is_boolean_prefixed(col_lower: &str) -> bool {
    col_lower.starts_with("is_") || col_lower.starts_with("has_")
}

fn has_currency_term(col_lower: &str) -> bool {
    ["price", "cost", "fee", "amount"]
        .iter()
        .any(|t| col_lower.contains(t))
}
