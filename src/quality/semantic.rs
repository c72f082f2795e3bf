//! Column-name-aware plausibility checks on numeric columns.
//!
//! The validator never mutates or discards values: silently altering numbers
//! would hide genuine anomalies from the analyst. Each rule fires
//! independently, so one column can carry several warnings.

use crate::error::Result;
use polars::prelude::*;

/// Name substrings that suggest values should not be negative.
const NON_NEGATIVE_HINTS: [&str; 9] = [
    "price", "stock", "quantity", "rating", "count", "age", "cost", "amount", "fee",
];

/// Name substrings where negative values are legitimate (discounts applied,
/// refunds, losses).
const NEGATIVE_OK_HINTS: [&str; 3] = ["sale", "revenue", "profit"];

/// Name substrings that suggest a bounded rating scale.
const RATING_HINTS: [&str; 2] = ["rating", "score"];

/// Detects implausible values in numeric columns and emits warnings.
pub struct SemanticValidator;

impl SemanticValidator {
    /// Validate a numeric column, returning warnings. The column itself is
    /// left untouched.
    pub fn validate(series: &Series, col_name: &str) -> Result<Vec<String>> {
        let float_series = series.cast(&DataType::Float64)?;
        let values = float_series.f64()?;

        let mut negative_count = 0usize;
        let mut infinite_count = 0usize;
        let mut max_finite = f64::NEG_INFINITY;

        for value in values.into_iter().flatten() {
            if value.is_infinite() {
                infinite_count += 1;
                continue;
            }
            if value.is_nan() {
                continue;
            }
            if value < 0.0 {
                negative_count += 1;
            }
            if value > max_finite {
                max_finite = value;
            }
        }

        let col_lower = col_name.to_lowercase();
        let mut warnings = Vec::new();

        let expects_non_negative = NON_NEGATIVE_HINTS.iter().any(|h| col_lower.contains(h))
            && !NEGATIVE_OK_HINTS.iter().any(|h| col_lower.contains(h));
        if expects_non_negative && negative_count > 0 {
            warnings.push(format!(
                "Column '{col_name}' has {negative_count} negative value(s) but its name suggests non-negative data"
            ));
        }

        // Values up to 10 are plausibly a 10-point scale; beyond that the
        // scale is suspect.
        let looks_like_rating = RATING_HINTS.iter().any(|h| col_lower.contains(h));
        if looks_like_rating && max_finite > 10.0 {
            warnings.push(format!(
                "Column '{col_name}' has a maximum of {max_finite} which is unusual for a rating scale"
            ));
        }

        if infinite_count > 0 {
            warnings.push(format!(
                "Column '{col_name}' contains {infinite_count} infinite value(s)"
            ));
        }

        Ok(warnings)
    }
}
