//! Shared utilities for the cleaning engine.
//!
//! Common helpers used across multiple modules to reduce duplication and keep
//! token sets in one place.

use polars::prelude::*;

// =============================================================================
// Boolean Token Sets
// =============================================================================

/// Tokens mapped to boolean true ("2" shows up in exports that encode
/// booleans as 1/2).
pub const BOOLEAN_TRUE_VALUES: [&str; 9] =
    ["true", "yes", "1", "t", "y", "active", "enabled", "on", "2"];

/// Tokens mapped to boolean false.
pub const BOOLEAN_FALSE_VALUES: [&str; 8] =
    ["false", "no", "0", "f", "n", "inactive", "disabled", "off"];

/// Tokens left unresolved rather than guessed: mapping these to a boolean
/// would silently fabricate data.
pub const BOOLEAN_AMBIGUOUS_VALUES: [&str; 6] =
    ["maybe", "perhaps", "pending", "unknown", "na", "n/a"];

/// Check if a string represents a boolean true value.
pub fn is_boolean_true(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    BOOLEAN_TRUE_VALUES.iter().any(|&v| v == lower)
}

/// Check if a string represents a boolean false value.
pub fn is_boolean_false(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    BOOLEAN_FALSE_VALUES.iter().any(|&v| v == lower)
}

/// Check if a string is a recognized-but-unresolvable boolean token.
pub fn is_boolean_ambiguous(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    BOOLEAN_AMBIGUOUS_VALUES.iter().any(|&v| v == lower)
}

/// Check if a string resolves to either boolean value.
pub fn is_boolean_string(s: &str) -> bool {
    is_boolean_true(s) || is_boolean_false(s)
}

/// Check if a string counts as boolean evidence for type inference. Excludes
/// "2": it maps to true during normalization, but as evidence it would drag
/// plain integer columns into the boolean type.
pub fn is_boolean_probe_token(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower != "2" && is_boolean_string(&lower)
}

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a float carries no fractional part.
#[inline]
pub fn is_whole_number(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

// =============================================================================
// Cell and Sample Utilities
// =============================================================================

/// Render a cell as plain text, `None` for missing. String cells are returned
/// verbatim (the `AnyValue` Display form wraps them in quotes).
pub fn any_value_to_string(val: &AnyValue<'_>) -> Option<String> {
    match val {
        AnyValue::Null => None,
        AnyValue::String(s) => Some((*s).to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(format!("{other}")),
    }
}

/// Collect up to `max_samples` leading non-missing values as plain text.
pub fn collect_sample_values(series: &Series, max_samples: usize) -> Vec<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Vec::new();
    }

    let sample_size = std::cmp::min(max_samples, non_null.len());
    let mut samples = Vec::with_capacity(sample_size);

    for i in 0..sample_size {
        if let Ok(val) = non_null.get(i)
            && let Some(text) = any_value_to_string(&val)
        {
            samples.push(text);
        }
    }

    samples
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Calculate the mode (most frequent value) of a string Series. Ties are
/// broken by first occurrence so the result is deterministic.
pub fn string_mode(series: &Series) -> Option<String> {
    let str_series = series.str().ok()?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for val in str_series.into_iter().flatten() {
        match counts.iter_mut().find(|(v, _)| v == val) {
            Some((_, count)) => *count += 1,
            None => counts.push((val.to_string(), 1)),
        }
    }

    // Strict comparison keeps the earliest value on a tie; counts is in
    // first-occurrence order.
    let mut best: Option<(String, usize)> = None;
    for (val, count) in counts {
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((val, count));
        }
    }
    best.map(|(val, _)| val)
}

/// Calculate the mode of a boolean Series.
pub fn bool_mode(series: &Series) -> Option<bool> {
    let bool_series = series.bool().ok()?;

    let mut true_count = 0usize;
    let mut false_count = 0usize;
    for val in bool_series.into_iter().flatten() {
        if val {
            true_count += 1;
        } else {
            false_count += 1;
        }
    }

    if true_count == 0 && false_count == 0 {
        return None;
    }
    Some(true_count >= false_count)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let f64_series = float_series.f64()?;

    let result_vec: Vec<Option<f64>> = f64_series
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value)))
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = series.str()?;

    let result_vec: Vec<Option<String>> = str_series
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value).to_string()))
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a boolean Series with a specific value.
pub fn fill_bool_nulls(series: &Series, fill_value: bool) -> PolarsResult<Series> {
    let bool_series = series.bool()?;

    let result_vec: Vec<Option<bool>> = bool_series
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value)))
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

// =============================================================================
// Tests
// =============================================================================
