//! Numeric normalization through a per-cell conversion cascade.
//!
//! Each unresolved cell runs through: direct parse, unit/currency rewriting,
//! number words, embedded-numeric extraction, and infinity tokens. Never
//! applied to identifier-like columns: numeric-looking codes must not be
//! cleaned into floats.

use super::format_number;
use super::number_words;
use super::units::UnitNormalizer;
use crate::types::ReportBuilder;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

// "95ABC.50" -> 95.50: digits, a non-numeric run, then a decimal suffix
static EMBEDDED_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)[^\d.]+\.(\d+)$").expect("Invalid regex: embedded decimal")
});

static EMBEDDED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("Invalid regex: embedded number"));

/// A successful cell conversion with an optional stage tag for the log.
struct Conversion {
    value: f64,
    tag: Option<String>,
}

/// Normalizes a string column into `Float64` values.
pub struct NumericNormalizer {
    threshold: f64,
}

impl NumericNormalizer {
    /// Create a normalizer gated at `threshold` (fraction of non-missing
    /// cells that must convert).
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Normalize a string column. Returns `(numeric series, invalid count)`
    /// when enough cells convert; `None` when the column does not apply.
    /// Cells that never convert become missing and count as invalid.
    pub fn normalize_series(
        &self,
        series: &Series,
        likely_identifier: bool,
        report: &mut ReportBuilder,
    ) -> Option<(Series, usize)> {
        if likely_identifier {
            debug!(
                "Column '{}': identifier-like, numeric normalization skipped",
                series.name()
            );
            return None;
        }

        let str_series = series.str().ok()?;
        let col_name = series.name().to_string();

        let mut result_vec: Vec<Option<f64>> = Vec::with_capacity(str_series.len());
        let mut entries: Vec<String> = Vec::new();
        let mut non_missing = 0usize;
        let mut converted = 0usize;

        for opt_val in str_series.into_iter() {
            match opt_val {
                Some(raw) => {
                    non_missing += 1;
                    match convert_cell(raw) {
                        Some(conversion) => {
                            converted += 1;
                            if let Some(tag) = conversion.tag {
                                let after = format_number(conversion.value);
                                if after != raw.trim() {
                                    entries.push(format!("{raw} -> {after} ({tag})"));
                                }
                            }
                            result_vec.push(Some(conversion.value));
                        }
                        None => result_vec.push(None),
                    }
                }
                None => result_vec.push(None),
            }
        }

        if non_missing == 0 {
            return None;
        }

        let ratio = converted as f64 / non_missing as f64;
        if ratio < self.threshold {
            debug!(
                "Column '{}': numeric conversion ratio {:.2} below threshold, not applicable",
                col_name, ratio
            );
            return None;
        }

        for entry in entries {
            report.log_transformation(&col_name, entry);
        }

        let invalid_count = non_missing - converted;
        Some((
            Series::new(series.name().clone(), result_vec),
            invalid_count,
        ))
    }
}

/// Run one cell through the conversion cascade.
fn convert_cell(raw: &str) -> Option<Conversion> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // (1) direct numeric literal; "inf"/"nan" literals are handled separately
    // so they do not slip through the stdlib float parser
    if let Ok(value) = trimmed.parse::<f64>()
        && value.is_finite()
    {
        return Some(Conversion { value, tag: None });
    }

    // (2) unit/currency/separator rewriting
    if let Some(rewrite) = UnitNormalizer::rewrite(trimmed) {
        return Some(Conversion {
            value: rewrite.value,
            tag: Some(rewrite.rule.log_tag()),
        });
    }

    // (3) number words
    if let Some(value) = number_words::parse(trimmed) {
        return Some(Conversion {
            value,
            tag: Some("number words".to_string()),
        });
    }

    // (4) infinity tokens
    let lower = trimmed.to_ascii_lowercase();
    if lower == "inf" || lower == "infinity" {
        return Some(Conversion {
            value: f64::INFINITY,
            tag: Some("infinity".to_string()),
        });
    }

    // (5) embedded extraction, skipping date-looking values
    if !trimmed.contains('/') && !trimmed.contains('-') {
        if let Some(caps) = EMBEDDED_DECIMAL.captures(trimmed) {
            let joined = format!("{}.{}", &caps[1], &caps[2]);
            if let Ok(value) = joined.parse::<f64>() {
                return Some(Conversion {
                    value,
                    tag: Some("numeric extraction".to_string()),
                });
            }
        }

        if let Some(m) = EMBEDDED_NUMBER.find(trimmed) {
            if let Ok(value) = m.as_str().parse::<f64>() {
                return Some(Conversion {
                    value,
                    tag: Some("numeric extraction".to_string()),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalize(values: &[&str]) -> Option<(Vec<Option<f64>>, usize)> {
        let series = Series::new("amount".into(), values);
        let mut report = ReportBuilder::new();
        let (out, invalid) =
            NumericNormalizer::new(0.5).normalize_series(&series, false, &mut report)?;
        Some((out.f64().unwrap().into_iter().collect(), invalid))
    }

    #[test]
    fn test_direct_parse() {
        let (out, invalid) = normalize(&["1", "2.5", "-3"]).unwrap();
        assert_eq!(out, vec![Some(1.0), Some(2.5), Some(-3.0)]);
        assert_eq!(invalid, 0);
    }

    #[test]
    fn test_cascade_stages() {
        let (out, invalid) = normalize(&["1", "twenty-eight", "8000foo0", "$5", "10k"]).unwrap();
        assert_eq!(
            out,
            vec![
                Some(1.0),
                Some(28.0),
                Some(8000.0),
                Some(5.0),
                Some(10_000.0),
            ]
        );
        assert_eq!(invalid, 0);
    }

    #[test]
    fn test_embedded_decimal_extraction() {
        let (out, _) = normalize(&["95ABC.50", "1"]).unwrap();
        assert_eq!(out[0], Some(95.50));
    }

    #[test]
    fn test_date_looking_values_not_extracted() {
        // Slash and dash values are skipped by embedded extraction.
        let series = Series::new("amount".into(), &["2020/01/01", "2020-01-01", "03/04/2021"]);
        let mut report = ReportBuilder::new();
        assert!(
            NumericNormalizer::new(0.5)
                .normalize_series(&series, false, &mut report)
                .is_none()
        );
    }

    #[test]
    fn test_infinity_tokens() {
        let (out, _) = normalize(&["inf", "Infinity", "1"]).unwrap();
        assert_eq!(out[0], Some(f64::INFINITY));
        assert_eq!(out[1], Some(f64::INFINITY));
    }

    #[test]
    fn test_nan_literal_not_converted() {
        let (out, invalid) = normalize(&["nan", "1", "2"]).unwrap();
        assert_eq!(out[0], None);
        assert_eq!(invalid, 1);
    }

    #[test]
    fn test_invalid_count_and_gaps() {
        let (out, invalid) = normalize(&["1", "2", "junk", "more junk"]).unwrap();
        assert_eq!(out, vec![Some(1.0), Some(2.0), None, None]);
        assert_eq!(invalid, 2);
    }

    #[test]
    fn test_identifier_columns_never_normalized() {
        let series = Series::new("user_id".into(), &["001", "002", "003"]);
        let mut report = ReportBuilder::new();
        assert!(
            NumericNormalizer::new(0.5)
                .normalize_series(&series, true, &mut report)
                .is_none()
        );
    }

    #[test]
    fn test_threshold_gate_strictly_below_rejected() {
        // 1 of 3 converts: below the 0.5 gate.
        let series = Series::new("amount".into(), &["1", "junk", "garbage"]);
        let mut report = ReportBuilder::new();
        assert!(
            NumericNormalizer::new(0.5)
                .normalize_series(&series, false, &mut report)
                .is_none()
        );
    }

    #[test]
    fn test_log_entries_with_stage_tags() {
        let series = Series::new("amount".into(), &["10k", "twenty five", "8000foo0", "1"]);
        let mut report = ReportBuilder::new();
        NumericNormalizer::new(0.5)
            .normalize_series(&series, false, &mut report)
            .unwrap();
        let report = report.finish();
        let log = report.transformations.get("amount").unwrap();
        assert_eq!(
            log,
            &vec![
                "10k -> 10000 (unit conversion k)".to_string(),
                "twenty five -> 25 (number words)".to_string(),
                "8000foo0 -> 8000 (numeric extraction)".to_string(),
            ]
        );
    }
}
