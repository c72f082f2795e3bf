//! Boolean normalization.
//!
//! Maps known true/false token sets to booleans. Ambiguous tokens ("maybe",
//! "pending", "n/a") stay unresolved rather than guessed.

use crate::types::ReportBuilder;
use crate::utils::{is_boolean_false, is_boolean_true};
use polars::prelude::*;
use tracing::debug;

/// Normalizes a string column into booleans with gaps.
pub struct BooleanNormalizer {
    threshold: f64,
}

impl BooleanNormalizer {
    /// Create a normalizer gated at `threshold` (fraction of non-missing
    /// cells that must resolve to a boolean).
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Normalize a string column. Returns the boolean series when the
    /// resolved fraction of non-missing cells reaches the threshold; `None`
    /// when the column does not apply. Unresolved cells become missing.
    pub fn normalize_series(
        &self,
        series: &Series,
        report: &mut ReportBuilder,
    ) -> Option<Series> {
        let str_series = series.str().ok()?;
        let col_name = series.name().to_string();

        let mut result_vec: Vec<Option<bool>> = Vec::with_capacity(str_series.len());
        let mut entries: Vec<String> = Vec::new();
        let mut non_missing = 0usize;
        let mut resolved = 0usize;

        for opt_val in str_series.into_iter() {
            match opt_val {
                Some(raw) => {
                    non_missing += 1;
                    let resolved_value = if is_boolean_true(raw) {
                        Some(true)
                    } else if is_boolean_false(raw) {
                        Some(false)
                    } else {
                        None
                    };

                    if let Some(value) = resolved_value {
                        resolved += 1;
                        let lower = raw.trim().to_ascii_lowercase();
                        if lower != "true" && lower != "false" {
                            entries.push(format!("{raw} -> {value}"));
                        }
                    }
                    result_vec.push(resolved_value);
                }
                None => result_vec.push(None),
            }
        }

        if non_missing == 0 {
            return None;
        }

        let ratio = resolved as f64 / non_missing as f64;
        if ratio < self.threshold {
            debug!(
                "Column '{}': boolean resolution ratio {:.2} below threshold, not applicable",
                col_name, ratio
            );
            return None;
        }

        for entry in entries {
            report.log_transformation(&col_name, entry);
        }

        Some(Series::new(series.name().clone(), result_vec))
    }
}
