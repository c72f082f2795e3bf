//! Statistical imputation: median for numeric columns, mode for text and
//! boolean columns. Median is used over mean for outlier robustness.

use crate::error::Result;
use crate::types::{ImputationMethod, ReportBuilder};
use crate::utils::{bool_mode, fill_bool_nulls, fill_numeric_nulls, fill_string_nulls, string_mode};
use polars::prelude::*;
use tracing::debug;

/// Fills missing values and records what was done.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing cells of a numeric column with the column median. An
    /// all-missing column is left as-is with no report entry.
    pub fn impute_numeric_median(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(());
        }

        let Some(median) = series.median() else {
            debug!("Column '{}': all missing, median undefined, left unimputed", col_name);
            return Ok(());
        };

        let filled = fill_numeric_nulls(&series, median)?;
        df.replace(col_name, filled)?;

        for _ in 0..missing {
            report.log_transformation(col_name, format!("NaN -> {median:.2} (median)"));
        }
        report.record_imputed(col_name, ImputationMethod::Median);
        debug!("Column '{}': filled {} missing with median {:.2}", col_name, missing, median);
        Ok(())
    }

    /// Fill missing cells of a string column with the most frequent value.
    /// Skipped when no mode exists (all-missing column).
    pub fn impute_string_mode(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(());
        }

        let Some(mode) = string_mode(&series) else {
            debug!("Column '{}': all missing, mode undefined, left unimputed", col_name);
            return Ok(());
        };

        let filled = fill_string_nulls(&series, &mode)?;
        df.replace(col_name, filled)?;

        for _ in 0..missing {
            report.log_transformation(col_name, format!("NaN -> {mode} (mode)"));
        }
        report.record_imputed(col_name, ImputationMethod::Mode);
        debug!("Column '{}': filled {} missing with mode '{}'", col_name, missing, mode);
        Ok(())
    }

    /// Fill missing cells of a boolean column with the boolean mode.
    pub fn impute_bool_mode(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(());
        }

        let Some(mode) = bool_mode(&series) else {
            debug!("Column '{}': all missing, mode undefined, left unimputed", col_name);
            return Ok(());
        };

        let filled = fill_bool_nulls(&series, mode)?;
        df.replace(col_name, filled)?;

        for _ in 0..missing {
            report.log_transformation(col_name, format!("NaN -> {mode} (mode)"));
        }
        report.record_imputed(col_name, ImputationMethod::Mode);
        debug!("Column '{}': filled {} missing with mode '{}'", col_name, missing, mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_median_imputation() {
        let mut df = df!["age" => [Some(1.0), Some(3.0), None]].unwrap();
        let mut report = ReportBuilder::new();

        StatisticalImputer::impute_numeric_median(&mut df, "age", &mut report).unwrap();

        let col = df.column("age").unwrap();
        assert_eq!(col.null_count(), 0);
        assert_eq!(
            col.as_materialized_series()
                .get(2)
                .unwrap()
                .try_extract::<f64>()
                .unwrap(),
            2.0
        );

        let report = report.finish();
        assert_eq!(
            report.imputed.get("age"),
            Some(&ImputationMethod::Median)
        );
        assert_eq!(
            report.transformations.get("age").unwrap(),
            &vec!["NaN -> 2.00 (median)".to_string()]
        );
    }

    #[test]
    fn test_mode_imputation() {
        let mut df = df!["color" => [Some("red"), Some("red"), Some("blue"), None]].unwrap();
        let mut report = ReportBuilder::new();

        StatisticalImputer::impute_string_mode(&mut df, "color", &mut report).unwrap();

        assert_eq!(df.column("color").unwrap().null_count(), 0);
        let report = report.finish();
        assert_eq!(report.imputed.get("color"), Some(&ImputationMethod::Mode));
        assert_eq!(
            report.transformations.get("color").unwrap(),
            &vec!["NaN -> red (mode)".to_string()]
        );
    }

    #[test]
    fn test_bool_mode_imputation() {
        let mut df = df!["flag" => [Some(true), Some(true), Some(false), None]].unwrap();
        let mut report = ReportBuilder::new();

        StatisticalImputer::impute_bool_mode(&mut df, "flag", &mut report).unwrap();

        assert_eq!(df.column("flag").unwrap().null_count(), 0);
        let report = report.finish();
        assert_eq!(report.imputed.get("flag"), Some(&ImputationMethod::Mode));
    }

    #[test]
    fn test_all_missing_column_left_alone() {
        let mut df = df!["empty" => [Option::<&str>::None, None]].unwrap();
        let mut report = ReportBuilder::new();

        StatisticalImputer::impute_string_mode(&mut df, "empty", &mut report).unwrap();

        assert_eq!(df.column("empty").unwrap().null_count(), 2);
        assert!(report.finish().is_clean());
    }

    #[test]
    fn test_no_missing_no_entry() {
        let mut df = df!["x" => [1.0, 2.0]].unwrap();
        let mut report = ReportBuilder::new();

        StatisticalImputer::impute_numeric_median(&mut df, "x", &mut report).unwrap();

        assert!(report.finish().is_clean());
    }
}
