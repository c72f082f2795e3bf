//! Pipeline orchestration: duplicate removal, per-column type dispatch,
//! validation and imputation.

use crate::cleaner::{BooleanNormalizer, DateNormalizer, NumericNormalizer, UnitNormalizer};
use crate::config::CleanerConfig;
use crate::error::{CleaningError, Result};
use crate::imputers::StatisticalImputer;
use crate::profiler::ColumnTypeInferrer;
use crate::quality::SemanticValidator;
use crate::types::{CleaningReport, ReportBuilder, SemanticType};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use tracing::{debug, info};

/// End-to-end cleaning pipeline over a table.
///
/// Processing order per run: duplicate rows are removed first, then every
/// column is typed and dispatched independently, with validation before
/// imputation so warnings describe the observed data, not the filled-in data.
pub struct CleaningPipeline {
    config: CleanerConfig,
}

impl CleaningPipeline {
    /// Create a pipeline with a validated configuration.
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a table, returning the cleaned table and the run report.
    ///
    /// The input is consumed; the result is a new table. Running the pipeline
    /// on its own output is a no-op with an empty report.
    pub fn process(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let mut df = df;
        let mut report = ReportBuilder::new();

        info!(
            "Cleaning table: {} rows x {} columns",
            df.height(),
            df.width()
        );

        if self.config.remove_duplicates {
            let before = df.height();
            // Stable variant keeps first occurrences in row order, so reruns
            // see the same table.
            df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
            let removed = before - df.height();
            report.set_duplicates(removed);
            if removed > 0 {
                debug!("Removed {} duplicate rows", removed);
            }
        }

        let inferrer = ColumnTypeInferrer::new(&self.config);
        let col_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        for col_name in &col_names {
            let series = df.column(col_name)?.as_materialized_series().clone();
            let semantic = inferrer.infer(&series, col_name);
            debug!("Column '{}': inferred type '{}'", col_name, semantic);
            self.process_column(&mut df, &series, col_name, semantic, &mut report)?;
        }

        let report = report.finish();
        info!(
            "Cleaning complete: {} duplicate(s) removed, {} column(s) imputed, {} warning(s)",
            report.duplicates,
            report.imputed.len(),
            report.warnings.len()
        );
        Ok((df, report))
    }

    fn process_column(
        &self,
        df: &mut DataFrame,
        series: &Series,
        col_name: &str,
        semantic: SemanticType,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        match semantic {
            // Identifiers are keys: never normalized, never imputed.
            SemanticType::Identifier => {
                debug!("Column '{}': identifier, preserved untouched", col_name);
                Ok(())
            }
            SemanticType::ProductName => {
                report.add_warning(format!(
                    "Column '{col_name}' preserved as is (product name)"
                ));
                self.impute_textual(df, col_name, report)
            }
            SemanticType::Boolean => self.process_boolean(df, series, col_name, report),
            SemanticType::Date => self.process_date(df, series, col_name, report),
            SemanticType::Currency => self.process_currency(df, series, col_name, report),
            SemanticType::Integer | SemanticType::Floating => {
                self.process_numeric(df, series, col_name, report)
            }
            SemanticType::Location => self.impute_textual(df, col_name, report),
            SemanticType::String | SemanticType::Categorical => {
                self.process_string(df, series, col_name, report)
            }
        }
    }

    fn process_boolean(
        &self,
        df: &mut DataFrame,
        series: &Series,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        if series.dtype() == &DataType::Boolean {
            return self.impute_boolean(df, col_name, report);
        }

        let normalizer = BooleanNormalizer::new(self.config.conversion_threshold);
        if let Some(converted) = normalizer.normalize_series(series, report) {
            df.replace(col_name, converted)?;
            return self.impute_boolean(df, col_name, report);
        }

        debug!(
            "Column '{}': boolean normalization not applicable, kept as text",
            col_name
        );
        self.impute_textual(df, col_name, report)
    }

    fn process_date(
        &self,
        df: &mut DataFrame,
        series: &Series,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        let normalizer = DateNormalizer::new(self.config.conversion_threshold);
        if let Some((converted, invalid)) = normalizer.normalize_series(series, report) {
            df.replace(col_name, converted)?;
            report.record_invalid(col_name, invalid);
            // Date gaps stay missing: a fabricated date would corrupt
            // temporal data.
            return Ok(());
        }

        debug!(
            "Column '{}': date normalization not applicable, kept as text",
            col_name
        );
        self.impute_textual(df, col_name, report)
    }

    fn process_currency(
        &self,
        df: &mut DataFrame,
        series: &Series,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        let mut series = series.clone();
        if series.dtype() == &DataType::String
            && let Some(rewritten) = UnitNormalizer::rewrite_series(&series, report)
        {
            df.replace(col_name, rewritten.clone())?;
            series = rewritten;
        }
        self.process_numeric(df, &series, col_name, report)
    }

    fn process_numeric(
        &self,
        df: &mut DataFrame,
        series: &Series,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        if is_numeric_dtype(series.dtype()) {
            for warning in SemanticValidator::validate(series, col_name)? {
                report.add_warning(warning);
            }
            return self.impute_numeric(df, col_name, report);
        }

        let normalizer = NumericNormalizer::new(self.config.conversion_threshold);
        if let Some((converted, invalid)) = normalizer.normalize_series(series, false, report) {
            report.record_invalid(col_name, invalid);
            for warning in SemanticValidator::validate(&converted, col_name)? {
                report.add_warning(warning);
            }
            df.replace(col_name, converted)?;
            return self.impute_numeric(df, col_name, report);
        }

        debug!(
            "Column '{}': numeric normalization not applicable, kept as text",
            col_name
        );
        self.impute_textual(df, col_name, report)
    }

    /// Typed as plain string: try boolean, then date, then numeric
    /// normalization, in that order. First applicable conversion wins; if
    /// none applies the column stays text.
    fn process_string(
        &self,
        df: &mut DataFrame,
        series: &Series,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        if series.dtype() != &DataType::String {
            return Ok(());
        }
        let threshold = self.config.conversion_threshold;

        if let Some(converted) =
            BooleanNormalizer::new(threshold).normalize_series(series, report)
        {
            df.replace(col_name, converted)?;
            return self.impute_boolean(df, col_name, report);
        }

        if let Some((converted, invalid)) =
            DateNormalizer::new(threshold).normalize_series(series, report)
        {
            df.replace(col_name, converted)?;
            report.record_invalid(col_name, invalid);
            return Ok(());
        }

        if let Some((converted, invalid)) =
            NumericNormalizer::new(threshold).normalize_series(series, false, report)
        {
            report.record_invalid(col_name, invalid);
            for warning in SemanticValidator::validate(&converted, col_name)? {
                report.add_warning(warning);
            }
            df.replace(col_name, converted)?;
            return self.impute_numeric(df, col_name, report);
        }

        self.impute_textual(df, col_name, report)
    }

    fn impute_numeric(
        &self,
        df: &mut DataFrame,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        if !self.config.impute_missing {
            return Ok(());
        }
        StatisticalImputer::impute_numeric_median(df, col_name, report)
    }

    fn impute_textual(
        &self,
        df: &mut DataFrame,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        if !self.config.impute_missing {
            return Ok(());
        }
        if df.column(col_name)?.dtype() != &DataType::String {
            return Ok(());
        }
        StatisticalImputer::impute_string_mode(df, col_name, report)
    }

    fn impute_boolean(
        &self,
        df: &mut DataFrame,
        col_name: &str,
        report: &mut ReportBuilder,
    ) -> Result<()> {
        if !self.config.impute_missing {
            return Ok(());
        }
        StatisticalImputer::impute_bool_mode(df, col_name, report)
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        // The default configuration always validates.
        Self {
            config: CleanerConfig::default(),
        }
    }
}
