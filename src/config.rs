//! Configuration for the cleaning engine.
//!
//! All detection and conversion thresholds observed as magic constants in the
//! wild are exposed here rather than hard-coded, using the builder pattern
//! for ergonomic setup.

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::CleaningPipeline`] run.
///
/// Use [`CleanerConfig::builder()`] to customize behavior:
///
/// ```rust,ignore
/// use datamorph::CleanerConfig;
///
/// let config = CleanerConfig::builder()
///     .conversion_threshold(0.6)
///     .sample_size(50)
///     .remove_duplicates(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Minimum fraction of non-missing cells a normalizer must convert for
    /// the column to be promoted (inclusive bound). Shared by the numeric,
    /// date, and boolean gates. Default: 0.5
    pub conversion_threshold: f64,

    /// Fraction of sampled cells that must look boolean for content-based
    /// boolean inference (inclusive bound). Default: 0.5
    pub boolean_shape_threshold: f64,

    /// Fraction of sampled cells that must look like ISO dates for
    /// content-based date inference (strict bound). Default: 0.3
    pub date_shape_threshold: f64,

    /// Fraction of sampled cells that must match the numeric-literal shape
    /// for content-based numeric inference (strict bound). Default: 0.6
    pub numeric_shape_threshold: f64,

    /// Fraction of sampled cells that must match the currency shape for
    /// content-based currency inference (strict bound). Default: 0.2
    pub currency_shape_threshold: f64,

    /// Fraction of sampled cells that must match a product-name pattern for
    /// a column to be frozen as `product_name`. Default: 0.3
    pub product_pattern_threshold: f64,

    /// Number of leading non-missing values sampled for content probes.
    /// Default: 20
    pub sample_size: usize,

    /// Whether to remove exact duplicate rows before column processing.
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether to fill remaining missing values after normalization.
    /// Default: true
    pub impute_missing: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            conversion_threshold: 0.5,
            boolean_shape_threshold: 0.5,
            date_shape_threshold: 0.3,
            numeric_shape_threshold: 0.6,
            currency_shape_threshold: 0.2,
            product_pattern_threshold: 0.3,
            sample_size: 20,
            remove_duplicates: true,
            impute_missing: true,
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("conversion_threshold", self.conversion_threshold),
            ("boolean_shape_threshold", self.boolean_shape_threshold),
            ("date_shape_threshold", self.date_shape_threshold),
            ("numeric_shape_threshold", self.numeric_shape_threshold),
            ("currency_shape_threshold", self.currency_shape_threshold),
            ("product_pattern_threshold", self.product_pattern_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(self.sample_size));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    conversion_threshold: Option<f64>,
    boolean_shape_threshold: Option<f64>,
    date_shape_threshold: Option<f64>,
    numeric_shape_threshold: Option<f64>,
    currency_shape_threshold: Option<f64>,
    product_pattern_threshold: Option<f64>,
    sample_size: Option<usize>,
    remove_duplicates: Option<bool>,
    impute_missing: Option<bool>,
}

impl CleanerConfigBuilder {
    /// Set the conversion-ratio gate shared by all column promotions.
    pub fn conversion_threshold(mut self, threshold: f64) -> Self {
        self.conversion_threshold = Some(threshold);
        self
    }

    /// Set the boolean content-probe threshold.
    pub fn boolean_shape_threshold(mut self, threshold: f64) -> Self {
        self.boolean_shape_threshold = Some(threshold);
        self
    }

    /// Set the ISO-date content-probe threshold.
    pub fn date_shape_threshold(mut self, threshold: f64) -> Self {
        self.date_shape_threshold = Some(threshold);
        self
    }

    /// Set the numeric-literal content-probe threshold.
    pub fn numeric_shape_threshold(mut self, threshold: f64) -> Self {
        self.numeric_shape_threshold = Some(threshold);
        self
    }

    /// Set the currency content-probe threshold.
    pub fn currency_shape_threshold(mut self, threshold: f64) -> Self {
        self.currency_shape_threshold = Some(threshold);
        self
    }

    /// Set the product-name pattern threshold.
    pub fn product_pattern_threshold(mut self, threshold: f64) -> Self {
        self.product_pattern_threshold = Some(threshold);
        self
    }

    /// Set the number of values sampled for content probes.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, enabled: bool) -> Self {
        self.remove_duplicates = Some(enabled);
        self
    }

    /// Enable or disable missing value imputation.
    pub fn impute_missing(mut self, enabled: bool) -> Self {
        self.impute_missing = Some(enabled);
        self
    }

    /// Build the configuration, validating all fields.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let defaults = CleanerConfig::default();
        let config = CleanerConfig {
            conversion_threshold: self
                .conversion_threshold
                .unwrap_or(defaults.conversion_threshold),
            boolean_shape_threshold: self
                .boolean_shape_threshold
                .unwrap_or(defaults.boolean_shape_threshold),
            date_shape_threshold: self
                .date_shape_threshold
                .unwrap_or(defaults.date_shape_threshold),
            numeric_shape_threshold: self
                .numeric_shape_threshold
                .unwrap_or(defaults.numeric_shape_threshold),
            currency_shape_threshold: self
                .currency_shape_threshold
                .unwrap_or(defaults.currency_shape_threshold),
            product_pattern_threshold: self
                .product_pattern_threshold
                .unwrap_or(defaults.product_pattern_threshold),
            sample_size: self.sample_size.unwrap_or(defaults.sample_size),
            remove_duplicates: self.remove_duplicates.unwrap_or(defaults.remove_duplicates),
            impute_missing: self.impute_missing.unwrap_or(defaults.impute_missing),
        };
        config.validate()?;
        Ok(config)
    }
}
