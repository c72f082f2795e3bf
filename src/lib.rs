//! Tabular Data Cleaning Engine
//!
//! A type-inference and normalization library for messy tabular data, built
//! on Polars.
//!
//! # Overview
//!
//! This library turns inconsistently formatted tables into normalized ones
//! and reports every change it made:
//!
//! - **Type Profiling**: Per-column semantic type inference from column names
//!   and content samples (identifiers, dates, currency, booleans, products)
//! - **Value Normalization**: Boolean token mapping, date canonicalization to
//!   `YYYY-MM-DD`, unit/currency rewriting ("10k", "$50.99", "twenty-eight")
//! - **Quality Validation**: Name-aware plausibility warnings (negative stock,
//!   out-of-scale ratings, infinite values) without mutating the data
//! - **Imputation**: Median fill for numeric gaps, mode fill for text and
//!   boolean gaps
//! - **Reporting**: An append-only, per-column transformation log so every
//!   cleaned cell can be traced back to its original value
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datamorph::{CleanerConfig, CleaningPipeline};
//! use polars::prelude::*;
//!
//! let df = df![
//!     "product_name" => ["iPhone 14", "AirPods Pro"],
//!     "price" => ["$999", "249 dollars"],
//!     "in_stock" => ["yes", "no"],
//! ]?;
//!
//! let config = CleanerConfig::builder()
//!     .conversion_threshold(0.5)
//!     .build()?;
//!
//! let (cleaned, report) = CleaningPipeline::new(config)?.process(df)?;
//! println!("{}", report.to_json()?);
//! ```
//!
//! Columns the pipeline cannot confidently convert pass through unchanged;
//! per-cell failures are flagged in the report, never dropped.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod profiler;
pub mod quality;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{BooleanNormalizer, DateNormalizer, NumericNormalizer, UnitNormalizer};
pub use config::{CleanerConfig, CleanerConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::CleaningPipeline;
pub use profiler::ColumnTypeInferrer;
pub use quality::SemanticValidator;
pub use types::{CleaningReport, ImputationMethod, ReportBuilder, SemanticType};
pub use utils::{fill_numeric_nulls, fill_string_nulls, is_boolean_string, is_numeric_dtype};
