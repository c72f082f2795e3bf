//! End-to-end tests for the cleaning pipeline.
//!
//! These tests drive `CleaningPipeline` over small in-memory tables and check
//! the cleaned output together with the report it produces.

use datamorph::{CleaningPipeline, CleaningReport};
use polars::prelude::*;
use pretty_assertions::assert_eq;

// ============================================================================
// Helper Functions
// ============================================================================

fn clean(df: DataFrame) -> (DataFrame, CleaningReport) {
    CleaningPipeline::default()
        .process(df)
        .expect("pipeline should complete")
}

fn str_values(df: &DataFrame, col: &str) -> Vec<Option<String>> {
    df.column(col)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

fn f64_values(df: &DataFrame, col: &str) -> Vec<Option<f64>> {
    df.column(col)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

fn log_for<'a>(report: &'a CleaningReport, col: &str) -> &'a [String] {
    report
        .transformations
        .get(col)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// ============================================================================
// Duplicate Removal
// ============================================================================

#[test]
fn test_exact_duplicate_rows_removed_once() {
    let df = df![
        "city" => ["Paris", "Lyon", "Paris", "Nice"],
        "country" => ["FR", "FR", "FR", "FR"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(cleaned.height(), 3);
    assert_eq!(report.duplicates, 1);
    // First occurrence kept, row order preserved.
    assert_eq!(
        str_values(&cleaned, "city"),
        vec![
            Some("Paris".to_string()),
            Some("Lyon".to_string()),
            Some("Nice".to_string())
        ]
    );
}

// ============================================================================
// Numeric Normalization and the Conversion Gate
// ============================================================================

#[test]
fn test_numeric_cascade_converts_messy_column() {
    let df = df![
        "quantity" => ["1", "twenty-eight", "8000foo0"],
        "tag" => ["a", "b", "c"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(
        f64_values(&cleaned, "quantity"),
        vec![Some(1.0), Some(28.0), Some(8000.0)]
    );
    let log = log_for(&report, "quantity");
    assert!(log.iter().any(|e| e == "twenty-eight -> 28 (number words)"));
    assert!(log.iter().any(|e| e == "8000foo0 -> 8000 (numeric extraction)"));
}

#[test]
fn test_conversion_gate_keeps_mostly_text_column() {
    let df = df![
        "notes" => ["mostly text", "plain words", "7"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    // One convertible cell out of three is below the gate; the column passes
    // through as text with nothing logged.
    assert_eq!(cleaned.column("notes").unwrap().dtype(), &DataType::String);
    assert!(log_for(&report, "notes").is_empty());
    assert!(!report.invalid.contains_key("notes"));
}

#[test]
fn test_currency_column_fully_rewritten() {
    let df = df![
        "price" => ["$999", "10k", "1,299", "twenty dollars"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(
        f64_values(&cleaned, "price"),
        vec![Some(999.0), Some(10000.0), Some(1299.0), Some(20.0)]
    );
    let log = log_for(&report, "price");
    assert!(log.iter().any(|e| e == "$999 -> 999 (currency symbol)"));
    assert!(log.iter().any(|e| e == "10k -> 10000 (unit conversion k)"));
    assert!(log.iter().any(|e| e == "1,299 -> 1299 (thousands separator)"));
    assert!(log.iter().any(|e| e == "twenty dollars -> 20 (number words)"));
}

// ============================================================================
// Date Canonicalization
// ============================================================================

#[test]
fn test_dates_canonicalized_to_iso() {
    let df = df![
        "order_date" => ["2023-02-20", "20/02/2023", "February 20 2023", "20th Feb 2023"],
        "tag" => ["a", "b", "c", "d"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(
        str_values(&cleaned, "order_date"),
        vec![Some("2023-02-20".to_string()); 4]
    );
    let log = log_for(&report, "order_date");
    // Already-canonical cells produce no entry.
    assert!(!log.iter().any(|e| e.starts_with("2023-02-20 ->")));
    assert!(log.iter().any(|e| e == "20/02/2023 -> 2023-02-20"));
    assert!(log.iter().any(|e| e == "February 20 2023 -> 2023-02-20"));
}

#[test]
fn test_ambiguous_slash_dates_read_day_first() {
    let df = df![
        "created" => ["2020-01-02", "03/04/2021", "05/06/2022", "2020/07/08"],
    ]
    .unwrap();

    let (cleaned, _) = clean(df);

    assert_eq!(
        str_values(&cleaned, "created"),
        vec![
            Some("2020-01-02".to_string()),
            Some("2021-04-03".to_string()),
            Some("2022-06-05".to_string()),
            Some("2020-07-08".to_string()),
        ]
    );
}

#[test]
fn test_forced_invalid_date_flagged_not_dropped() {
    let df = df![
        "ship_date" => ["2023-01-01", "2023-01-02", "2023-01-03", "invalid_date"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    // The cell keeps its original text and is counted invalid.
    assert_eq!(
        str_values(&cleaned, "ship_date")[3],
        Some("invalid_date".to_string())
    );
    assert_eq!(report.invalid.get("ship_date"), Some(&1));
    assert!(
        log_for(&report, "ship_date")
            .iter()
            .any(|e| e == "invalid_date -> INVALID")
    );
}

// ============================================================================
// Boolean Normalization
// ============================================================================

#[test]
fn test_boolean_tokens_mapped_and_gap_filled() {
    let df = df![
        "active" => [Some("yes"), Some("no"), Some("1"), None],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    let col = cleaned.column("active").unwrap();
    assert_eq!(col.dtype(), &DataType::Boolean);
    assert_eq!(col.null_count(), 0);

    let log = log_for(&report, "active");
    assert!(log.iter().any(|e| e == "yes -> true"));
    assert!(log.iter().any(|e| e == "no -> false"));
    assert!(log.iter().any(|e| e == "1 -> true"));
    // Two true vs one false: the gap fills with the mode.
    assert!(log.iter().any(|e| e == "NaN -> true (mode)"));
}

#[test]
fn test_integer_text_column_converts_to_numbers_not_booleans() {
    let df = df![
        "measurement" => ["1", "2", "3", "4"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    // "1" and "2" are boolean tokens in isolation, but the column is numeric
    // and must come out as numbers with nothing rewritten.
    assert_ne!(
        cleaned.column("measurement").unwrap().dtype(),
        &DataType::Boolean
    );
    assert_eq!(
        f64_values(&cleaned, "measurement"),
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
    );
    assert!(log_for(&report, "measurement").is_empty());
    assert!(report.imputed.is_empty());
}

// ============================================================================
// Imputation
// ============================================================================

#[test]
fn test_median_imputation_after_dedup() {
    let df = df![
        "age" => [Some(1.0), Some(1.0), None],
        "tag" => ["a", "a", "b"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    // [1, 1, missing] dedups to [1, missing]; the gap fills with median 1.
    assert_eq!(report.duplicates, 1);
    assert_eq!(f64_values(&cleaned, "age"), vec![Some(1.0), Some(1.0)]);
    assert_eq!(
        log_for(&report, "age"),
        &["NaN -> 1.00 (median)".to_string()]
    );
}

#[test]
fn test_mode_imputation_for_text_column() {
    let df = df![
        "city" => [Some("Paris"), Some("Paris"), Some("Lyon"), None],
        "tag" => ["a", "b", "c", "d"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(
        str_values(&cleaned, "city")[3],
        Some("Paris".to_string())
    );
    assert!(
        log_for(&report, "city")
            .iter()
            .any(|e| e == "NaN -> Paris (mode)")
    );
}

// ============================================================================
// Frozen Columns
// ============================================================================

#[test]
fn test_product_name_column_frozen_with_warning() {
    let df = df![
        "product_name" => ["iPhone 14 Pro", "Galaxy S23", "MacBook Air"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(
        str_values(&cleaned, "product_name"),
        vec![
            Some("iPhone 14 Pro".to_string()),
            Some("Galaxy S23".to_string()),
            Some("MacBook Air".to_string())
        ]
    );
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w == "Column 'product_name' preserved as is (product name)")
    );
}

#[test]
fn test_identifier_column_never_imputed() {
    let df = df![
        "user_id" => [Some("u-1"), Some("u-2"), None],
        "tag" => ["a", "b", "c"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    assert_eq!(cleaned.column("user_id").unwrap().null_count(), 1);
    assert!(!report.imputed.contains_key("user_id"));
    assert!(log_for(&report, "user_id").is_empty());
}

// ============================================================================
// Semantic Validation
// ============================================================================

#[test]
fn test_negative_stock_warning() {
    let df = df![
        "stock" => ["10", "-5", "3"],
    ]
    .unwrap();

    let (cleaned, report) = clean(df);

    // Values converted but preserved, including the negative.
    assert_eq!(
        f64_values(&cleaned, "stock"),
        vec![Some(10.0), Some(-5.0), Some(3.0)]
    );
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("stock") && w.contains("negative"))
    );
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_cleaning_twice_is_a_no_op() {
    let df = df![
        "order_date" => ["20/02/2023", "2023-03-01", "March 5 2023"],
        "amount" => ["$10", "20", "1,500"],
        "active" => ["yes", "no", "yes"],
    ]
    .unwrap();

    let (once, first_report) = clean(df);
    assert!(!first_report.is_clean());

    let (twice, second_report) = clean(once.clone());
    assert!(second_report.is_clean(), "{second_report:?}");
    assert!(once.equals(&twice));
}

// ============================================================================
// Report Output
// ============================================================================

#[test]
fn test_report_serializes_to_json() {
    let df = df![
        "price" => ["$10", "$20", "$20", "$20"],
    ]
    .unwrap();

    let (_, report) = clean(df);
    let json = report.to_json().unwrap();

    assert!(json.contains("\"duplicates\""));
    assert!(json.contains("\"transformations\""));
    assert!(json.contains("currency symbol"));
}
