//! Product-name pattern detection.
//!
//! Product-name columns are frozen once tagged: no value normalization is
//! attempted, so "iPhone 14" never degrades into the number 14.

use once_cell::sync::Lazy;
use regex::Regex;

static PRODUCT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // iPhone 14, Series 7
        Regex::new(r"\b[A-Z][a-z]+\s+\d+\b").expect("Invalid regex: word+number product"),
        // MacBook Pro, Nike Air
        Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").expect("Invalid regex: two-word product"),
        // BMW X5, PS5
        Regex::new(r"\b[A-Z]+\d+\b").expect("Invalid regex: letters+digits product"),
        // Galaxy S23 Ultra
        Regex::new(r"^[A-Z]\w*\s+[A-Za-z0-9]\w*\s+\w+$").expect("Invalid regex: model triple"),
    ]
});

// 2kg, 500ml, 1.5l
static UNIT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?\s?(?:kg|g|mg|lb|lbs|oz|ml|l|cm|mm|km|m)\b")
        .expect("Invalid regex: quantity unit token")
});

/// Check whether a sample of column values looks like product names: the
/// fraction matching any product pattern, or the fraction carrying a
/// digit+unit token, reaches `threshold`.
pub fn looks_like_product(samples: &[String], threshold: f64) -> bool {
    if samples.is_empty() {
        return false;
    }

    let total = samples.len() as f64;
    let pattern_hits = samples
        .iter()
        .filter(|s| PRODUCT_PATTERNS.iter().any(|p| p.is_match(s)))
        .count() as f64;
    if pattern_hits / total >= threshold {
        return true;
    }

    let unit_hits = samples.iter().filter(|s| UNIT_TOKEN.is_match(s)).count() as f64;
    unit_hits / total >= threshold
}
