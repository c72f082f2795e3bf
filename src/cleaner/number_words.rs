//! Number-as-words parsing.
//!
//! Converts dictated numbers ("twenty five", "one thousand and fifty",
//! "four point five") into numeric values. Returns `None` for anything it
//! does not fully recognize; the caller leaves the original value untouched.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Base number words (values below one hundred).
static BASE_WORDS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ])
});

/// Scale multipliers. Reaching `thousand` or larger flushes the running
/// accumulator into the total so multiple scale groups combine correctly.
static MULTIPLIERS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("hundred", 100),
        ("thousand", 1_000),
        ("million", 1_000_000),
        ("billion", 1_000_000_000),
    ])
});

/// Linking and currency words stripped before parsing.
const FILLER_WORDS: [&str; 7] = [
    "and", "dollars", "dollar", "euros", "euro", "pounds", "pound",
];

/// Parse number-as-words text into a numeric value.
///
/// Supports compound tens+units without a linking word ("twenty five" -> 25),
/// left-to-right scale words ("one thousand two hundred" -> 1200), decimal
/// dictation ("four point five" -> 4.5) and currency-style two-group
/// dictation ("thirty nine ninety five" -> 39.95).
pub fn parse(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase().replace(['-', ','], " ");
    let tokens: Vec<&str> = lowered
        .split_whitespace()
        .filter(|t| !FILLER_WORDS.contains(t))
        .collect();

    if tokens.is_empty() {
        return None;
    }

    if let Some(point_idx) = tokens.iter().position(|&t| t == "point") {
        return parse_decimal(&tokens[..point_idx], &tokens[point_idx + 1..]);
    }

    if let Some(value) = parse_two_groups(&tokens) {
        return Some(value);
    }

    parse_integer(&tokens).map(|v| v as f64)
}

/// Parse "`words` point `digit words`" decimal dictation.
fn parse_decimal(whole: &[&str], fraction: &[&str]) -> Option<f64> {
    if whole.is_empty() || fraction.is_empty() {
        return None;
    }

    let whole_value = parse_integer(whole)?;

    // Each fraction token is one spoken digit.
    let mut digits = String::new();
    for token in fraction {
        let value = *BASE_WORDS.get(token)?;
        if value > 9 {
            return None;
        }
        digits.push(char::from_digit(value as u32, 10)?);
    }

    format!("{whole_value}.{digits}").parse::<f64>().ok()
}

/// Parse currency-style dictation of exactly four base words forming two
/// two-digit groups `AB.CD` ("thirty nine ninety five" -> 39.95).
fn parse_two_groups(tokens: &[&str]) -> Option<f64> {
    if tokens.len() != 4 {
        return None;
    }

    let values: Vec<u64> = tokens
        .iter()
        .map(|t| BASE_WORDS.get(t).copied())
        .collect::<Option<Vec<_>>>()?;

    // Each group must read as tens word + unit word.
    let is_tens = |v: u64| (20..=90).contains(&v) && v % 10 == 0;
    let is_unit = |v: u64| v >= 1 && v <= 9;
    if !(is_tens(values[0]) && is_unit(values[1]) && is_tens(values[2]) && is_unit(values[3])) {
        return None;
    }

    let cents = values[2] + values[3];
    if cents >= 100 {
        return None;
    }

    Some((values[0] + values[1]) as f64 + cents as f64 / 100.0)
}

/// Accumulate base words and scale words left to right.
fn parse_integer(tokens: &[&str]) -> Option<u64> {
    if tokens.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut current: u64 = 0;

    // Checked arithmetic: a structurally absurd run of scale words is a parse
    // failure, not a panic.
    for token in tokens {
        if let Some(&value) = BASE_WORDS.get(token) {
            current = current.checked_add(value)?;
        } else if *token == "hundred" {
            current = if current == 0 {
                100
            } else {
                current.checked_mul(100)?
            };
        } else if let Some(&multiplier) = MULTIPLIERS.get(token) {
            // thousand or larger: flush the running group into the total
            current = if current == 0 { 1 } else { current }.checked_mul(multiplier)?;
            total = total.checked_add(current)?;
            current = 0;
        } else {
            return None;
        }
    }

    total.checked_add(current)
}
