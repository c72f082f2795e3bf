//! Unit, currency and thousands-separator rewriting.
//!
//! Rewrites suffixed/currency/separator-formatted numeric strings ("10k",
//! "$50.99", "100,000", "5 units") into plain numbers. Rules are checked in a
//! fixed order per cell.

use super::format_number;
use crate::types::ReportBuilder;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

static SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)\s*([kKmMbB])$").expect("Invalid regex: unit suffix")
});

static CURRENCY_LEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[$€£]\s*(-?\d+(?:\.\d+)?)$").expect("Invalid regex: leading currency")
});

static CURRENCY_TRAILING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)\s*[$€£]$").expect("Invalid regex: trailing currency")
});

static UNIT_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(-?\d+(?:\.\d+)?)\s*units?$").expect("Invalid regex: unit word")
});

/// Which rewrite rule matched, for stage-specific log suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRule {
    /// k/m/b magnitude suffix; carries the lowercased suffix letter.
    Suffix(char),
    /// Leading or trailing currency symbol stripped.
    CurrencySymbol,
    /// Thousands-separator commas removed.
    ThousandsSeparator,
    /// Trailing "unit(s)" word removed.
    UnitWord,
}

impl UnitRule {
    /// Tag appended to transformation log entries.
    pub fn log_tag(&self) -> String {
        match self {
            UnitRule::Suffix(c) => format!("unit conversion {c}"),
            UnitRule::CurrencySymbol => "currency symbol".to_string(),
            UnitRule::ThousandsSeparator => "thousands separator".to_string(),
            UnitRule::UnitWord => "unit suffix".to_string(),
        }
    }
}

/// Result of rewriting a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRewrite {
    pub value: f64,
    pub rule: UnitRule,
}

/// Rewrites formatted numeric strings into plain numbers.
pub struct UnitNormalizer;

impl UnitNormalizer {
    /// Rewrite a single cell, or `None` when no rule applies.
    pub fn rewrite(raw: &str) -> Option<UnitRewrite> {
        let trimmed = raw.trim();

        // (a) magnitude suffix
        if let Some(caps) = SUFFIX_PATTERN.captures(trimmed) {
            let base: f64 = caps.get(1)?.as_str().parse().ok()?;
            let suffix = caps
                .get(2)?
                .as_str()
                .chars()
                .next()?
                .to_ascii_lowercase();
            let multiplier = match suffix {
                'k' => 1e3,
                'm' => 1e6,
                'b' => 1e9,
                _ => return None,
            };
            return Some(UnitRewrite {
                value: base * multiplier,
                rule: UnitRule::Suffix(suffix),
            });
        }

        // (b) currency symbol
        if let Some(caps) = CURRENCY_LEADING
            .captures(trimmed)
            .or_else(|| CURRENCY_TRAILING.captures(trimmed))
        {
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            return Some(UnitRewrite {
                value,
                rule: UnitRule::CurrencySymbol,
            });
        }

        // (c) thousands separator: a comma not at the end of the value
        if trimmed.contains(',') && !trimmed.ends_with(',') {
            let stripped = trimmed.replace(',', "");
            if let Ok(value) = stripped.parse::<f64>() {
                return Some(UnitRewrite {
                    value,
                    rule: UnitRule::ThousandsSeparator,
                });
            }
        }

        // (d) trailing "unit(s)" word
        if let Some(caps) = UNIT_WORD.captures(trimmed) {
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            return Some(UnitRewrite {
                value,
                rule: UnitRule::UnitWord,
            });
        }

        None
    }

    /// Rewrite a whole string column. Returns the rewritten series only when
    /// at least one cell changed; otherwise the column does not apply and
    /// passes through unmodified.
    pub fn rewrite_series(series: &Series, report: &mut ReportBuilder) -> Option<Series> {
        let str_series = series.str().ok()?;
        let col_name = series.name().to_string();

        let mut result_vec: Vec<Option<String>> = Vec::with_capacity(str_series.len());
        let mut entries: Vec<String> = Vec::new();

        for opt_val in str_series.into_iter() {
            match opt_val {
                Some(raw) => match Self::rewrite(raw) {
                    Some(rewrite) => {
                        let after = format_number(rewrite.value);
                        entries.push(format!("{raw} -> {after} ({})", rewrite.rule.log_tag()));
                        result_vec.push(Some(after));
                    }
                    None => result_vec.push(Some(raw.to_string())),
                },
                None => result_vec.push(None),
            }
        }

        if entries.is_empty() {
            return None;
        }

        for entry in entries {
            report.log_transformation(&col_name, entry);
        }

        Some(Series::new(series.name().clone(), result_vec))
    }
}
