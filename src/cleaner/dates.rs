//! Date normalization to canonical `YYYY-MM-DD` text.
//!
//! Parses a fixed, ordered list of formats plus relative-day keywords and
//! ordinal/textual dates. Calendar validity is enforced by chrono, so a
//! regex-matched but impossible date (e.g. "31/02/2021") stays unparsed.

use crate::types::ReportBuilder;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

/// Fixed format priority list. For ambiguous slash dates the day/month/year
/// interpretation wins because it comes first.
pub const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%B %d %Y",
    "%d %B %Y",
];

// "20th Feb 2023", "1st January 2022"
static ORDINAL_TEXTUAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]+),?\s+(\d{4})$")
        .expect("Invalid regex: ordinal textual date")
});

// "February 20 2023", "Feb 20, 2023"
static MONTH_FIRST_TEXTUAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$")
        .expect("Invalid regex: month-first textual date")
});

/// Outcome for a single cell.
enum CellOutcome {
    Parsed(NaiveDate),
    /// Matched the forced-invalid rule; logged as `-> INVALID`.
    ForcedInvalid,
    Unparsed,
}

/// Normalizes a string column into canonical ISO date text.
pub struct DateNormalizer {
    threshold: f64,
    reference_date: NaiveDate,
}

impl DateNormalizer {
    /// Create a normalizer gated at `threshold` (fraction of non-missing
    /// cells that must parse). Relative-day keywords resolve against the
    /// current local date.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            reference_date: Local::now().date_naive(),
        }
    }

    /// Resolve "yesterday"/"today"/"tomorrow" against a fixed date instead of
    /// the wall clock.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Normalize a string column. Returns `(canonical series, invalid count)`
    /// when the parsed fraction of non-missing cells reaches the threshold;
    /// `None` when the column does not apply and must pass through unchanged.
    ///
    /// Unparseable non-missing cells keep their original text and are counted
    /// invalid; they are flagged, never dropped.
    pub fn normalize_series(
        &self,
        series: &Series,
        report: &mut ReportBuilder,
    ) -> Option<(Series, usize)> {
        let str_series = series.str().ok()?;
        let col_name = series.name().to_string();

        let mut result_vec: Vec<Option<String>> = Vec::with_capacity(str_series.len());
        let mut entries: Vec<String> = Vec::new();
        let mut non_missing = 0usize;
        let mut parsed_count = 0usize;
        let mut invalid_count = 0usize;

        for opt_val in str_series.into_iter() {
            match opt_val {
                Some(raw) => {
                    non_missing += 1;
                    match self.parse_cell(raw) {
                        CellOutcome::Parsed(date) => {
                            parsed_count += 1;
                            let canonical = date.format("%Y-%m-%d").to_string();
                            if canonical != raw.trim() {
                                entries.push(format!("{raw} -> {canonical}"));
                            }
                            result_vec.push(Some(canonical));
                        }
                        CellOutcome::ForcedInvalid => {
                            invalid_count += 1;
                            entries.push(format!("{raw} -> INVALID"));
                            result_vec.push(Some(raw.to_string()));
                        }
                        CellOutcome::Unparsed => {
                            invalid_count += 1;
                            result_vec.push(Some(raw.to_string()));
                        }
                    }
                }
                None => result_vec.push(None),
            }
        }

        if non_missing == 0 {
            return None;
        }

        let ratio = parsed_count as f64 / non_missing as f64;
        if ratio < self.threshold {
            debug!(
                "Column '{}': date parse ratio {:.2} below threshold, not applicable",
                col_name, ratio
            );
            return None;
        }

        for entry in entries {
            report.log_transformation(&col_name, entry);
        }

        Some((
            Series::new(series.name().clone(), result_vec),
            invalid_count,
        ))
    }

    fn parse_cell(&self, raw: &str) -> CellOutcome {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        // The forced-invalid rule wins over every pattern match.
        if lower.contains("invalid") {
            return CellOutcome::ForcedInvalid;
        }

        // (1) relative-day keywords
        match lower.as_str() {
            "yesterday" => {
                return self
                    .reference_date
                    .pred_opt()
                    .map_or(CellOutcome::Unparsed, CellOutcome::Parsed);
            }
            "today" => return CellOutcome::Parsed(self.reference_date),
            "tomorrow" => {
                return self
                    .reference_date
                    .succ_opt()
                    .map_or(CellOutcome::Unparsed, CellOutcome::Parsed);
            }
            _ => {}
        }

        // (2) ordinal and textual dates
        if let Some(date) = parse_textual(trimmed) {
            return CellOutcome::Parsed(date);
        }

        // (3) fixed format list; first format that parses wins
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return CellOutcome::Parsed(date);
            }
        }

        CellOutcome::Unparsed
    }
}

/// Parse "20th Feb 2023" / "1st January 2022" / "February 20 2023" forms,
/// rejecting impossible composed dates.
fn parse_textual(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = ORDINAL_TEXTUAL.captures(s) {
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month = month_from_name(caps.get(2)?.as_str())?;
        let year: i32 = caps.get(3)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = MONTH_FIRST_TEXTUAL.captures(s) {
        let month = month_from_name(caps.get(1)?.as_str())?;
        let day: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year: i32 = caps.get(3)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Map a full or three-letter month name to its number.
fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match lower.as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}
