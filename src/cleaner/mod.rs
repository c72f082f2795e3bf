//! Value normalizers for string columns.
//!
//! Each normalizer inspects a whole column and either returns a converted
//! series or reports "not applicable", letting the pipeline fall through to
//! the next candidate type:
//! - boolean token mapping
//! - date canonicalization
//! - numeric conversion (units, number words, embedded extraction)

mod booleans;
mod dates;
pub mod number_words;
mod numeric;
mod units;

pub use booleans::BooleanNormalizer;
pub use dates::{DATE_FORMATS, DateNormalizer};
pub use numeric::NumericNormalizer;
pub use units::{UnitNormalizer, UnitRewrite, UnitRule};

/// Render a number for log entries: whole values print without a trailing
/// ".0" so entries read like the source data.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
