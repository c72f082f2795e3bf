//! Missing-value imputation strategies.

mod statistical;

pub use statistical::StatisticalImputer;
