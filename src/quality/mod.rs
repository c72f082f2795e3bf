//! Data quality checks that detect but never correct.

mod semantic;

pub use semantic::SemanticValidator;
