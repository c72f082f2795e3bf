//! Column profiling: semantic type inference from names and content samples.

mod product_name;
mod type_inference;

pub use product_name::looks_like_product;
pub use type_inference::ColumnTypeInferrer;
