//! Cleaning pipeline assembly and execution.

mod executor;

pub use executor::CleaningPipeline;
