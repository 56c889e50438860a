//! Query services over an assembled NEO population.

pub mod filters;

pub use filters::ApproachFilter;
