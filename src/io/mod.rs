//! File-level input and output for the NEO population.

pub mod loaders;
pub mod writers;


pub use loaders::{load_database, ApproachLoader, NeoLoader};
