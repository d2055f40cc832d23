//! Error types for the lazywire protocol layer.

mod registry;

pub use registry::*;
