//! Lazy registries.

mod lazy;
mod ordered;
mod store;

pub use lazy::Registry;
pub use ordered::{Entries, OrderedRegistry};
