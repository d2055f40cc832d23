//! # lazywire Core
//!
//! Lazy service registries.
//!
//! ## Components
//!
//! - [`Registry`] - Factories run on first access, results cached forever
//! - [`OrderedRegistry`] - A registry with restartable, lazy iteration
//! - [`RegistryFactory`] - Creates either variant with shared settings
//!
//! Registries hand themselves to factories, so a factory can resolve the
//! entries it depends on while it builds its own value.

pub mod factory;
pub mod registry;

pub use factory::{DefaultRegistryFactory, RegistryFactory};
pub use registry::{Entries, OrderedRegistry, Registry};

pub use lazywire_protocols::{
    Container, ErrorKind, Factory, OrderingPolicy, RegistryError, RegistrySettings, Service,
};
