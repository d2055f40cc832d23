//! # lazywire Protocols
//!
//! Shared definitions for the lazywire service registry.
//! Contains only interfaces and plain data - no registry implementations.
//!
//! ## Core Items
//!
//! - [`Container`] - Lazy container trait implemented by every registry
//! - [`Service`] / [`Factory`] - Resolved values and their constructors
//! - [`RegistryError`] - Error taxonomy surfaced to callers
//! - [`RegistrySettings`] - Tunables such as the [`OrderingPolicy`]

pub mod container;
pub mod error;
pub mod settings;

pub use container::{downcast_service, factory_fn, try_factory_fn, Container, Factory, Service};
pub use error::{ErrorKind, RegistryError};
pub use settings::{OrderingPolicy, RegistrySettings};
