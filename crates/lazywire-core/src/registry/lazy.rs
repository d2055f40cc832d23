//! Lazy registry: factories run on first access, results are cached forever.

use std::any::Any;
use std::sync::Arc;

use lazywire_protocols::{
    downcast_service, factory_fn, try_factory_fn, Container, Factory, RegistryError,
    RegistrySettings, Service,
};

use super::store::Store;

/// Registry of lazily constructed services.
///
/// Entries are added once and never replaced or removed. Each factory runs at
/// most once on success; its value is cached and shared by every later
/// `resolve` of the same id.
///
/// ```
/// use lazywire_core::Registry;
///
/// let registry = Registry::new();
/// registry.register("greeting", |_| "hello".to_string()).unwrap();
///
/// let greeting = registry.resolve_as::<String>("greeting").unwrap();
/// assert_eq!(greeting.as_str(), "hello");
/// ```
pub struct Registry {
    pub(crate) store: Store,
}

impl Registry {
    /// Create a new empty registry with default settings.
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }

    /// Create a new empty registry.
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            store: Store::new(settings),
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        self.store.settings()
    }

    /// Register an infallible factory under `id`.
    ///
    /// The factory is not called here.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidParameter`] if `id` is empty or already
    /// registered.
    pub fn register<T, F>(&self, id: &str, factory: F) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Container) -> T + Send + Sync + 'static,
    {
        self.store.register(id, factory_fn(factory))
    }

    /// Register a factory that may fail.
    ///
    /// A failed factory leaves the entry pending, so a later resolve retries it.
    pub fn try_register<T, F>(&self, id: &str, factory: F) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Container) -> Result<T, RegistryError> + Send + Sync + 'static,
    {
        self.store.register(id, try_factory_fn(factory))
    }

    /// Check if `id` is registered.
    pub fn has(&self, id: &str) -> bool {
        self.store.has(id)
    }

    /// Get the value for `id`, constructing it on first access.
    pub fn resolve(&self, id: &str) -> Result<Service, RegistryError> {
        self.store.resolve(id, self)
    }

    /// Get the value for `id` as a `T`.
    pub fn resolve_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, RegistryError> {
        downcast_service(id, self.resolve(id)?)
    }

    /// Check if `id` has already been constructed.
    pub fn is_resolved(&self, id: &str) -> bool {
        self.store.is_resolved(id)
    }

    /// Number of entries still waiting for their first resolve.
    pub fn pending_count(&self) -> usize {
        self.store.pending_count()
    }

    /// Number of cached entries.
    pub fn resolved_count(&self) -> usize {
        self.store.resolved_count()
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// List all registered ids: pending ones first, then resolved ones.
    pub fn ids(&self) -> Vec<String> {
        self.store.pending_first_ids()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for Registry {
    fn register_factory(&self, id: &str, factory: Factory) -> Result<(), RegistryError> {
        self.store.register(id, factory)
    }

    fn has(&self, id: &str) -> bool {
        Registry::has(self, id)
    }

    fn resolve(&self, id: &str) -> Result<Service, RegistryError> {
        Registry::resolve(self, id)
    }
}

#[cfg(test)]
#[path = "lazy_tests.rs"]
mod tests;
