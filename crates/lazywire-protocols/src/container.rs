//! The container protocol shared by every registry variant.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::RegistryError;

/// A resolved value. Shared, type-erased and immutable once cached.
pub type Service = Arc<dyn Any + Send + Sync>;

/// A pending constructor. Receives the container it was registered in so it
/// can resolve sibling entries while building its own value.
pub type Factory = Arc<dyn Fn(&dyn Container) -> Result<Service, RegistryError> + Send + Sync>;

/// Lazy container of named services.
///
/// Implementors hand themselves to factories during resolution, so a factory
/// registered in an ordered registry sees the ordered registry, not a bare one.
pub trait Container: Send + Sync {
    /// Add a factory under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidParameter`] if `id` is empty or already
    /// registered.
    fn register_factory(&self, id: &str, factory: Factory) -> Result<(), RegistryError>;

    /// Whether `id` is registered, resolved or not.
    fn has(&self, id: &str) -> bool;

    /// Return the value for `id`, running its factory on first access.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::IdNotFound`] if `id` was never registered, or a
    /// resolution error if the factory could not produce a value.
    fn resolve(&self, id: &str) -> Result<Service, RegistryError>;
}

impl<'a> dyn Container + 'a {
    /// Register an infallible factory.
    pub fn register<T, F>(&self, id: &str, factory: F) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Container) -> T + Send + Sync + 'static,
    {
        self.register_factory(id, factory_fn(factory))
    }

    /// Register a factory that may fail.
    pub fn try_register<T, F>(&self, id: &str, factory: F) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Container) -> Result<T, RegistryError> + Send + Sync + 'static,
    {
        self.register_factory(id, try_factory_fn(factory))
    }

    /// Resolve `id` and downcast it to `T`.
    pub fn resolve_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, RegistryError> {
        downcast_service(id, self.resolve(id)?)
    }
}

/// Wrap an infallible closure into a [`Factory`].
pub fn factory_fn<T, F>(factory: F) -> Factory
where
    T: Any + Send + Sync,
    F: Fn(&dyn Container) -> T + Send + Sync + 'static,
{
    Arc::new(move |container: &dyn Container| Ok(Arc::new(factory(container)) as Service))
}

/// Wrap a fallible closure into a [`Factory`].
pub fn try_factory_fn<T, F>(factory: F) -> Factory
where
    T: Any + Send + Sync,
    F: Fn(&dyn Container) -> Result<T, RegistryError> + Send + Sync + 'static,
{
    Arc::new(move |container: &dyn Container| {
        factory(container).map(|value| Arc::new(value) as Service)
    })
}

/// Downcast a resolved service to a concrete type.
///
/// # Errors
///
/// Returns [`RegistryError::TypeMismatch`] if the value is not a `T`.
pub fn downcast_service<T: Any + Send + Sync>(
    id: &str,
    service: Service,
) -> Result<Arc<T>, RegistryError> {
    service.downcast::<T>().map_err(|_| RegistryError::TypeMismatch {
        id: id.to_string(),
        expected: type_name::<T>(),
    })
}
