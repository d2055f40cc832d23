//! Ordered registry with restartable, lazy iteration.
//!
//! Reading the current entry resolves it, so iterating runs factories and
//! may fail. Treat `current()` and the [`Entries`] iterator as side-effecting.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use lazywire_protocols::{
    downcast_service, factory_fn, try_factory_fn, Container, Factory, OrderingPolicy,
    RegistryError, RegistrySettings, Service,
};

use super::lazy::Registry;

/// A [`Registry`] that remembers its entries' order and can walk them.
///
/// Two ways to traverse:
/// - the cursor protocol (`rewind`/`valid`/`key`/`current`/`next`), shared by
///   every caller and live: registrations made mid-walk become visible;
/// - [`OrderedRegistry::iter`], a standard iterator over a snapshot of the
///   order taken when it was created.
///
/// How the order evolves is set by [`RegistrySettings::ordering`].
pub struct OrderedRegistry {
    base: Registry,
    order: Mutex<Vec<String>>,
    cursor: AtomicUsize,
}

impl OrderedRegistry {
    /// Create a new empty ordered registry with default settings.
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }

    /// Create a new empty ordered registry.
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            base: Registry::with_settings(settings),
            order: Mutex::new(Vec::new()),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        self.base.settings()
    }

    /// Register an infallible factory under `id`.
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
        self.add(id, factory_fn(factory))
    }

    /// Register a factory that may fail.
    pub fn try_register<T, F>(&self, id: &str, factory: F) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Container) -> Result<T, RegistryError> + Send + Sync + 'static,
    {
        self.add(id, try_factory_fn(factory))
    }

    fn add(&self, id: &str, factory: Factory) -> Result<(), RegistryError> {
        self.base.store.register(id, factory)?;

        let mut order = self.order.lock();
        match self.settings().ordering {
            OrderingPolicy::PendingFirst => *order = self.base.store.pending_first_ids(),
            OrderingPolicy::Registration => order.push(id.to_string()),
        }
        trace!("Order after registering {}: {:?}", id, *order);
        Ok(())
    }

    pub fn has(&self, id: &str) -> bool {
        self.base.has(id)
    }

    /// Get the value for `id`, constructing it on first access.
    ///
    /// Factories receive this ordered registry, not the inner one.
    pub fn resolve(&self, id: &str) -> Result<Service, RegistryError> {
        self.base.store.resolve(id, self)
    }

    /// Get the value for `id` as a `T`.
    pub fn resolve_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, RegistryError> {
        downcast_service(id, self.resolve(id)?)
    }

    pub fn is_resolved(&self, id: &str) -> bool {
        self.base.is_resolved(id)
    }

    pub fn len(&self) -> usize {
        self.order.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current iteration order.
    pub fn keys(&self) -> Vec<String> {
        self.order.lock().clone()
    }

    /// Move the cursor back to the first entry.
    pub fn rewind(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }

    /// Whether the cursor points at an entry.
    pub fn valid(&self) -> bool {
        self.cursor.load(Ordering::Relaxed) < self.len()
    }

    /// Id under the cursor, `None` past the end.
    pub fn key(&self) -> Option<String> {
        let position = self.cursor.load(Ordering::Relaxed);
        self.order.lock().get(position).cloned()
    }

    /// Value under the cursor. Resolves it if needed, running its factory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CursorOutOfRange`] past the end, otherwise
    /// whatever resolving the entry returns.
    pub fn current(&self) -> Result<Service, RegistryError> {
        let id = self.key().ok_or_else(|| RegistryError::CursorOutOfRange {
            position: self.position(),
            len: self.len(),
        })?;
        self.resolve(&id)
    }

    /// Advance the cursor by one entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) {
        self.cursor.fetch_add(1, Ordering::Relaxed);
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Iterate over a snapshot of the order, resolving each entry as it is
    /// reached. Does not touch the shared cursor.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            registry: self,
            ids: self.keys().into_iter(),
        }
    }
}

impl Default for OrderedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for OrderedRegistry {
    fn register_factory(&self, id: &str, factory: Factory) -> Result<(), RegistryError> {
        self.add(id, factory)
    }

    fn has(&self, id: &str) -> bool {
        OrderedRegistry::has(self, id)
    }

    fn resolve(&self, id: &str) -> Result<Service, RegistryError> {
        OrderedRegistry::resolve(self, id)
    }
}

/// Lazy iterator over an [`OrderedRegistry`].
///
/// Each step resolves its entry, so items are `Result`s.
pub struct Entries<'a> {
    registry: &'a OrderedRegistry,
    ids: std::vec::IntoIter<String>,
}

impl Iterator for Entries<'_> {
    type Item = Result<(String, Service), RegistryError>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some(self.registry.resolve(&id).map(|service| (id, service)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl<'a> IntoIterator for &'a OrderedRegistry {
    type Item = Result<(String, Service), RegistryError>;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "ordered_tests.rs"]
mod tests;
