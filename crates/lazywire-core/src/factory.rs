//! Construction helpers for registries.

use lazywire_protocols::RegistrySettings;

use crate::registry::{OrderedRegistry, Registry};

/// Creates registries.
///
/// Lets wiring code depend on a factory instead of concrete constructors, so
/// tests can hand out pre-populated registries.
pub trait RegistryFactory {
    /// Create a new empty registry.
    fn create_registry(&self) -> Registry;

    /// Create a new empty ordered registry.
    fn create_ordered_registry(&self) -> OrderedRegistry;
}

/// Factory applying one set of [`RegistrySettings`] to everything it creates.
#[derive(Debug, Clone, Default)]
pub struct DefaultRegistryFactory {
    settings: RegistrySettings,
}

impl DefaultRegistryFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }
}

impl RegistryFactory for DefaultRegistryFactory {
    fn create_registry(&self) -> Registry {
        Registry::with_settings(self.settings.clone())
    }

    fn create_ordered_registry(&self) -> OrderedRegistry {
        OrderedRegistry::with_settings(self.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazywire_protocols::{Container, OrderingPolicy};

    #[test]
    fn test_create_registry() {
        let factory = DefaultRegistryFactory::new();
        let registry = factory.create_registry();
        assert!(registry.is_empty());

        let container: &dyn Container = &registry;
        container.register("a", |_| 1u8).unwrap();
        assert!(container.has("a"));
    }

    #[test]
    fn test_create_ordered_registry() {
        let factory = DefaultRegistryFactory::new();
        let registry = factory.create_ordered_registry();
        assert!(registry.is_empty());
        assert!(!registry.valid());

        let container: &dyn Container = &registry;
        container.register("a", |_| 1u8).unwrap();
        assert_eq!(registry.keys(), vec!["a"]);
    }

    #[test]
    fn test_settings_are_applied() {
        let settings = RegistrySettings::default()
            .with_ordering(OrderingPolicy::Registration)
            .with_max_depth(3)
            .unwrap();
        let factory = DefaultRegistryFactory::with_settings(settings.clone());

        assert_eq!(factory.settings(), &settings);
        assert_eq!(factory.create_registry().settings(), &settings);
        assert_eq!(factory.create_ordered_registry().settings(), &settings);
    }

    #[test]
    fn test_each_call_creates_a_fresh_registry() {
        let factory = DefaultRegistryFactory::new();
        let first = factory.create_registry();
        first.register("a", |_| 1u8).unwrap();

        let second = factory.create_registry();
        assert!(!second.has("a"));
    }
}
