//! Storage and resolution engine shared by every registry variant.
//!
//! Keeps pending factories and resolved services in two insertion-ordered
//! maps. An id lives in exactly one of them; while its factory runs it stays
//! pending and is additionally marked in flight.

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use lazywire_protocols::{Container, Factory, RegistryError, RegistrySettings, Service};

#[derive(Default)]
struct State {
    pending: IndexMap<String, Factory>,
    resolved: IndexMap<String, Service>,
    /// Ids whose factory is currently running, outermost first.
    in_flight: Vec<String>,
}

impl State {
    fn contains(&self, id: &str) -> bool {
        self.pending.contains_key(id) || self.resolved.contains_key(id)
    }
}

pub(crate) struct Store {
    state: Mutex<State>,
    settings: RegistrySettings,
}

impl Store {
    pub(crate) fn new(settings: RegistrySettings) -> Self {
        Self {
            state: Mutex::new(State::default()),
            settings,
        }
    }

    pub(crate) fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub(crate) fn register(&self, id: &str, factory: Factory) -> Result<(), RegistryError> {
        if id.is_empty() {
            return Err(RegistryError::InvalidParameter(
                "Provided ID is empty.".to_string(),
            ));
        }

        let mut state = self.state.lock();
        if state.contains(id) {
            return Err(RegistryError::InvalidParameter(format!(
                "ID '{}' provided twice.",
                id
            )));
        }

        state.pending.insert(id.to_string(), factory);
        debug!("Registered service: {}", id);
        Ok(())
    }

    pub(crate) fn has(&self, id: &str) -> bool {
        self.state.lock().contains(id)
    }

    /// Resolve `id`, handing `host` to the factory.
    ///
    /// The lock is released while the factory runs so it can call back into
    /// the registry.
    pub(crate) fn resolve(&self, id: &str, host: &dyn Container) -> Result<Service, RegistryError> {
        let factory = {
            let mut state = self.state.lock();

            if let Some(service) = state.resolved.get(id) {
                trace!("Cache hit: {}", id);
                return Ok(service.clone());
            }

            let factory = state
                .pending
                .get(id)
                .cloned()
                .ok_or_else(|| RegistryError::IdNotFound(id.to_string()))?;

            if state.in_flight.iter().any(|entry| entry == id) {
                warn!(
                    "Circular resolution: {} (chain: {})",
                    id,
                    state.in_flight.join(" -> ")
                );
                return Err(RegistryError::CircularResolution(id.to_string()));
            }

            let depth = state.in_flight.len();
            if let Some(limit) = self.settings.max_depth.filter(|&limit| depth >= limit) {
                warn!("Resolution depth limit {} hit at {}", limit, id);
                return Err(RegistryError::ResolutionDepthExceeded {
                    id: id.to_string(),
                    depth: limit,
                });
            }

            state.in_flight.push(id.to_string());
            factory
        };

        debug!("Resolving service: {}", id);
        let in_flight = InFlight { store: self, id };
        let result = factory(host);
        drop(in_flight);

        match result {
            Ok(service) => {
                let mut state = self.state.lock();
                state.resolved.insert(id.to_string(), service.clone());
                state.pending.shift_remove(id);
                debug!("Resolved service: {}", id);
                Ok(service)
            }
            Err(source) => {
                debug!("Factory for {} failed: {}", id, source);
                Err(RegistryError::FactoryFailed {
                    id: id.to_string(),
                    source: Box::new(source),
                })
            }
        }
    }

    pub(crate) fn is_resolved(&self, id: &str) -> bool {
        self.state.lock().resolved.contains_key(id)
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub(crate) fn resolved_count(&self) -> usize {
        self.state.lock().resolved.len()
    }

    pub(crate) fn len(&self) -> usize {
        let state = self.state.lock();
        state.pending.len() + state.resolved.len()
    }

    /// Pending ids in registration order, then resolved ids in resolution order.
    pub(crate) fn pending_first_ids(&self) -> Vec<String> {
        let state = self.state.lock();
        state
            .pending
            .keys()
            .chain(state.resolved.keys())
            .cloned()
            .collect()
    }
}

/// Clears the in-flight mark even if the factory panics.
struct InFlight<'a> {
    store: &'a Store,
    id: &'a str,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.store.state.lock();
        if let Some(pos) = state.in_flight.iter().rposition(|entry| entry == self.id) {
            state.in_flight.remove(pos);
        }
    }
}
