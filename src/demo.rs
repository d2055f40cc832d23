//! Sample service graph used by `lazywire demo`.

use std::sync::Arc;

use tracing::info;

use lazywire_core::{
    DefaultRegistryFactory, OrderedRegistry, RegistryError, RegistryFactory, RegistrySettings,
};

struct AppSettings {
    database_url: String,
    cache_capacity: usize,
}

struct Database {
    url: String,
}

struct UserRepository {
    db: Arc<Database>,
}

struct Cache {
    capacity: usize,
}

/// One step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DemoStep {
    pub id: String,
    /// Whether this step ran the factory, as opposed to reading the cache.
    pub constructed: bool,
    pub summary: String,
}

/// Build the sample graph, resolve `database` early, then walk everything.
pub(crate) fn run(settings: RegistrySettings) -> Result<Vec<DemoStep>, RegistryError> {
    let registry = DefaultRegistryFactory::with_settings(settings).create_ordered_registry();
    wire(&registry)?;

    // Pulls in `settings` as a side effect.
    registry.resolve("database")?;
    register_cache(&registry)?;

    let mut steps = Vec::new();
    registry.rewind();
    while registry.valid() {
        let Some(id) = registry.key() else { break };
        let constructed = !registry.is_resolved(&id);
        let summary = describe(&registry, &id)?;
        info!("{} -> {}", id, summary);
        steps.push(DemoStep {
            id,
            constructed,
            summary,
        });
        registry.next();
    }
    Ok(steps)
}

fn wire(registry: &OrderedRegistry) -> Result<(), RegistryError> {
    registry.register("settings", |_| AppSettings {
        database_url: "sqlite::memory:".to_string(),
        cache_capacity: 128,
    })?;
    registry.try_register("database", |c| {
        let settings = c.resolve_as::<AppSettings>("settings")?;
        Ok(Database {
            url: settings.database_url.clone(),
        })
    })?;
    registry.try_register("repository", |c| {
        Ok(UserRepository {
            db: c.resolve_as::<Database>("database")?,
        })
    })?;
    Ok(())
}

fn register_cache(registry: &OrderedRegistry) -> Result<(), RegistryError> {
    registry.try_register("cache", |c| {
        let settings = c.resolve_as::<AppSettings>("settings")?;
        Ok(Cache {
            capacity: settings.cache_capacity,
        })
    })
}

fn describe(registry: &OrderedRegistry, id: &str) -> Result<String, RegistryError> {
    let service = registry.current()?;
    let summary = if let Some(settings) = service.downcast_ref::<AppSettings>() {
        format!("settings(database_url={})", settings.database_url)
    } else if let Some(db) = service.downcast_ref::<Database>() {
        format!("database({})", db.url)
    } else if let Some(repo) = service.downcast_ref::<UserRepository>() {
        format!("repository(db={})", repo.db.url)
    } else if let Some(cache) = service.downcast_ref::<Cache>() {
        format!("cache(capacity={})", cache.capacity)
    } else {
        format!("{}(opaque)", id)
    };
    Ok(summary)
}
