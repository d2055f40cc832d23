use super::*;

/// Registers `ids` with factories that record when they run.
fn recording_registry(
    settings: RegistrySettings,
    ids: &[&str],
) -> (OrderedRegistry, Arc<Mutex<Vec<String>>>) {
    let registry = OrderedRegistry::with_settings(settings);
    let log = Arc::new(Mutex::new(Vec::new()));
    for id in ids {
        let log = log.clone();
        let name = id.to_string();
        registry
            .register(id, move |_| {
                log.lock().push(name.clone());
                name.clone()
            })
            .unwrap();
    }
    (registry, log)
}

#[test]
fn test_ordered_registry_new() {
    let registry = OrderedRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.valid());
    assert_eq!(registry.key(), None);
    assert_eq!(registry.position(), 0);
}

#[test]
fn test_register_and_resolve() {
    let registry = OrderedRegistry::default();
    registry.register("test.service", |_| "value".to_string()).unwrap();

    assert!(registry.has("test.service"));
    let first = registry.resolve("test.service").unwrap();
    let second = registry.resolve("test.service").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_register_rejects_bad_ids() {
    let registry = OrderedRegistry::new();
    assert!(matches!(
        registry.register("", |_| 1u8),
        Err(RegistryError::InvalidParameter(_))
    ));

    registry.register("dup", |_| 1u8).unwrap();
    assert!(matches!(
        registry.register("dup", |_| 2u8),
        Err(RegistryError::InvalidParameter(_))
    ));
    assert_eq!(registry.keys(), vec!["dup"]);
}

#[test]
fn test_resolve_unknown_id() {
    let registry = OrderedRegistry::new();
    assert!(registry.resolve("unknown.service").unwrap_err().is_not_found());
}

#[test]
fn test_cursor_walk_is_ordered_and_lazy() {
    let (registry, log) = recording_registry(RegistrySettings::default(), &["a", "b", "c"]);
    assert!(log.lock().is_empty());

    let mut seen = Vec::new();
    registry.rewind();
    while registry.valid() {
        let key = registry.key().unwrap();
        assert!(!registry.is_resolved(&key));

        let value = downcast_service::<String>(&key, registry.current().unwrap()).unwrap();
        assert_eq!(*value, key);
        assert_eq!(log.lock().last(), Some(&key));

        seen.push(key);
        registry.next();
    }

    assert_eq!(seen, vec!["a", "b", "c"]);
    assert_eq!(*log.lock(), vec!["a", "b", "c"]);
}

#[test]
fn test_current_only_resolves_once() {
    let (registry, log) = recording_registry(RegistrySettings::default(), &["a"]);

    registry.rewind();
    let first = registry.current().unwrap();
    let second = registry.current().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(log.lock().len(), 1);
}

#[test]
fn test_rewind_after_partial_walk() {
    let (registry, log) =
        recording_registry(RegistrySettings::default(), &["service1", "service2"]);

    registry.rewind();
    let first_key = registry.key();
    registry.current().unwrap();
    registry.next();

    registry.rewind();
    assert_eq!(registry.key(), first_key);
    assert_eq!(registry.position(), 0);

    registry.current().unwrap();
    assert_eq!(*log.lock(), vec!["service1"]);
}

#[test]
fn test_rewind_after_full_walk() {
    let (registry, log) = recording_registry(RegistrySettings::default(), &["a", "b"]);

    for entry in &registry {
        entry.unwrap();
    }
    assert_eq!(log.lock().len(), 2);

    registry.rewind();
    while registry.valid() {
        registry.current().unwrap();
        registry.next();
    }
    assert_eq!(log.lock().len(), 2);
    assert!(registry.has("a"));
    assert!(registry.has("b"));
}

#[test]
fn test_current_past_end() {
    let (registry, _log) = recording_registry(RegistrySettings::default(), &["only"]);

    registry.rewind();
    registry.next();
    assert!(!registry.valid());
    assert_eq!(registry.key(), None);
    assert!(matches!(
        registry.current(),
        Err(RegistryError::CursorOutOfRange { position: 1, len: 1 })
    ));
}

#[test]
fn test_pending_first_moves_resolved_to_back() {
    let (registry, _log) = recording_registry(RegistrySettings::default(), &["a", "b"]);
    assert_eq!(registry.keys(), vec!["a", "b"]);

    registry.resolve("a").unwrap();
    // Order is only rebuilt on registration.
    assert_eq!(registry.keys(), vec!["a", "b"]);

    registry.register("c", |_| "c".to_string()).unwrap();
    assert_eq!(registry.keys(), vec!["b", "c", "a"]);
}

#[test]
fn test_pending_first_shifts_live_cursor() {
    let (registry, _log) = recording_registry(RegistrySettings::default(), &["a", "b"]);

    registry.rewind();
    registry.current().unwrap();
    registry.next();
    assert_eq!(registry.key().as_deref(), Some("b"));

    registry.register("c", |_| "c".to_string()).unwrap();
    // "a" moved to the back, so position 1 now holds the new entry.
    assert_eq!(registry.key().as_deref(), Some("c"));
}

#[test]
fn test_registration_policy_is_append_only() {
    let settings = RegistrySettings::default().with_ordering(OrderingPolicy::Registration);
    let (registry, _log) = recording_registry(settings, &["a", "b"]);

    registry.resolve("a").unwrap();
    registry.register("c", |_| "c".to_string()).unwrap();
    assert_eq!(registry.keys(), vec!["a", "b", "c"]);
}

#[test]
fn test_iter_uses_snapshot() {
    let (registry, log) = recording_registry(RegistrySettings::default(), &["a", "b"]);

    let entries = registry.iter();
    assert_eq!(entries.len(), 2);
    registry.register("late", |_| "late".to_string()).unwrap();

    let ids: Vec<String> = entries.map(|entry| entry.unwrap().0).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(*log.lock(), vec!["a", "b"]);
    assert!(!registry.is_resolved("late"));
}

#[test]
fn test_iter_does_not_move_cursor() {
    let (registry, _log) = recording_registry(RegistrySettings::default(), &["a", "b"]);
    registry.rewind();
    registry.next();

    assert_eq!(registry.iter().count(), 2);
    assert_eq!(registry.position(), 1);
}

#[test]
fn test_iteration_yields_registered_values() {
    let registry = OrderedRegistry::new();
    let service1 = Arc::new("Service1".to_string());
    let service2 = Arc::new("Service2".to_string());
    let (s1, s2) = (service1.clone(), service2.clone());
    registry.register("service1", move |_| s1.clone()).unwrap();
    registry.register("service2", move |_| s2.clone()).unwrap();

    for entry in &registry {
        let (id, service) = entry.unwrap();
        let value = downcast_service::<Arc<String>>(&id, service).unwrap();
        let expected = if id == "service1" { &service1 } else { &service2 };
        assert!(Arc::ptr_eq(expected, &*value));
    }
}

#[test]
fn test_iteration_continues_after_failure() {
    let registry = OrderedRegistry::new();
    registry
        .try_register("broken", |_| Err::<u8, _>(RegistryError::custom("boom")))
        .unwrap();
    registry.register("fine", |_| 1u8).unwrap();

    let results: Vec<_> = registry.iter().collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
}

#[test]
fn test_factories_see_ordered_registry() {
    let registry = OrderedRegistry::new();
    registry
        .try_register("parent", |c| {
            c.register("child", |_| 2u8)?;
            Ok(1u8)
        })
        .unwrap();

    registry.resolve("parent").unwrap();
    assert_eq!(registry.keys(), vec!["parent", "child"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_factory_resolves_sibling_during_walk() {
    let registry = OrderedRegistry::new();
    registry
        .try_register("repo", |c| c.resolve_as::<String>("db").map(|db| format!("repo({db})")))
        .unwrap();
    registry.register("db", |_| "db".to_string()).unwrap();

    registry.rewind();
    let repo = downcast_service::<String>("repo", registry.current().unwrap()).unwrap();
    assert_eq!(repo.as_str(), "repo(db)");
    // "db" was pulled in by the repo factory.
    assert!(registry.is_resolved("db"));
}
