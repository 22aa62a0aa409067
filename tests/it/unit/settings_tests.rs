//! Unit tests for config and local settings storage.

use playfield_monitor::settings::{
    ConfigStore, JsonConfigStore, LocalSettings, MemoryConfigStore, WindowGeometry,
    read_device_size,
};
use playfield_monitor::types::SortOrder;
use serde_json::json;

// ============================================================================
// Config store
// ============================================================================

#[test]
fn test_read_device_size_fallbacks() {
    let mut store = MemoryConfigStore::new();
    assert_eq!(read_device_size(&store), 0.07);

    store.set("device_size", json!(0.12));
    assert_eq!(read_device_size(&store), 0.12);

    store.set("device_size", json!(-1.0));
    assert_eq!(read_device_size(&store), 0.07);

    store.set("device_size", json!(null));
    assert_eq!(read_device_size(&store), 0.07);
}

#[test]
fn test_json_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonConfigStore::open(dir.path().join("config.json")).unwrap();
    assert_eq!(store.get("device_size"), None);
}

#[test]
fn test_json_store_persist_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"displays": {"window": {"width": 800}}, "device_size": 0.07}"#).unwrap();

    let mut store = JsonConfigStore::open(&path).unwrap();
    store.set("device_size", json!(0.125));
    store.persist().unwrap();

    let reopened = JsonConfigStore::open(&path).unwrap();
    assert_eq!(reopened.get("device_size"), Some(json!(0.125)));
    assert_eq!(reopened.get("displays"), Some(json!({"window": {"width": 800}})));
}

#[test]
fn test_json_store_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut store = JsonConfigStore::open(&path).unwrap();
    store.set("device_size", json!(0.2));
    store.persist().unwrap();

    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_json_store_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(JsonConfigStore::open(&path).is_err());
}

#[test]
fn test_json_store_non_object_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = JsonConfigStore::open(&path).unwrap();
    assert_eq!(store.get("device_size"), None);
}

// ============================================================================
// Local settings
// ============================================================================

#[test]
fn test_window_defaults() {
    let settings = LocalSettings::default();

    let events = settings.window("events");
    assert_eq!(events.position, (500, 200));
    assert_eq!(events.size, (300, 600));

    let inspector = settings.window("inspector");
    assert_eq!(inspector.position, (1100, 500));
    assert_eq!(inspector.size, (300, 300));
}

#[test]
fn test_local_settings_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_settings.json");

    let mut settings = LocalSettings::load(&path);
    let geometry = WindowGeometry {
        position: (10, 20),
        size: (640, 480),
    };
    settings.set_window("events", geometry);
    settings.sort_order = SortOrder::NameAsc;
    settings.save().unwrap();

    let reloaded = LocalSettings::load(&path);
    assert_eq!(reloaded.window("events"), geometry);
    assert_eq!(reloaded.window("inspector").position, (1100, 500));
    assert_eq!(reloaded.sort_order, SortOrder::NameAsc);
    assert_eq!(reloaded.path(), Some(path.as_path()));
}

#[test]
fn test_corrupt_local_settings_use_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_settings.json");
    std::fs::write(&path, "garbage").unwrap();

    let settings = LocalSettings::load(&path);
    assert_eq!(settings.sort_order, SortOrder::ReceivedDesc);
    assert_eq!(settings.window("events").position, (500, 200));
}

#[test]
fn test_placeholder_sort_is_not_restored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_settings.json");
    std::fs::write(&path, r#"{"sort_order": "Unsorted"}"#).unwrap();

    let settings = LocalSettings::load(&path);
    assert_eq!(settings.sort_order, SortOrder::ReceivedDesc);
}

#[test]
fn test_in_memory_settings_save_is_noop() {
    let settings = LocalSettings::default();
    assert!(settings.path().is_none());
    settings.save().unwrap();
}
