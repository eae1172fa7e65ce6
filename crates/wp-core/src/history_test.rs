use super::*;
use tempfile::TempDir;

#[test]
fn test_load_missing_file_is_not_initialized() {
    let dir = TempDir::new().unwrap();
    let store = FileHistoryStore::new(dir.path().join(".waypoint"));
    assert!(matches!(store.load(), Err(CoreError::NotInitialized)));
}

#[test]
fn test_initialize_then_load() {
    let dir = TempDir::new().unwrap();
    let store = FileHistoryStore::new(dir.path().join(".waypoint"));
    store.initialize("blog").unwrap();

    let history = store.load().unwrap();
    assert_eq!(history.marker, "blog");
    assert!(history.is_empty());
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileHistoryStore::new(dir.path().join(".waypoint"));
    let mut history = store.initialize("blog").unwrap();
    history.sync_after_up("/m/up.0.a.sql");
    history.sync_after_up("/m/up.1.b.sql");
    store.save(&history).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, history);
    assert_eq!(reloaded.head(), Some("/m/up.1.b.sql"));

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, "blog\n/m/up.0.a.sql\n/m/up.1.b.sql");
}

#[test]
fn test_trailing_blank_lines_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".waypoint");
    std::fs::write(&path, "blog\n/m/up.0.a.sql\n\n").unwrap();

    let history = FileHistoryStore::new(&path).load().unwrap();
    assert_eq!(history.applied, vec!["/m/up.0.a.sql"]);
}

#[test]
fn test_sync_after_up_reapplication_truncates() {
    let mut history = History::new("blog");
    history.sync_after_up("a");
    history.sync_after_up("b");
    history.sync_after_up("c");

    // Re-applying "a" means everything after it was rolled back
    history.sync_after_up("a");
    assert_eq!(history.applied, vec!["a"]);

    // Never a duplicate
    history.sync_after_up("b");
    assert_eq!(history.applied, vec!["a", "b"]);
}

#[test]
fn test_drop_head_and_clear() {
    let mut history = History::new("blog");
    history.sync_after_up("a");
    history.sync_after_up("b");

    history.drop_head();
    assert_eq!(history.head(), Some("a"));
    history.drop_head();
    assert!(history.is_empty());
    history.drop_head();
    assert!(history.is_empty());

    history.sync_after_up("a");
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.marker, "blog");
}

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryHistoryStore::new();
    assert!(matches!(store.load(), Err(CoreError::NotInitialized)));

    let mut history = store.initialize("blog").unwrap();
    history.sync_after_up("a");
    store.save(&history).unwrap();
    assert_eq!(store.load().unwrap().applied, vec!["a"]);
}
