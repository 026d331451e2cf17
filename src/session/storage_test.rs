use super::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("luxury-scents-{}", uuid::Uuid::new_v4())).join(name)
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("token").unwrap(), None);

    store.set("token", "abc").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

    store.remove("token").unwrap();
    assert_eq!(store.get("token").unwrap(), None);
}

#[test]
fn memory_store_remove_missing_key_is_ok() {
    let store = MemoryStore::new();
    assert!(store.remove("nope").is_ok());
}

// =============================================================
// FileStore
// =============================================================

#[test]
fn file_store_missing_file_reads_as_empty() {
    let store = FileStore::new(temp_path("session.json"));
    assert_eq!(store.get("token").unwrap(), None);
}

#[test]
fn file_store_creates_parent_dirs_and_persists() {
    let path = temp_path("nested/session.json");
    let store = FileStore::new(&path);
    store.set("token", "abc").unwrap();
    assert!(path.exists());

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
}

#[test]
fn file_store_remove_keeps_other_keys() {
    let store = FileStore::new(temp_path("session.json"));
    store.set("token", "abc").unwrap();
    store.set("user", "{}").unwrap();
    store.remove("token").unwrap();

    assert_eq!(store.get("token").unwrap(), None);
    assert_eq!(store.get("user").unwrap().as_deref(), Some("{}"));
}

#[test]
fn file_store_corrupt_file_errors_on_read() {
    let path = temp_path("session.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("token"), Err(StorageError::Corrupt { .. })));
}

#[test]
fn file_store_corrupt_file_is_replaced_on_write() {
    let path = temp_path("session.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[1, 2").unwrap();

    let store = FileStore::new(&path);
    store.set("token", "fresh").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("fresh"));
}

#[test]
fn file_store_empty_file_reads_as_empty() {
    let path = temp_path("session.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "  \n").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get("user").unwrap(), None);
}
