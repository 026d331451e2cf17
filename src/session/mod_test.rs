use super::*;
use crate::net::types::Rol;

fn ana() -> User {
    User { id: 1, nombre: "Ana".into(), correo: "a@x.com".into(), rol: Rol::User }
}

// =============================================================
// save / read
// =============================================================

#[test]
fn save_then_read_round_trips() {
    let store = SessionStore::in_memory();
    store.save(&ana(), "tok123").unwrap();

    let session = store.read().unwrap();
    assert_eq!(session, Session { user: ana(), token: "tok123".into() });
}

#[test]
fn later_save_replaces_earlier_one() {
    let store = SessionStore::in_memory();
    store.save(&ana(), "first").unwrap();
    let admin = User { id: 2, nombre: "Root".into(), correo: "r@x.com".into(), rol: Rol::Admin };
    store.save(&admin, "second").unwrap();

    let session = store.read().unwrap();
    assert_eq!(session.token, "second");
    assert!(session.is_admin());
}

#[test]
fn saved_user_scenario_reports_role() {
    let store = SessionStore::in_memory();
    store.save(&ana(), "tok123").unwrap();

    assert!(store.is_authenticated());
    assert_eq!(store.read().unwrap().user.rol, Rol::User);
}

#[test]
fn fresh_store_is_anonymous() {
    let store = SessionStore::in_memory();
    assert!(!store.is_authenticated());
    assert!(store.read().is_none());
    assert!(store.token().is_none());
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_removes_both_halves() {
    let store = SessionStore::in_memory();
    store.save(&ana(), "tok123").unwrap();
    store.clear().unwrap();

    assert!(!store.is_authenticated());
    assert!(store.read().is_none());
    assert!(store.token().is_none());
}

#[test]
fn clear_on_anonymous_store_is_ok() {
    let store = SessionStore::in_memory();
    assert!(store.clear().is_ok());
}

// =============================================================
// corrupt / partial storage
// =============================================================

#[test]
fn unparseable_user_reads_as_absent() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(USER_KEY, "{not json").unwrap();
    let store = SessionStore::new(storage);

    assert!(store.read().is_none());
    // Presence check does not parse.
    assert!(store.is_authenticated());
}

#[test]
fn token_without_user_is_not_a_session() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(TOKEN_KEY, "tok").unwrap();
    let store = SessionStore::new(storage);

    assert!(!store.is_authenticated());
    assert!(store.read().is_none());
    assert_eq!(store.token().as_deref(), Some("tok"));
}

#[test]
fn user_without_token_is_not_a_session() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(USER_KEY, &serde_json::to_string(&ana()).unwrap()).unwrap();
    let store = SessionStore::new(storage);

    assert!(!store.is_authenticated());
    assert!(store.read().is_none());
}

// =============================================================
// durability and notifications
// =============================================================

#[test]
fn file_backed_session_survives_reopen() {
    let path = std::env::temp_dir().join(format!("luxury-scents-{}", uuid::Uuid::new_v4())).join("session.json");
    SessionStore::new(Arc::new(FileStore::new(&path))).save(&ana(), "tok123").unwrap();

    let reopened = SessionStore::new(Arc::new(FileStore::new(&path)));
    assert_eq!(reopened.read().unwrap().user, ana());
    assert_eq!(*reopened.subscribe().borrow(), reopened.read());
}

#[test]
fn subscribers_see_save_and_clear() {
    let store = SessionStore::in_memory();
    let rx = store.subscribe();
    assert!(rx.borrow().is_none());

    store.save(&ana(), "tok123").unwrap();
    assert_eq!(rx.borrow().as_ref().map(|s| s.token.as_str()), Some("tok123"));

    store.clear().unwrap();
    assert!(rx.borrow().is_none());
}

#[test]
fn clones_share_storage() {
    let store = SessionStore::in_memory();
    let other = store.clone();
    store.save(&ana(), "tok123").unwrap();
    assert!(other.is_authenticated());
}

// =============================================================
// partial storage failures
// =============================================================

/// Memory store whose writes to the listed keys fail.
struct FailingWrites {
    inner: MemoryStore,
    fail_set: Option<&'static str>,
    fail_remove: Option<&'static str>,
}

impl KeyValueStore for FailingWrites {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_set == Some(key) {
            return Err(StorageError::Poisoned);
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_remove == Some(key) {
            return Err(StorageError::Poisoned);
        }
        self.inner.remove(key)
    }
}

fn seeded(fail_set: Option<&'static str>, fail_remove: Option<&'static str>) -> SessionStore {
    let inner = MemoryStore::new();
    inner.set(TOKEN_KEY, "ana-token").unwrap();
    inner.set(USER_KEY, &serde_json::to_string(&ana()).unwrap()).unwrap();
    SessionStore::new(Arc::new(FailingWrites { inner, fail_set, fail_remove }))
}

#[test]
fn failed_user_write_keeps_previous_session_intact() {
    let store = seeded(Some(USER_KEY), None);
    let root = User { id: 2, nombre: "Root".into(), correo: "r@x.com".into(), rol: Rol::Admin };

    assert!(store.save(&root, "root-token").is_err());

    let session = store.read().unwrap();
    assert_eq!(session.user.id, 1);
    assert_eq!(session.token, "ana-token");
}

#[test]
fn failed_user_write_on_fresh_store_leaves_no_token() {
    let failing = FailingWrites { inner: MemoryStore::new(), fail_set: Some(USER_KEY), fail_remove: None };
    let store = SessionStore::new(Arc::new(failing));

    assert!(store.save(&ana(), "tok123").is_err());

    assert_eq!(store.token(), None);
    assert!(store.subscribe().borrow().is_none());
}

#[test]
fn incomplete_clear_notifies_what_storage_still_holds() {
    let store = seeded(None, Some(USER_KEY));
    let rx = store.subscribe();

    assert!(store.clear().is_err());

    assert_eq!(store.token(), None);
    assert!(rx.borrow().is_none());
    assert!(store.read().is_none());
}

#[test]
fn clear_that_cannot_remove_token_keeps_subscribers_in_sync() {
    let store = seeded(None, Some(TOKEN_KEY));
    let rx = store.subscribe();

    assert!(store.clear().is_err());

    assert_eq!(store.token().as_deref(), Some("ana-token"));
    assert_eq!(*rx.borrow(), store.read());
}
