//! Session store: who is logged in, persisted to durable storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway reads the token from here before every request and clears it
//! when the server rejects the credentials; guards read the user to decide
//! access. Storage is the source of truth; the watch channel only mirrors it
//! for subscribers that want to react to login/logout.
//!
//! INVARIANT
//! =========
//! `token` and `user` are written and removed together. A half-present or
//! unparseable pair reads as no session at all.

pub mod storage;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::net::types::User;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Storage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-encoded [`User`].
pub const USER_KEY: &str = "user";

/// The client-held pair of bearer token and authenticated profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

/// Injectable handle over the session storage. Cheap to clone; all clones
/// share the same storage and change channel.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    changes: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    /// Wrap `storage`, seeding the change channel from whatever it holds.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let initial = read_session(storage.as_ref());
        let (tx, _rx) = watch::channel(initial);
        Self { storage, changes: Arc::new(tx) }
    }

    /// Session store backed by process memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Persist `user` and `token` as the current session.
    ///
    /// If the user write fails the previous token is put back, so storage
    /// never pairs the new token with the previous user.
    ///
    /// # Errors
    ///
    /// Propagates any storage write failure.
    pub fn save(&self, user: &User, token: &str) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        let previous_token = self.storage.get(TOKEN_KEY)?;
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set(USER_KEY, &user_json) {
            let restored = match previous_token.as_deref() {
                Some(previous) => self.storage.set(TOKEN_KEY, previous),
                None => self.storage.remove(TOKEN_KEY),
            };
            if let Err(restore_err) = restored {
                warn!(error = %restore_err, "failed to roll back token after user write failure");
            }
            return Err(e);
        }
        info!(user_id = user.id, rol = ?user.rol, "session saved");
        self.changes.send_replace(Some(Session { user: user.clone(), token: token.to_owned() }));
        Ok(())
    }

    /// Current session, or `None` when either half is missing or corrupt.
    #[must_use]
    pub fn read(&self) -> Option<Session> {
        read_session(self.storage.as_ref())
    }

    /// Stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        read_key(self.storage.as_ref(), TOKEN_KEY)
    }

    /// Presence check only: both keys exist. Says nothing about freshness.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        read_key(self.storage.as_ref(), TOKEN_KEY).is_some() && read_key(self.storage.as_ref(), USER_KEY).is_some()
    }

    /// Remove both halves of the session.
    ///
    /// Both removals are attempted even if the first fails; the first error
    /// is returned.
    ///
    /// # Errors
    ///
    /// Propagates a storage write failure.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        let result = token.and(user);
        match &result {
            Ok(()) => {
                self.changes.send_replace(None);
                info!("session cleared");
            }
            Err(e) => {
                warn!(error = %e, "session clear incomplete");
                self.changes.send_replace(read_session(self.storage.as_ref()));
            }
        }
        result
    }

    /// Subscribe to session changes. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}

fn read_key(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "session storage unreadable; treating as absent");
            None
        }
    }
}

fn read_session(storage: &dyn KeyValueStore) -> Option<Session> {
    let token = read_key(storage, TOKEN_KEY)?;
    let raw_user = read_key(storage, USER_KEY)?;
    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(Session { user, token }),
        Err(e) => {
            warn!(error = %e, "stored user does not parse; treating session as absent");
            None
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
