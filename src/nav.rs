//! Navigation seam between session handling and whatever renders views.
//!
//! The gateway's expiry handler and the guards only need to know where the
//! user is and to send them somewhere else. A browser front end implements
//! this over its router; the CLI uses [`MemoryNavigator`].

use std::sync::Mutex;

use tracing::debug;

/// Login entry point.
pub const LOGIN_PATH: &str = "/login";
/// Landing page for users who lack a role.
pub const HOME_PATH: &str = "/";

pub trait Navigator: Send + Sync {
    /// Path of the current location, without origin.
    fn current_path(&self) -> String;

    /// Replace the current location with `path`.
    fn navigate(&self, path: &str);
}

/// True when `path` already is the login entry point, ignoring query,
/// fragment and a trailing slash.
#[must_use]
pub fn is_login_path(path: &str) -> bool {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    bare.trim_end_matches('/') == LOGIN_PATH
}

#[derive(Debug)]
struct NavState {
    current: String,
    history: Vec<String>,
}

/// In-process navigator that records every location it visits.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: Mutex<NavState>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(start: &str) -> Self {
        Self { state: Mutex::new(NavState { current: start.to_owned(), history: vec![start.to_owned()] }) }
    }

    /// Every location visited so far, starting location first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().map(|s| s.history.clone()).unwrap_or_default()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.state.lock().map(|s| s.current.clone()).unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        if let Ok(mut state) = self.state.lock() {
            debug!(from = %state.current, to = path, "navigate");
            state.current = path.to_owned();
            state.history.push(path.to_owned());
        }
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;
