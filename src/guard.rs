//! Route guards evaluated before a protected view or command runs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected entry point applies the same redirect rules: missing
//! session goes to `/login`, a non-admin on an admin page goes home. The
//! decision is a pure function of the session snapshot taken at evaluation
//! time and is never cached; guards do not touch the network.

use tracing::info;

use crate::nav::{HOME_PATH, LOGIN_PATH, Navigator};
use crate::session::{Session, SessionStore};

/// What an entry point demands of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Decide access for `requirement` given the current session snapshot.
///
/// The authentication check runs first, so an anonymous visitor to an admin
/// page is sent to login rather than home.
#[must_use]
pub fn evaluate(session: Option<&Session>, requirement: Requirement) -> Decision {
    match (requirement, session) {
        (Requirement::Public, _) => Decision::Allow,
        (Requirement::Authenticated | Requirement::Admin, None) => Decision::Redirect(LOGIN_PATH),
        (Requirement::Admin, Some(session)) if !session.is_admin() => Decision::Redirect(HOME_PATH),
        (Requirement::Authenticated | Requirement::Admin, Some(_)) => Decision::Allow,
    }
}

/// Evaluate against a fresh read of `store` and follow any redirect.
pub fn enforce(store: &SessionStore, navigator: &dyn Navigator, requirement: Requirement) -> Decision {
    let decision = evaluate(store.read().as_ref(), requirement);
    if let Decision::Redirect(target) = decision {
        info!(?requirement, from = %navigator.current_path(), to = target, "guard redirect");
        navigator.navigate(target);
    }
    decision
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;
