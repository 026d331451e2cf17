//! Pure response classification.
//!
//! The gateway hands every settled call here before acting on it, so the
//! status-code policy can be tested without a network, a router, or a
//! session.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Ok,
    /// Credentials missing, expired, or rejected. Clears the session.
    AuthExpired,
    /// Authenticated but not allowed. Session stays.
    Forbidden,
    NotFound,
    /// Validation or other 4xx.
    ClientError,
    /// 5xx, or any status the API never sends on purpose.
    ServerError,
    /// No response at all: timeout, DNS, refused connection.
    NetworkError,
}

impl Classification {
    #[must_use]
    pub fn clears_session(self) -> bool {
        self == Self::AuthExpired
    }
}

/// Classify a settled call.
///
/// `status` is `None` when no response arrived. `token_present` is whether a
/// bearer token is stored at the moment the response is handled: a 403 with
/// no token is an authentication gap rather than a refusal, so it is
/// treated like a 401.
#[must_use]
pub fn classify(status: Option<u16>, token_present: bool) -> Classification {
    match status {
        None => Classification::NetworkError,
        Some(200..=299) => Classification::Ok,
        Some(401) => Classification::AuthExpired,
        Some(403) if !token_present => Classification::AuthExpired,
        Some(403) => Classification::Forbidden,
        Some(404) => Classification::NotFound,
        Some(400..=499) => Classification::ClientError,
        Some(_) => Classification::ServerError,
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
