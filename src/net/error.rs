//! Rejection taxonomy for gateway calls.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx response and every transport failure becomes an
//! `ApiError`; nothing is swallowed. Session expiry is still reported as
//! `AuthExpired` after the gateway has cleared the session, so callers can
//! stop their own work. Callers needing text for a person use
//! [`ApiError::user_message`], which keys off the status code and the
//! server's `message` field.

use super::transport::NetworkFailure;
use crate::session::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required (status {status})")]
    AuthExpired { status: u16, body: String },

    #[error("access denied (status 403)")]
    Forbidden { body: String },

    #[error("resource not found (status 404)")]
    NotFound { body: String },

    #[error("request rejected with status {status}")]
    Client { status: u16, body: String },

    #[error("server error (status {status})")]
    Server { status: u16, body: String },

    #[error("no response from server: {0}")]
    Network(#[from] NetworkFailure),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid input: {0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status of the response, when one arrived.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired { status, .. } | Self::Client { status, .. } | Self::Server { status, .. } => {
                Some(*status)
            }
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Raw response body, when a response arrived.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::AuthExpired { body, .. }
            | Self::Forbidden { body }
            | Self::NotFound { body }
            | Self::Client { body, .. }
            | Self::Server { body, .. } => Some(body),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Human-readable message from the server: the `message` field of a JSON
    /// body, or the body itself when it is plain text.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let body = self.body()?.trim();
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value.get("message").and_then(|m| m.as_str()).map(str::to_owned),
            Err(_) => Some(body.to_owned()),
        }
    }

    /// Message suitable for showing to a shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(NetworkFailure::Timeout) => {
                "The server took too long to respond. Check that the backend is running.".to_owned()
            }
            Self::Network(_) => "Could not connect to the server. Please check your connection.".to_owned(),
            Self::AuthExpired { .. } => "Your session has expired. Please log in again.".to_owned(),
            Self::Forbidden { .. } => "You do not have permission to perform this action.".to_owned(),
            Self::NotFound { .. } => {
                format!(
                    "Not found: {}",
                    self.server_message().unwrap_or_else(|| "the requested resource does not exist".to_owned())
                )
            }
            Self::Client { status, .. } | Self::Server { status, .. } => {
                format!("Error {status}: {}", self.server_message().unwrap_or_else(|| "server error".to_owned()))
            }
            Self::Validation(message) => message.clone(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
