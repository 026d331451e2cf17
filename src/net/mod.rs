//! Networking modules for the storefront REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` is the only way requests leave the process: it attaches the
//! bearer token and routes every response through `classify`. `transport`
//! performs the actual HTTP exchange, `error` is the rejection taxonomy
//! callers match on, and `types` defines the shared wire schema.

pub mod classify;
pub mod error;
pub mod gateway;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classify::{Classification, classify};
pub use error::ApiError;
pub use gateway::{AuthExpiryHandler, ClearAndRedirect, Gateway};
pub use transport::{ApiRequest, NetworkFailure, RawResponse, ReqwestTransport, Transport};
