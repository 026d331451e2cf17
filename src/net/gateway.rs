//! The single egress point for storefront API calls.
//!
//! DESIGN
//! ======
//! Request path: read the session store and attach `Authorization: Bearer`
//! when a token is stored. Response path: [`classify`] the settled call and
//! map it to `Ok` or an [`ApiError`]. Authentication failures additionally
//! invoke the injected [`AuthExpiryHandler`] once per response; the
//! application wires [`ClearAndRedirect`] so the session is cleared and the
//! user is sent to the login page.
//!
//! CONCURRENCY
//! ===========
//! Calls are independent futures sharing `&Gateway`. A 401 on one call
//! clears the session while others are still in flight; their later
//! success never writes session state, so a cleared session stays cleared.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use super::classify::{Classification, classify};
use super::error::ApiError;
use super::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};
use super::types::OneOrMany;
use crate::config::ClientConfig;
use crate::nav::{LOGIN_PATH, Navigator, is_login_path};
use crate::session::SessionStore;

/// Side effect run when a response says the credentials are gone.
pub trait AuthExpiryHandler: Send + Sync {
    fn on_auth_expired(&self, status: u16);
}

/// Clear the session and navigate to `/login`, unless already there.
pub struct ClearAndRedirect {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ClearAndRedirect {
    #[must_use]
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl AuthExpiryHandler for ClearAndRedirect {
    fn on_auth_expired(&self, status: u16) {
        if let Err(e) = self.session.clear() {
            error!(status, error = %e, "failed to clear session after auth failure");
        }
        let current = self.navigator.current_path();
        if is_login_path(&current) {
            return;
        }
        info!(status, from = %current, "session expired; redirecting to login");
        self.navigator.navigate(LOGIN_PATH);
    }
}

pub struct Gateway {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: SessionStore,
    on_auth_expired: Arc<dyn AuthExpiryHandler>,
}

impl Gateway {
    /// Build the production gateway: reqwest transport from `config` and the
    /// clear-and-redirect expiry handler over `session` and `navigator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let transport = Arc::new(ReqwestTransport::new(config)?);
        let handler = Arc::new(ClearAndRedirect::new(session.clone(), navigator));
        Ok(Self::with_transport(config.base_url.clone(), transport, session, handler))
    }

    #[must_use]
    pub fn with_transport(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        session: SessionStore,
        on_auth_expired: Arc<dyn AuthExpiryHandler>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, transport, session, on_auth_expired }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn prepare(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<ApiRequest, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.session.token() {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        Ok(ApiRequest {
            method,
            url: self.url(path),
            query: query.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
            headers,
            body,
        })
    }

    /// Send one request through the interceptor pipeline.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-2xx response or
    /// transport failure. On authentication failure the expiry handler has
    /// already run when this returns.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let request = self.prepare(method, path, query, body)?;
        let method = request.method.clone();
        let url = request.url.clone();

        let (status, body) = match self.transport.send(request).await {
            Ok(RawResponse { status, body }) => (status, body),
            Err(failure) => {
                error!(%method, %url, error = %failure, "no response from server");
                return Err(ApiError::Network(failure));
            }
        };

        let classification = classify(Some(status), self.session.token().is_some());
        if classification.clears_session() {
            warn!(%method, %url, status, "authentication rejected");
            self.on_auth_expired.on_auth_expired(status);
        }

        match classification {
            Classification::Ok => Ok(RawResponse { status, body }),
            Classification::AuthExpired => Err(ApiError::AuthExpired { status, body }),
            Classification::Forbidden => {
                warn!(%method, %url, "access forbidden");
                Err(ApiError::Forbidden { body })
            }
            Classification::NotFound => {
                warn!(%method, %url, "resource not found");
                Err(ApiError::NotFound { body })
            }
            Classification::ClientError => {
                error!(%method, %url, status, body = %body, "request rejected");
                Err(ApiError::Client { status, body })
            }
            Classification::ServerError | Classification::NetworkError => {
                error!(%method, %url, status, body = %body, "server error");
                Err(ApiError::Server { status, body })
            }
        }
    }

    /// `GET` and decode the body.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`]; also fails if the body does not decode.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_query(path, &[]).await
    }

    /// `GET` with query parameters and decode the body.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`]; also fails if the body does not decode.
    pub async fn get_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        decode(&response.body)
    }

    /// `GET` a list, tolerating a `null` body or a single bare object.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`]; also fails if the body does not decode.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.get_list_query(path, &[]).await
    }

    /// [`Gateway::get_list`] with query parameters.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`]; also fails if the body does not decode.
    pub async fn get_list_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        let list: Option<OneOrMany<T>> = decode(&response.body)?;
        Ok(list.map(OneOrMany::into_vec).unwrap_or_default())
    }

    /// `POST` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`]; also fails if either body does not (de)serialize.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::POST, path, &[], Some(body)).await?;
        decode(&response.body)
    }

    /// `PUT` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`]; also fails if either body does not (de)serialize.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::PUT, path, &[], Some(body)).await?;
        decode(&response.body)
    }

    /// `DELETE`, discarding any response body.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, query, None).await?;
        Ok(())
    }
}

/// Decode a success body; an empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = body.trim();
    let body = if body.is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;
