//! Login, registration and logout.
//!
//! A successful login or registration is the only place a session is
//! written. Logout is local: the backend keeps no server-side session, so
//! it only clears storage.

use tracing::{info, warn};

use crate::net::types::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::net::{ApiError, Gateway};

pub struct AuthService<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `POST /auth/login`, then persist the returned session.
    ///
    /// # Errors
    ///
    /// Returns the gateway error on rejection, or a storage error if the
    /// session could not be saved.
    pub async fn login(&self, correo: &str, contrasena: &str) -> Result<User, ApiError> {
        let response: AuthResponse = self
            .gateway
            .post("/auth/login", &LoginRequest { correo, contrasena })
            .await
            .inspect_err(|e| warn!(correo, error = %e, "login failed"))?;
        self.store(response)
    }

    /// `POST /auth/register`, then persist the returned session.
    ///
    /// # Errors
    ///
    /// Returns the gateway error on rejection, or a storage error if the
    /// session could not be saved.
    pub async fn register(&self, nombre: &str, correo: &str, contrasena: &str) -> Result<User, ApiError> {
        let response: AuthResponse = self
            .gateway
            .post("/auth/register", &RegisterRequest { nombre, correo, contrasena })
            .await
            .inspect_err(|e| warn!(correo, error = %e, "registration failed"))?;
        self.store(response)
    }

    /// Forget the local session.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either key could not be removed.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.gateway.session().clear()?;
        info!("logged out");
        Ok(())
    }

    fn store(&self, response: AuthResponse) -> Result<User, ApiError> {
        let (user, token) = response.into_parts();
        self.gateway.session().save(&user, &token)?;
        Ok(user)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
