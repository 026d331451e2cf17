//! User profile and admin user management.

use serde::Serialize;

use crate::net::types::User;
use crate::net::{ApiError, Gateway};

/// Fields of the own profile that may change. `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
}

pub struct UserService<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /usuarios/profile`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.gateway.get("/usuarios/profile").await
    }

    /// `PUT /usuarios/profile`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.gateway.put("/usuarios/profile", update).await
    }

    /// `GET /usuarios` (admin only on the server).
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.gateway.get_list("/usuarios").await
    }

    /// `DELETE /usuarios/{id}` (admin only on the server).
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/usuarios/{id}"), &[]).await
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;
