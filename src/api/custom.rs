//! Customer-designed perfumes.
//!
//! Creation is validated locally before any request: the backend answers a
//! missing name, owner or note list with an opaque 500.

use serde::Serialize;
use tracing::warn;

use crate::net::types::{IdRef, PerfumePersonalizado};
use crate::net::{ApiError, Gateway};

/// What a customer fills in when designing a perfume.
#[derive(Debug, Clone, Default)]
pub struct CustomPerfumeDraft {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub imagen_url: Option<String>,
    pub usuario_id: Option<i64>,
    pub notas_ids: Vec<i64>,
}

/// JSON body of create and update requests.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomPerfumeBody<'d> {
    nombre: &'d str,
    #[serde(skip_serializing_if = "Option::is_none")]
    descripcion: Option<&'d str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imagen_url: Option<&'d str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usuario: Option<IdRef>,
    notas_ids: &'d [i64],
}

impl CustomPerfumeDraft {
    /// Check the fields the backend requires on creation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.nombre.trim().is_empty() {
            return Err(ApiError::Validation("a name is required".into()));
        }
        if self.usuario_id.is_none() {
            return Err(ApiError::Validation("the owning user id is required".into()));
        }
        if self.notas_ids.is_empty() {
            return Err(ApiError::Validation("select at least one olfactory note".into()));
        }
        Ok(())
    }

    pub(crate) fn body(&self) -> CustomPerfumeBody<'_> {
        CustomPerfumeBody {
            nombre: self.nombre.trim(),
            descripcion: self.descripcion.as_deref().filter(|d| !d.trim().is_empty()),
            imagen_url: self.imagen_url.as_deref().filter(|u| !u.trim().is_empty()),
            usuario: self.usuario_id.map(|id| IdRef { id }),
            notas_ids: &self.notas_ids,
        }
    }
}

pub struct CustomPerfumeService<'a> {
    gateway: &'a Gateway,
}

impl<'a> CustomPerfumeService<'a> {
    const PATH: &'static str = "/perfumes-personalizados";

    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn list(&self) -> Result<Vec<PerfumePersonalizado>, ApiError> {
        self.gateway.get_list(Self::PATH).await
    }

    /// `GET /perfumes-personalizados/usuario/{id}`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn by_user(&self, usuario_id: i64) -> Result<Vec<PerfumePersonalizado>, ApiError> {
        self.gateway.get_list(&format!("{}/usuario/{usuario_id}", Self::PATH)).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn get(&self, id: i64) -> Result<PerfumePersonalizado, ApiError> {
        self.gateway.get(&format!("{}/{id}", Self::PATH)).await
    }

    /// Validate `draft` and create it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything when the
    /// draft is incomplete; otherwise see [`Gateway::execute`].
    pub async fn create(&self, draft: &CustomPerfumeDraft) -> Result<PerfumePersonalizado, ApiError> {
        draft.validate()?;
        self.gateway.post(Self::PATH, &draft.body()).await
    }

    /// Send `draft` as the new state of perfume `id`. Incomplete drafts are
    /// sent anyway; the server decides which fields it keeps.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn update(&self, id: i64, draft: &CustomPerfumeDraft) -> Result<PerfumePersonalizado, ApiError> {
        if draft.nombre.trim().is_empty() {
            warn!(id, "updating custom perfume without a name");
        }
        if draft.notas_ids.is_empty() {
            warn!(id, "updating custom perfume without notes");
        }
        self.gateway.put(&format!("{}/{id}", Self::PATH), &draft.body()).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{}/{id}", Self::PATH), &[]).await
    }
}

#[cfg(test)]
#[path = "custom_test.rs"]
mod custom_test;
