//! Catalog resources: perfumes, categories and olfactory notes.
//!
//! DESIGN
//! ======
//! Perfume updates go through `/perfumes/{id}/safe-update` with categories
//! and notes reduced to `{id}` references; sending whole nested entities
//! makes the backend try to persist them as new rows.

use serde::Serialize;

use crate::net::types::{Categoria, IdRef, NotaOlfativa, Perfume};
use crate::net::{ApiError, Gateway};

// =============================================================================
// PERFUMES
// =============================================================================

/// Body of `PUT /perfumes/{id}/safe-update`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PerfumeUpdate<'p> {
    nombre: &'p str,
    precio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    descripcion: Option<&'p str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imagen: Option<&'p str>,
    categorias: Vec<IdRef>,
    notas_olfativas: Vec<IdRef>,
}

impl<'p> PerfumeUpdate<'p> {
    fn from_perfume(perfume: &'p Perfume) -> Self {
        Self {
            nombre: &perfume.nombre,
            precio: perfume.precio,
            descripcion: perfume.descripcion.as_deref(),
            imagen: perfume.imagen.as_deref(),
            categorias: perfume.categorias.iter().filter_map(|c| c.id).map(|id| IdRef { id }).collect(),
            notas_olfativas: perfume.notas_olfativas.iter().filter_map(|n| n.id).map(|id| IdRef { id }).collect(),
        }
    }
}

pub struct PerfumeService<'a> {
    gateway: &'a Gateway,
}

impl<'a> PerfumeService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /perfumes`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn list(&self) -> Result<Vec<Perfume>, ApiError> {
        self.gateway.get_list("/perfumes").await
    }

    /// `GET /perfumes/{id}`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn get(&self, id: i64) -> Result<Perfume, ApiError> {
        self.gateway.get(&format!("/perfumes/{id}")).await
    }

    /// `GET /perfumes/categoria/{id}`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn by_category(&self, categoria_id: i64) -> Result<Vec<Perfume>, ApiError> {
        self.gateway.get_list(&format!("/perfumes/categoria/{categoria_id}")).await
    }

    /// `GET /perfumes/buscar?nombre=`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn search(&self, nombre: &str) -> Result<Vec<Perfume>, ApiError> {
        self.gateway.get_list_query("/perfumes/buscar", &[("nombre", nombre.to_owned())]).await
    }

    /// `POST /perfumes`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn create(&self, perfume: &Perfume) -> Result<Perfume, ApiError> {
        self.gateway.post("/perfumes", perfume).await
    }

    /// `PUT /perfumes/{id}/safe-update` with id-only references.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn update(&self, id: i64, perfume: &Perfume) -> Result<Perfume, ApiError> {
        self.gateway.put(&format!("/perfumes/{id}/safe-update"), &PerfumeUpdate::from_perfume(perfume)).await
    }

    /// `DELETE /perfumes/{id}`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/perfumes/{id}"), &[]).await
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

pub struct CategoryService<'a> {
    gateway: &'a Gateway,
}

impl<'a> CategoryService<'a> {
    const PATH: &'static str = "/categorias";

    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn list(&self) -> Result<Vec<Categoria>, ApiError> {
        self.gateway.get_list(Self::PATH).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn get(&self, id: i64) -> Result<Categoria, ApiError> {
        self.gateway.get(&format!("{}/{id}", Self::PATH)).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn create(&self, categoria: &Categoria) -> Result<Categoria, ApiError> {
        self.gateway.post(Self::PATH, categoria).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn update(&self, id: i64, categoria: &Categoria) -> Result<Categoria, ApiError> {
        self.gateway.put(&format!("{}/{id}", Self::PATH), categoria).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{}/{id}", Self::PATH), &[]).await
    }
}

// =============================================================================
// OLFACTORY NOTES
// =============================================================================

pub struct NoteService<'a> {
    gateway: &'a Gateway,
}

impl<'a> NoteService<'a> {
    const PATH: &'static str = "/notas-olfativas";

    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn list(&self) -> Result<Vec<NotaOlfativa>, ApiError> {
        self.gateway.get_list(Self::PATH).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn get(&self, id: i64) -> Result<NotaOlfativa, ApiError> {
        self.gateway.get(&format!("{}/{id}", Self::PATH)).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn create(&self, nota: &NotaOlfativa) -> Result<NotaOlfativa, ApiError> {
        self.gateway.post(Self::PATH, nota).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn update(&self, id: i64, nota: &NotaOlfativa) -> Result<NotaOlfativa, ApiError> {
        self.gateway.put(&format!("{}/{id}", Self::PATH), nota).await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{}/{id}", Self::PATH), &[]).await
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;
