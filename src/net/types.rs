//! Wire schema shared with the storefront REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase Spanish JSON via serde
//! renames. Response types are lenient: optional fields default, and list
//! fields accept an explicit `null` as empty so a half-populated payload
//! never aborts a page load.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// Role carried by an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rol {
    Admin,
    /// Regular customer. Older backends emit `CLIENTE` for the same role.
    #[serde(alias = "CLIENTE")]
    User,
}

/// Profile of the logged-in user as persisted under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub rol: Rol,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.rol == Rol::Admin
    }
}

/// Success body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub rol: Rol,
    pub token: String,
}

impl AuthResponse {
    /// Split the response into the stored profile and the bearer token.
    #[must_use]
    pub fn into_parts(self) -> (User, String) {
        let Self { id, nombre, correo, rol, token } = self;
        (User { id, nombre, correo, rol }, token)
    }
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub correo: &'a str,
    pub contrasena: &'a str,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub nombre: &'a str,
    pub correo: &'a str,
    pub contrasena: &'a str,
}

/// Reference to an entity by id, as the backend expects in nested payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaOlfativa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub precio: f64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categorias: Vec<Categoria>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notas_olfativas: Vec<NotaOlfativa>,
}

/// A customer-designed perfume built from olfactory notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfumePersonalizado {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub precio: f64,
    #[serde(default)]
    pub aprobado: bool,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub usuario: Option<IdRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notas: Vec<NotaOlfativa>,
}

// =============================================================================
// CART
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrito {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detalles: Vec<DetalleCarrito>,
}

/// One cart line. Price fields are optional because older lines were
/// stored before `precioUnitario` existed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetalleCarrito {
    pub id: i64,
    #[serde(default)]
    pub perfume: Option<Perfume>,
    #[serde(default)]
    pub perfume_personalizado: Option<PerfumePersonalizado>,
    pub cantidad: u32,
    #[serde(default)]
    pub precio_unitario: Option<f64>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
}

impl DetalleCarrito {
    /// Display name of whatever product the line holds.
    #[must_use]
    pub fn product_name(&self) -> &str {
        self.perfume
            .as_ref()
            .map(|p| p.nombre.as_str())
            .or_else(|| self.perfume_personalizado.as_ref().map(|p| p.nombre.as_str()))
            .unwrap_or("(unknown product)")
    }
}

/// Payment methods the checkout endpoint accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetodoPago {
    #[default]
    Tarjeta,
    Paypal,
    Transferencia,
}

/// Body returned by `POST /carrito/checkout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub fecha_emision: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub mensaje: Option<String>,
}

// =============================================================================
// INVOICES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factura {
    pub id: i64,
    #[serde(default)]
    pub usuario_id: Option<i64>,
    #[serde(default)]
    pub usuario_nombre: Option<String>,
    #[serde(default)]
    pub usuario_correo: Option<String>,
    #[serde(default)]
    pub fecha_emision: Option<String>,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub direccion_envio: Option<String>,
    #[serde(default)]
    pub total: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detalles: Vec<DetalleFactura>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetalleFactura {
    #[serde(default)]
    pub id: Option<i64>,
    pub nombre_producto: String,
    pub cantidad: u32,
    pub precio_unitario: f64,
    pub subtotal: f64,
    #[serde(default)]
    pub perfume_id: Option<i64>,
    #[serde(default)]
    pub perfume_personalizado_id: Option<i64>,
}

// =============================================================================
// LENIENT DECODING
// =============================================================================

/// List payload as some endpoints return it: an array, or a lone object.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
