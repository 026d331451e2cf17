//! Shopping cart endpoints.
//!
//! The cart is keyed by user id in the query or body, not by the token.
//! A `null` cart body reads as an empty cart.

use serde::Serialize;
use serde::de::IgnoredAny;

use crate::net::types::{Carrito, CheckoutReceipt, MetodoPago};
use crate::net::{ApiError, Gateway};

/// Body of `POST /carrito/items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub usuario_id: i64,
    pub perfume_id: i64,
    pub cantidad: u32,
}

/// Body of `POST /carrito/checkout` and `POST /facturas/procesar-compra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub usuario_id: i64,
    pub direccion_envio: String,
    pub metodo_pago: MetodoPago,
}

impl CheckoutRequest {
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the shipping address is blank.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.direccion_envio.trim().is_empty() {
            return Err(ApiError::Validation("a shipping address is required".into()));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct QuantityUpdate {
    cantidad: u32,
}

pub struct CartService<'a> {
    gateway: &'a Gateway,
}

impl<'a> CartService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /carrito?usuarioId=`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn get(&self, usuario_id: i64) -> Result<Carrito, ApiError> {
        let cart: Option<Carrito> =
            self.gateway.get_query("/carrito", &[("usuarioId", usuario_id.to_string())]).await?;
        Ok(cart.unwrap_or_default())
    }

    /// `POST /carrito/items`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a zero quantity; otherwise see
    /// [`Gateway::execute`].
    pub async fn add_item(&self, item: &AddItem) -> Result<(), ApiError> {
        if item.cantidad == 0 {
            return Err(ApiError::Validation("quantity must be at least 1".into()));
        }
        let _: IgnoredAny = self.gateway.post("/carrito/items", item).await?;
        Ok(())
    }

    /// `PUT /carrito/items/{id}`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn update_quantity(&self, detalle_id: i64, cantidad: u32) -> Result<(), ApiError> {
        let _: IgnoredAny =
            self.gateway.put(&format!("/carrito/items/{detalle_id}"), &QuantityUpdate { cantidad }).await?;
        Ok(())
    }

    /// `DELETE /carrito/items/{id}?usuarioId=`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn remove_item(&self, detalle_id: i64, usuario_id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/carrito/items/{detalle_id}"), &[("usuarioId", usuario_id.to_string())]).await
    }

    /// `POST /carrito/checkout`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything when the
    /// address is blank; otherwise see [`Gateway::execute`].
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, ApiError> {
        request.validate()?;
        let receipt: Option<CheckoutReceipt> = self.gateway.post("/carrito/checkout", request).await?;
        Ok(receipt.unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;
