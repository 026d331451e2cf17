//! Invoices produced by checkout.

use crate::api::cart::CheckoutRequest;
use crate::net::types::Factura;
use crate::net::{ApiError, Gateway};

pub struct InvoiceService<'a> {
    gateway: &'a Gateway,
}

impl<'a> InvoiceService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /facturas` (every invoice; admin only on the server).
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn list(&self) -> Result<Vec<Factura>, ApiError> {
        self.gateway.get_list("/facturas").await
    }

    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn get(&self, id: i64) -> Result<Factura, ApiError> {
        self.gateway.get(&format!("/facturas/{id}")).await
    }

    /// `GET /facturas/usuario/{id}`
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn by_user(&self, usuario_id: i64) -> Result<Vec<Factura>, ApiError> {
        self.gateway.get_list(&format!("/facturas/usuario/{usuario_id}")).await
    }

    /// `POST /facturas/procesar-compra`: turn the user's cart into an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a blank address; otherwise see
    /// [`Gateway::execute`].
    pub async fn process_purchase(&self, request: &CheckoutRequest) -> Result<Factura, ApiError> {
        request.validate()?;
        self.gateway.post("/facturas/procesar-compra", request).await
    }
}

#[cfg(test)]
#[path = "invoices_test.rs"]
mod invoices_test;
