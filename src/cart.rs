//! Local cart reconciliation between server round trips.
//!
//! After the server accepts a quantity change or a removal, the view patches
//! its copy of the cart instead of refetching it. Older cart lines may lack
//! `precioUnitario`, so the unit price falls back through the other price
//! fields the backend has emitted over time.

use tracing::debug;

use crate::net::types::{Carrito, DetalleCarrito};

/// Price of one unit on `line`: the first non-zero finite value among
/// `precioUnitario`, `precio`, the perfume's price and the custom perfume's
/// price; `0.0` when none is usable.
#[must_use]
pub fn unit_price(line: &DetalleCarrito) -> f64 {
    [
        line.precio_unitario,
        line.precio,
        line.perfume.as_ref().map(|p| p.precio),
        line.perfume_personalizado.as_ref().map(|p| p.precio),
    ]
    .into_iter()
    .flatten()
    .find(|p| p.is_finite() && *p != 0.0)
    .unwrap_or(0.0)
}

/// Subtotal of `line` as reported; missing or non-finite counts as zero.
/// This is the per-line value [`total`] sums, so printed lines add up.
#[must_use]
pub fn line_subtotal(line: &DetalleCarrito) -> f64 {
    line.subtotal.filter(|s| s.is_finite()).unwrap_or(0.0)
}

/// Change the quantity of line `detalle_id` by `delta`, never below 1, and
/// recompute its subtotal. Returns the new quantity, or `None` when no line
/// has that id.
pub fn adjust_quantity(cart: &mut Carrito, detalle_id: i64, delta: i64) -> Option<u32> {
    let line = cart.detalles.iter_mut().find(|d| d.id == detalle_id)?;
    let wanted = i64::from(line.cantidad).saturating_add(delta).max(1);
    let cantidad = u32::try_from(wanted).unwrap_or(u32::MAX);
    line.cantidad = cantidad;
    line.subtotal = Some(unit_price(line) * f64::from(cantidad));
    debug!(detalle_id, cantidad, "cart line quantity adjusted");
    Some(cantidad)
}

/// Set the quantity of line `detalle_id` outright, clamped to at least 1.
pub fn set_quantity(cart: &mut Carrito, detalle_id: i64, cantidad: u32) -> Option<u32> {
    let current = cart.detalles.iter().find(|d| d.id == detalle_id)?.cantidad;
    adjust_quantity(cart, detalle_id, i64::from(cantidad) - i64::from(current))
}

/// Drop line `detalle_id`. Returns whether a line was removed.
pub fn remove_line(cart: &mut Carrito, detalle_id: i64) -> bool {
    let before = cart.detalles.len();
    cart.detalles.retain(|d| d.id != detalle_id);
    cart.detalles.len() != before
}

/// Sum of line subtotals. Missing or non-finite subtotals count as zero.
#[must_use]
pub fn total(cart: &Carrito) -> f64 {
    cart.detalles.iter().map(line_subtotal).sum()
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;
