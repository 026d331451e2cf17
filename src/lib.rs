//! Client library for the Luxury Scents perfume storefront API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns who is logged in and persists it to durable storage,
//! `net` is the single egress point to the REST backend, `guard` decides
//! access before a view or command runs, and `api` wraps the resource
//! endpoints on top of the gateway. `cart` holds the local quantity and
//! subtotal reconciliation used between cart round trips.

pub mod api;
pub mod cart;
pub mod config;
pub mod guard;
pub mod nav;
pub mod net;
pub mod session;
