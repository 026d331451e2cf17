//! Typed resource services over the gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each service is a thin borrowed view of a [`Gateway`]: it owns the
//! endpoint paths and payload shapes for one backend resource and returns
//! typed values. Every call goes through the gateway, so bearer attachment
//! and session expiry handling apply uniformly. Services never swallow
//! errors; list endpoints only tolerate odd shapes (`null`, a lone object).

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod custom;
pub mod invoices;
pub mod users;

use crate::net::Gateway;

pub use auth::AuthService;
pub use cart::{AddItem, CartService, CheckoutRequest};
pub use catalog::{CategoryService, NoteService, PerfumeService};
pub use custom::{CustomPerfumeDraft, CustomPerfumeService};
pub use invoices::InvoiceService;
pub use users::{ProfileUpdate, UserService};

impl Gateway {
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    #[must_use]
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    #[must_use]
    pub fn perfumes(&self) -> PerfumeService<'_> {
        PerfumeService::new(self)
    }

    #[must_use]
    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    #[must_use]
    pub fn notes(&self) -> NoteService<'_> {
        NoteService::new(self)
    }

    #[must_use]
    pub fn custom_perfumes(&self) -> CustomPerfumeService<'_> {
        CustomPerfumeService::new(self)
    }

    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self)
    }

    #[must_use]
    pub fn invoices(&self) -> InvoiceService<'_> {
        InvoiceService::new(self)
    }
}
