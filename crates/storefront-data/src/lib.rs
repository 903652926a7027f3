//! Storefront backend collaborators.
//!
//! Provides the async contracts the cart depends on ([`Catalog`],
//! [`AddressBook`], [`PaymentMethods`], [`OrderService`],
//! [`CouponService`]) and REST implementations over a JSON [`ApiClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{ApiClient, ApiConfig, Catalog, rest::RestBackend};
//!
//! let client = ApiClient::new(&ApiConfig::default().with_token(token))?;
//! let backend = RestBackend::new(client);
//!
//! let product = backend.catalog.snapshot(ProductId::new(12)).await?;
//! let addresses = backend.addresses.list().await?;
//! ```

mod client;
mod error;
mod flat;
mod services;
mod wire;

pub mod rest;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::FetchError;
pub use flat::{FlatRateCoupons, DEFAULT_FLAT_AMOUNT};
pub use services::{AddressBook, Catalog, CouponService, OrderService, PaymentMethods};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::rest::RestBackend;
    pub use crate::{
        AddressBook, ApiClient, ApiConfig, Catalog, CouponService, FetchError, OrderService,
        PaymentMethods,
    };
}
