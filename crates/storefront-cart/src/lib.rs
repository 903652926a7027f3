//! Persistent, observable cart store.
//!
//! [`CartStore`] owns a [`Cart`](storefront_commerce::cart::Cart), writes
//! it to a [`Cache`](storefront_cache::Cache) after every change,
//! broadcasts [`CartEvent`]s, and submits orders through an
//! [`OrderService`](storefront_data::OrderService).
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cart::CartStore;
//!
//! let store = CartStore::open(Cache::open(".storefront")?, orders, coupons);
//! let mut events = store.subscribe();
//!
//! store.add_item(product, 1)?;
//! store.set_shipping_address(address.reference())?;
//! store.set_payment(card, true)?;
//!
//! let confirmation = store.submit_order().await?;
//! ```

mod error;
mod events;
mod store;

pub use error::CartError;
pub use events::{CartEvent, CartSnapshot, EVENT_CAPACITY};
pub use store::{CartStore, CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartError, CartEvent, CartSnapshot, CartStore};
}
