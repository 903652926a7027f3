//! Storefront domain types and logic.
//!
//! This crate holds everything about a storefront cart that does not need
//! I/O:
//!
//! - **Catalog**: product records, validated snapshots, categories
//! - **Cart**: selectable line items, pricing policy, coupons
//! - **Checkout**: address and payment selections, order payloads
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(product.snapshot()?, 2)?;
//!
//! let totals = cart.totals(&PricingPolicy::default())?;
//! println!("Total: {}", totals.currency.format(totals.grand_total));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, CategoryRef, Product, ProductFilter, ProductPage, ProductSnapshot,
    };

    // Cart
    pub use crate::cart::{AppliedCoupon, Cart, CartLineItem, CartTotals, CouponValue, PricingPolicy};

    // Checkout
    pub use crate::checkout::{
        Address, AddressDraft, AddressRef, CardDraft, CheckoutPhase, OrderConfirmation,
        OrderRequest, OrderStatus, OrderSummary, PaymentMethodRef, PaymentSelection,
    };
}
