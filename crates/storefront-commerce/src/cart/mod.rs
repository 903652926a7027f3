//! Shopping cart module.
//!
//! Contains the cart, its line items, pricing policy and coupons.

mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, CartLineItem};
pub use discount::{normalize_code, AppliedCoupon, CouponValue};
pub use pricing::{
    CartTotals, PricingPolicy, DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_COST,
};
