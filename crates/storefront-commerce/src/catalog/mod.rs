//! Product catalog module.
//!
//! Contains catalog records as the storefront API returns them and the
//! validated snapshots the cart keeps.

mod category;
mod product;

pub use category::{Category, CategoryRef, Gender};
pub use product::{Product, ProductFilter, ProductImage, ProductPage, ProductSnapshot, SortOrder};
