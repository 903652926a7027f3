//! Collaborator contracts the cart and CLI depend on.
//!
//! REST implementations live in [`crate::rest`]; tests substitute
//! in-memory ones.

use crate::FetchError;
use async_trait::async_trait;
use storefront_commerce::cart::CouponValue;
use storefront_commerce::catalog::{Category, Product, ProductFilter, ProductPage, ProductSnapshot};
use storefront_commerce::checkout::{
    Address, AddressDraft, CardDraft, OrderConfirmation, OrderRequest, OrderSummary,
    PaymentMethodRef,
};
use storefront_commerce::ids::{AddressId, OrderId, PaymentMethodId, ProductId};
use storefront_commerce::Money;

/// Product lookup.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;

    async fn products(&self, filter: &ProductFilter) -> Result<ProductPage, FetchError>;

    async fn categories(&self) -> Result<Vec<Category>, FetchError>;

    /// Fetch a product and validate it into a cart snapshot.
    async fn snapshot(&self, id: ProductId) -> Result<ProductSnapshot, FetchError> {
        Ok(self.product(id).await?.snapshot()?)
    }
}

/// The customer's saved addresses.
#[async_trait]
pub trait AddressBook: Send + Sync {
    async fn list(&self) -> Result<Vec<Address>, FetchError>;

    async fn create(&self, draft: &AddressDraft) -> Result<Address, FetchError>;

    async fn update(&self, id: AddressId, draft: &AddressDraft) -> Result<Address, FetchError>;

    async fn delete(&self, id: AddressId) -> Result<(), FetchError>;

    /// Find one address by ID.
    async fn find(&self, id: AddressId) -> Result<Option<Address>, FetchError> {
        Ok(self.list().await?.into_iter().find(|a| a.id == id))
    }
}

/// The customer's saved cards.
#[async_trait]
pub trait PaymentMethods: Send + Sync {
    async fn list(&self) -> Result<Vec<PaymentMethodRef>, FetchError>;

    async fn create(&self, card: &CardDraft) -> Result<PaymentMethodRef, FetchError>;

    async fn update(
        &self,
        id: PaymentMethodId,
        card: &CardDraft,
    ) -> Result<PaymentMethodRef, FetchError>;

    async fn delete(&self, id: PaymentMethodId) -> Result<(), FetchError>;

    /// Find one card by ID.
    async fn find(&self, id: PaymentMethodId) -> Result<Option<PaymentMethodRef>, FetchError> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }
}

/// Order placement and history.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderConfirmation, FetchError>;

    async fn orders(&self) -> Result<Vec<OrderSummary>, FetchError>;

    async fn order(&self, id: OrderId) -> Result<OrderSummary, FetchError>;
}

/// Coupon validation.
///
/// An unknown or expired code is an error; the cart never applies a coupon
/// this service did not accept.
#[async_trait]
pub trait CouponService: Send + Sync {
    async fn validate(&self, code: &str, subtotal: Money) -> Result<CouponValue, FetchError>;
}
