//! Order payload and order history types.

use crate::cart::{Cart, CartTotals};
use crate::checkout::missing_for_submission;
use crate::error::CommerceError;
use crate::ids::{AddressId, OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
    /// Order placed, awaiting processing. Unknown statuses read as pending.
    #[default]
    #[serde(other)]
    Pending,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// One product line of an order payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub count: i64,
    /// Human-readable line description.
    pub detail: String,
}

/// The body sent to place an order.
///
/// Carries the masked card number only. There is no security code field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub address_id: AddressId,
    pub order_date: DateTime<Utc>,
    pub card_no: String,
    pub card_name: String,
    pub card_expire_month: u8,
    pub card_expire_year: u16,
    /// Grand total.
    pub price: Money,
    pub products: Vec<OrderLineRequest>,
}

impl OrderRequest {
    /// Build the payload for the selected lines of a cart.
    ///
    /// Returns `CheckoutIncomplete` naming what is missing when the cart
    /// has no selected lines, no shipping address or no payment.
    pub fn from_cart(
        cart: &Cart,
        totals: &CartTotals,
        order_date: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        let missing = missing_for_submission(cart);
        let (Some(address), Some(payment)) = (&cart.shipping_address, &cart.payment) else {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        };
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }

        let products = cart
            .selected_items()
            .map(|item| OrderLineRequest {
                product_id: item.product.id,
                count: item.quantity,
                detail: item.product.detail(),
            })
            .collect();

        Ok(Self {
            address_id: address.id,
            order_date,
            card_no: payment.method.masked_number.clone(),
            card_name: payment.method.name_on_card.clone(),
            card_expire_month: payment.method.expire_month,
            card_expire_year: payment.method.expire_year,
            price: totals.grand_total,
            products,
        })
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.products.iter().map(|p| p.count).sum()
    }
}

/// Server acknowledgement of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub id: OrderId,
    /// Server timestamp, as sent.
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
}

/// A product line in order history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummaryLine {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub detail: Option<String>,
}

/// A past order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(default)]
    pub order_date: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub address_id: Option<AddressId>,
    #[serde(default)]
    pub products: Vec<OrderSummaryLine>,
}

impl OrderSummary {
    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.products.iter().map(|p| p.count).sum()
    }
}
