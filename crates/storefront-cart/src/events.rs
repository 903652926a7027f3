//! Cart change notifications.

use serde::Serialize;
use storefront_commerce::cart::{Cart, CartTotals};
use storefront_commerce::checkout::{CheckoutPhase, OrderConfirmation};

/// Buffered events per subscriber before the oldest are dropped.
pub const EVENT_CAPACITY: usize = 64;

/// Cart state as observers see it after a change.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartSnapshot {
    pub cart: Cart,
    /// `None` only if pricing overflowed.
    pub totals: Option<CartTotals>,
    pub phase: CheckoutPhase,
}

/// Events broadcast by the cart store.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// The cart changed.
    Changed(CartSnapshot),
    /// An order submission began.
    SubmissionStarted,
    /// The order was accepted and the cart cleared.
    OrderPlaced(OrderConfirmation),
    /// The order was rejected; the cart is unchanged.
    SubmissionFailed(String),
    /// The cart could not be written to storage.
    PersistenceFailed(String),
}

impl CartEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::Changed(_) => "changed",
            CartEvent::SubmissionStarted => "submission_started",
            CartEvent::OrderPlaced(_) => "order_placed",
            CartEvent::SubmissionFailed(_) => "submission_failed",
            CartEvent::PersistenceFailed(_) => "persistence_failed",
        }
    }
}
