//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Quantity below the minimum of one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout is missing required selections.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Coupon code rejected.
    #[error("Invalid coupon code: {0}")]
    InvalidCouponCode(String),

    /// A record failed boundary validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An order submission is already in flight.
    #[error("Order submission already in progress")]
    SubmissionInProgress,
}
