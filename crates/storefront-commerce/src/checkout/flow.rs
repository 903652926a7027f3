//! Checkout phase and submission readiness.

use crate::cart::Cart;
use serde::{Deserialize, Serialize};

/// Where a cart is in its lifecycle.
///
/// `Empty -> Populated -> Submitting -> Empty` on success, or back to
/// `Populated` when submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutPhase {
    /// No line items.
    Empty,
    /// Has line items.
    Populated,
    /// An order submission is in flight.
    Submitting,
}

impl CheckoutPhase {
    /// Phase of a cart, given whether a submission is running.
    pub fn of(cart: &Cart, submitting: bool) -> Self {
        if submitting {
            CheckoutPhase::Submitting
        } else if cart.is_empty() {
            CheckoutPhase::Empty
        } else {
            CheckoutPhase::Populated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Empty => "empty",
            CheckoutPhase::Populated => "populated",
            CheckoutPhase::Submitting => "submitting",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutPhase::Empty => "Empty",
            CheckoutPhase::Populated => "Populated",
            CheckoutPhase::Submitting => "Submitting",
        }
    }
}

/// What is missing before an order can be submitted.
pub fn missing_for_submission(cart: &Cart) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if cart.selected_items().next().is_none() {
        missing.push("selected items");
    }
    if cart.shipping_address.is_none() {
        missing.push("shipping address");
    }
    if cart.payment.is_none() {
        missing.push("payment method");
    }
    missing
}

/// Check if a cart can be submitted.
pub fn is_ready_for_submission(cart: &Cart) -> bool {
    missing_for_submission(cart).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductSnapshot;
    use crate::ids::ProductId;
    use crate::money::Money;

    #[test]
    fn test_phase_transitions() {
        let mut cart = Cart::new();
        assert_eq!(CheckoutPhase::of(&cart, false), CheckoutPhase::Empty);

        cart.add_item(
            ProductSnapshot {
                id: ProductId::new(1),
                name: "A".to_string(),
                unit_price: Money::new(100),
                images: vec!["a.jpg".to_string()],
                category: None,
                stock: 1,
            },
            1,
        )
        .unwrap();
        assert_eq!(CheckoutPhase::of(&cart, false), CheckoutPhase::Populated);
        assert_eq!(CheckoutPhase::of(&cart, true), CheckoutPhase::Submitting);
    }

    #[test]
    fn test_missing_for_empty_cart() {
        let cart = Cart::new();
        assert_eq!(
            missing_for_submission(&cart),
            vec!["selected items", "shipping address", "payment method"]
        );
        assert!(!is_ready_for_submission(&cart));
    }
}
