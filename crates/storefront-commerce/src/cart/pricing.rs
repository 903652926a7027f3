//! Cart pricing calculations.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat shipping charge.
pub const DEFAULT_SHIPPING_COST: Money = Money::new(2999);

/// Subtotal at which shipping becomes free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::new(15000);

/// Shipping and display settings used to price a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingPolicy {
    pub shipping_cost: Money,
    pub free_shipping_threshold: Money,
    pub currency: Currency,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_cost: DEFAULT_SHIPPING_COST,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            currency: Currency::default(),
        }
    }
}

impl PricingPolicy {
    /// Shipping discount for a subtotal: the full shipping cost once the
    /// threshold is reached, zero otherwise.
    pub fn shipping_discount(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold {
            self.shipping_cost
        } else {
            Money::zero()
        }
    }

    /// Price the selected lines of a cart.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn totals(&self, cart: &Cart) -> Result<CartTotals, CommerceError> {
        let mut selected_subtotal = Money::zero();
        let mut selected_item_count: i64 = 0;
        let mut selected_line_count = 0;

        for item in cart.items.iter().filter(|i| i.selected) {
            let line_total = item.line_total()?;
            selected_subtotal = selected_subtotal
                .checked_add(line_total)
                .ok_or(CommerceError::Overflow)?;
            selected_item_count = selected_item_count
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            selected_line_count += 1;
        }

        let shipping_discount = self.shipping_discount(selected_subtotal);
        let coupon_discount = cart
            .coupon
            .as_ref()
            .map(|c| c.value.discount_for(selected_subtotal))
            .unwrap_or_default();

        let grand_total = selected_subtotal
            .checked_add(self.shipping_cost)
            .and_then(|t| t.checked_sub(shipping_discount))
            .and_then(|t| t.checked_sub(coupon_discount))
            .ok_or(CommerceError::Overflow)?;

        Ok(CartTotals {
            selected_subtotal,
            selected_item_count,
            selected_line_count,
            shipping_cost: self.shipping_cost,
            shipping_discount,
            coupon_discount,
            grand_total,
            currency: self.currency,
            free_shipping_threshold: self.free_shipping_threshold,
        })
    }
}

/// Totals derived from the selected lines of a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity over selected lines.
    pub selected_subtotal: Money,
    /// Sum of quantities over selected lines.
    pub selected_item_count: i64,
    /// Number of selected lines.
    pub selected_line_count: usize,
    pub shipping_cost: Money,
    pub shipping_discount: Money,
    pub coupon_discount: Money,
    /// Subtotal + shipping - shipping discount - coupon discount.
    pub grand_total: Money,
    pub currency: Currency,
    pub free_shipping_threshold: Money,
}

impl CartTotals {
    /// Whether checkout may proceed.
    pub fn checkout_enabled(&self) -> bool {
        self.selected_line_count > 0
    }

    /// Shipping actually charged.
    pub fn shipping_total(&self) -> Money {
        self.shipping_cost
            .checked_sub(self.shipping_discount)
            .unwrap_or_default()
    }

    /// How much more must be selected to get free shipping.
    pub fn amount_to_free_shipping(&self) -> Money {
        self.free_shipping_threshold
            .checked_sub(self.selected_subtotal)
            .filter(Money::is_positive)
            .unwrap_or_default()
    }

    /// Check if any discount applies.
    pub fn has_discounts(&self) -> bool {
        self.shipping_discount.is_positive() || self.coupon_discount.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{AppliedCoupon, CouponValue};
    use crate::catalog::ProductSnapshot;
    use crate::ids::ProductId;

    fn snapshot(id: u64, cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {}", id),
            unit_price: Money::new(cents),
            images: vec![format!("{}.jpg", id)],
            category: None,
            stock: 10,
        }
    }

    #[test]
    fn test_free_shipping_boundary() {
        let policy = PricingPolicy::default();

        let mut below = Cart::new();
        below.add_item(snapshot(1, 14999), 1).unwrap();
        let totals = policy.totals(&below).unwrap();
        assert_eq!(totals.shipping_discount, Money::zero());
        assert_eq!(totals.grand_total, Money::new(14999 + 2999));
        assert_eq!(totals.amount_to_free_shipping(), Money::new(1));

        let mut at = Cart::new();
        at.add_item(snapshot(1, 15000), 1).unwrap();
        let totals = policy.totals(&at).unwrap();
        assert_eq!(totals.shipping_discount, Money::new(2999));
        assert_eq!(totals.grand_total, Money::new(15000));
        assert_eq!(totals.shipping_total(), Money::zero());
    }

    #[test]
    fn test_only_selected_lines_counted() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 2).unwrap();
        cart.add_item(snapshot(2, 500), 3).unwrap();
        cart.toggle_selected(ProductId::new(2));

        let totals = PricingPolicy::default().totals(&cart).unwrap();
        assert_eq!(totals.selected_subtotal, Money::new(2000));
        assert_eq!(totals.selected_item_count, 2);
        assert_eq!(totals.selected_line_count, 1);
        assert!(totals.checkout_enabled());
    }

    #[test]
    fn test_nothing_selected_disables_checkout() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        cart.toggle_selected(ProductId::new(1));
        let totals = PricingPolicy::default().totals(&cart).unwrap();
        assert!(!totals.checkout_enabled());
        assert_eq!(totals.selected_subtotal, Money::zero());
    }

    #[test]
    fn test_coupon_discount_applied() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 10000), 1).unwrap();
        cart.coupon = Some(
            AppliedCoupon::new("SAVE20", CouponValue::Fixed { amount: Money::new(2000) }).unwrap(),
        );
        let totals = PricingPolicy::default().totals(&cart).unwrap();
        assert_eq!(totals.coupon_discount, Money::new(2000));
        assert_eq!(totals.grand_total, Money::new(10000 + 2999 - 2000));
        assert!(totals.has_discounts());
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            shipping_cost: Money::new(500),
            free_shipping_threshold: Money::new(1000),
            currency: Currency::USD,
        };
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 999), 1).unwrap();
        assert_eq!(policy.totals(&cart).unwrap().grand_total, Money::new(1499));
    }

    #[test]
    fn test_totals_overflow_is_error() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, i64::MAX / 2), 3).unwrap();
        assert_eq!(
            PricingPolicy::default().totals(&cart),
            Err(CommerceError::Overflow)
        );
    }
}
