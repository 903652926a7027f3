//! Cart and line item types.

use crate::cart::{AppliedCoupon, CartTotals, PricingPolicy};
use crate::catalog::ProductSnapshot;
use crate::checkout::{AddressRef, PaymentSelection};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Holds at most one line per product. Lines keep insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart.
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    /// Delivery address.
    #[serde(default)]
    pub shipping_address: Option<AddressRef>,
    /// Invoice address.
    #[serde(default)]
    pub billing_address: Option<AddressRef>,
    /// Billing mirrors shipping while set.
    #[serde(default)]
    pub same_billing_address: bool,
    /// Selected payment method.
    #[serde(default)]
    pub payment: Option<PaymentSelection>,
    /// Applied coupon.
    #[serde(default)]
    pub coupon: Option<AppliedCoupon>,
    /// Time of last change.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            shipping_address: None,
            billing_address: None,
            same_billing_address: false,
            payment: None,
            coupon: None,
            updated_at: Utc::now(),
        }
    }

    /// Add an item to the cart.
    ///
    /// Adding a product already in the cart increases its quantity and
    /// leaves its selection and captured price alone. New lines start
    /// selected.
    ///
    /// Returns an error if quantity is not positive, the snapshot is
    /// incomplete (see [`ProductSnapshot::validate`]) or the new quantity
    /// would overflow.
    pub fn add_item(
        &mut self,
        product: ProductSnapshot,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        product.validate()?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
        } else {
            self.items.push(CartLineItem {
                product,
                quantity,
                selected: true,
            });
        }
        self.touch();
        Ok(())
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        match self.item_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Decrease quantity by one, never below one.
    pub fn decrement(&mut self, product_id: ProductId) -> bool {
        match self.item_mut(product_id) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Flip the selection of one line.
    pub fn toggle_selected(&mut self, product_id: ProductId) -> bool {
        match self.item_mut(product_id) {
            Some(item) => {
                item.selected = !item.selected;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Deselect everything if every line is selected, otherwise select
    /// everything. No-op on an empty cart.
    pub fn toggle_all_selected(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let select = !self.all_selected();
        for item in &mut self.items {
            item.selected = select;
        }
        self.touch();
        true
    }

    /// Check if every line is selected.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.selected)
    }

    /// Empty the cart and drop address, payment and coupon selections.
    pub fn clear(&mut self) {
        self.items.clear();
        self.shipping_address = None;
        self.billing_address = None;
        self.payment = None;
        self.coupon = None;
        self.touch();
    }

    /// Set the shipping address, mirroring it to billing when enabled.
    pub fn set_shipping_address(&mut self, address: AddressRef) {
        if self.same_billing_address {
            self.billing_address = Some(address.clone());
        }
        self.shipping_address = Some(address);
        self.touch();
    }

    /// Set a separate billing address. Turns off mirroring.
    pub fn set_billing_address(&mut self, address: AddressRef) {
        self.same_billing_address = false;
        self.billing_address = Some(address);
        self.touch();
    }

    /// Toggle billing mirroring. Enabling copies the current shipping address.
    pub fn set_same_billing_address(&mut self, same: bool) {
        self.same_billing_address = same;
        if same {
            self.billing_address = self.shipping_address.clone();
        }
        self.touch();
    }

    /// Billing address in effect.
    pub fn effective_billing_address(&self) -> Option<&AddressRef> {
        if self.same_billing_address {
            self.shipping_address.as_ref()
        } else {
            self.billing_address.as_ref()
        }
    }

    pub fn set_payment(&mut self, payment: PaymentSelection) {
        self.payment = Some(payment);
        self.touch();
    }

    pub fn clear_payment(&mut self) -> bool {
        let had = self.payment.take().is_some();
        if had {
            self.touch();
        }
        had
    }

    /// Apply a coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: AppliedCoupon) {
        self.coupon = Some(coupon);
        self.touch();
    }

    pub fn remove_coupon(&mut self) -> bool {
        let had = self.coupon.take().is_some();
        if had {
            self.touch();
        }
        had
    }

    /// Bring a loaded cart back in line with the rules [`Cart::add_item`]
    /// enforces. Lines with a quantity below one or an incomplete
    /// snapshot are dropped; a repeated product is folded into its first
    /// line. Returns the number of lines removed.
    pub fn repair(&mut self) -> usize {
        let before = self.items.len();
        let mut kept: Vec<CartLineItem> = Vec::with_capacity(before);
        for item in std::mem::take(&mut self.items) {
            if item.quantity < 1 || item.product.validate().is_err() {
                continue;
            }
            match kept.iter_mut().find(|k| k.product.id == item.product.id) {
                Some(first) => {
                    if let Some(quantity) = first.quantity.checked_add(item.quantity) {
                        first.quantity = quantity;
                    }
                }
                None => kept.push(item),
            }
        }
        self.items = kept;

        let removed = before - self.items.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Get a line by product ID.
    pub fn item(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }

    /// Selected lines in cart order.
    pub fn selected_items(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter().filter(|i| i.selected)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price the cart under a policy.
    pub fn totals(&self, policy: &PricingPolicy) -> Result<CartTotals, CommerceError> {
        policy.totals(self)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product fields captured at add time.
    pub product: ProductSnapshot,
    /// Quantity, at least one.
    pub quantity: i64,
    /// Only selected lines are checked out.
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl CartLineItem {
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .unit_price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::PaymentMethodRef;
    use crate::ids::{AddressId, PaymentMethodId};

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

    fn address(id: u64) -> AddressRef {
        AddressRef {
            id: AddressId::new(id),
            title: format!("Address {}", id),
            recipient: "Ayşe Yılmaz".to_string(),
            phone: "05321234567".to_string(),
            city: "İstanbul".to_string(),
            district: "Kadıköy".to_string(),
            neighborhood: "Moda".to_string(),
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(!cart.all_selected());
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        cart.add_item(snapshot(1, 1000), 2).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 3);
        assert!(cart.items[0].selected);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(2, 1000), 1).unwrap();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        cart.add_item(snapshot(2, 1000), 1).unwrap();
        let ids: Vec<u64> = cart.items.iter().map(|i| i.product_id().get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_add_invalid_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(snapshot(1, 1000), 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_quantity_overflow() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), i64::MAX).unwrap();
        assert_eq!(cart.add_item(snapshot(1, 1000), 1), Err(CommerceError::Overflow));
        assert_eq!(cart.items[0].quantity, i64::MAX);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        assert!(cart.remove_item(ProductId::new(1)));
        assert!(!cart.remove_item(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_floor() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        cart.add_item(snapshot(2, 1000), 1).unwrap();

        assert!(cart.update_quantity(ProductId::new(1), 3));
        assert_eq!(cart.item(ProductId::new(1)).unwrap().quantity, 3);

        assert!(cart.update_quantity(ProductId::new(1), 0));
        assert!(cart.item(ProductId::new(1)).is_none());

        assert!(cart.update_quantity(ProductId::new(2), -4));
        assert!(cart.is_empty());

        assert!(!cart.update_quantity(ProductId::new(9), 2));
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 2).unwrap();
        assert!(cart.decrement(ProductId::new(1)));
        assert!(!cart.decrement(ProductId::new(1)));
        assert_eq!(cart.item(ProductId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_toggle_all_symmetry() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        cart.add_item(snapshot(2, 1000), 1).unwrap();

        cart.toggle_all_selected();
        assert!(cart.items.iter().all(|i| !i.selected));
        cart.toggle_all_selected();
        assert!(cart.all_selected());

        // Mixed selection goes to all selected.
        cart.toggle_selected(ProductId::new(1));
        cart.toggle_all_selected();
        assert!(cart.all_selected());
    }

    #[test]
    fn test_toggle_all_empty_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.toggle_all_selected());
    }

    #[test]
    fn test_same_billing_mirrors_shipping() {
        let mut cart = Cart::new();
        cart.set_shipping_address(address(1));
        cart.set_same_billing_address(true);
        assert_eq!(cart.billing_address.as_ref().map(|a| a.id), Some(AddressId::new(1)));

        cart.set_shipping_address(address(2));
        assert_eq!(cart.billing_address.as_ref().map(|a| a.id), Some(AddressId::new(2)));

        cart.set_billing_address(address(3));
        assert!(!cart.same_billing_address);
        cart.set_shipping_address(address(4));
        assert_eq!(cart.billing_address.as_ref().map(|a| a.id), Some(AddressId::new(3)));
    }

    #[test]
    fn test_clear_drops_selections() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 1000), 1).unwrap();
        cart.set_shipping_address(address(1));
        cart.set_payment(PaymentSelection {
            method: PaymentMethodRef {
                id: PaymentMethodId::new(5),
                masked_number: "**** **** **** 4242".to_string(),
                name_on_card: "AYSE YILMAZ".to_string(),
                expire_month: 12,
                expire_year: 2030,
            },
            use_3d_secure: true,
        });
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.shipping_address.is_none());
        assert!(cart.payment.is_none());
    }

    #[test]
    fn test_add_rejects_incomplete_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, 20000), 1).unwrap();

        let mut blank_name = snapshot(2, 1000);
        blank_name.name = "  ".to_string();
        let mut no_images = snapshot(3, 1000);
        no_images.images.clear();
        let mut missing_id = snapshot(4, 1000);
        missing_id.id = ProductId::new(0);

        for bad in [
            blank_name,
            no_images,
            missing_id,
            snapshot(5, 0),
            snapshot(6, -15000),
        ] {
            let err = cart.add_item(bad, 1).unwrap_err();
            assert!(matches!(err, CommerceError::Validation(_)));
        }

        assert_eq!(cart.items.len(), 1);
        let totals = cart.totals(&PricingPolicy::default()).unwrap();
        assert_eq!(totals.selected_subtotal, Money::new(20000));
        assert_eq!(totals.shipping_discount, totals.shipping_cost);
    }

    #[test]
    fn test_repair_drops_and_merges_lines() {
        let mut cart: Cart = serde_json::from_str(
            r#"{"items":[
                {"product":{"id":1,"name":"A","unit_price":10.0,"images":["a.jpg"]},"quantity":2},
                {"product":{"id":2,"name":"B","unit_price":5.0,"images":["b.jpg"]},"quantity":0},
                {"product":{"id":1,"name":"A","unit_price":10.0,"images":["a.jpg"]},"quantity":3},
                {"product":{"id":3,"name":"","unit_price":5.0,"images":["c.jpg"]},"quantity":1},
                {"product":{"id":4,"name":"D","unit_price":-5.0,"images":["d.jpg"]},"quantity":1}
            ]}"#,
        )
        .unwrap();

        assert_eq!(cart.repair(), 4);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.repair(), 0);
    }

    #[test]
    fn test_rehydrates_minimal_document() {
        let cart: Cart = serde_json::from_str(
            r#"{"items":[{"product":{"id":1,"name":"A","unit_price":100.0,"images":["a.jpg"]},"quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert!(cart.items[0].selected);
        assert_eq!(cart.items[0].line_total().unwrap(), Money::new(20000));
    }
}
