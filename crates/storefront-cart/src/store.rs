//! The cart store service.

use crate::events::{CartEvent, CartSnapshot, EVENT_CAPACITY};
use crate::CartError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use storefront_cache::{Cache, CacheError};
use storefront_commerce::cart::{normalize_code, AppliedCoupon, Cart, CartTotals, PricingPolicy};
use storefront_commerce::catalog::ProductSnapshot;
use storefront_commerce::checkout::{
    AddressRef, CheckoutPhase, OrderConfirmation, OrderRequest, PaymentMethodRef,
    PaymentSelection,
};
use storefront_commerce::ids::ProductId;
use storefront_commerce::CommerceError;
use storefront_data::{Catalog, CouponService, FetchError, OrderService};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Storage key of the persisted cart document.
pub const CART_KEY: &str = "storefront:cart";

/// Owns a cart, persists it after every change and submits orders.
///
/// Mutations are synchronous. While an order submission is in flight
/// every mutation, and any second submission, fails with
/// `SubmissionInProgress`.
pub struct CartStore {
    cart: Mutex<Cart>,
    submitting: AtomicBool,
    cache: Cache,
    policy: PricingPolicy,
    orders: Arc<dyn OrderService>,
    coupons: Arc<dyn CouponService>,
    events: broadcast::Sender<CartEvent>,
    last_persistence_error: Mutex<Option<String>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("policy", &self.policy)
            .field("submitting", &self.submitting.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when a submission ends, including when the
/// submitting future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A 4xx other than an auth failure means the code itself was refused.
fn is_rejection(e: &FetchError) -> bool {
    matches!(e.status(), Some(status) if (400..500).contains(&status)) && !e.is_unauthorized()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CartStore {
    /// Open the store, rehydrating the cart persisted in `cache`.
    ///
    /// A document that cannot be read is discarded with a warning and the
    /// cart starts empty. A readable one is passed through [`Cart::repair`]
    /// and written back if anything was dropped.
    pub fn open(
        cache: Cache,
        orders: Arc<dyn OrderService>,
        coupons: Arc<dyn CouponService>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut last_persistence_error = None;

        let cart = match cache.get::<Cart>(CART_KEY) {
            Ok(Some(mut cart)) => {
                let removed = cart.repair();
                if removed > 0 {
                    warn!(removed, "repaired saved cart");
                    if let Err(e) = cache.set(CART_KEY, &cart) {
                        warn!(error = %e, "failed to save repaired cart");
                        last_persistence_error = Some(e.to_string());
                    }
                }
                debug!(lines = cart.items.len(), "rehydrated cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(CacheError::Serialize(e)) => {
                warn!(error = %e, "discarding unreadable cart document");
                if let Err(e) = cache.delete(CART_KEY) {
                    warn!(error = %e, "failed to remove unreadable cart document");
                }
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to load cart, starting empty");
                last_persistence_error = Some(e.to_string());
                Cart::new()
            }
        };

        Self {
            cart: Mutex::new(cart),
            submitting: AtomicBool::new(false),
            cache,
            policy: PricingPolicy::default(),
            orders,
            coupons,
            events,
            last_persistence_error: Mutex::new(last_persistence_error),
        }
    }

    /// Price carts under `policy` instead of the default.
    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Receive every subsequent [`CartEvent`].
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    // ---- reads ----

    /// A copy of the current cart.
    pub fn cart(&self) -> Cart {
        lock(&self.cart).clone()
    }

    /// Totals over the selected lines.
    pub fn totals(&self) -> Result<CartTotals, CartError> {
        Ok(self.policy.totals(&lock(&self.cart))?)
    }

    pub fn phase(&self) -> CheckoutPhase {
        let cart = lock(&self.cart);
        CheckoutPhase::of(&cart, self.is_submitting())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Cart, totals and phase read under one lock.
    pub fn snapshot(&self) -> CartSnapshot {
        let cart = lock(&self.cart);
        self.snapshot_of(&cart)
    }

    /// The most recent storage failure, cleared by the next successful write.
    pub fn last_persistence_error(&self) -> Option<String> {
        lock(&self.last_persistence_error).clone()
    }

    // ---- mutations ----

    /// Add `quantity` of a product; an existing line grows instead.
    pub fn add_item(&self, product: ProductSnapshot, quantity: i64) -> Result<(), CartError> {
        let id = product.id;
        self.mutate("add_item", |cart| cart.add_item(product, quantity).map(|_| true))?;
        debug!(product_id = %id, quantity, "added item");
        Ok(())
    }

    /// Look a product up in the catalog and add it.
    #[instrument(skip(self, catalog))]
    pub async fn add_from_catalog(
        &self,
        catalog: &dyn Catalog,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity).into());
        }
        let product = catalog.snapshot(product_id).await?;
        self.add_item(product, quantity)
    }

    pub fn remove_item(&self, product_id: ProductId) -> Result<bool, CartError> {
        self.mutate("remove_item", |cart| Ok(cart.remove_item(product_id)))
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> Result<bool, CartError> {
        self.mutate("update_quantity", |cart| {
            Ok(cart.update_quantity(product_id, quantity))
        })
    }

    /// Decrease a line's quantity by one, stopping at one.
    pub fn decrement(&self, product_id: ProductId) -> Result<bool, CartError> {
        self.mutate("decrement", |cart| Ok(cart.decrement(product_id)))
    }

    pub fn toggle_selected(&self, product_id: ProductId) -> Result<bool, CartError> {
        self.mutate("toggle_selected", |cart| Ok(cart.toggle_selected(product_id)))
    }

    pub fn toggle_all_selected(&self) -> Result<bool, CartError> {
        self.mutate("toggle_all_selected", |cart| Ok(cart.toggle_all_selected()))
    }

    pub fn clear(&self) -> Result<(), CartError> {
        self.mutate("clear", |cart| {
            cart.clear();
            Ok(true)
        })?;
        Ok(())
    }

    pub fn set_shipping_address(&self, address: AddressRef) -> Result<(), CartError> {
        self.mutate("set_shipping_address", |cart| {
            cart.set_shipping_address(address);
            Ok(true)
        })?;
        Ok(())
    }

    pub fn set_billing_address(&self, address: AddressRef) -> Result<(), CartError> {
        self.mutate("set_billing_address", |cart| {
            cart.set_billing_address(address);
            Ok(true)
        })?;
        Ok(())
    }

    pub fn set_same_billing_address(&self, same: bool) -> Result<(), CartError> {
        self.mutate("set_same_billing_address", |cart| {
            cart.set_same_billing_address(same);
            Ok(true)
        })?;
        Ok(())
    }

    pub fn set_payment(&self, method: PaymentMethodRef, use_3d_secure: bool) -> Result<(), CartError> {
        self.mutate("set_payment", |cart| {
            cart.set_payment(PaymentSelection {
                method,
                use_3d_secure,
            });
            Ok(true)
        })?;
        Ok(())
    }

    pub fn clear_payment(&self) -> Result<bool, CartError> {
        self.mutate("clear_payment", |cart| Ok(cart.clear_payment()))
    }

    /// Validate a coupon with the coupon service and apply it.
    ///
    /// A blank code is rejected without a network call. A code the service
    /// refuses leaves the cart unchanged.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&self, code: &str) -> Result<AppliedCoupon, CartError> {
        let code = normalize_code(code)?;
        let subtotal = {
            let cart = lock(&self.cart);
            self.ensure_idle()?;
            self.policy.totals(&cart)?.selected_subtotal
        };

        let value = self
            .coupons
            .validate(&code, subtotal)
            .await
            .map_err(|e| match e {
                FetchError::Validation(_) => {
                    CartError::Commerce(CommerceError::InvalidCouponCode(code.clone()))
                }
                e if is_rejection(&e) => {
                    CartError::Commerce(CommerceError::InvalidCouponCode(code.clone()))
                }
                other => CartError::Collaborator(other),
            })?;

        let coupon = AppliedCoupon::new(&code, value)?;
        let applied = coupon.clone();
        self.mutate("apply_coupon", move |cart| {
            cart.apply_coupon(coupon);
            Ok(true)
        })?;
        info!(code = %applied.code, "coupon applied");
        Ok(applied)
    }

    pub fn remove_coupon(&self) -> Result<bool, CartError> {
        self.mutate("remove_coupon", |cart| Ok(cart.remove_coupon()))
    }

    // ---- submission ----

    /// Submit the selected lines as an order.
    ///
    /// On success the cart is cleared and persisted. On failure the cart
    /// is left exactly as it was and the error is returned; nothing is
    /// retried.
    #[instrument(skip(self))]
    pub async fn submit_order(&self) -> Result<OrderConfirmation, CartError> {
        let (request, in_flight) = {
            let cart = lock(&self.cart);
            if self
                .submitting
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return Err(CommerceError::SubmissionInProgress.into());
            }
            let in_flight = InFlight(&self.submitting);
            let totals = self.policy.totals(&cart)?;
            let request = OrderRequest::from_cart(&cart, &totals, Utc::now())?;
            (request, in_flight)
        };

        self.emit(CartEvent::SubmissionStarted);
        debug!(lines = request.products.len(), price = %request.price, "submitting order");

        match self.orders.submit(&request).await {
            Ok(confirmation) => {
                let snapshot = {
                    let mut cart = lock(&self.cart);
                    cart.clear();
                    self.persist(&cart);
                    drop(in_flight);
                    self.snapshot_of(&cart)
                };
                info!(order_id = %confirmation.id, price = %request.price, "order placed");
                self.emit(CartEvent::Changed(snapshot));
                self.emit(CartEvent::OrderPlaced(confirmation.clone()));
                Ok(confirmation)
            }
            Err(e) => {
                drop(in_flight);
                warn!(error = %e, "order submission failed");
                self.emit(CartEvent::SubmissionFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Write the cart to storage now, returning any error.
    pub fn save(&self) -> Result<(), CartError> {
        let cart = lock(&self.cart);
        self.cache.set(CART_KEY, &*cart)?;
        *lock(&self.last_persistence_error) = None;
        Ok(())
    }

    // ---- internals ----

    fn ensure_idle(&self) -> Result<(), CommerceError> {
        if self.is_submitting() {
            Err(CommerceError::SubmissionInProgress)
        } else {
            Ok(())
        }
    }

    /// Apply `f` under the lock. When it reports a change the cart is
    /// persisted and observers are notified.
    fn mutate(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Cart) -> Result<bool, CommerceError>,
    ) -> Result<bool, CartError> {
        let snapshot = {
            let mut cart = lock(&self.cart);
            self.ensure_idle()?;
            if !f(&mut cart)? {
                debug!(operation, "no change");
                return Ok(false);
            }
            self.persist(&cart);
            self.snapshot_of(&cart)
        };
        debug!(operation, lines = snapshot.cart.items.len(), "cart updated");
        self.emit(CartEvent::Changed(snapshot));
        Ok(true)
    }

    fn persist(&self, cart: &Cart) {
        match self.cache.set(CART_KEY, cart) {
            Ok(()) => {
                *lock(&self.last_persistence_error) = None;
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "failed to persist cart");
                *lock(&self.last_persistence_error) = Some(message.clone());
                self.emit(CartEvent::PersistenceFailed(message));
            }
        }
    }

    fn snapshot_of(&self, cart: &Cart) -> CartSnapshot {
        CartSnapshot {
            cart: cart.clone(),
            totals: self.policy.totals(cart).ok(),
            phase: CheckoutPhase::of(cart, self.is_submitting()),
        }
    }

    fn emit(&self, event: CartEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_rejection_statuses() {
        let http = |status| FetchError::Http {
            status,
            message: String::new(),
        };
        assert!(is_rejection(&http(404)));
        assert!(is_rejection(&http(422)));
        assert!(!is_rejection(&http(401)));
        assert!(!is_rejection(&http(500)));
        assert!(!is_rejection(&FetchError::Timeout));
    }

    #[test]
    fn test_in_flight_guard_resets_flag() {
        let flag = AtomicBool::new(true);
        drop(InFlight(&flag));
        assert!(!flag.load(Ordering::Acquire));
    }
}
