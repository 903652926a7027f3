//! In-memory collaborators for cart store tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use storefront_cache::{Cache, CacheError, KeyValueStore, MemoryStore};
use storefront_cart::CartStore;
use storefront_commerce::cart::CouponValue;
use storefront_commerce::catalog::ProductSnapshot;
use storefront_commerce::checkout::{
    AddressRef, OrderConfirmation, OrderRequest, OrderSummary, PaymentMethodRef,
};
use storefront_commerce::ids::{AddressId, OrderId, PaymentMethodId, ProductId};
use storefront_commerce::Money;
use storefront_data::{CouponService, FetchError, OrderService};
use tokio::sync::Notify;

/// Records submitted orders; can fail or hold submissions open.
#[derive(Default)]
pub struct MockOrders {
    pub submitted: Mutex<Vec<OrderRequest>>,
    pub fail: AtomicBool,
    pub gate: Option<Arc<Notify>>,
    next_id: AtomicU64,
}

impl MockOrders {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let orders = Self::default();
        orders.fail.store(true, Ordering::SeqCst);
        Arc::new(orders)
    }

    /// Submissions block until `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            gate: Some(gate),
            ..Self::default()
        })
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderService for MockOrders {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderConfirmation, FetchError> {
        self.submitted.lock().unwrap().push(order.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::Http {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        let id = 1000 + self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(OrderConfirmation {
            id: OrderId::new(id),
            order_date: Some(order.order_date.to_rfc3339()),
            price: Some(order.price),
        })
    }

    async fn orders(&self) -> Result<Vec<OrderSummary>, FetchError> {
        Ok(Vec::new())
    }

    async fn order(&self, id: OrderId) -> Result<OrderSummary, FetchError> {
        Err(FetchError::Http {
            status: 404,
            message: format!("order {} not found", id),
        })
    }
}

/// Accepts `SAVE10` (10%) and `FLAT20` (20.00); rejects anything else.
pub struct MockCoupons;

#[async_trait]
impl CouponService for MockCoupons {
    async fn validate(&self, code: &str, _subtotal: Money) -> Result<CouponValue, FetchError> {
        match code {
            "SAVE10" => Ok(CouponValue::Percentage { percent: 10.0 }),
            "FLAT20" => Ok(CouponValue::Fixed {
                amount: Money::new(2000),
            }),
            "DOWN" => Err(FetchError::Timeout),
            _ => Err(FetchError::Validation(format!("unknown coupon {}", code))),
        }
    }
}

/// Store whose writes always fail.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
        Err(CacheError::Store("disk full".to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.inner.keys()
    }
}

pub fn product(id: u64, cents: i64) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        name: format!("Product {}", id),
        unit_price: Money::new(cents),
        images: vec![format!("https://cdn.example/{}.jpg", id)],
        category: None,
        stock: 10,
    }
}

pub fn address(id: u64) -> AddressRef {
    AddressRef {
        id: AddressId::new(id),
        title: "Ev".to_string(),
        recipient: "Ayşe Yılmaz".to_string(),
        phone: "05321234567".to_string(),
        city: "İstanbul".to_string(),
        district: "Kadıköy".to_string(),
        neighborhood: "Moda".to_string(),
    }
}

pub fn card(id: u64) -> PaymentMethodRef {
    PaymentMethodRef {
        id: PaymentMethodId::new(id),
        masked_number: "**** **** **** 4242".to_string(),
        name_on_card: "AYSE YILMAZ".to_string(),
        expire_month: 12,
        expire_year: 2030,
    }
}

pub fn store_with(cache: Cache, orders: Arc<MockOrders>) -> CartStore {
    CartStore::open(cache, orders, Arc::new(MockCoupons))
}

pub fn memory_store(orders: Arc<MockOrders>) -> CartStore {
    store_with(Cache::in_memory(), orders)
}
