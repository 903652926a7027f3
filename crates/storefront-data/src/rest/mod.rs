//! REST implementations of the collaborator traits.
//!
//! Each service wraps a shared [`ApiClient`]. [`RestBackend`] builds the
//! full set from one client.

mod addresses;
mod cards;
mod catalog;
mod coupons;
mod orders;

pub use addresses::RestAddressBook;
pub use cards::RestPaymentMethods;
pub use catalog::RestCatalog;
pub use coupons::{RestCoupons, DEFAULT_COUPON_PATH};
pub use orders::RestOrders;

use crate::ApiClient;

/// All REST services over one client.
#[derive(Debug, Clone)]
pub struct RestBackend {
    pub catalog: RestCatalog,
    pub addresses: RestAddressBook,
    pub cards: RestPaymentMethods,
    pub orders: RestOrders,
    pub coupons: RestCoupons,
}

impl RestBackend {
    pub fn new(client: ApiClient) -> Self {
        Self {
            catalog: RestCatalog::new(client.clone()),
            addresses: RestAddressBook::new(client.clone()),
            cards: RestPaymentMethods::new(client.clone()),
            orders: RestOrders::new(client.clone()),
            coupons: RestCoupons::new(client),
        }
    }
}
