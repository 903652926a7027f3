//! Local coupon rule with no backend.

use crate::services::CouponService;
use crate::FetchError;
use async_trait::async_trait;
use storefront_commerce::cart::{normalize_code, CouponValue};
use storefront_commerce::Money;

/// Default flat discount.
pub const DEFAULT_FLAT_AMOUNT: Money = Money::new(2000);

/// Accepts any non-blank code for a fixed amount off.
///
/// Only for setups without a coupon endpoint; it never rejects a code.
#[derive(Debug, Clone, Copy)]
pub struct FlatRateCoupons {
    amount: Money,
}

impl FlatRateCoupons {
    pub fn new(amount: Money) -> Self {
        Self { amount }
    }
}

impl Default for FlatRateCoupons {
    fn default() -> Self {
        Self::new(DEFAULT_FLAT_AMOUNT)
    }
}

#[async_trait]
impl CouponService for FlatRateCoupons {
    async fn validate(&self, code: &str, _subtotal: Money) -> Result<CouponValue, FetchError> {
        normalize_code(code)?;
        Ok(CouponValue::Fixed {
            amount: self.amount,
        })
    }
}
