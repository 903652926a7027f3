//! Coupon types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Value of a validated coupon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponValue {
    /// Fixed amount off.
    Fixed { amount: Money },
    /// Percentage off (0.0 - 100.0).
    Percentage { percent: f64 },
}

impl CouponValue {
    /// Calculate the discount amount for a given subtotal.
    ///
    /// Never exceeds the subtotal and never goes negative.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if !subtotal.is_positive() {
            return Money::zero();
        }
        let raw = match self {
            CouponValue::Fixed { amount } => *amount,
            CouponValue::Percentage { percent } => subtotal.percentage(percent.clamp(0.0, 100.0)),
        };
        if raw.amount_cents() < 0 {
            Money::zero()
        } else {
            raw.min(subtotal)
        }
    }

    /// Short label, e.g. "20.00 off" or "10% off".
    pub fn label(&self) -> String {
        match self {
            CouponValue::Fixed { amount } => format!("{} off", amount),
            CouponValue::Percentage { percent } => format!("{}% off", percent),
        }
    }
}

/// A coupon accepted by the coupon service and applied to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    /// Normalized code (trimmed, uppercase).
    pub code: String,
    pub value: CouponValue,
    #[serde(default)]
    pub description: Option<String>,
}

impl AppliedCoupon {
    /// Create an applied coupon, rejecting blank codes.
    pub fn new(code: &str, value: CouponValue) -> Result<Self, CommerceError> {
        Ok(Self {
            code: normalize_code(code)?,
            value,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Trim and uppercase a coupon code.
pub fn normalize_code(code: &str) -> Result<String, CommerceError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CommerceError::InvalidCouponCode(code.to_string()));
    }
    Ok(code.to_uppercase())
}
