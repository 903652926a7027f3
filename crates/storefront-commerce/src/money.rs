//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront API
//! speaks decimal numbers (`29.99`), so `Money` serializes as one and is
//! rounded to the nearest cent on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display currencies.
///
/// Only formatting depends on the currency; amounts are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    TRY,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "TRY").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::TRY => "TRY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₺").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::TRY => "\u{20ba}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "TRY" => Some(Currency::TRY),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Format an amount with this currency's symbol (e.g., "₺49.99").
    pub fn format(&self, money: Money) -> String {
        format!("{}{}", self.symbol(), money)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in the smallest currency unit (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "f64", into = "f64")]
pub struct Money {
    amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(29.99);
    /// assert_eq!(price.amount_cents(), 2999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Amount in cents.
    pub const fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Add another amount, returning None on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Subtract another amount, returning None on overflow.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_sub(other.amount_cents).map(Money::new)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Calculate a percentage of this amount, rounded to the nearest cent.
    pub fn percentage(&self, percent: f64) -> Money {
        Money::new((self.amount_cents as f64 * percent / 100.0).round() as i64)
    }

    /// Sum amounts, returning None on overflow.
    pub fn try_sum(iter: impl IntoIterator<Item = Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(29.99).amount_cents(), 2999);
        assert_eq!(Money::from_decimal(149.99).amount_cents(), 14999);
        assert_eq!(Money::from_decimal(150.0).amount_cents(), 15000);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).to_string(), "49.99");
        assert_eq!(Money::new(5).to_string(), "0.05");
        assert_eq!(Money::new(-2000).to_string(), "-20.00");
        assert_eq!(Currency::TRY.format(Money::new(15000)), "\u{20ba}150.00");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(300);
        assert_eq!(a.checked_add(b), Some(Money::new(1300)));
        assert_eq!(a.checked_sub(b), Some(Money::new(700)));
        assert_eq!(a.checked_mul(3), Some(Money::new(3000)));
        assert_eq!(Money::new(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::new(10000);
        assert_eq!(m.percentage(10.0), Money::new(1000));
    }

    #[test]
    fn test_money_try_sum_overflow() {
        assert_eq!(
            Money::try_sum([Money::new(100), Money::new(250)]),
            Some(Money::new(350))
        );
        assert_eq!(Money::try_sum([Money::new(i64::MAX), Money::new(1)]), None);
    }

    #[test]
    fn test_money_serializes_as_decimal() {
        let json = serde_json::to_string(&Money::new(2999)).unwrap();
        assert_eq!(json, "29.99");
        let back: Money = serde_json::from_str("29.99").unwrap();
        assert_eq!(back, Money::new(2999));
        let whole: Money = serde_json::from_str("150").unwrap();
        assert_eq!(whole, Money::new(15000));
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("try"), Some(Currency::TRY));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
