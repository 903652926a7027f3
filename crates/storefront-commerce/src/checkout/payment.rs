//! Payment method types.
//!
//! Raw card numbers only exist inside [`CardDraft`] while a card is being
//! saved. Everything the cart stores or sends with an order carries the
//! masked form.

use crate::error::CommerceError;
use crate::ids::PaymentMethodId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Mask a card number down to its last four digits.
///
/// ```
/// use storefront_commerce::checkout::mask_card_number;
/// assert_eq!(mask_card_number("4242 4242 4242 1234"), "**** **** **** 1234");
/// ```
pub fn mask_card_number(card_no: &str) -> String {
    let digits: Vec<char> = card_no.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "**** **** **** ****".to_string();
    }
    let last4: String = digits[digits.len() - 4..].iter().collect();
    format!("**** **** **** {}", last4)
}

/// A saved payment method as the cart keeps it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethodRef {
    pub id: PaymentMethodId,
    /// Masked number, e.g. `**** **** **** 1234`.
    pub masked_number: String,
    pub name_on_card: String,
    pub expire_month: u8,
    pub expire_year: u16,
}

impl PaymentMethodRef {
    /// Expiry as `MM/YY`.
    pub fn expiry_label(&self) -> String {
        format!("{:02}/{:02}", self.expire_month, self.expire_year % 100)
    }
}

/// The payment choice for checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSelection {
    pub method: PaymentMethodRef,
    #[serde(default)]
    pub use_3d_secure: bool,
}

/// Card details entered by the customer, before they are saved.
#[derive(Debug)]
pub struct CardDraft {
    card_no: SecretString,
    pub name_on_card: String,
    pub expire_month: u8,
    pub expire_year: u16,
    cvv: Option<SecretString>,
}

impl CardDraft {
    /// Create a draft. Spaces in the card number are dropped.
    pub fn new(
        card_no: impl Into<String>,
        name_on_card: impl Into<String>,
        expire_month: u8,
        expire_year: u16,
    ) -> Self {
        let digits: String = card_no.into().chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            card_no: SecretString::from(digits),
            name_on_card: name_on_card.into(),
            expire_month,
            expire_year,
            cvv: None,
        }
    }

    pub fn with_cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = Some(SecretString::from(cvv.into()));
        self
    }

    /// The raw card number.
    pub fn card_number(&self) -> &SecretString {
        &self.card_no
    }

    pub fn cvv(&self) -> Option<&SecretString> {
        self.cvv.as_ref()
    }

    pub fn masked_number(&self) -> String {
        mask_card_number(self.card_no.expose_secret())
    }

    /// Check the number has 16 digits, the expiry is well formed and the
    /// name is present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let number = self.card_no.expose_secret();
        if number.len() != 16 || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommerceError::Validation(
                "card number must be 16 digits".into(),
            ));
        }
        if self.name_on_card.trim().is_empty() {
            return Err(CommerceError::Validation("name on card is required".into()));
        }
        if !(1..=12).contains(&self.expire_month) {
            return Err(CommerceError::Validation(format!(
                "invalid expiry month: {}",
                self.expire_month
            )));
        }
        if !(1000..=9999).contains(&self.expire_year) {
            return Err(CommerceError::Validation(format!(
                "invalid expiry year: {}",
                self.expire_year
            )));
        }
        if let Some(cvv) = &self.cvv {
            let cvv = cvv.expose_secret();
            if !(3..=4).contains(&cvv.len()) || !cvv.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CommerceError::Validation("invalid security code".into()));
            }
        }
        Ok(())
    }
}
