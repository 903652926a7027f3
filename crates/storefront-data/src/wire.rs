//! Wire records for the storefront backend.
//!
//! Response records are converted into domain types here so nothing
//! downstream sees a half-filled payload.

use crate::FetchError;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::CouponValue;
use storefront_commerce::checkout::{
    mask_card_number, Address, AddressDraft, CardDraft, PaymentMethodRef,
};
use storefront_commerce::ids::{AddressId, PaymentMethodId};
use storefront_commerce::Money;

/// Address as returned by `/user/address`.
#[derive(Debug, Deserialize)]
pub(crate) struct AddressRecord {
    id: AddressId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    surname: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    neighborhood: Option<String>,
}

impl TryFrom<AddressRecord> for Address {
    type Error = FetchError;

    fn try_from(record: AddressRecord) -> Result<Self, Self::Error> {
        if record.id.get() == 0 {
            return Err(FetchError::Validation("address id is missing".into()));
        }
        let city = record.city.unwrap_or_default();
        if city.trim().is_empty() {
            return Err(FetchError::Validation(format!(
                "address {} has no city",
                record.id
            )));
        }
        Ok(Address {
            id: record.id,
            title: record.title.unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            surname: record.surname.unwrap_or_default(),
            phone: record.phone.unwrap_or_default(),
            city,
            district: record.district.unwrap_or_default(),
            neighborhood: record.neighborhood.unwrap_or_default(),
        })
    }
}

/// Body for creating or updating an address.
#[derive(Debug, Serialize)]
pub(crate) struct AddressPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    #[serde(flatten)]
    pub draft: &'a AddressDraft,
}

/// Saved card as returned by `/user/card`.
#[derive(Deserialize)]
pub(crate) struct CardRecord {
    id: PaymentMethodId,
    card_no: String,
    expire_month: u8,
    expire_year: u16,
    #[serde(default, alias = "card_name")]
    name_on_card: Option<String>,
}

impl TryFrom<CardRecord> for PaymentMethodRef {
    type Error = FetchError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        if !(1..=12).contains(&record.expire_month) {
            return Err(FetchError::Validation(format!(
                "card {} has invalid expiry month {}",
                record.id, record.expire_month
            )));
        }
        Ok(PaymentMethodRef {
            id: record.id,
            masked_number: mask_card_number(&record.card_no),
            name_on_card: record.name_on_card.unwrap_or_default(),
            expire_month: record.expire_month,
            expire_year: record.expire_year,
        })
    }
}

/// Body for saving a card. Holds the raw number only for the request.
#[derive(Serialize)]
pub(crate) struct CardPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<PaymentMethodId>,
    card_no: &'a str,
    expire_month: u8,
    expire_year: u16,
    name_on_card: &'a str,
}

impl<'a> CardPayload<'a> {
    pub fn new(id: Option<PaymentMethodId>, card: &'a CardDraft) -> Self {
        Self {
            id,
            card_no: card.card_number().expose_secret(),
            expire_month: card.expire_month,
            expire_year: card.expire_year,
            name_on_card: card.name_on_card.trim(),
        }
    }
}

/// Body for coupon validation.
#[derive(Debug, Serialize)]
pub(crate) struct CouponRequest<'a> {
    pub code: &'a str,
    pub subtotal: Money,
}

/// Answer to a coupon validation.
#[derive(Debug, Deserialize)]
pub(crate) struct CouponResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub discount: Option<CouponValue>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_record_conversion() {
        let record: AddressRecord = serde_json::from_str(
            r#"{"id":5,"title":"Ev","name":"Ayşe","surname":null,"phone":"05321234567",
                "city":"İzmir","district":"Konak","neighborhood":"Alsancak"}"#,
        )
        .unwrap();
        let address = Address::try_from(record).unwrap();
        assert_eq!(address.id, AddressId::new(5));
        assert_eq!(address.surname, "");
    }

    #[test]
    fn test_address_record_without_city_rejected() {
        let record: AddressRecord = serde_json::from_str(r#"{"id":5,"title":"Ev"}"#).unwrap();
        assert!(matches!(
            Address::try_from(record),
            Err(FetchError::Validation(_))
        ));
    }

    #[test]
    fn test_card_record_is_masked() {
        let record: CardRecord = serde_json::from_str(
            r#"{"id":1,"card_no":"4242424242421234","expire_month":4,"expire_year":2031,"name_on_card":"AYSE"}"#,
        )
        .unwrap();
        let card = PaymentMethodRef::try_from(record).unwrap();
        assert_eq!(card.masked_number, "**** **** **** 1234");
        let json = serde_json::to_string(&card).unwrap();
        assert!(!json.contains("4242424242421234"));
    }

    #[test]
    fn test_address_payload_flattens_draft() {
        let draft = AddressDraft {
            title: "Ev".to_string(),
            city: "İzmir".to_string(),
            ..AddressDraft::default()
        };
        let json = serde_json::to_value(AddressPayload {
            id: Some(AddressId::new(3)),
            draft: &draft,
        })
        .unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["title"], "Ev");
    }
}
