//! Address types.

use crate::error::CommerceError;
use crate::ids::AddressId;
use serde::{Deserialize, Serialize};

/// An address-book entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    /// Label, e.g. "Home".
    pub title: String,
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    pub phone: String,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
}

impl Address {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {}/{}", self.neighborhood, self.district, self.city)
    }

    /// Summary kept on the cart.
    pub fn reference(&self) -> AddressRef {
        AddressRef {
            id: self.id,
            title: self.title.clone(),
            recipient: self.full_name(),
            phone: self.phone.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
            neighborhood: self.neighborhood.clone(),
        }
    }
}

/// Address selection stored on the cart, denormalized for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressRef {
    pub id: AddressId,
    pub title: String,
    pub recipient: String,
    pub phone: String,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
}

impl AddressRef {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {}/{}", self.neighborhood, self.district, self.city)
    }
}

/// Payload for creating or updating an address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AddressDraft {
    pub title: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
}

impl AddressDraft {
    /// Check that every field is filled and the phone is a local mobile
    /// number (`0` followed by ten digits).
    pub fn validate(&self) -> Result<(), CommerceError> {
        let fields = [
            ("title", &self.title),
            ("name", &self.name),
            ("surname", &self.surname),
            ("phone", &self.phone),
            ("city", &self.city),
            ("district", &self.district),
            ("neighborhood", &self.neighborhood),
        ];
        let blank: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !blank.is_empty() {
            return Err(CommerceError::Validation(format!(
                "address fields required: {}",
                blank.join(", ")
            )));
        }
        if !is_valid_phone(self.phone.trim()) {
            return Err(CommerceError::Validation(format!(
                "invalid phone number: {}",
                self.phone
            )));
        }
        Ok(())
    }
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with('0') && phone.bytes().all(|b| b.is_ascii_digit())
}
