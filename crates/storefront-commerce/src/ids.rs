//! Newtype IDs for type-safe identifiers.
//!
//! The storefront backend issues numeric identifiers for every record.
//! Wrapping them prevents passing an `AddressId` where a `ProductId` is
//! expected, while serializing as the bare number the API uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A backend-issued identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(AddressId);
define_id!(PaymentMethodId);
define_id!(OrderId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(123);
        assert_eq!(id.get(), 123);
    }

    #[test]
    fn test_id_parse() {
        let id: AddressId = " 42 ".parse().unwrap();
        assert_eq!(id, AddressId::new(42));
        assert!("abc".parse::<AddressId>().is_err());
    }

    #[test]
    fn test_id_display() {
        let id = OrderId::new(789);
        assert_eq!(format!("{}", id), "789");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(back, ProductId::new(7));
    }
}
