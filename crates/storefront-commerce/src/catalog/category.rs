//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Department a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[serde(rename = "k")]
    Women,
    #[serde(rename = "e")]
    Men,
    #[default]
    #[serde(rename = "u", other)]
    Unisex,
}

impl Gender {
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Women => "Women",
            Gender::Men => "Men",
            Gender::Unisex => "Unisex",
        }
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// URL code (e.g., "k:tisort").
    #[serde(default)]
    pub code: String,
    /// Display title.
    pub title: String,
    /// Category image URL.
    #[serde(default)]
    pub img: Option<String>,
    /// Average rating of products in this category.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Department.
    #[serde(default)]
    pub gender: Gender,
}

impl Category {
    /// Reference used by cart snapshots.
    pub fn reference(&self) -> CategoryRef {
        CategoryRef {
            id: self.id,
            name: self.title.clone(),
        }
    }
}

/// Minimal category reference kept on cart lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}
