//! Product records and cart snapshots.

use crate::catalog::CategoryRef;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub index: u32,
}

/// A product as the catalog returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: Option<String>,
    /// List price.
    pub price: Money,
    /// Sale price, if the product is discounted.
    #[serde(default)]
    pub discount_price: Option<Money>,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Owning category ID.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Owning category, when the backend embeds it.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Product images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Average rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Units sold.
    #[serde(default)]
    pub sell_count: Option<i64>,
}

impl Product {
    /// Price a customer pays: the sale price when present and positive.
    pub fn effective_price(&self) -> Money {
        match self.discount_price {
            Some(sale) if sale.is_positive() => sale,
            _ => self.price,
        }
    }

    /// Check if the product is on sale.
    pub fn is_discounted(&self) -> bool {
        self.effective_price() < self.price
    }

    /// Check if any stock is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Validate the record and capture the fields a cart line keeps.
    pub fn snapshot(&self) -> Result<ProductSnapshot, CommerceError> {
        if self.id.get() == 0 {
            return Err(CommerceError::Validation("product id is missing".into()));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CommerceError::Validation(format!(
                "product {} has no name",
                self.id
            )));
        }
        let unit_price = self.effective_price();
        if !unit_price.is_positive() {
            return Err(CommerceError::Validation(format!(
                "product {} has non-positive price {}",
                self.id, unit_price
            )));
        }

        let mut images = self.images.clone();
        images.sort_by_key(|i| i.index);
        let images: Vec<String> = images
            .into_iter()
            .map(|i| i.url)
            .filter(|url| !url.trim().is_empty())
            .collect();
        if images.is_empty() {
            return Err(CommerceError::Validation(format!(
                "product {} has no images",
                self.id
            )));
        }

        let snapshot = ProductSnapshot {
            id: self.id,
            name: name.to_string(),
            unit_price,
            images,
            category: self.category.clone(),
            stock: self.stock,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Product fields cached on a cart line at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    /// Price captured when the item was added.
    pub unit_price: Money,
    /// Image URLs, first is the primary image.
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub stock: i64,
}

impl ProductSnapshot {
    /// Check the fields a cart line depends on: an id, a name, a positive
    /// unit price and at least one image.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.get() == 0 {
            return Err(CommerceError::Validation("product id is missing".into()));
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation(format!(
                "product {} has no name",
                self.id
            )));
        }
        if !self.unit_price.is_positive() {
            return Err(CommerceError::Validation(format!(
                "product {} has non-positive price {}",
                self.id, self.unit_price
            )));
        }
        if self.images.iter().all(|url| url.trim().is_empty()) {
            return Err(CommerceError::Validation(format!(
                "product {} has no images",
                self.id
            )));
        }
        Ok(())
    }

    /// Primary image URL.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Line description sent with an order.
    pub fn detail(&self) -> String {
        let name = self.name.trim();
        match (name.is_empty(), &self.category) {
            (true, _) => format!("Product #{}", self.id),
            (false, Some(category)) => format!("{} ({})", name, category.name),
            (false, None) => name.to_string(),
        }
    }
}

/// Product list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    RatingAsc,
    RatingDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price:asc",
            SortOrder::PriceDesc => "price:desc",
            SortOrder::RatingAsc => "rating:asc",
            SortOrder::RatingDesc => "rating:desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "price:asc" => Some(SortOrder::PriceAsc),
            "price:desc" => Some(SortOrder::PriceDesc),
            "rating:asc" => Some(SortOrder::RatingAsc),
            "rating:desc" => Some(SortOrder::RatingDesc),
            _ => None,
        }
    }
}

/// Query for a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<CategoryId>,
    /// Free-text filter.
    pub text: Option<String>,
    pub sort: Option<SortOrder>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ProductFilter {
    /// Query-string pairs for the listing endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            pairs.push(("filter", text.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPage {
    /// Total matches across all pages.
    #[serde(default)]
    pub total: u64,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Hırka".to_string(),
            description: None,
            price: Money::from_decimal(120.0),
            discount_price: Some(Money::from_decimal(99.9)),
            stock: 5,
            category_id: Some(CategoryId::new(2)),
            category: None,
            images: vec![
                ProductImage { url: "b.jpg".to_string(), index: 1 },
                ProductImage { url: "a.jpg".to_string(), index: 0 },
            ],
            rating: Some(4.5),
            sell_count: None,
        }
    }

    #[test]
    fn test_effective_price_prefers_discount() {
        let product = sample_product();
        assert_eq!(product.effective_price(), Money::from_decimal(99.9));
        assert!(product.is_discounted());
    }

    #[test]
    fn test_zero_discount_price_ignored() {
        let mut product = sample_product();
        product.discount_price = Some(Money::zero());
        assert_eq!(product.effective_price(), Money::from_decimal(120.0));
    }

    #[test]
    fn test_snapshot_orders_images() {
        let snapshot = sample_product().snapshot().unwrap();
        assert_eq!(snapshot.primary_image(), Some("a.jpg"));
        assert_eq!(snapshot.unit_price, Money::new(9990));
    }

    #[test]
    fn test_snapshot_rejects_invalid_records() {
        let mut no_images = sample_product();
        no_images.images.clear();
        assert!(matches!(no_images.snapshot(), Err(CommerceError::Validation(_))));

        let mut no_name = sample_product();
        no_name.name = "  ".to_string();
        assert!(no_name.snapshot().is_err());

        let mut free = sample_product();
        free.price = Money::zero();
        free.discount_price = None;
        assert!(free.snapshot().is_err());
    }

    #[test]
    fn test_detail_includes_category() {
        let mut snapshot = sample_product().snapshot().unwrap();
        assert_eq!(snapshot.detail(), "Hırka");
        snapshot.category = Some(CategoryRef {
            id: CategoryId::new(2),
            name: "Kadın".to_string(),
        });
        assert_eq!(snapshot.detail(), "Hırka (Kadın)");
    }

    #[test]
    fn test_product_deserialize_from_api() {
        let json = r#"{
            "id": 12, "name": "Gömlek", "description": "Pamuk",
            "price": 249.9, "stock": 3, "category_id": 4,
            "images": [{"url": "https://cdn/x.jpg", "index": 0}],
            "rating": 4.1, "sell_count": 20
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::new(24990));
        assert_eq!(product.discount_price, None);
        assert!(product.snapshot().is_ok());
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = ProductFilter {
            category: Some(CategoryId::new(3)),
            text: Some("  ".to_string()),
            sort: Some(SortOrder::PriceDesc),
            limit: Some(25),
            offset: None,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("category", "3".to_string()),
                ("sort", "price:desc".to_string()),
                ("limit", "25".to_string()),
            ]
        );
    }
}
