use crate::services::Catalog;
use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use storefront_commerce::catalog::{Category, Product, ProductFilter, ProductPage};
use storefront_commerce::ids::ProductId;
use tracing::instrument;

/// Catalog over `/products` and `/categories`.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    client: ApiClient,
}

impl RestCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Catalog for RestCatalog {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.client.get(&format!("/products/{}", id)).await
    }

    #[instrument(skip(self))]
    async fn products(&self, filter: &ProductFilter) -> Result<ProductPage, FetchError> {
        self.client
            .get_with_query("/products", &filter.query_pairs())
            .await
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.client.get("/categories").await
    }
}
