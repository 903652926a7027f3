use crate::services::OrderService;
use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use storefront_commerce::checkout::{OrderConfirmation, OrderRequest, OrderSummary};
use storefront_commerce::ids::OrderId;
use tracing::instrument;

/// Orders over `/order`.
#[derive(Debug, Clone)]
pub struct RestOrders {
    client: ApiClient,
}

impl RestOrders {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderService for RestOrders {
    #[instrument(skip(self, order), fields(address_id = %order.address_id, lines = order.products.len()))]
    async fn submit(&self, order: &OrderRequest) -> Result<OrderConfirmation, FetchError> {
        self.client.post("/order", order).await
    }

    #[instrument(skip(self))]
    async fn orders(&self) -> Result<Vec<OrderSummary>, FetchError> {
        self.client.get("/order").await
    }

    #[instrument(skip(self))]
    async fn order(&self, id: OrderId) -> Result<OrderSummary, FetchError> {
        self.client.get(&format!("/order/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiConfig;
    use serde_json::json;
    use storefront_commerce::checkout::OrderLineRequest;
    use storefront_commerce::ids::{AddressId, ProductId};
    use storefront_commerce::Money;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> OrderRequest {
        OrderRequest {
            address_id: AddressId::new(3),
            order_date: "2024-05-01T10:00:00Z".parse().unwrap(),
            card_no: "**** **** **** 4242".to_string(),
            card_name: "AYSE".to_string(),
            card_expire_month: 12,
            card_expire_year: 2030,
            price: Money::new(32990),
            products: vec![OrderLineRequest {
                product_id: ProductId::new(1),
                count: 2,
                detail: "Hırka".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_submit_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/order"))
            .and(body_partial_json(json!({
                "address_id": 3,
                "price": 329.9,
                "products": [{"product_id": 1, "count": 2, "detail": "Hırka"}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 501, "order_date": "2024-05-01T10:00:01", "price": 329.9
            })))
            .expect(1)
            .mount(&server)
            .await;

        let orders = RestOrders::new(ApiClient::new(&ApiConfig::new(server.uri())).unwrap());
        let confirmation = orders.submit(&request()).await.unwrap();
        assert_eq!(confirmation.id, OrderId::new(501));
        assert_eq!(confirmation.price, Some(Money::new(32990)));
    }

    #[tokio::test]
    async fn test_submit_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/order"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let orders = RestOrders::new(ApiClient::new(&ApiConfig::new(server.uri())).unwrap());
        let err = orders.submit(&request()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_order_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/order"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "price": 100.0, "status": "delivered", "products": []},
                {"id": 2, "price": 59.5}
            ])))
            .mount(&server)
            .await;

        let orders = RestOrders::new(ApiClient::new(&ApiConfig::new(server.uri())).unwrap());
        let list = orders.orders().await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].status.is_terminal());
    }
}
