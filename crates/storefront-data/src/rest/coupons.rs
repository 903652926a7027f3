use crate::services::CouponService;
use crate::wire::{CouponRequest, CouponResponse};
use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use storefront_commerce::cart::CouponValue;
use storefront_commerce::Money;
use tracing::instrument;

/// Default coupon validation endpoint.
pub const DEFAULT_COUPON_PATH: &str = "/coupon/validate";

/// Coupon validation against the backend.
///
/// Expects `{"valid": true, "discount": {"type": "fixed", "amount": 20.0}}`.
/// A rejected code comes back as `valid: false` or a 4xx status.
#[derive(Debug, Clone)]
pub struct RestCoupons {
    client: ApiClient,
    path: String,
}

impl RestCoupons {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            path: DEFAULT_COUPON_PATH.to_string(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

#[async_trait]
impl CouponService for RestCoupons {
    #[instrument(skip(self, subtotal), fields(subtotal = %subtotal))]
    async fn validate(&self, code: &str, subtotal: Money) -> Result<CouponValue, FetchError> {
        let response: CouponResponse = self
            .client
            .post(&self.path, &CouponRequest { code, subtotal })
            .await?;
        match (response.valid, response.discount) {
            (true, Some(value)) => Ok(value),
            (true, None) => Err(FetchError::Parse(
                "coupon accepted without a discount".into(),
            )),
            (false, _) => Err(FetchError::Validation(
                response
                    .message
                    .unwrap_or_else(|| format!("coupon {} is not valid", code)),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn coupons(server: &MockServer) -> RestCoupons {
        RestCoupons::new(ApiClient::new(&ApiConfig::new(server.uri())).unwrap())
    }

    #[tokio::test]
    async fn test_valid_coupon() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/coupon/validate"))
            .and(body_json(json!({"code": "SAVE10", "subtotal": 200.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "valid": true,
                "discount": {"type": "percentage", "percent": 10}
            })))
            .mount(&server)
            .await;

        let value = coupons(&server)
            .validate("SAVE10", Money::new(20000))
            .await
            .unwrap();
        assert_eq!(value, CouponValue::Percentage { percent: 10.0 });
    }

    #[tokio::test]
    async fn test_rejected_coupon() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/coupon/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "valid": false, "message": "expired"
            })))
            .mount(&server)
            .await;

        let err = coupons(&server)
            .validate("OLD", Money::new(20000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid record: expired");
    }

    #[tokio::test]
    async fn test_custom_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/coupons/check"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "valid": true, "discount": {"type": "fixed", "amount": 15}
            })))
            .mount(&server)
            .await;

        let value = coupons(&server)
            .with_path("/api/coupons/check")
            .validate("X", Money::new(1000))
            .await
            .unwrap();
        assert_eq!(value, CouponValue::Fixed { amount: Money::new(1500) });
    }
}
