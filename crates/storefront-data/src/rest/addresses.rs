use crate::services::AddressBook;
use crate::wire::{AddressPayload, AddressRecord};
use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use storefront_commerce::checkout::{Address, AddressDraft};
use storefront_commerce::ids::AddressId;
use tracing::instrument;

/// Address book over `/user/address`.
#[derive(Debug, Clone)]
pub struct RestAddressBook {
    client: ApiClient,
}

impl RestAddressBook {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AddressBook for RestAddressBook {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Address>, FetchError> {
        let records: Vec<AddressRecord> = self.client.get("/user/address").await?;
        records.into_iter().map(Address::try_from).collect()
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: &AddressDraft) -> Result<Address, FetchError> {
        draft.validate()?;
        let record: AddressRecord = self
            .client
            .post("/user/address", &AddressPayload { id: None, draft })
            .await?;
        Address::try_from(record)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: AddressId, draft: &AddressDraft) -> Result<Address, FetchError> {
        draft.validate()?;
        let record: AddressRecord = self
            .client
            .put("/user/address", &AddressPayload { id: Some(id), draft })
            .await?;
        Address::try_from(record)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AddressId) -> Result<(), FetchError> {
        self.client.delete(&format!("/user/address/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn draft() -> AddressDraft {
        AddressDraft {
            title: "Ev".to_string(),
            name: "Ayşe".to_string(),
            surname: "Yılmaz".to_string(),
            phone: "05321234567".to_string(),
            city: "İstanbul".to_string(),
            district: "Kadıköy".to_string(),
            neighborhood: "Moda".to_string(),
        }
    }

    fn book(server: &MockServer) -> RestAddressBook {
        let config = ApiConfig::new(server.uri()).with_token("tok-123");
        RestAddressBook::new(ApiClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_list_sends_raw_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/address"))
            .and(header("Authorization", "tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "Ev", "name": "Ayşe", "surname": "Yılmaz",
                 "phone": "05321234567", "city": "İstanbul", "district": "Kadıköy",
                 "neighborhood": "Moda"}
            ])))
            .mount(&server)
            .await;

        let addresses = book(&server).list().await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].full_name(), "Ayşe Yılmaz");
    }

    #[tokio::test]
    async fn test_update_puts_id_in_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/address"))
            .and(body_partial_json(json!({"id": 4, "city": "İstanbul"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4, "title": "Ev", "city": "İstanbul"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let address = book(&server).update(AddressId::new(4), &draft()).await.unwrap();
        assert_eq!(address.id, AddressId::new(4));
    }

    #[tokio::test]
    async fn test_invalid_draft_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut bad = draft();
        bad.phone = "123".to_string();
        let err = book(&server).create(&bad).await.unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/user/address/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        book(&server).delete(AddressId::new(9)).await.unwrap();
    }
}
