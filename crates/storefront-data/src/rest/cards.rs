use crate::services::PaymentMethods;
use crate::wire::{CardPayload, CardRecord};
use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use storefront_commerce::checkout::{CardDraft, PaymentMethodRef};
use storefront_commerce::ids::PaymentMethodId;
use tracing::instrument;

/// Saved cards over `/user/card`.
///
/// Card numbers are masked as soon as they are read.
#[derive(Debug, Clone)]
pub struct RestPaymentMethods {
    client: ApiClient,
}

impl RestPaymentMethods {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentMethods for RestPaymentMethods {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<PaymentMethodRef>, FetchError> {
        let records: Vec<CardRecord> = self.client.get("/user/card").await?;
        records.into_iter().map(PaymentMethodRef::try_from).collect()
    }

    #[instrument(skip(self, card))]
    async fn create(&self, card: &CardDraft) -> Result<PaymentMethodRef, FetchError> {
        card.validate()?;
        let record: CardRecord = self
            .client
            .post("/user/card", &CardPayload::new(None, card))
            .await?;
        PaymentMethodRef::try_from(record)
    }

    #[instrument(skip(self, card))]
    async fn update(
        &self,
        id: PaymentMethodId,
        card: &CardDraft,
    ) -> Result<PaymentMethodRef, FetchError> {
        card.validate()?;
        let record: CardRecord = self
            .client
            .put("/user/card", &CardPayload::new(Some(id), card))
            .await?;
        PaymentMethodRef::try_from(record)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PaymentMethodId) -> Result<(), FetchError> {
        self.client.delete(&format!("/user/card/{}", id)).await
    }
}
