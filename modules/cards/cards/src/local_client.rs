use async_trait::async_trait;
use cards_sdk::{
    AccountContext, Card, CardDraft, CardsApi, CardsError, PublicCard, SaveOutcome,
    UsernameAvailability,
};
use std::sync::Arc;

use crate::domain::service::Service;

/// In-process `CardsApi` backed by the module's service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CardsApi for LocalClient {
    async fn get_card(&self, ctx: &AccountContext) -> Result<Option<Card>, CardsError> {
        self.service.get_card(ctx).await.map_err(Into::into)
    }

    async fn ensure_card(&self, ctx: &AccountContext) -> Result<Card, CardsError> {
        self.service.ensure_card(ctx).await.map_err(Into::into)
    }

    async fn save_card(
        &self,
        ctx: &AccountContext,
        draft: CardDraft,
    ) -> Result<(Card, SaveOutcome), CardsError> {
        self.service.save_card(ctx, draft).await.map_err(Into::into)
    }

    async fn check_username_available(
        &self,
        ctx: Option<&AccountContext>,
        username: &str,
    ) -> Result<UsernameAvailability, CardsError> {
        self.service
            .check_username_available(ctx, username)
            .await
            .map_err(Into::into)
    }

    async fn resolve_public(&self, username: &str) -> Result<Option<PublicCard>, CardsError> {
        self.service
            .resolve_public(username)
            .await
            .map_err(Into::into)
    }
}
