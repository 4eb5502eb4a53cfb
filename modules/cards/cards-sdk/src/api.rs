//! `CardsApi` trait definition.
//!
//! Account-scoped methods take an [`AccountContext`]; publishing is anonymous.

use async_trait::async_trait;

use crate::context::AccountContext;
use crate::errors::CardsError;
use crate::models::{Card, CardDraft, PublicCard, SaveOutcome, UsernameAvailability};

/// Public API trait for the cards module.
#[async_trait]
pub trait CardsApi: Send + Sync {
    /// Card of the current account, if one was saved.
    async fn get_card(&self, ctx: &AccountContext) -> Result<Option<Card>, CardsError>;

    /// Card of the current account, creating the seeded default when missing.
    async fn ensure_card(&self, ctx: &AccountContext) -> Result<Card, CardsError>;

    /// Insert-or-update the account's card with a full field set.
    async fn save_card(
        &self,
        ctx: &AccountContext,
        draft: CardDraft,
    ) -> Result<(Card, SaveOutcome), CardsError>;

    /// Best-effort pre-check; the store's unique constraint is authoritative.
    async fn check_username_available(
        &self,
        ctx: Option<&AccountContext>,
        username: &str,
    ) -> Result<UsernameAvailability, CardsError>;

    /// Look up a card for anonymous viewing by exact username.
    async fn resolve_public(&self, username: &str) -> Result<Option<PublicCard>, CardsError>;
}
