use async_trait::async_trait;
use cards_sdk::{Card, CardDraft, SaveOutcome};
use uuid::Uuid;

/// Column whose unique constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    UserId,
    Username,
}

/// Typed error a repository returns (inside `anyhow`) on a unique violation.
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated on {key:?}")]
pub struct UniqueViolation {
    pub key: UniqueKey,
}

#[async_trait]
pub trait CardsRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Card>>;

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Card>>;

    /// Inserts a new card; fails with [`UniqueViolation`] when the account
    /// or username already has one.
    async fn insert(&self, user_id: Uuid, draft: CardDraft) -> anyhow::Result<Card>;

    /// Inserts when the account has no card, else replaces every editable
    /// field of the existing one.
    async fn upsert(&self, user_id: Uuid, draft: CardDraft) -> anyhow::Result<(Card, SaveOutcome)>;
}
