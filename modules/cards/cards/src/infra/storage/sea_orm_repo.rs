use async_trait::async_trait;
use cards_sdk::{Card, CardDraft, SaveOutcome};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::repo::{CardsRepository, UniqueKey, UniqueViolation};

use super::entity::{self, Entity as CardEntity};
use super::mapper::{draft_to_active, new_card};

pub struct SeaOrmCardsRepository {
    db: DatabaseConnection,
}

impl SeaOrmCardsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, user_id: Uuid) -> Result<Option<entity::Model>, DbErr> {
        CardEntity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    async fn update_existing(
        &self,
        existing: entity::Model,
        draft: CardDraft,
    ) -> anyhow::Result<Card> {
        let mut active = draft_to_active(draft, OffsetDateTime::now_utc());
        active.id = ActiveValue::Unchanged(existing.id);
        active.user_id = ActiveValue::Unchanged(existing.user_id);
        active.created_at = ActiveValue::Unchanged(existing.created_at);
        let model = active.update(&self.db).await.map_err(classify)?;
        Ok(model.into())
    }
}

/// Turns unique-constraint failures into [`UniqueViolation`] so the domain
/// can tell a taken username from any other store error.
fn classify(err: DbErr) -> anyhow::Error {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        let key = if message.contains("user_id") {
            Some(UniqueKey::UserId)
        } else if message.contains("username") {
            Some(UniqueKey::Username)
        } else {
            None
        };
        if let Some(key) = key {
            return UniqueViolation { key }.into();
        }
    }
    err.into()
}

#[async_trait]
impl CardsRepository for SeaOrmCardsRepository {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Card>> {
        Ok(self.find_model(user_id).await?.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Card>> {
        let result = CardEntity::find()
            .filter(entity::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn insert(&self, user_id: Uuid, draft: CardDraft) -> anyhow::Result<Card> {
        let model = new_card(user_id, draft, OffsetDateTime::now_utc())
            .insert(&self.db)
            .await
            .map_err(classify)?;
        Ok(model.into())
    }

    async fn upsert(&self, user_id: Uuid, draft: CardDraft) -> anyhow::Result<(Card, SaveOutcome)> {
        if let Some(existing) = self.find_model(user_id).await? {
            let card = self.update_existing(existing, draft).await?;
            return Ok((card, SaveOutcome::Updated));
        }

        match new_card(user_id, draft.clone(), OffsetDateTime::now_utc())
            .insert(&self.db)
            .await
            .map_err(classify)
        {
            Ok(model) => Ok((model.into(), SaveOutcome::Created)),
            Err(err) => {
                let raced = err
                    .downcast_ref::<UniqueViolation>()
                    .is_some_and(|v| v.key == UniqueKey::UserId);
                if !raced {
                    return Err(err);
                }
                // Another request created the row in between; overwrite it.
                let existing = self.find_model(user_id).await?.ok_or(err)?;
                let card = self.update_existing(existing, draft).await?;
                Ok((card, SaveOutcome::Updated))
            }
        }
    }
}
