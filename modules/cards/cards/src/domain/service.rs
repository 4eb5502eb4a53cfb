use std::sync::Arc;

use cards_sdk::username::normalize_username;
use cards_sdk::{AccountContext, Card, CardDraft, PublicCard, SaveOutcome, UsernameAvailability};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::ports::{AccountDirectory, BlobStore};
use super::repo::{CardsRepository, UniqueKey, UniqueViolation};
use super::upload::{Bucket, UploadCandidate, UploadPolicy, object_path, path_in_bucket};
use super::validation::{FormLimits, is_reserved, validate_draft};

pub struct ServiceConfig {
    pub base_url: String,
    pub limits: FormLimits,
    pub upload: UploadPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
            limits: FormLimits::default(),
            upload: UploadPolicy::default(),
        }
    }
}

pub struct Service {
    repo: Arc<dyn CardsRepository>,
    directory: Arc<dyn AccountDirectory>,
    blobs: Arc<dyn BlobStore>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(
        repo: Arc<dyn CardsRepository>,
        directory: Arc<dyn AccountDirectory>,
        blobs: Arc<dyn BlobStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            directory,
            blobs,
            config,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    #[must_use]
    pub fn limits(&self) -> &FormLimits {
        &self.config.limits
    }

    #[must_use]
    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.config.upload
    }

    pub async fn get_card(&self, ctx: &AccountContext) -> Result<Option<Card>, DomainError> {
        Ok(self.repo.find_by_user(ctx.account_id()).await?)
    }

    /// Returns the account's card, creating it from the account profile when
    /// it does not exist yet.
    pub async fn ensure_card(&self, ctx: &AccountContext) -> Result<Card, DomainError> {
        if let Some(card) = self.repo.find_by_user(ctx.account_id()).await? {
            return Ok(card);
        }

        let username = self.seed_username(ctx).await?;
        let name = match ctx.profile().display_name().trim() {
            "" => username.clone(),
            name => name.to_owned(),
        };
        let draft = CardDraft::seeded(name, username.clone());

        match self.repo.insert(ctx.account_id(), draft).await {
            Ok(card) => {
                info!(user_id = %ctx.account_id(), username = %card.username, "Created default card");
                Ok(card)
            }
            Err(err) => match unique_key(&err) {
                // Lost a race with another request for the same account.
                Some(UniqueKey::UserId) => self
                    .repo
                    .find_by_user(ctx.account_id())
                    .await?
                    .ok_or(DomainError::NotFound),
                Some(UniqueKey::Username) => Err(DomainError::username_taken(username)),
                None => Err(DomainError::Database(err)),
            },
        }
    }

    async fn seed_username(&self, ctx: &AccountContext) -> Result<String, DomainError> {
        let base = normalize_username(&ctx.profile().username);
        let base = if base.is_empty() {
            format!("user_{}", short_id(ctx.account_id()))
        } else {
            base
        };
        if self.username_status(Some(ctx), &base).await? == UsernameAvailability::Available {
            return Ok(base);
        }
        Ok(format!("{base}_{}", short_id(ctx.account_id())))
    }

    pub async fn save_card(
        &self,
        ctx: &AccountContext,
        draft: CardDraft,
    ) -> Result<(Card, SaveOutcome), DomainError> {
        let draft = validate_draft(draft, &self.config.limits)?;
        let username = draft.username.clone();

        if let Some(owner) = self.directory.profile_owner(&username).await?
            && owner != ctx.account_id()
        {
            return Err(DomainError::username_taken(username));
        }

        let (card, outcome) = self
            .repo
            .upsert(ctx.account_id(), draft)
            .await
            .map_err(|err| match unique_key(&err) {
                Some(UniqueKey::Username) => DomainError::username_taken(&username),
                _ => DomainError::Database(err),
            })?;

        info!(user_id = %ctx.account_id(), username = %card.username, ?outcome, "Saved card");
        Ok((card, outcome))
    }

    /// Best-effort pre-check; the store's unique constraint has the final say.
    pub async fn check_username_available(
        &self,
        ctx: Option<&AccountContext>,
        username: &str,
    ) -> Result<UsernameAvailability, DomainError> {
        let normalized = normalize_username(username);
        self.username_status(ctx, &normalized).await
    }

    async fn username_status(
        &self,
        ctx: Option<&AccountContext>,
        normalized: &str,
    ) -> Result<UsernameAvailability, DomainError> {
        if normalized.is_empty() {
            return Ok(UsernameAvailability::Invalid);
        }
        if is_reserved(normalized) {
            return Ok(UsernameAvailability::Reserved);
        }
        let caller = ctx.map(AccountContext::account_id);
        let card_owner = self.repo.find_by_username(normalized).await?.map(|c| c.user_id);
        let profile_owner = self.directory.profile_owner(normalized).await?;
        let taken = [card_owner, profile_owner]
            .into_iter()
            .flatten()
            .any(|owner| Some(owner) != caller);
        Ok(if taken {
            UsernameAvailability::Taken
        } else {
            UsernameAvailability::Available
        })
    }

    /// Anonymous lookup by exact stored username.
    pub async fn resolve_public(&self, username: &str) -> Result<Option<PublicCard>, DomainError> {
        let card = self.repo.find_by_username(username).await?;
        debug!(username, found = card.is_some(), "Resolved public card");
        Ok(card.map(PublicCard::new))
    }

    /// Validates and stores an image, returning its public URL.
    pub async fn upload_image(
        &self,
        ctx: &AccountContext,
        bucket: Bucket,
        candidate: UploadCandidate,
    ) -> Result<String, DomainError> {
        self.config.upload.check(&candidate)?;

        let path = object_path(ctx.account_id(), &candidate.file_name);
        self.blobs
            .upload(bucket, &path, candidate.bytes, &candidate.content_type)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let url = self.blobs.public_url_of(bucket, &path);
        info!(user_id = %ctx.account_id(), %bucket, %path, "Uploaded image");
        Ok(url)
    }

    /// Best-effort removal of an image the card no longer references.
    ///
    /// Only objects under the caller's own `{account_id}/` folder are
    /// removed; anything else is skipped. Failures are logged, never returned.
    pub async fn discard_image(&self, ctx: &AccountContext, bucket: Bucket, url: &str) {
        let Some(path) = path_in_bucket(url, bucket) else {
            debug!(%bucket, url, "Image URL is outside the bucket, nothing to remove");
            return;
        };
        if !is_owned_by(path, ctx.account_id()) {
            debug!(
                user_id = %ctx.account_id(),
                %bucket,
                path,
                "Skipping removal of image not owned by caller"
            );
            return;
        }
        if let Err(e) = self.blobs.remove(bucket, path).await {
            warn!(error = %e, %bucket, path, "Failed to delete previous image");
        }
    }

    /// Removes `previous` once `current` has replaced it.
    pub async fn discard_replaced(
        &self,
        ctx: &AccountContext,
        bucket: Bucket,
        previous: Option<&str>,
        current: &str,
    ) {
        if let Some(previous) = previous.filter(|p| *p != current) {
            self.discard_image(ctx, bucket, previous).await;
        }
    }
}

/// True when `path` sits under the account's folder without escaping it.
fn is_owned_by(path: &str, account_id: Uuid) -> bool {
    let Some(rest) = path.strip_prefix(&format!("{account_id}/")) else {
        return false;
    };
    !rest.is_empty()
        && rest
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn unique_key(err: &anyhow::Error) -> Option<UniqueKey> {
    err.downcast_ref::<UniqueViolation>().map(|v| v.key)
}

fn short_id(id: Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}
