//! Collaborators the domain talks to but does not own.

use async_trait::async_trait;
use bytes::Bytes;
use cards_sdk::AccountContext;
use uuid::Uuid;

use super::upload::Bucket;

/// Object storage for uploaded images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> anyhow::Result<()>;

    fn public_url_of(&self, bucket: Bucket, path: &str) -> String;

    async fn remove(&self, bucket: Bucket, path: &str) -> anyhow::Result<()>;
}

/// Resolves session tokens into accounts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Account of an active session.
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<AccountContext>>;

    /// Starts (or restores) the session for a known token.
    async fn sign_in(&self, token: &str) -> anyhow::Result<Option<AccountContext>>;

    async fn sign_out(&self, token: &str) -> anyhow::Result<()>;
}

/// Account profiles namespace, consulted so a card username never collides
/// with another account's profile username.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn profile_owner(&self, username: &str) -> anyhow::Result<Option<Uuid>>;
}
