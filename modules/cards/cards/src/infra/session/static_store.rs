//! Session store backed by a fixed token list from configuration.
//!
//! Configured tokens are never forgotten: signing out revokes a token and
//! signing in with it again restores the session.

use async_trait::async_trait;
use cards_sdk::AccountContext;
use cards_sdk::username::normalize_username;
use dashmap::{DashMap, DashSet};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SessionAccount;
use crate::domain::ports::{AccountDirectory, SessionStore};

pub struct StaticSessionStore {
    sessions: DashMap<String, AccountContext>,
    revoked: DashSet<String>,
    profiles: DashMap<String, Uuid>,
}

impl StaticSessionStore {
    #[must_use]
    pub fn new(accounts: &[SessionAccount]) -> Self {
        let sessions = DashMap::new();
        let profiles = DashMap::new();
        for account in accounts {
            let mut builder = AccountContext::builder()
                .account_id(account.account_id)
                .username(&account.username);
            if let Some(email) = &account.email {
                builder = builder.email(email);
            }
            if let Some(full_name) = &account.full_name {
                builder = builder.full_name(full_name);
            }
            sessions.insert(account.token.clone(), builder.build());
            profiles.insert(normalize_username(&account.username), account.account_id);
        }
        info!(accounts = accounts.len(), "Loaded static sessions");
        Self {
            sessions,
            revoked: DashSet::new(),
            profiles,
        }
    }
}

#[async_trait]
impl SessionStore for StaticSessionStore {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<AccountContext>> {
        if self.revoked.contains(token) {
            return Ok(None);
        }
        Ok(self.sessions.get(token).map(|entry| entry.value().clone()))
    }

    async fn sign_in(&self, token: &str) -> anyhow::Result<Option<AccountContext>> {
        let Some(ctx) = self.sessions.get(token).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        if self.revoked.remove(token).is_some() {
            debug!(user_id = %ctx.account_id(), "Restored revoked session");
        }
        Ok(Some(ctx))
    }

    async fn sign_out(&self, token: &str) -> anyhow::Result<()> {
        if self.sessions.contains_key(token) {
            self.revoked.insert(token.to_owned());
        }
        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for StaticSessionStore {
    async fn profile_owner(&self, username: &str) -> anyhow::Result<Option<Uuid>> {
        Ok(self.profiles.get(username).map(|entry| *entry.value()))
    }
}
