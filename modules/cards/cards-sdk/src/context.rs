use uuid::Uuid;

/// Profile fields the account store keeps for every account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountProfile {
    pub username: String,
    pub full_name: Option<String>,
}

impl AccountProfile {
    /// Display name used to seed a new card: the full name, else the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// `AccountContext` carries the signed-in account for one request.
///
/// It is built at the HTTP boundary from the session store and passed
/// explicitly to every operation that acts on behalf of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    account_id: Uuid,
    email: Option<String>,
    profile: AccountProfile,
}

impl AccountContext {
    #[must_use]
    pub fn builder() -> AccountContextBuilder {
        AccountContextBuilder::default()
    }

    #[must_use]
    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn profile(&self) -> &AccountProfile {
        &self.profile
    }
}

#[derive(Default)]
pub struct AccountContextBuilder {
    account_id: Option<Uuid>,
    email: Option<String>,
    username: Option<String>,
    full_name: Option<String>,
}

impl AccountContextBuilder {
    #[must_use]
    pub fn account_id(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> AccountContext {
        AccountContext {
            account_id: self.account_id.unwrap_or_else(Uuid::new_v4),
            email: self.email,
            profile: AccountProfile {
                username: self.username.unwrap_or_default(),
                full_name: self.full_name,
            },
        }
    }
}
