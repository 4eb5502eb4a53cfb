use cards_sdk::errors::CardsError;

use super::upload::UploadRejection;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Card not found")]
    NotFound,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Upload rejected: {0}")]
    Upload(UploadRejection),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Blob storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Text shown to a signed-in user in an inline banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::UsernameTaken { username } => {
                format!("Username '{username}' is already taken. Please choose another one.")
            }
            Self::Upload(rejection) => rejection.to_string(),
            Self::NotFound => "Card not found.".to_owned(),
            Self::Unauthenticated => "Please sign in to continue.".to_owned(),
            Self::Storage(_) | Self::Database(_) => {
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

impl From<UploadRejection> for DomainError {
    fn from(rejection: UploadRejection) -> Self {
        Self::Upload(rejection)
    }
}

impl From<DomainError> for CardsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => Self::not_found(),
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::UsernameTaken { username } => Self::conflict(username),
            DomainError::Upload(rejection) => Self::upload_rejected(rejection.to_string()),
            DomainError::Unauthenticated => Self::unauthenticated(),
            DomainError::Storage(_) | DomainError::Database(_) => Self::internal(),
        }
    }
}
