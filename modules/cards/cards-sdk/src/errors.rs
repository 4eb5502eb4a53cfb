//! Error types for the cards SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardsError {
    #[error("Card not found")]
    NotFound,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Username '{username}' is already taken")]
    Conflict { username: String },

    #[error("Upload rejected: {message}")]
    UploadRejected { message: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error")]
    Internal,
}

impl CardsError {
    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(username: impl Into<String>) -> Self {
        Self::Conflict {
            username: username.into(),
        }
    }

    #[must_use]
    pub fn upload_rejected(message: impl Into<String>) -> Self {
        Self::UploadRejected {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
