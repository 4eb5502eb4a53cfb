use crate::domain::error::DomainError;

use super::problem::{ErrorCode, Problem};

/// Map a domain error to an RFC 9457 Problem using the error catalog.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    match e {
        DomainError::NotFound => ErrorCode::NOT_FOUND.with_context("Card not found", instance),
        DomainError::Validation { field, message } => ErrorCode::VALIDATION
            .with_context(format!("Validation error on '{field}': {message}"), instance),
        DomainError::UsernameTaken { username } => ErrorCode::USERNAME_TAKEN.with_context(
            format!("Username '{username}' is already taken"),
            instance,
        ),
        DomainError::Upload(rejection) => {
            ErrorCode::UPLOAD_REJECTED.with_context(rejection.to_string(), instance)
        }
        DomainError::Unauthenticated => {
            ErrorCode::UNAUTHENTICATED.with_context("Authentication required", instance)
        }
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "Blob storage error");
            ErrorCode::INTERNAL.with_context("An internal storage error occurred", instance)
        }
        DomainError::Database(err) => {
            tracing::error!(error = ?err, "Database error occurred");
            ErrorCode::INTERNAL.with_context("An internal database error occurred", instance)
        }
    }
}

/// Lets `?` work in handlers.
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
