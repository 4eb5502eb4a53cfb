//! Request-scoped account resolution.
//!
//! [`attach_account`] reads a bearer token or the session cookie, resolves it
//! through the [`SessionStore`] and inserts the [`AccountContext`] into the
//! request extensions. Handlers read it back with [`MaybeAccount`] or
//! [`RequireAccount`].

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use cards_sdk::AccountContext;
use tracing::{debug, warn};

use super::problem::{ErrorCode, Problem};
use crate::domain::ports::SessionStore;

pub const SESSION_COOKIE: &str = "sterling_session";

/// Raw token the current session was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

pub async fn attach_account(
    State(sessions): State<Arc<dyn SessionStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers()) {
        match sessions.resolve(&token).await {
            Ok(Some(ctx)) => {
                request.extensions_mut().insert(ctx);
                request.extensions_mut().insert(SessionToken(token));
            }
            Ok(None) => debug!("Unknown session token"),
            Err(e) => warn!(error = %e, "Session lookup failed"),
        }
    }
    next.run(request).await
}

/// Bearer token first, then the session cookie.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}

/// `Set-Cookie` value that stores the session token.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session.
#[must_use]
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Account of the current request, when signed in.
#[derive(Debug, Clone)]
pub struct MaybeAccount(pub Option<AccountContext>);

impl<S> FromRequestParts<S> for MaybeAccount
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AccountContext>().cloned()))
    }
}

/// Account of the current request; rejects with 401 when absent.
#[derive(Debug, Clone)]
pub struct RequireAccount(pub AccountContext);

impl<S> FromRequestParts<S> for RequireAccount
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccountContext>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                ErrorCode::UNAUTHENTICATED
                    .with_context("Authentication required", parts.uri.path())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("sterling_session=def"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn reads_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sterling_session=tok-1; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("tok-1"));
    }

    #[test]
    fn ignores_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        headers.insert(header::COOKIE, HeaderValue::from_static("sterling_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        assert!(cleared_session_cookie().contains("Max-Age=0"));
        assert!(session_cookie("t").starts_with("sterling_session=t;"));
    }
}
