//! In-process session store and the authenticated-user extractor.
//!
//! Sessions replace any notion of a process-wide "logged in user": a login
//! mints an opaque bearer token, and every protected handler resolves the
//! `Authorization` header to a [`CurrentUser`] for that request only.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use parking_lot::RwLock;
use uuid::Uuid;

use super::error::AppError;
use super::state::AppState;
use crate::api::UserId;

/// Sessions expire this long after login.
const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct Session {
    user_id: UserId,
    created_at: Instant,
}

/// Shared session store. Clones share the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a session token for a user.
    pub fn create(&self, user_id: UserId) -> String {
        let token = Uuid::new_v4().to_string();
        self.inner.write().insert(
            token.clone(),
            Session {
                user_id,
                created_at: Instant::now(),
            },
        );
        token
    }

    /// Resolve a token to its user, dropping it when expired.
    pub fn resolve(&self, token: &str) -> Option<UserId> {
        let mut sessions = self.inner.write();
        match sessions.get(token) {
            Some(session) if session.created_at.elapsed() < SESSION_TTL => {
                Some(session.user_id)
            }
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Invalidate a token. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.inner.write().remove(token).is_some()
    }

    /// Number of live sessions (expired ones may still be counted until
    /// their next resolve).
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// The raw bearer token of the request.
pub struct SessionToken(pub String);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| SessionToken(token.to_string()))
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))
    }
}

/// The authenticated user of the request, resolved from the session store.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;
        state
            .sessions
            .resolve(&token)
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_revoke() {
        let store = SessionStore::new();
        let token = store.create(UserId::new(7));

        assert_eq!(store.resolve(&token), Some(UserId::new(7)));
        assert!(store.revoke(&token));
        assert_eq!(store.resolve(&token), None);
        assert!(!store.revoke(&token));
    }

    #[test]
    fn test_unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        assert_eq!(store.resolve("not-a-token"), None);
    }

    #[test]
    fn test_clones_share_sessions() {
        let store = SessionStore::new();
        let clone = store.clone();
        let token = store.create(UserId::new(1));
        assert_eq!(clone.resolve(&token), Some(UserId::new(1)));
    }
}
