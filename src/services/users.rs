//! Account registration and authentication.
//!
//! Passwords are stored as `salt$digest` where the digest is
//! SHA-256 over `salt:password`, hex-encoded. Accounts created through
//! Google sign-in carry a placeholder that never verifies, so federated
//! accounts cannot be entered through the password form.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::api::UserId;
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::NewUser;

/// Digest stored for accounts that only authenticate through Google.
const GOOGLE_AUTH_PLACEHOLDER: &str = "!google-auth";

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Produce a fresh salted digest for storage.
pub fn new_password_digest(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest(&salt, password))
}

/// Check a password against a stored digest. Malformed digests (including
/// the Google placeholder) never verify.
pub fn verify_password(stored: &str, password: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest(salt, password) == expected,
        None => false,
    }
}

/// Register a new account from the manual form.
pub async fn register(
    repo: &dyn FullRepository,
    username: &str,
    password: &str,
    email: &str,
) -> RepositoryResult<UserId> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(RepositoryError::validation(
            "Username, password, and email are required",
        ));
    }

    repo.create_user(NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_digest: new_password_digest(password),
        google_id: None,
    })
    .await
}

/// Authenticate a manual login. Returns `None` on unknown username or
/// wrong password; the caller cannot tell which.
pub async fn login(
    repo: &dyn FullRepository,
    username: &str,
    password: &str,
) -> RepositoryResult<Option<UserId>> {
    let user = repo.find_user_by_username(username.trim()).await?;
    Ok(user
        .filter(|u| verify_password(&u.password_digest, password))
        .map(|u| u.id))
}

/// Google sign-in with registration fallback (used on the register page).
///
/// Matches by Google id first, then links by email, and finally creates a
/// fresh account carrying the Google profile name.
pub async fn login_or_register_google(
    repo: &dyn FullRepository,
    google_id: &str,
    email: &str,
    name: &str,
) -> RepositoryResult<UserId> {
    if let Some(user) = repo.find_user_by_google(google_id).await? {
        return Ok(user.id);
    }

    if let Some(user) = repo.find_user_by_email(email).await? {
        repo.link_google_account(user.id, google_id).await?;
        return Ok(user.id);
    }

    repo.create_user(NewUser {
        username: name.to_string(),
        email: email.to_string(),
        password_digest: GOOGLE_AUTH_PLACEHOLDER.to_string(),
        google_id: Some(google_id.to_string()),
    })
    .await
}

/// Strict Google sign-in (used on the login page): authenticates only
/// accounts that already exist, matched by Google id or email.
pub async fn login_google_strict(
    repo: &dyn FullRepository,
    google_id: &str,
    email: &str,
) -> RepositoryResult<Option<UserId>> {
    if let Some(user) = repo.find_user_by_google(google_id).await? {
        return Ok(Some(user.id));
    }

    if let Some(user) = repo.find_user_by_email(email).await? {
        // Linking failure must not block the login itself.
        if let Err(e) = repo.link_google_account(user.id, google_id).await {
            log::warn!("Failed to link Google id to account {}: {}", user.id, e);
        }
        return Ok(Some(user.id));
    }

    Ok(None)
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod users_tests;
