//! User account records.

use serde::{Deserialize, Serialize};

use crate::api::UserId;

/// A registered user account.
///
/// `password_digest` is the salted SHA-256 digest produced by
/// [`crate::services::users::new_password_digest`]; accounts created via
/// Google sign-in carry a placeholder digest that can never verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub google_id: Option<String>,
}

/// Data required to create a new user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub google_id: Option<String>,
}
