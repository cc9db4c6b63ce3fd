//! User entity.

use chrono::{DateTime, Utc};

/// An account that can sign in to the web application.
///
/// `password_hash` holds the salted keyed hash produced by
/// [`crate::auth::token::hash_password`], never the password itself.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Normalizes an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
