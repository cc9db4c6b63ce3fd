//! Authentication service: the login action, session validation and accounts.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use validator::ValidateEmail;

use crate::auth::token::{generate_session_token, hash_password, hash_token, verify_password};
use crate::domain::entities::user::normalize_email;
use crate::domain::entities::{NewSession, NewUser, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;

/// Minimum accepted password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Why a login attempt was refused.
///
/// The `Display` strings are shown to the user verbatim by the login form.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter your password.")]
    MissingPassword,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Something went wrong. Please try again.")]
    Internal(#[from] AppError),
}

/// A freshly issued session. `token` is the raw value for the cookie.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Service for signing users in and out.
///
/// Session tokens and passwords are hashed with HMAC-SHA256 keyed by `secret`;
/// an attacker with read-only database access cannot replay sessions or verify
/// password guesses offline without the server-side secret.
pub struct AuthService<U: UserRepository + ?Sized, S: SessionRepository + ?Sized> {
    users: Arc<U>,
    sessions: Arc<S>,
    secret: String,
    session_ttl: Duration,
}

impl<U: UserRepository + ?Sized, S: SessionRepository + ?Sized> AuthService<U, S> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository
    /// - `sessions` - session repository
    /// - `secret` - HMAC key; must match the value used when passwords were stored
    /// - `session_ttl` - lifetime of issued sessions
    pub fn new(users: Arc<U>, sessions: Arc<S>, secret: String, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions,
            secret,
            session_ttl,
        }
    }

    /// Verifies credentials and issues a session.
    ///
    /// # Errors
    ///
    /// - [`LoginError::InvalidEmail`] / [`LoginError::MissingPassword`] for malformed input
    /// - [`LoginError::InvalidCredentials`] for an unknown email or wrong password
    /// - [`LoginError::Internal`] on repository failures
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, LoginError> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(LoginError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(LoginError::MissingPassword);
        }

        let user = match self.users.find_by_email(&email).await? {
            Some(user) if verify_password(&self.secret, password, &user.password_hash) => user,
            _ => {
                tracing::info!("Rejected login attempt");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let token = generate_session_token()?;
        let expires_at = Utc::now() + self.session_ttl;

        self.sessions
            .create(NewSession {
                user_id: user.id,
                token_hash: hash_token(&self.secret, &token),
                expires_at,
            })
            .await?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginSession {
            user,
            token,
            expires_at,
        })
    }

    /// Resolves a raw session token to its user.
    ///
    /// Returns `Ok(None)` for unknown or expired sessions; expired sessions are
    /// deleted on sight.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on repository failures.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, AppError> {
        let token_hash = hash_token(&self.secret, token);

        let Some(session) = self.sessions.find_by_token_hash(&token_hash).await? else {
            return Ok(None);
        };

        if session.is_expired_at(Utc::now()) {
            tracing::debug!(session_id = session.id, "Session expired");
            if let Err(e) = self.sessions.delete_by_token_hash(&token_hash).await {
                tracing::warn!(session_id = session.id, "Failed to remove expired session: {}", e);
            }
            return Ok(None);
        }

        self.users.find_by_id(session.user_id).await
    }

    /// Ends the session identified by a raw token. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on repository failures.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let token_hash = hash_token(&self.secret, token);
        self.sessions.delete_by_token_hash(&token_hash).await
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email or a password shorter
    /// than [`MIN_PASSWORD_LENGTH`], and [`AppError::Conflict`] for a taken email.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(AppError::bad_request(
                "Invalid email address",
                json!({ "email": email }),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                "Password too short",
                json!({ "min_length": MIN_PASSWORD_LENGTH }),
            ));
        }

        let password_hash = hash_password(&self.secret, password)?;

        self.users
            .create(NewUser {
                email,
                password_hash,
            })
            .await
    }

    /// Lists all accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on repository failures.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Deletes expired sessions and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on repository failures.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        self.sessions.delete_expired().await
    }
}
