//! Object storage types and the uploader trait.

use std::{env, fmt};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::error::AppError;

/// Remote object store identity.
///
/// Loaded from `R2_ACCOUNT_ID`, `R2_ACCESS_KEY_ID`, `R2_SECRET_ACCESS_KEY`,
/// `R2_BUCKET_NAME` and `R2_PUBLIC_URL`. The secret never appears in `Debug` output.
#[derive(Clone)]
pub struct R2Config {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub public_url: Option<String>,
}

impl R2Config {
    /// Reads the object store identity from the environment.
    ///
    /// Returns `None` when `R2_BUCKET_NAME` is not set; the remaining fields
    /// default to empty strings and are rejected by [`R2Config::validate`].
    pub fn from_env() -> Option<Self> {
        let bucket_name = env::var("R2_BUCKET_NAME").ok()?;

        Some(Self {
            account_id: env::var("R2_ACCOUNT_ID").unwrap_or_default(),
            access_key_id: env::var("R2_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("R2_SECRET_ACCESS_KEY").unwrap_or_default(),
            bucket_name,
            public_url: env::var("R2_PUBLIC_URL").ok().filter(|u| !u.is_empty()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("R2_ACCOUNT_ID", &self.account_id),
            ("R2_ACCESS_KEY_ID", &self.access_key_id),
            ("R2_SECRET_ACCESS_KEY", &self.secret_access_key),
            ("R2_BUCKET_NAME", &self.bucket_name),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty when R2 is configured", name);
            }
        }

        if let Some(ref url) = self.public_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            anyhow::bail!("R2_PUBLIC_URL must be an http(s) URL, got '{}'", url);
        }

        Ok(())
    }

    /// Base URL under which stored objects are publicly reachable.
    ///
    /// Falls back to the account's bucket endpoint when no public URL is set.
    pub fn public_base_url(&self) -> String {
        match self.public_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.r2.cloudflarestorage.com/{}",
                self.account_id, self.bucket_name
            ),
        }
    }
}

impl fmt::Debug for R2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("R2Config")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("public_url", &self.public_url)
            .finish()
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub key: String,
    pub url: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key `{0}`")]
    InvalidKey(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidKey(key) => {
                AppError::bad_request("Invalid object key", json!({ "key": key }))
            }
            StorageError::Io(e) => {
                tracing::error!("Storage I/O error: {}", e);
                AppError::internal("Failed to store object", json!({}))
            }
        }
    }
}

/// Stores objects and reports where they landed.
///
/// # Implementations
///
/// - [`crate::storage::FsUploader`] - Local directory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// Stores `body` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for empty, absolute or traversing keys.
    async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadResult, StorageError>;

    /// Removes the object stored under `key`. A missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Builds a storage key for an uploaded note.
///
/// Format: `notes/YYYY/MM/DD/<unique>-<file name>` where the file name keeps only
/// ASCII alphanumerics, `.`, `-` and `_`.
pub fn build_object_key(file_name: &str, unique: &str, now: DateTime<Utc>) -> String {
    let sanitized: String = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_start_matches('.');
    let sanitized = if sanitized.is_empty() {
        "note.html"
    } else {
        sanitized
    };

    format!("notes/{}/{}-{}", now.format("%Y/%m/%d"), unique, sanitized)
}
