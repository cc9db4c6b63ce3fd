//! Filesystem-backed uploader used when no remote client is wired in.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::types::{ObjectUploader, StorageError, UploadResult, sha256_hex};

/// Writes objects beneath `root`, mirroring the key as a relative path.
pub struct FsUploader {
    root: PathBuf,
    public_base_url: String,
}

impl FsUploader {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(key);
        let safe = !key.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !safe {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(path))
    }
}

#[async_trait]
impl ObjectUploader for FsUploader {
    async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadResult, StorageError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await?;
        file.write_all(&body).await?;
        file.flush().await?;

        let checksum = sha256_hex(&body);
        debug!(key, content_type, size = body.len(), "Stored object");

        Ok(UploadResult {
            key: key.to_string(),
            url: format!("{}/{}", self.public_base_url, key),
            size: body.len() as u64,
            checksum: Some(checksum),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = FsUploader::new(dir.path(), "https://cdn.peas.test/");

        let result = uploader
            .upload("notes/a.html", b"<p>peas</p>".to_vec(), "text/html")
            .await
            .unwrap();

        assert_eq!(result.key, "notes/a.html");
        assert_eq!(result.url, "https://cdn.peas.test/notes/a.html");
        assert_eq!(result.size, 11);
        assert_eq!(result.checksum, Some(sha256_hex(b"<p>peas</p>")));

        let stored = std::fs::read(dir.path().join("notes/a.html")).unwrap();
        assert_eq!(stored, b"<p>peas</p>");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsafe_keys() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = FsUploader::new(dir.path(), "/uploads");

        for key in ["", "../escape.html", "/etc/passwd", "notes/../../x"] {
            let result = uploader.upload(key, vec![1], "text/html").await;
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_delete_removes_file_and_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = FsUploader::new(dir.path(), "/uploads");

        uploader
            .upload("notes/a.html", b"<p>peas</p>".to_vec(), "text/html")
            .await
            .unwrap();
        uploader.delete("notes/a.html").await.unwrap();

        assert!(!dir.path().join("notes/a.html").exists());
        assert!(uploader.delete("notes/a.html").await.is_ok());
        assert!(matches!(
            uploader.delete("../a.html").await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
