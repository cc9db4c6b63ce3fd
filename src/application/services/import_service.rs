//! Import service: statistics for the import page and note uploads.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{ImportJob, ImportStats, QueueName};
use crate::domain::repositories::ImportRepository;
use crate::error::AppError;
use crate::infrastructure::queue::JobQueue;
use crate::storage::{ObjectUploader, UploadResult, build_object_key};

/// Largest accepted note file.
pub const MAX_NOTE_FILE_BYTES: usize = 10 * 1024 * 1024;

/// A file received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Requires an `.html`/`.htm` name. A declared content type must agree;
    /// `application/octet-stream` is what browsers send when they do not know.
    fn is_html(&self) -> bool {
        let name = self.file_name.to_ascii_lowercase();
        if !(name.ends_with(".html") || name.ends_with(".htm")) {
            return false;
        }

        match self.content_type.as_deref() {
            None => true,
            Some(ct) => ct.starts_with("text/html") || ct.starts_with("application/octet-stream"),
        }
    }
}

/// Result of an upload batch.
///
/// `failed` lists files that were stored but could not be queued; their objects
/// have been removed again so a resubmission starts clean.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub queued: Vec<UploadResult>,
    pub failed: Vec<String>,
}

/// Service behind the import page.
///
/// Statistics are read fresh on every call. Uploads are stored through the
/// [`ObjectUploader`] and announced to the queue service on the `html-note` queue.
pub struct ImportService<R, O, Q>
where
    R: ImportRepository + ?Sized,
    O: ObjectUploader + ?Sized,
    Q: JobQueue + ?Sized,
{
    repository: Arc<R>,
    uploader: Arc<O>,
    queue: Arc<Q>,
}

impl<R, O, Q> ImportService<R, O, Q>
where
    R: ImportRepository + ?Sized,
    O: ObjectUploader + ?Sized,
    Q: JobQueue + ?Sized,
{
    /// Creates a new import service.
    pub fn new(repository: Arc<R>, uploader: Arc<O>, queue: Arc<Q>) -> Self {
        Self {
            repository,
            uploader,
            queue,
        }
    }

    /// Loads the aggregate counts shown on the import page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_import_stats(&self) -> Result<ImportStats, AppError> {
        self.repository.get_import_stats().await
    }

    /// Stores uploaded note files and enqueues one `html-note` job per file.
    ///
    /// Every file is validated before anything is stored, and every file is
    /// stored before anything is queued. A storage failure removes the objects
    /// already written. A queue failure removes the objects of the files not yet
    /// queued; if some files were queued they are reported in
    /// [`ImportOutcome::queued`] and the rest in [`ImportOutcome::failed`].
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty batch, an empty or oversized file, or
    ///   a file that is not HTML
    /// - [`AppError::Internal`] when storage fails, or when the first job cannot
    ///   be queued
    pub async fn import_files(&self, files: Vec<UploadedFile>) -> Result<ImportOutcome, AppError> {
        if files.is_empty() {
            return Err(AppError::bad_request("No files selected", json!({})));
        }

        for file in &files {
            if !file.is_html() {
                return Err(AppError::bad_request(
                    "Only HTML note exports can be imported",
                    json!({ "file": file.file_name }),
                ));
            }
            if file.bytes.is_empty() {
                return Err(AppError::bad_request(
                    "File is empty",
                    json!({ "file": file.file_name }),
                ));
            }
            if file.bytes.len() > MAX_NOTE_FILE_BYTES {
                return Err(AppError::bad_request(
                    "File too large",
                    json!({ "file": file.file_name, "max_bytes": MAX_NOTE_FILE_BYTES }),
                ));
            }
        }

        let now = Utc::now();
        let mut stored: Vec<(String, UploadResult)> = Vec::with_capacity(files.len());

        for file in files {
            let unique = format!("{:016x}", rand::random::<u64>());
            let key = build_object_key(&file.file_name, &unique, now);
            let content_type = file.content_type.as_deref().unwrap_or("text/html");

            match self.uploader.upload(&key, file.bytes, content_type).await {
                Ok(uploaded) => stored.push((file.file_name, uploaded)),
                Err(e) => {
                    self.remove_objects(stored.iter().map(|(_, u)| u.key.as_str()))
                        .await;
                    return Err(e.into());
                }
            }
        }

        let mut outcome = ImportOutcome::default();
        let mut pending = stored.into_iter();

        while let Some((file_name, uploaded)) = pending.next() {
            let job = ImportJob {
                queue: QueueName::HtmlNote,
                storage_key: uploaded.key.clone(),
                file_name: file_name.clone(),
                size: uploaded.size,
                checksum: uploaded.checksum.clone(),
                enqueued_at: now,
            };

            if let Err(e) = self.queue.enqueue(&job).await {
                let rest: Vec<(String, UploadResult)> =
                    std::iter::once((file_name, uploaded)).chain(pending).collect();
                self.remove_objects(rest.iter().map(|(_, u)| u.key.as_str()))
                    .await;

                if outcome.queued.is_empty() {
                    return Err(e.into());
                }

                tracing::warn!(
                    error = %e,
                    queued = outcome.queued.len(),
                    failed = rest.len(),
                    "Import batch partially queued"
                );
                outcome.failed = rest.into_iter().map(|(name, _)| name).collect();
                return Ok(outcome);
            }

            tracing::info!(key = %uploaded.key, size = uploaded.size, "Note file queued for import");
            outcome.queued.push(uploaded);
        }

        Ok(outcome)
    }

    /// Best-effort removal of stored objects; failures are logged.
    async fn remove_objects<'a>(&self, keys: impl Iterator<Item = &'a str>) {
        for key in keys {
            if let Err(e) = self.uploader.delete(key).await {
                tracing::warn!(key, error = %e, "Failed to remove orphaned object");
            }
        }
    }
}
