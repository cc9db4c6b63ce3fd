//! Diagnostic endpoint for the queue service.

use std::io::ErrorKind;

use axum::{Json, extract::State};
use serde::Serialize;
use tokio::fs;

use crate::domain::entities::QueueName;
use crate::error::AppError;
use crate::queue_service::QueueState;

/// Diagnostic report returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct QueueHealthResponse {
    pub queues: QueueNames,
    pub redis: RedisTarget,
    pub directory: DirectoryListing,
}

/// Names of the queues this service consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueNames {
    pub html_note: &'static str,
    pub parser: &'static str,
}

/// Raw `REDISHOST` / `REDISPORT` values; `null` when unset.
#[derive(Debug, Serialize)]
pub struct RedisTarget {
    pub host: Option<String>,
    pub port: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DirectoryListing {
    pub path: String,
    pub exists: bool,
    pub files: Vec<String>,
}

/// Reports queue names, the Redis target and the working directory listing.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// ```json
/// {
///   "queues": { "htmlNote": "html-note", "parser": "parser" },
///   "redis": { "host": "redis.internal", "port": "6379" },
///   "directory": { "path": "/app", "exists": true, "files": ["Cargo.toml", "src"] }
/// }
/// ```
///
/// # Errors
///
/// Returns `500` if the directory exists but cannot be listed.
pub async fn health_handler(
    State(state): State<QueueState>,
) -> Result<Json<QueueHealthResponse>, AppError> {
    let config = &state.config;
    let directory = list_directory(&config.directory).await?;

    Ok(Json(QueueHealthResponse {
        queues: QueueNames {
            html_note: QueueName::HtmlNote.as_str(),
            parser: QueueName::Parser.as_str(),
        },
        redis: RedisTarget {
            host: config.redis_host.clone(),
            port: config.redis_port.clone(),
        },
        directory,
    }))
}

/// Lists entry names in `path`, sorted. A missing directory is not an error.
async fn list_directory(path: &str) -> Result<DirectoryListing, AppError> {
    match fs::metadata(path).await {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(DirectoryListing {
                path: path.to_string(),
                exists: false,
                files: Vec::new(),
            });
        }
        Err(e) => return Err(e.into()),
        Ok(_) => {}
    }

    let mut entries = fs::read_dir(path).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        files.push(entry.file_name().to_string_lossy().into_owned());
    }
    files.sort();

    Ok(DirectoryListing {
        path: path.to_string(),
        exists: true,
        files,
    })
}
