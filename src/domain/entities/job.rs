//! Queue names and the import job payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Queues served by the queue service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueName {
    /// Raw HTML note files waiting to be split into notes.
    HtmlNote,
    /// Extracted notes waiting for ingredient parsing.
    Parser,
}

impl QueueName {
    pub const fn as_str(self) -> &'static str {
        match self {
            QueueName::HtmlNote => "html-note",
            QueueName::Parser => "parser",
        }
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded file handed to the queue service for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportJob {
    pub queue: QueueName,
    pub storage_key: String,
    pub file_name: String,
    pub size: u64,
    pub checksum: Option<String>,
    pub enqueued_at: DateTime<Utc>,
}
