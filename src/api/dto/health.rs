//! Response body of `GET /health`.

use serde::Serialize;

/// Aggregate state reported at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Healthy,
    Degraded,
}

/// Outcome of one dependency probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Overall,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// One entry per dependency the web application needs to serve pages.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub queue: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: Probe,
    pub message: String,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Probe::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Probe::Error,
            message: message.into(),
        }
    }
}

impl HealthChecks {
    /// `Healthy` only when every probe succeeded.
    pub fn overall(&self) -> Overall {
        if self.database.status == Probe::Ok && self.queue.status == Probe::Ok {
            Overall::Healthy
        } else {
            Overall::Degraded
        }
    }
}
