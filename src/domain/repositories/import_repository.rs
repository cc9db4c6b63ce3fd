//! Repository trait for import statistics.

use crate::domain::entities::ImportStats;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the aggregate counts of imported notes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgImportRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportRepository: Send + Sync {
    /// Counts notes, parsed ingredient lines and parsing errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_import_stats(&self) -> Result<ImportStats, AppError>;
}
