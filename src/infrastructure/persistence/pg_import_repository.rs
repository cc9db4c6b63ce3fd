//! PostgreSQL implementation of import statistics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ImportStats;
use crate::domain::repositories::ImportRepository;
use crate::error::AppError;

/// PostgreSQL repository for import statistics.
pub struct PgImportRepository {
    pool: Arc<PgPool>,
}

impl PgImportRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportRepository for PgImportRepository {
    async fn get_import_stats(&self) -> Result<ImportStats, AppError> {
        let stats = sqlx::query_as::<_, ImportStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM notes) AS note_count,
                (SELECT COUNT(*) FROM parsed_ingredient_lines) AS ingredient_count,
                (SELECT COUNT(*) FROM parsing_errors) AS parsing_error_count
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(stats)
    }
}
