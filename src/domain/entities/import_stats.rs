//! Import statistics aggregate.

use serde::Serialize;

/// Counts shown on the import page.
///
/// Read-only: recomputed from the notes tables on every page render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ImportStats {
    pub note_count: i64,
    pub ingredient_count: i64,
    pub parsing_error_count: i64,
}

impl ImportStats {
    pub fn is_empty(&self) -> bool {
        self.note_count == 0 && self.ingredient_count == 0 && self.parsing_error_count == 0
    }
}
