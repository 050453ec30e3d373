use thiserror::Error;
use validator::ValidationErrors;

pub use sqlx::Error as SqlxError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("An athlete is already registered with national id: {0}")]
    DuplicateNationalId(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("No athlete ids left to assign")]
    IdSpaceExhausted,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// SQLSTATE 2201W / 2201X: negative LIMIT or OFFSET.
    pub fn is_invalid_row_count(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if matches!(e.code().as_deref(), Some("2201W") | Some("2201X"))
        )
    }

    /// SQLSTATE 2200H: the id sequence reached its maximum value.
    pub fn is_sequence_exhausted(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("2200H")
        )
    }

    pub(crate) fn negative_row_count(limit: i64, offset: i64) -> Self {
        Self::InvalidPagination(format!(
            "limit and offset must not be negative (limit: {}, offset: {})",
            limit, offset
        ))
    }
}
