use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// A unique index rejected the write. Concurrent creators of the same record race to this error.
    #[error("Duplicate record: {0}")]
    UniqueViolation(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => StorageError::UniqueViolation(db_err.message().to_string()),
            _ => StorageError::DatabaseError(e.to_string()),
        }
    }
}
