use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with the requested id.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A unique or primary key constraint rejected the write.
    #[error("{entity} already exists")]
    Conflict { entity: &'static str },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection lock poisoned")]
    Poisoned,
}
