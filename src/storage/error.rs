use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to {op}: {source}")]
    Read {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to {op}: {source}")]
    Write {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
}

impl StorageError {
    pub(crate) fn read(op: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StorageError::Read { op, source }
    }

    pub(crate) fn write(op: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StorageError::Write { op, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// True when a write was rejected by a table constraint (e.g. a duplicate movie code).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StorageError::Write {
                source: rusqlite::Error::SqliteFailure(err, _),
                ..
            } => err.code == rusqlite::ErrorCode::ConstraintViolation,
            _ => false,
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
