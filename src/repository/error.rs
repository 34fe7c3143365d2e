// ==========================================
// Carga de pedidos - repository error types
// ==========================================
// thiserror enum for the data-access layer. Uniqueness violations get
// their own variant so the pipeline can map them to the duplicate
// failures of the pre-checks instead of crashing.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Error de transacción: {0}")]
    DatabaseTransactionError(String),

    #[error("Error de consulta: {0}")]
    DatabaseQueryError(String),

    #[error("Violación de unicidad: {0}")]
    UniqueConstraintViolation(String),

    #[error("Violación de clave foránea: {0}")]
    ForeignKeyViolation(String),

    /// Connection mutex poisoned by a panic in another task.
    #[error("Error de bloqueo de conexión: {0}")]
    LockError(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, message) => {
                let msg = message.clone().unwrap_or_else(|| code.to_string());
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;
