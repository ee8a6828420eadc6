use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Errors surfaced by the comment and user/session stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller supplied structurally invalid input. Never reaches the database.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A uniqueness constraint was violated on insert.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other driver or server failure, with the cause attached.
    #[error("Database error: {0}")]
    Store(#[from] MongoError),
}

impl StoreError {
    /// Classifies a failed write: duplicate keys become `Conflict(message)`,
    /// everything else keeps the driver error.
    pub fn from_write(err: MongoError, message: impl Into<String>) -> Self {
        if is_duplicate_key(&err) {
            StoreError::Conflict(message.into())
        } else {
            StoreError::Store(err)
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

pub fn is_duplicate_key_code(code: i32) -> bool {
    // 11001 e 12582 são códigos legados do mesmo erro
    matches!(code, DUPLICATE_KEY_CODE | 11001 | 12582)
}

/// Returns true when the server rejected a write because of a unique index.
pub fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            is_duplicate_key_code(write_error.code)
        }
        ErrorKind::Command(command_error) => is_duplicate_key_code(command_error.code),
        _ => false,
    }
}
