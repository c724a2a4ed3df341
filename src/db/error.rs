//! Typed failures from the data-access layer

use sqlx::error::ErrorKind;

use crate::models::FormError;

/// Why a read or mutation against the store failed
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid submission: {0}")]
    Invalid(#[from] FormError),

    #[error("stored {entity} {id} is unreadable: {detail}")]
    Unreadable {
        entity: &'static str,
        id: i64,
        detail: String,
    },

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return Self::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::Database(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
