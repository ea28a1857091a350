use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::cqrs::DispatchError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule was broken: duplicate external id, missing parent,
    /// unknown status value and the like.
    #[error("invariant violation: {0}")]
    Invariant(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("request cancelled")]
    Cancelled,
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl ServiceError {
    pub fn invariant(msg: impl Into<String>) -> Self { Self::Invariant(msg.into()) }
}

impl From<DbErr> for ServiceError {
    /// A unique-index hit is a duplicate external id that slipped past the
    /// pre-insert check, so it is reported as an invariant violation.
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Invariant(format!("duplicate key: {msg}")),
            _ => Self::Db(e.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Invariant(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
