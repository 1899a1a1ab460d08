//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::{auth::PasswordError, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("username is already taken")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("password error")]
    Password(#[from] PasswordError),

    #[error("password hashing task failed")]
    PasswordTask(#[source] JoinError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
