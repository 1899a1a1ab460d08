//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{auth::ApiTokenError, domain::users::UsersServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, revoked or malformed token, or credentials that do not match.
    #[error("not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),

    #[error("user lookup failed")]
    Users(#[source] UsersServiceError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::NotFound => Self::NotFound,
            other => Self::Users(other),
        }
    }
}
