//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::{auth::AuthServiceError, domain::users::UsersServiceError};

use crate::errors::validation_error;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username is already taken")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Validation(errors) => validation_error(&errors),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request()
        }
        UsersServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::PasswordTask(source) => {
            error!("password hashing task failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("users storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Failed logins all look the same to the caller.
pub(crate) fn login_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        other => {
            error!("login failed: {other}");

            StatusError::internal_server_error()
        }
    }
}
