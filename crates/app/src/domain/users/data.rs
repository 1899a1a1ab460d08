//! Users Data

use crate::{
    auth::Password,
    domain::users::records::UserUuid,
    validation::{FieldErrorKind, ValidationErrors, Validator, both, max_chars, not_blank},
};

/// Longest username accepted.
pub const USERNAME_MAX_CHARS: usize = 150;

/// New User Data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: Option<String>,
    pub password: Password,
}

impl NewUser {
    /// # Errors
    ///
    /// Returns every field that fails its rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check("username", validate_username(&self.username))
            .check_optional("email", self.email.as_deref(), validate_email)
            .check("password", not_blank(self.password.expose()))
            .finish()
    }
}

/// Letters, digits and `@.+-_` only, up to 150 characters.
pub fn validate_username(username: &str) -> Result<(), FieldErrorKind> {
    both(not_blank(username), || {
        max_chars(username, USERNAME_MAX_CHARS)?;

        if username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            Ok(())
        } else {
            Err(FieldErrorKind::InvalidFormat)
        }
    })
}

pub fn validate_email(email: &str) -> Result<(), FieldErrorKind> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(FieldErrorKind::InvalidFormat),
    }
}
