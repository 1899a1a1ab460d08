//! Password hashing.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;
use zeroize::Zeroize;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(#[source] password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] password_hash::Error),
}

/// A plaintext password held only for as long as it takes to hash or check it.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Hash a password into an Argon2id PHC string with a random salt.
///
/// # Errors
///
/// Returns an error when the hasher rejects its input.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed. A wrong password
/// is `Ok(false)`.
pub fn verify_password(password: &Password, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::MalformedHash(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_argon2id_and_salted() {
        let password = Password::new("correct horse battery staple");

        let first = hash_password(&password).expect("hashing should succeed");
        let second = hash_password(&password).expect("hashing should succeed");

        assert!(first.starts_with("$argon2id$"), "unexpected hash {first}");
        assert_ne!(first, second, "salts must differ between hashes");
    }

    #[test]
    fn verify_accepts_matching_password() {
        let password = Password::new("hunter2");
        let hash = hash_password(&password).expect("hashing should succeed");

        assert!(verify_password(&password, &hash).expect("hash should parse"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password(&Password::new("hunter2")).expect("hashing should succeed");

        let result = verify_password(&Password::new("hunter3"), &hash);

        assert!(matches!(result, Ok(false)), "got {result:?}");
    }

    #[test]
    fn verify_reports_malformed_hashes() {
        let result = verify_password(&Password::new("hunter2"), "not-a-phc-string");

        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::new("hunter2");

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
    }
}
