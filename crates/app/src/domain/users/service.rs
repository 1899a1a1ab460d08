//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tokio::task;

use crate::{
    auth::{Password, hash_password, verify_password},
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::UserRecord,
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

/// Hash on the blocking pool so a slow Argon2id run never holds a runtime worker.
async fn hash_off_runtime(password: Password) -> Result<String, UsersServiceError> {
    let hashed = task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(UsersServiceError::PasswordTask)??;

    Ok(hashed)
}

async fn verify_off_runtime(
    password: Password,
    stored_hash: String,
) -> Result<bool, UsersServiceError> {
    let matches = task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(UsersServiceError::PasswordTask)??;

    Ok(matches)
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        user.validate()?;

        let password_hash = hash_off_runtime(user.password.clone()).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(
                &mut tx,
                user.uuid,
                &user.username,
                user.email.as_deref(),
                &password_hash,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn set_admin(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .set_admin(&mut tx, username, is_admin)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &Password,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials(&mut tx, username)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        if verify_off_runtime(password.clone(), credentials.password_hash).await? {
            Ok(credentials.user)
        } else {
            Err(UsersServiceError::NotFound)
        }
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a new account, storing only a hash of its password.
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves every user.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Grants or removes the administrator role.
    async fn set_admin(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Resolves a username and password to the user they belong to. Unknown
    /// usernames and wrong passwords are both `NotFound`.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &Password,
    ) -> Result<UserRecord, UsersServiceError>;
}
