//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        Actor, ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, Password,
        digest_api_token, format_api_token, generate_api_token_secret, models::NewApiToken,
        parse_api_token, repository::PgAuthRepository,
    },
    database::Db,
    domain::users::{PgUsersService, UsersService, records::UserUuid},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    users: PgUsersService,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
            users: PgUsersService::new(db),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: user,
                token_hash: digest_api_token(&token),
            })
            .await
            .map_err(|error| {
                if error
                    .as_database_error()
                    .is_some_and(|db_error| db_error.is_foreign_key_violation())
                {
                    AuthServiceError::NotFound
                } else {
                    AuthServiceError::from(error)
                }
            })?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// Issue a new API token for the user with the given username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] for unknown usernames.
    pub async fn issue_api_token_for_username(
        &self,
        username: &str,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let user = self
            .repository
            .find_user_uuid(username)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        self.issue_api_token(user).await
    }

    /// List tokens, optionally only those owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        username: Option<&str>,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens(username)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.token_hash != digest_api_token(bearer_token) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(%error, token = %parsed_token.token_uuid, "failed to record token use");
        }

        Ok(token.actor)
    }

    async fn login(
        &self,
        username: &str,
        password: &Password,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let user = self.users.verify_credentials(username, password).await?;

        self.issue_api_token(user.uuid).await
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the actor it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;

    /// Exchange a username and password for a fresh API token.
    async fn login(
        &self,
        username: &str,
        password: &Password,
    ) -> Result<IssuedApiToken, AuthServiceError>;
}
