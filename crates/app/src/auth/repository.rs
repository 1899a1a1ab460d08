//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::models::{ActiveApiToken, Actor, ApiTokenMetadata, NewApiToken},
    domain::users::records::UserUuid,
};

const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const LIST_API_TOKENS_SQL: &str = include_str!("sql/list_api_tokens.sql");
const FIND_USER_UUID_SQL: &str = include_str!("sql/find_user_uuid.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_uuid.into_uuid())
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token_last_used(
        &self,
        token_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Revoke an active token. Returns `None` when no active token matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(
        &self,
        token_uuid: Uuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
    }

    /// List tokens, optionally only those belonging to `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        username: Option<&str>,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_SQL)
            .bind(username)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn find_user_uuid(
        &self,
        username: &str,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let uuid: Option<Uuid> = query_scalar(FIND_USER_UUID_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(uuid.map(UserUuid::from_uuid))
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            token_hash: row.try_get("token_hash")?,
            actor: Actor {
                user: UserUuid::from_uuid(row.try_get("user_uuid")?),
                username: row.try_get("username")?,
                is_admin: row.try_get("is_admin")?,
                email: row.try_get("email")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
