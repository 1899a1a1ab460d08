//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::users::records::{UserRecord, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const FIND_CREDENTIALS_SQL: &str = include_str!("sql/find_credentials.sql");
const SET_ADMIN_SQL: &str = include_str!("sql/set_admin.sql");

/// A user row together with its stored password hash.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(uuid.into_uuid())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        is_admin: bool,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_ADMIN_SQL)
            .bind(username)
            .bind(is_admin)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            is_admin: row.try_get("is_admin")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
