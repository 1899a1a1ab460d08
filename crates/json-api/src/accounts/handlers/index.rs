//! List Accounts Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::users::records::UserRecord;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,

    pub username: String,

    pub email: Option<String>,

    pub is_admin: bool,

    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}

/// List Accounts Handler
#[endpoint(
    tags("accounts"),
    summary = "List Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Accounts"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, StatusError> {
    depot.actor_or_401()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::users::{MockUsersService, UsersServiceError, records::UserUuid};

    use crate::test_helpers::{MockServices, make_actor, service_as};

    use super::*;

    fn make_service(authenticated: bool, users: MockUsersService) -> Service {
        service_as(
            authenticated.then(|| make_actor(false)),
            MockServices::with_users(users),
            Router::with_path("account").get(handler),
        )
    }

    fn user(username: &str, is_admin: bool) -> UserRecord {
        UserRecord {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: None,
            is_admin,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_list_accounts() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_list_users()
            .once()
            .return_once(|| Ok(vec![user("alice", false), user("root", true)]));

        let mut res = TestClient::get("http://example.com/account")
            .send(&make_service(true, users))
            .await;

        let body: UsersResponse = res.take_json().await?;

        let usernames: Vec<_> = body.users.iter().map(|u| u.username.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(usernames, vec!["alice", "root"]);
        assert!(body.users.iter().any(|u| u.is_admin), "admin flag should survive");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_accounts_anonymous_returns_401() {
        let mut users = MockUsersService::new();

        users.expect_list_users().never();

        let res = TestClient::get("http://example.com/account")
            .send(&make_service(false, users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_list_accounts_storage_error_returns_500() {
        let mut users = MockUsersService::new();

        users
            .expect_list_users()
            .once()
            .return_once(|| Err(UsersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/account")
            .send(&make_service(true, users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
