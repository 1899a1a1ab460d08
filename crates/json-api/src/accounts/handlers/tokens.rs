//! Issue Token Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::auth::{IssuedApiToken, Password};

use crate::{accounts::errors::login_status_error, extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,

    pub password: String,
}

/// Token Response
///
/// `token` is only ever shown here. Send it as `Authorization: Bearer <token>`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    pub token: String,

    pub token_uuid: Uuid,

    pub created_at: String,
}

impl From<IssuedApiToken> for TokenResponse {
    fn from(issued: IssuedApiToken) -> Self {
        Self {
            token: issued.token,
            token_uuid: issued.metadata.uuid,
            created_at: issued.metadata.created_at.to_string(),
        }
    }
}

/// Issue Token Handler
///
/// Exchanges a username and password for a new API token.
#[endpoint(
    tags("accounts"),
    summary = "Issue Token",
    responses(
        (status_code = StatusCode::CREATED, description = "Token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let LoginRequest { username, password } = json.into_inner();

    let issued = state
        .app
        .auth
        .login(&username, &Password::new(password))
        .await
        .map_err(login_status_error)?;

    tracing::info!(
        user_uuid = %issued.metadata.user_uuid,
        token_uuid = %issued.metadata.uuid,
        "issued api token"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::auth::{ApiTokenMetadata, AuthServiceError, MockAuthService};

    use crate::test_helpers::{MockServices, TEST_USER_UUID, service_as};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        service_as(
            None,
            MockServices {
                auth,
                ..MockServices::default()
            },
            Router::with_path("account/tokens").post(handler),
        )
    }

    #[tokio::test]
    async fn test_login_issues_token() -> TestResult {
        let token_uuid = Uuid::now_v7();

        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|username, password| username == "alice" && password.expose() == "hunter22")
            .return_once(move |_, _| {
                Ok(IssuedApiToken {
                    token: format!("sf_v1_{}.{}", token_uuid.simple(), "ab".repeat(32)),
                    metadata: ApiTokenMetadata {
                        uuid: token_uuid,
                        user_uuid: TEST_USER_UUID,
                        created_at: Timestamp::UNIX_EPOCH,
                        last_used_at: None,
                        revoked_at: None,
                    },
                })
            });

        let mut res = TestClient::post("http://example.com/account/tokens")
            .json(&json!({ "username": "alice", "password": "hunter22" }))
            .send(&make_service(auth))
            .await;

        let body: TokenResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.token_uuid, token_uuid);
        assert!(body.token.starts_with("sf_v1_"), "unexpected token {}", body.token);

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_returns_401() {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/account/tokens")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
