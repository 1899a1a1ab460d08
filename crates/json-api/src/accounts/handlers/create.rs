//! Register Account Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    auth::Password,
    domain::users::{data::NewUser, records::UserUuid},
};

use crate::{
    accounts::{errors::into_status_error, index::UserResponse},
    extensions::*,
    state::State,
};

/// Register Account Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: String,

    /// Where order confirmations are sent
    #[serde(default)]
    pub email: Option<String>,

    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            uuid: UserUuid::new(),
            username: request.username,
            email: request.email.filter(|email| !email.is_empty()),
            password: Password::new(request.password),
        }
    }
}

/// Register Account Handler
///
/// Open to anyone. New accounts never hold the admin role.
#[endpoint(
    tags("accounts"),
    summary = "Register Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Username is already taken"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user.uuid, username = %user.username, "registered account");

    res.add_header(LOCATION, "/account", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
