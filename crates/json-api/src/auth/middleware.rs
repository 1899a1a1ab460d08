//! Auth middleware.
//!
//! [`authenticate`] runs for every application route and resolves a bearer
//! token to an [`Actor`] when one is supplied. The `require_*` hoops guard
//! the routes that need a caller.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use shopfront_app::auth::{Actor, AuthServiceError};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = match bearer_token(req) {
        BearerToken::Absent => None,
        BearerToken::Malformed => {
            reject(res, ctrl, StatusError::unauthorized().brief("Invalid Authorization header"));

            return;
        }
        BearerToken::Present(token) => Some(token.to_owned()),
    };

    let Some(token) = token else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(status) => {
            reject(res, ctrl, status);

            return;
        }
    };

    let actor: Actor = match state.app.auth.authenticate_bearer(&token).await {
        Ok(actor) => actor,
        Err(AuthServiceError::NotFound) => {
            reject(res, ctrl, StatusError::unauthorized().brief("Invalid token"));

            return;
        }
        Err(source) => {
            error!("failed to authenticate api token: {source}");
            reject(res, ctrl, StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn require_actor(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    if let Err(status) = depot.actor_or_401() {
        reject(res, ctrl, status);
    }
}

#[salvo::handler]
pub(crate) async fn require_admin(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    if let Err(status) = depot.admin_or_403() {
        reject(res, ctrl, status);
    }
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, status: StatusError) {
    res.render(status);
    ctrl.skip_rest();
}

#[derive(Debug, PartialEq, Eq)]
enum BearerToken<'a> {
    Absent,
    Malformed,
    Present(&'a str),
}

fn bearer_token(req: &Request) -> BearerToken<'_> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return BearerToken::Absent;
    };

    let Ok(value) = value.to_str() else {
        return BearerToken::Malformed;
    };

    let Some((scheme, token)) = value.split_once(' ') else {
        return BearerToken::Malformed;
    };

    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        BearerToken::Present(token)
    } else {
        BearerToken::Malformed
    }
}
