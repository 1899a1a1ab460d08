//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use shopfront_app::{
    auth::Actor,
    domain::orders::{data::NewOrder, records::OrderUuid},
    notifications::OrderConfirmation,
};

use crate::{
    extensions::*,
    orders::{OrderItemRequest, errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Create Order Request
///
/// The order id is always assigned by the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// At least one item is required
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            items: request.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Order Handler
///
/// Places an order for the caller. The order and every item are written in
/// one transaction; a confirmation is queued once it has committed.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let actor = depot.actor_or_401()?;

    place(depot, res, actor, json.into_inner().into()).await
}

#[tracing::instrument(
    name = "orders.create",
    skip(depot, res, actor, new_order),
    fields(
        user_uuid = %actor.user,
        order_uuid = %new_order.uuid,
        items_count = new_order.items.len()
    ),
    err
)]
async fn place(
    depot: &Depot,
    res: &mut Response,
    actor: &Actor,
    new_order: NewOrder,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .create_order(actor.user, new_order)
        .await
        .map_err(into_status_error)?;

    if let Some(recipient) = &actor.email {
        state.app.notifier.notify_order_placed(OrderConfirmation {
            order: order.uuid,
            recipient: recipient.clone(),
        });
    }

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(total_price = order.total_price(), "created order");

    Ok(Json(order.into()))
}
