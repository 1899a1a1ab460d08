//! Update Order Handler
//!
//! Serves both `PUT` and `PATCH`. Omitted fields are left untouched; a given
//! item list replaces every existing item.

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::orders::data::OrderUpdate;

use crate::{
    extensions::*,
    orders::{OrderItemRequest, OrderStatusBody, errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    #[serde(default)]
    pub status: Option<OrderStatusBody>,

    /// Replacement item set
    #[serde(default)]
    pub items: Option<Vec<OrderItemRequest>>,
}

impl From<UpdateOrderRequest> for OrderUpdate {
    fn from(request: UpdateOrderRequest) -> Self {
        OrderUpdate {
            status: request.status.map(Into::into),
            items: request
                .items
                .map(|items| items.into_iter().map(Into::into).collect()),
        }
    }
}

/// Update Order Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    apply(depot, order.into_inner(), json.into_inner().into()).await
}

#[tracing::instrument(
    name = "orders.update",
    skip(depot, update),
    fields(status = ?update.status, replaces_items = update.items.is_some()),
    err
)]
async fn apply(
    depot: &Depot,
    order: Uuid,
    update: OrderUpdate,
) -> Result<Json<OrderResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .orders
        .update_order(order.into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(items_count = updated.items.len(), "updated order");

    Ok(Json(updated.into()))
}
