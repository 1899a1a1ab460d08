//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{
    extensions::*,
    orders::{OrderStatusBody, errors::into_status_error, scope_for},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,

    pub product_name: String,

    /// Current unit price of the product
    pub product_price: u64,

    pub quantity: u64,

    /// `product_price * quantity`
    pub item_subtotal: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            item_subtotal: item.subtotal(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            product_price: item.price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order_id: Uuid,

    /// Owner of the order
    pub user_uuid: Uuid,

    /// Owner's username
    pub username: String,

    pub status: OrderStatusBody,

    pub created_at: String,

    pub updated_at: String,

    pub items: Vec<OrderItemResponse>,

    /// Sum of every item subtotal, in pence/cents
    pub total_price: u64,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            total_price: order.total_price(),
            order_id: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            username: order.username,
            status: order.status.into(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Returns one order. Regular users only see their own orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let actor = depot.actor_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(scope_for(actor), order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
