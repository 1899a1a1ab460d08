//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::{
    auth::Actor,
    domain::orders::{
        data::{NewOrderItem, OrderScope},
        records::OrderStatus,
    },
};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Administrators see every order; everyone else sees their own.
pub(crate) fn scope_for(actor: &Actor) -> OrderScope {
    if actor.is_admin {
        OrderScope::All
    } else {
        OrderScope::User(actor.user)
    }
}

/// One requested line of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    /// Product UUID
    pub product: Uuid,

    /// Units to order; must be positive
    pub quantity: i64,
}

impl From<OrderItemRequest> for NewOrderItem {
    fn from(item: OrderItemRequest) -> Self {
        NewOrderItem {
            product_uuid: item.product.into(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OrderStatusBody {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<OrderStatusBody> for OrderStatus {
    fn from(status: OrderStatusBody) -> Self {
        match status {
            OrderStatusBody::Pending => OrderStatus::Pending,
            OrderStatusBody::Confirmed => OrderStatus::Confirmed,
            OrderStatusBody::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl From<OrderStatus> for OrderStatusBody {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => OrderStatusBody::Pending,
            OrderStatus::Confirmed => OrderStatusBody::Confirmed,
            OrderStatus::Cancelled => OrderStatusBody::Cancelled,
        }
    }
}
