//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Record
///
/// An order header together with every item it owns, read from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,

    /// Owner's username at read time.
    pub username: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Sum of every item subtotal, in minor currency units.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .map(OrderItemRecord::subtotal)
            .fold(0, u64::saturating_add)
    }
}

/// Order Item Record
///
/// `product_name` and `price` are the product's current values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub price: u64,
    pub quantity: u64,
}

impl OrderItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: u64, quantity: u64) -> OrderItemRecord {
        OrderItemRecord {
            uuid: OrderItemUuid::new(),
            product_uuid: ProductUuid::new(),
            product_name: "Widget".to_string(),
            price,
            quantity,
        }
    }

    fn order(items: Vec<OrderItemRecord>) -> OrderRecord {
        OrderRecord {
            uuid: OrderUuid::new(),
            user_uuid: UserUuid::new(),
            username: "ada".to_string(),
            status: OrderStatus::Pending,
            items,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn total_price_sums_item_subtotals() {
        let order = order(vec![item(10_00, 2), item(5_00, 1)]);

        assert_eq!(order.total_price(), 25_00);
    }

    #[test]
    fn total_price_saturates_instead_of_overflowing() {
        let order = order(vec![item(u64::MAX, 2), item(1, 1)]);

        assert_eq!(order.total_price(), u64::MAX);
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
