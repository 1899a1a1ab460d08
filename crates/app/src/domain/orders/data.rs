//! Orders Data

use std::str::FromStr;

use jiff::civil::Date;
use thiserror::Error;

use crate::{
    domain::{
        orders::records::{OrderStatus, OrderUuid},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    validation::{ValidationErrors, Validator, non_empty, positive},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// # Errors
    ///
    /// Returns an `items` error when no items are given, and one error per
    /// item whose quantity is not positive.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_items(&self.items)
    }
}

/// New Order Item Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}

/// Order Update Data
///
/// `items: Some(..)` replaces every existing item. `None` leaves them as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub items: Option<Vec<NewOrderItem>>,
}

impl OrderUpdate {
    /// # Errors
    ///
    /// Returns item errors when a replacement item set is given and invalid.
    /// An explicit empty replacement set is rejected.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match &self.items {
            Some(items) => validate_items(items),
            None => Ok(()),
        }
    }
}

fn validate_items(items: &[NewOrderItem]) -> Result<(), ValidationErrors> {
    items
        .iter()
        .enumerate()
        .fold(
            Validator::new().check("items", non_empty(items)),
            |validator, (index, item)| {
                validator.nested(
                    &format!("items[{index}]"),
                    Validator::new()
                        .check("quantity", positive(item.quantity))
                        .finish(),
                )
            },
        )
        .finish()
}

/// Which orders a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order. Administrators only.
    All,

    /// Only orders owned by this user.
    User(UserUuid),
}

impl OrderScope {
    pub(crate) fn user_uuid(self) -> Option<UserUuid> {
        match self {
            Self::All => None,
            Self::User(user) => Some(user),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderOrdering {
    #[default]
    CreatedAtAsc,
    CreatedAtDesc,
}

impl OrderOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAtAsc => "created_at",
            Self::CreatedAtDesc => "-created_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order ordering `{0}`")]
pub struct UnknownOrderOrdering(pub String);

impl FromStr for OrderOrdering {
    type Err = UnknownOrderOrdering;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created_at" => Ok(Self::CreatedAtAsc),
            "-created_at" => Ok(Self::CreatedAtDesc),
            other => Err(UnknownOrderOrdering(other.to_string())),
        }
    }
}

/// Order listing filters. Dates compare against the UTC calendar date of
/// `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub created_on: Option<Date>,
    pub created_before: Option<Date>,
    pub created_after: Option<Date>,
    pub ordering: OrderOrdering,
}

#[cfg(test)]
mod tests {
    use crate::validation::FieldErrorKind;

    use super::*;

    fn item(quantity: i64) -> NewOrderItem {
        NewOrderItem {
            product_uuid: ProductUuid::new(),
            quantity,
        }
    }

    #[test]
    fn order_without_items_is_rejected() {
        let order = NewOrder {
            uuid: OrderUuid::new(),
            items: Vec::new(),
        };

        assert!(
            order
                .validate()
                .is_err_and(|errors| errors.contains("items", FieldErrorKind::Empty)),
            "orders need at least one item"
        );
    }

    #[test]
    fn each_bad_quantity_is_reported_with_its_position() {
        let order = NewOrder {
            uuid: OrderUuid::new(),
            items: vec![item(1), item(0), item(-3)],
        };

        let Err(errors) = order.validate() else {
            panic!("expected validation errors");
        };

        assert_eq!(errors.errors().len(), 2);
        assert!(errors.contains("items[1].quantity", FieldErrorKind::NotPositive));
        assert!(errors.contains("items[2].quantity", FieldErrorKind::NotPositive));
    }

    #[test]
    fn update_without_items_is_valid() {
        let update = OrderUpdate {
            status: Some(OrderStatus::Confirmed),
            items: None,
        };

        assert!(update.validate().is_ok());
    }

    #[test]
    fn update_with_empty_items_is_rejected() {
        let update = OrderUpdate {
            status: None,
            items: Some(Vec::new()),
        };

        assert!(
            update
                .validate()
                .is_err_and(|errors| errors.contains("items", FieldErrorKind::Empty)),
            "an explicit empty item list must not clear the order"
        );
    }

    #[test]
    fn scope_exposes_owner() {
        let user = UserUuid::new();

        assert_eq!(OrderScope::All.user_uuid(), None);
        assert_eq!(OrderScope::User(user).user_uuid(), Some(user));
    }
}
