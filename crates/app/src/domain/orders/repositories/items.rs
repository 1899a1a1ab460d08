//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_unsigned,
    domain::{
        orders::{
            data::NewOrderItem,
            records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        },
        products::records::ProductUuid,
    },
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const DELETE_ORDER_ITEMS_SQL: &str = include_str!("../sql/delete_order_items.sql");

/// An item row tagged with the order that owns it.
#[derive(Debug, Clone)]
pub(crate) struct OwnedOrderItem {
    pub order_uuid: OrderUuid,
    pub item: OrderItemRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every item in one statement, keeping their input order.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[NewOrderItem],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = items
            .iter()
            .map(|_| OrderItemUuid::new().into_uuid())
            .collect();

        let products: Vec<Uuid> = items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        let quantities: Vec<i64> = items.iter().map(|item| item.quantity).collect();

        let rows_affected = query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OwnedOrderItem>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OwnedOrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OwnedOrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: OrderItemRecord {
                uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                product_name: row.try_get("product_name")?,
                price: try_get_unsigned(row, "price")?,
                quantity: try_get_unsigned(row, "quantity")?,
            },
        })
    }
}
