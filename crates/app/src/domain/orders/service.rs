//! Orders service.
//!
//! Every write runs in a single transaction: the order header and its items
//! are committed together or not at all, so a reader never observes an order
//! without its items or with a half-replaced item set. Reads run in a
//! read-only snapshot so the header and the item set come from the same
//! point in time.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, OrderFilter, OrderScope, OrderUpdate},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.items = self
            .items_repository
            .get_order_items(tx, &[order.uuid])
            .await?
            .into_iter()
            .map(|owned| owned.item)
            .collect();

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .orders_repository
            .create_order(&mut tx, order.uuid, user)
            .await?;

        self.items_repository
            .create_order_items(&mut tx, created.uuid, &order.items)
            .await?;

        let created = self.attach_items(&mut tx, created).await?;

        tx.commit().await?;

        info!(
            order = %created.uuid,
            user = %user,
            items = created.items.len(),
            "order created"
        );

        Ok(created)
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        if !self.orders_repository.lock_order(&mut tx, order).await? {
            return Err(OrdersServiceError::NotFound);
        }

        let replaced_items = update.items.is_some();

        if let Some(items) = &update.items {
            self.items_repository
                .delete_order_items(&mut tx, order)
                .await?;

            self.items_repository
                .create_order_items(&mut tx, order, items)
                .await?;
        }

        let updated = self
            .orders_repository
            .update_order(&mut tx, order, update.status)
            .await?;

        let updated = self.attach_items(&mut tx, updated).await?;

        tx.commit().await?;

        info!(
            order = %updated.uuid,
            status = %updated.status,
            replaced_items,
            "order updated"
        );

        Ok(updated)
    }

    async fn get_order(
        &self,
        scope: OrderScope,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let found = self
            .orders_repository
            .get_order(&mut tx, scope, order)
            .await?;

        let found = self.attach_items(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_orders(
        &self,
        scope: OrderScope,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, scope, &filter)
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items_by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for owned in self.items_repository.get_order_items(&mut tx, &uuids).await? {
            items_by_order
                .entry(owned.order_uuid)
                .or_default()
                .push(owned.item);
        }

        tx.commit().await?;

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order = %order, "order deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates an order for `user` with all of its items, atomically.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Updates an order's status and, when given, replaces its entire item set.
    async fn update_order(
        &self,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order visible within `scope`.
    async fn get_order(
        &self,
        scope: OrderScope,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve every order visible within `scope` that matches `filter`.
    async fn list_orders(
        &self,
        scope: OrderScope,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Deletes an order and its items.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
