//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::try_get_unsigned,
    domain::products::{
        data::{NewProduct, ProductFilter, ProductQuery, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const ALL_PRODUCTS_SQL: &str = include_str!("sql/all_products.sql");
const MAX_PRICE_SQL: &str = include_str!("sql/max_price.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_query: &ProductQuery,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let filter = &product_query.filter;

        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.name.as_deref())
            .bind(filter.name_contains.as_deref())
            .bind(filter.price)
            .bind(filter.price_lt)
            .bind(filter.price_gt)
            .bind(filter.price_min)
            .bind(filter.price_max)
            .bind(filter.search.as_deref())
            .bind(product_query.ordering.map(|ordering| ordering.as_str()))
            .bind(product_query.page.limit_i64())
            .bind(product_query.page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(filter.name.as_deref())
            .bind(filter.name_contains.as_deref())
            .bind(filter.price)
            .bind(filter.price_lt)
            .bind(filter.price_gt)
            .bind(filter.price_min)
            .bind(filter.price_max)
            .bind(filter.search.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn all_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(ALL_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn max_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<u64>, sqlx::Error> {
        let max_price: Option<i64> = query_scalar(MAX_PRICE_SQL).fetch_one(&mut **tx).await?;

        Ok(max_price.and_then(|price| u64::try_from(price).ok()))
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.stock)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price)
            .bind(update.stock)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_unsigned(row, "price")?,
            stock: try_get_unsigned(row, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
