//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductQuery, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductInfo, ProductPage, ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        product_query: ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let count = self
            .repository
            .count_products(&mut tx, &product_query.filter)
            .await?;

        let products = self
            .repository
            .list_products(&mut tx, &product_query)
            .await?;

        tx.commit().await?;

        Ok(ProductPage { count, products })
    }

    async fn product_info(&self) -> Result<ProductInfo, ProductsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let products = self.repository.all_products(&mut tx).await?;
        let max_price = self.repository.max_price(&mut tx).await?;

        tx.commit().await?;

        Ok(ProductInfo {
            count: products.len() as u64,
            products,
            max_price,
        })
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, product)
            .await
            .map_err(|error| match ProductsServiceError::from(error) {
                ProductsServiceError::InvalidReference => ProductsServiceError::InUse,
                other => other,
            })?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of in-stock products matching the query.
    async fn list_products(
        &self,
        product_query: ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Summarise the whole catalogue, including out-of-stock products.
    async fn product_info(&self) -> Result<ProductInfo, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Updates the supplied fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product that no order refers to.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
