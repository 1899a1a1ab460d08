//! Update Product Handlers
//!
//! `PUT` replaces every editable field; `PATCH` changes only the fields it
//! names.

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

use shopfront_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*, products::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Replace Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplaceProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: i64,

    pub stock: i64,
}

impl From<ReplaceProductRequest> for ProductUpdate {
    fn from(request: ReplaceProductRequest) -> Self {
        ProductUpdate {
            name: Some(request.name),
            description: Some(request.description),
            price: Some(request.price),
            stock: Some(request.stock),
        }
    }
}

/// Patch Product Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PatchProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
}

impl From<PatchProductRequest> for ProductUpdate {
    fn from(request: PatchProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Replace Product Handler
#[endpoint(
    tags("products"),
    summary = "Replace Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ReplaceProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    apply(depot, product.into_inner(), json.into_inner().into()).await
}

/// Patch Product Handler
#[endpoint(
    tags("products"),
    summary = "Patch Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn patch_handler(
    product: PathParam<Uuid>,
    json: JsonBody<PatchProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    apply(depot, product.into_inner(), json.into_inner().into()).await
}

#[tracing::instrument(
    name = "products.update",
    skip(depot, update),
    fields(price = tracing::field::Empty, stock = tracing::field::Empty),
    err
)]
async fn apply(
    depot: &Depot,
    product: Uuid,
    update: ProductUpdate,
) -> Result<Json<ProductResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("price", updated.price);
    span.record("stock", updated.stock);

    tracing::info!(product_uuid = %product, "updated product");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{MockServices, make_actor, make_product, service_as};

    use super::*;

    fn make_service(is_admin: bool, products: MockProductsService) -> Service {
        service_as(
            Some(make_actor(is_admin)),
            MockServices::with_products(products),
            Router::with_path("products/{product}")
                .put(handler)
                .patch(patch_handler),
        )
    }

    #[tokio::test]
    async fn test_put_replaces_every_field() -> TestResult {
        let uuid = ProductUuid::new();

        let mut product = make_product(uuid);

        product.price = 12_50;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == ProductUpdate {
                            name: Some("Desk Lamp".to_string()),
                            description: Some(String::new()),
                            price: Some(12_50),
                            stock: Some(5),
                        }
            })
            .return_once(move |_, _| Ok(product));

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Desk Lamp", "price": 1250, "stock": 5 }))
            .send(&make_service(true, products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.price, 12_50);

        Ok(())
    }

    #[tokio::test]
    async fn test_put_missing_field_returns_400() {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products.expect_update_product().never();

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "price": 1250 }))
            .send(&make_service(true, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_patch_sends_only_supplied_fields() {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == ProductUpdate {
                            stock: Some(0),
                            ..ProductUpdate::default()
                        }
            })
            .return_once(move |_, _| Ok(product));

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "stock": 0 }))
            .send(&make_service(true, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_patch_regular_user_returns_403() {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products.expect_update_product().never();

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "stock": 0 }))
            .send(&make_service(false, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_patch_missing_product_returns_404() {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Floor Lamp" }))
            .send(&make_service(true, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
