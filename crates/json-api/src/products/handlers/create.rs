//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*, products::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Optional client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Price in pence/cents
    pub price: i64,

    pub stock: i64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::{
        domain::products::{MockProductsService, ProductsServiceError},
        validation::{FieldErrorKind, ValidationErrors},
    };

    use crate::test_helpers::{MockServices, make_actor, make_product, service_as};

    use super::*;

    fn make_service(is_admin: Option<bool>, products: MockProductsService) -> Service {
        service_as(
            is_admin.map(make_actor),
            MockServices::with_products(products),
            Router::with_path("products").post(handler),
        )
    }

    fn lamp(uuid: ProductUuid) -> serde_json::Value {
        json!({
            "uuid": uuid.into_uuid(),
            "name": "Desk Lamp",
            "description": "Brass, with a linen shade",
            "price": 1000,
            "stock": 5,
        })
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |new| {
                *new == NewProduct {
                    uuid,
                    name: "Desk Lamp".to_string(),
                    description: "Brass, with a linen shade".to_string(),
                    price: 10_00,
                    stock: 5,
                }
            })
            .return_once(move |_| Ok(product));

        let mut res = TestClient::post("http://example.com/products")
            .json(&lamp(uuid))
            .send(&make_service(Some(true), products))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_anonymous_returns_401() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&lamp(ProductUuid::new()))
            .send(&make_service(None, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_create_product_regular_user_returns_403() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&lamp(ProductUuid::new()))
            .send(&make_service(Some(false), products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_create_product_negative_price_returns_400() {
        let mut products = MockProductsService::new();

        products.expect_create_product().once().return_once(|_| {
            Err(ProductsServiceError::Validation(ValidationErrors::single(
                "price",
                FieldErrorKind::Negative,
            )))
        });

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Desk Lamp", "price": -1, "stock": 5 }))
            .send(&make_service(Some(true), products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_product_conflict_returns_409() {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/products")
            .json(&lamp(ProductUuid::new()))
            .send(&make_service(Some(true), products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
