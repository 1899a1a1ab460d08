//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*, products::errors::into_status_error, responses::MessageResponse,
    state::State,
};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is referenced by orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    state
        .app
        .products
        .delete_product(product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new(format!("Product {product} deleted"))))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{MockServices, make_actor, service_as};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            Some(make_actor(true)),
            MockServices::with_products(products),
            Router::with_path("products/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, format!("Product {uuid} deleted"));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_in_use_returns_409() {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InUse));

        let res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_delete_product_not_found_returns_404() {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
