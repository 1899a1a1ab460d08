//! Product Info Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, products::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductInfoResponse {
    /// Every product, including those out of stock
    pub products: Vec<ProductResponse>,

    pub count: u64,

    /// Highest price in the catalogue; null when it is empty
    pub max_price: Option<u64>,
}

/// Product Info Handler
///
/// Summarises the whole catalogue.
#[endpoint(
    tags("products"),
    summary = "Product Info",
    responses(
        (status_code = StatusCode::OK, description = "Catalogue summary"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductInfoResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let info = state
        .app
        .products
        .product_info()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductInfoResponse {
        products: info.products.into_iter().map(Into::into).collect(),
        count: info.count,
        max_price: info.max_price,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::products::{
        MockProductsService,
        records::{ProductInfo, ProductUuid},
    };

    use crate::test_helpers::{MockServices, make_product, service_as};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            None,
            MockServices::with_products(products),
            Router::with_path("products/info").get(handler),
        )
    }

    #[tokio::test]
    async fn test_info_reports_count_and_max_price() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_product_info().once().return_once(|| {
            let mut expensive = make_product(ProductUuid::new());

            expensive.price = 99_00;

            Ok(ProductInfo {
                products: vec![make_product(ProductUuid::new()), expensive],
                count: 2,
                max_price: Some(99_00),
            })
        });

        let response: ProductInfoResponse = TestClient::get("http://example.com/products/info")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.count, 2);
        assert_eq!(response.max_price, Some(99_00));
        assert_eq!(response.products.len(), 2, "expected both products");

        Ok(())
    }

    #[tokio::test]
    async fn test_info_for_empty_catalogue_has_null_max_price() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_product_info().once().return_once(|| {
            Ok(ProductInfo {
                products: vec![],
                count: 0,
                max_price: None,
            })
        });

        let body: serde_json::Value = TestClient::get("http://example.com/products/info")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(body["max_price"], serde_json::Value::Null);
        assert_eq!(body["count"], 0);

        Ok(())
    }
}
