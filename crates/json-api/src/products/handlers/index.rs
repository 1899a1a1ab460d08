//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    domain::products::data::{ProductFilter, ProductOrdering, ProductQuery},
    pagination::Page,
};

use crate::{
    errors::validation_error, extensions::*, products::errors::into_status_error,
    products::get::ProductResponse, state::State,
};

/// Listing query string. Filter keys follow the `field__lookup` convention.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductIndexQuery {
    #[serde(rename = "name__iexact")]
    name: Option<String>,

    #[serde(rename = "name__icontains")]
    name_contains: Option<String>,

    price: Option<i64>,

    #[serde(rename = "price__lt")]
    price_lt: Option<i64>,

    #[serde(rename = "price__gt")]
    price_gt: Option<i64>,

    /// Inclusive `min,max` pair.
    #[serde(rename = "price__range")]
    price_range: Option<String>,

    search: Option<String>,

    ordering: Option<String>,

    /// Non-positive values fall back to the default page size.
    limit: Option<i64>,

    offset: Option<u64>,
}

impl ProductIndexQuery {
    fn into_product_query(self) -> Result<ProductQuery, StatusError> {
        let (price_min, price_max) = match self.price_range.as_deref() {
            Some(range) => parse_price_range(range).or_400("could not parse \"price__range\"")?,
            None => (None, None),
        };

        let ordering = self
            .ordering
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::parse::<ProductOrdering>)
            .transpose()
            .or_400("could not parse \"ordering\"")?;

        let page = Page::new(self.limit, self.offset).map_err(|errors| validation_error(&errors))?;

        Ok(ProductQuery {
            filter: ProductFilter {
                name: self.name,
                name_contains: self.name_contains,
                price: self.price,
                price_lt: self.price_lt,
                price_gt: self.price_gt,
                price_min,
                price_max,
                search: self.search.filter(|term| !term.trim().is_empty()),
            },
            ordering,
            page,
        })
    }
}

fn parse_price_range(range: &str) -> Result<(Option<i64>, Option<i64>), std::num::ParseIntError> {
    let (min, max) = range.split_once(',').unwrap_or((range, ""));

    let bound = |value: &str| {
        let value = value.trim();

        if value.is_empty() {
            Ok(None)
        } else {
            value.parse::<i64>().map(Some)
        }
    };

    Ok((bound(min)?, bound(max)?))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching in-stock products across all pages
    pub count: u64,

    pub limit: u32,

    pub offset: u64,

    /// This page of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Lists in-stock products with filtering, search, ordering and
/// limit/offset pagination.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "A page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = req
        .parse_queries::<ProductIndexQuery>()
        .or_400("could not parse query string")?
        .into_product_query()?;

    let page = query.page;

    let listing = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        count: listing.count,
        limit: page.limit(),
        offset: page.offset(),
        products: listing.products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::{
        domain::products::{
            MockProductsService, ProductsServiceError,
            records::{ProductPage, ProductUuid},
        },
        pagination::{DEFAULT_LIMIT, MAX_LIMIT},
    };

    use crate::test_helpers::{MockServices, make_product, service_as};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            None,
            MockServices::with_products(products),
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_uses_default_page() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| *query == ProductQuery::default())
            .return_once(|_| {
                Ok(ProductPage {
                    count: 0,
                    products: vec![],
                })
            });

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.limit, DEFAULT_LIMIT);
        assert_eq!(response.offset, 0);
        assert!(response.products.is_empty(), "expected no products");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters_and_ordering() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| {
                query.filter.name_contains.as_deref() == Some("lamp")
                    && query.filter.price_min == Some(5_00)
                    && query.filter.price_max == Some(20_00)
                    && query.filter.search.as_deref() == Some("brass")
                    && query.ordering == Some(ProductOrdering::PriceDesc)
                    && query.page.limit() == 3
                    && query.page.offset() == 3
            })
            .return_once(move |_| {
                Ok(ProductPage {
                    count: 4,
                    products: vec![make_product(uuid)],
                })
            });

        let response: ProductsResponse = TestClient::get(
            "http://example.com/products?name__icontains=lamp&price__range=500,2000\
             &search=brass&ordering=-price&limit=3&offset=3",
        )
        .send(&make_service(products))
        .await
        .take_json()
        .await?;

        assert_eq!(response.count, 4);
        assert_eq!(response.products.len(), 1, "expected one product");
        assert_eq!(
            response.products.first().map(|product| product.uuid),
            Some(uuid.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_clamps_large_limits() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| query.page.limit() == MAX_LIMIT)
            .return_once(|_| {
                Ok(ProductPage {
                    count: 0,
                    products: vec![],
                })
            });

        let response: ProductsResponse = TestClient::get("http://example.com/products?limit=100")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.limit, MAX_LIMIT);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_non_positive_limit_uses_default() -> TestResult {
        for limit in ["0", "-3"] {
            let mut products = MockProductsService::new();

            products
                .expect_list_products()
                .once()
                .withf(|query| query.page.limit() == DEFAULT_LIMIT)
                .return_once(|_| {
                    Ok(ProductPage {
                        count: 0,
                        products: vec![],
                    })
                });

            let response: ProductsResponse =
                TestClient::get(format!("http://example.com/products?limit={limit}"))
                    .send(&make_service(products))
                    .await
                    .take_json()
                    .await?;

            assert_eq!(response.limit, DEFAULT_LIMIT);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_ordering_returns_400() {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?ordering=stock")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_price_range_accepts_open_bounds() {
        assert_eq!(parse_price_range("100,"), Ok((Some(100), None)));
        assert_eq!(parse_price_range(",250"), Ok((None, Some(250))));
        assert!(parse_price_range("cheap,").is_err(), "expected parse error");
    }
}
