//! Order Index Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::orders::{
    data::{OrderFilter, OrderOrdering},
    records::OrderStatus,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse, scope_for},
    state::State,
};

/// Listing query string. Dates are `YYYY-MM-DD` and compare against the
/// UTC calendar date of `created_at`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrderIndexQuery {
    status: Option<String>,

    created_at: Option<String>,

    #[serde(rename = "created_at__lt")]
    created_before: Option<String>,

    #[serde(rename = "created_at__gt")]
    created_after: Option<String>,

    ordering: Option<String>,
}

impl OrderIndexQuery {
    fn into_filter(self) -> Result<OrderFilter, StatusError> {
        let status = non_empty(self.status)
            .map(|value| value.parse::<OrderStatus>())
            .transpose()
            .or_400("could not parse \"status\"")?;

        let ordering = non_empty(self.ordering)
            .map(|value| value.parse::<OrderOrdering>())
            .transpose()
            .or_400("could not parse \"ordering\"")?
            .unwrap_or_default();

        Ok(OrderFilter {
            status,
            created_on: parse_date(self.created_at, "could not parse \"created_at\"")?,
            created_before: parse_date(self.created_before, "could not parse \"created_at__lt\"")?,
            created_after: parse_date(self.created_after, "could not parse \"created_at__gt\"")?,
            ordering,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_date(value: Option<String>, brief: &str) -> Result<Option<Date>, StatusError> {
    non_empty(value)
        .map(|value| value.trim().parse::<Date>())
        .transpose()
        .or_400(brief)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Lists the caller's orders, or every order for administrators.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let actor = depot.actor_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = req
        .parse_queries::<OrderIndexQuery>()
        .or_400("could not parse query string")?
        .into_filter()?;

    let orders = state
        .app
        .orders
        .list_orders(scope_for(actor), filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, data::OrderScope, records::OrderUuid,
    };

    use crate::test_helpers::{MockServices, TEST_USER_UUID, make_actor, make_order, service_as};

    use super::*;

    fn make_service(is_admin: Option<bool>, orders: MockOrdersService) -> Service {
        service_as(
            is_admin.map(make_actor),
            MockServices::with_orders(orders),
            Router::with_path("orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_regular_user_lists_own_orders() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|scope, filter| {
                *scope == OrderScope::User(TEST_USER_UUID) && *filter == OrderFilter::default()
            })
            .return_once(move |_, _| Ok(vec![make_order(uuid)]));

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(Some(false), orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 1, "expected one order");
        assert_eq!(
            response.orders.first().map(|order| order.order_id),
            Some(uuid.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_filters_are_forwarded() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|scope, filter| {
                *scope == OrderScope::All
                    && *filter
                        == OrderFilter {
                            status: Some(OrderStatus::Confirmed),
                            created_on: None,
                            created_before: Some(jiff::civil::date(2026, 3, 1)),
                            created_after: Some(jiff::civil::date(2026, 1, 31)),
                            ordering: OrderOrdering::CreatedAtDesc,
                        }
            })
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get(
            "http://example.com/orders?status=confirmed&created_at__lt=2026-03-01\
             &created_at__gt=2026-01-31&ordering=-created_at",
        )
        .send(&make_service(Some(true), orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_invalid_date_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders?created_at=yesterday")
            .send(&make_service(Some(false), orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders?status=shipped")
            .send(&make_service(Some(false), orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(Some(false), orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_anonymous_returns_401() {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(None, orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
