//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::orders::OrdersServiceError;

use crate::errors::validation_error;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Validation(errors) => validation_error(&errors),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Order refers to a product that does not exist")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
