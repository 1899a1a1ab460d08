//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::products::ProductsServiceError;

use crate::errors::validation_error;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InUse => {
            StatusError::conflict().brief("Product is referenced by existing orders")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Validation(errors) => validation_error(&errors),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
