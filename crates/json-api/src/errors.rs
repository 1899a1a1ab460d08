//! Shared HTTP error rendering.

use salvo::http::StatusError;

use shopfront_app::validation::ValidationErrors;

/// Render field failures as a 400 whose `detail` is the JSON list of
/// `{ "field", "kind" }` entries.
pub(crate) fn validation_error(errors: &ValidationErrors) -> StatusError {
    let detail = serde_json::to_string(errors).unwrap_or_else(|_| errors.to_string());

    StatusError::bad_request()
        .brief("Request failed validation")
        .detail(detail)
}
