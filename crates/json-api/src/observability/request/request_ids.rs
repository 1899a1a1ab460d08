//! Request ID generation and response header helpers.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(request_id, "could not encode request id header: {source}");
        }
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_request_id_is_replaced() {
        let resolved = resolve_request_id(Some("   ".to_string()));

        assert!(Uuid::parse_str(&resolved).is_ok(), "expected generated id");
    }

    #[test]
    fn test_oversized_request_id_is_replaced() {
        let resolved = resolve_request_id(Some("x".repeat(MAX_REQUEST_ID_LEN + 1)));

        assert!(Uuid::parse_str(&resolved).is_ok(), "expected generated id");
    }

    #[test]
    fn test_request_id_is_trimmed() {
        assert_eq!(resolve_request_id(Some(" abc ".to_string())), "abc");
    }
}
