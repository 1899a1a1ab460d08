//! Route labels for spans and metrics.

use uuid::Uuid;

/// Replace identifier segments so every order or product shares one label.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::route_label;

    #[test]
    fn test_root_path_is_kept() {
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn test_uuid_segments_are_replaced() {
        assert_eq!(
            route_label("/orders/0190f7a8-9b1e-7c2d-8e3f-4a5b6c7d8e9f"),
            "/orders/{uuid}"
        );
    }

    #[test]
    fn test_static_segments_are_kept() {
        assert_eq!(route_label("/products/info"), "/products/info");
        assert_eq!(route_label("/account/tokens/"), "/account/tokens");
    }
}
