//! HTTP response building module
//!
//! Builders for every response shape the server emits, decoupled from the
//! handlers that choose between them. Builder failures are logged and
//! degrade to an empty response instead of unwinding.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::cors;

/// Build the relay success response.
///
/// Always 200: the upstream's own status code is not propagated, callers are
/// expected to interpret the relayed body itself.
pub fn build_relay_response(data: Bytes) -> Response<Full<Bytes>> {
    let content_length = data.len();
    cors::apply_full(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("relay", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the relay failure response: 500 with a JSON `error` field
pub fn build_relay_error_response(description: &str) -> Response<Full<Bytes>> {
    build_relay_reject_response(500, description)
}

/// Build a JSON error response for the relay route.
///
/// Carries the origin header so browser callers can read the error body.
pub fn build_relay_reject_response(status: u16, description: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": description }).to_string();
    cors::apply_origin(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("relay error", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the preflight response: empty 200 with the CORS header set
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    cors::apply_full(Response::builder())
        .status(200)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("preflight", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, POST, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build a static file response
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a directory listing response
pub fn build_listing_response(html: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("listing", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn preflight_is_empty_200_with_cors_headers() {
        let response = build_preflight_response();
        assert_eq!(response.status(), 200);
        assert!(response.headers().get("Content-Type").is_none());
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(
            response
                .headers()
                .get("Access-Control-Allow-Methods")
                .unwrap(),
            "POST, GET, OPTIONS"
        );
        assert_eq!(
            response
                .headers()
                .get("Access-Control-Allow-Headers")
                .unwrap(),
            "Content-Type"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn relay_response_carries_body_and_cors_headers() {
        let payload = Bytes::from_static(b"{\"ping\":1}");
        let response = build_relay_response(payload.clone());
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn relay_error_body_parses_as_json() {
        let response = build_relay_error_response("connection refused");
        assert_eq!(response.status(), 500);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["error"], "connection refused");
    }

    #[tokio::test]
    async fn reject_response_keeps_status_and_origin() {
        let response = build_relay_reject_response(413, "request body too large");
        assert_eq!(response.status(), 413);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(!parsed["error"].as_str().unwrap().is_empty());
    }

    #[test]
    fn head_file_response_has_headers_but_no_body() {
        let response = build_file_response(Bytes::from_static(b"hello"), "text/plain", true);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Length").unwrap(), "5");
    }

    #[test]
    fn method_not_allowed_lists_supported_methods() {
        let response = build_405_response();
        assert_eq!(response.status(), 405);
        assert_eq!(
            response.headers().get("Allow").unwrap(),
            "GET, HEAD, POST, OPTIONS"
        );
    }
}
