//! CORS header module
//!
//! The permissive header set that makes relay responses consumable from any
//! origin. Browser clients are the expected callers, so the values are fixed
//! rather than negotiated per request.

use hyper::http::response::Builder;

pub const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
pub const ALLOW_METHODS: (&str, &str) = ("Access-Control-Allow-Methods", "POST, GET, OPTIONS");
pub const ALLOW_HEADERS: (&str, &str) = ("Access-Control-Allow-Headers", "Content-Type");

/// Apply the full CORS header set (relay success and preflight responses)
pub fn apply_full(builder: Builder) -> Builder {
    builder
        .header(ALLOW_ORIGIN.0, ALLOW_ORIGIN.1)
        .header(ALLOW_METHODS.0, ALLOW_METHODS.1)
        .header(ALLOW_HEADERS.0, ALLOW_HEADERS.1)
}

/// Apply only the origin header (relay failure responses)
pub fn apply_origin(builder: Builder) -> Builder {
    builder.header(ALLOW_ORIGIN.0, ALLOW_ORIGIN.1)
}
