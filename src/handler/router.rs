//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, dispatch, and
//! access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::{relay, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Request context for the static file fallback
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let referer = req
        .headers()
        .get("referer")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = dispatch(req, &state).await;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method, path);
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Match the request against the relay route and dispatch.
///
/// Preflight requests short-circuit on any path; everything the relay route
/// does not claim falls through to the static file fallback.
async fn dispatch(req: Request<Incoming>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    match (method, path.as_str()) {
        (Method::OPTIONS, _) => http::build_preflight_response(),
        (Method::POST, relay::ROUTE) => relay::handle(req, state).await,
        (Method::GET | Method::HEAD, _) => {
            let ctx = RequestContext {
                path: &path,
                is_head,
            };
            static_files::serve(&ctx, &state.config.static_files).await
        }
        (method, path) => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            http::build_405_response()
        }
    }
}
