//! Relay handler module
//!
//! Bridges browser-originated POST requests to the configured upstream RPC
//! endpoint. The payload is forwarded verbatim and the upstream's response
//! body is relayed back verbatim under a CORS-enabled 200.

use std::fmt;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::HeaderMap;
use hyper::{Method, Request, Response, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Route served by the relay handler
pub const ROUTE: &str = "/proxy";

/// Failure while contacting the upstream endpoint.
///
/// The forward operation signals failure through this value; the handler
/// decides which response to emit from it.
#[derive(Debug)]
pub enum ForwardError {
    /// The outbound request could not be constructed
    Request(hyper::http::Error),
    /// Connection-level failure (refused, DNS, protocol error)
    Connect(hyper_util::client::legacy::Error),
    /// The upstream response body could not be read
    Read(hyper::Error),
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "failed to build upstream request: {e}"),
            Self::Connect(e) => write!(f, "upstream request failed: {e}"),
            Self::Read(e) => write!(f, "failed to read upstream response: {e}"),
        }
    }
}

/// Handle `POST /proxy`.
///
/// Validates the declared body length, forwards the payload, and translates
/// the outcome into a response. Every response from this handler carries
/// `Access-Control-Allow-Origin` so browser callers can read it.
pub async fn handle(req: Request<Incoming>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let max_body_size = state.config.http.max_body_size;

    // A missing or unparsable Content-Length is rejected outright rather
    // than trusted into an unbounded read
    let Some(content_length) = parse_content_length(req.headers()) else {
        logger::log_warning("Relay request rejected: missing or invalid Content-Length");
        return http::build_relay_reject_response(400, "missing or invalid Content-Length header");
    };

    if content_length > max_body_size {
        logger::log_warning(&format!(
            "Relay request rejected: declared body of {content_length} bytes exceeds limit of {max_body_size}"
        ));
        return http::build_relay_reject_response(413, "request body too large");
    }

    // hyper enforces the declared framing while collecting
    let payload = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Relay request body could not be read: {e}"));
            return http::build_relay_reject_response(400, "request body could not be read");
        }
    };

    match forward(&state.client, &state.upstream_uri, payload).await {
        Ok(upstream_body) => http::build_relay_response(upstream_body),
        Err(e) => {
            logger::log_error(&format!("Relay to {} failed: {e}", state.upstream_uri));
            http::build_relay_error_response(&e.to_string())
        }
    }
}

/// Forward a payload to the upstream endpoint and return its response body.
///
/// The upstream's status code is deliberately ignored: callers interpret
/// the relayed body itself. No timeout is applied to the outbound call, a
/// stalled upstream stalls only the requesting task.
pub async fn forward(
    client: &Client<HttpConnector, Full<Bytes>>,
    upstream: &Uri,
    payload: Bytes,
) -> Result<Bytes, ForwardError> {
    let req = Request::builder()
        .method(Method::POST)
        .uri(upstream.clone())
        .header("Content-Type", "application/json")
        .body(Full::new(payload))
        .map_err(ForwardError::Request)?;

    let response = client.request(req).await.map_err(ForwardError::Connect)?;
    let collected = response
        .into_body()
        .collect()
        .await
        .map_err(ForwardError::Read)?;
    Ok(collected.to_bytes())
}

fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-length")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper_util::rt::{TokioExecutor, TokioIo};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Spawn an upstream that echoes the request body with the given status
    async fn spawn_echo_upstream(status: u16) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req: Request<Incoming>| async move {
                        let body = req.into_body().collect().await.unwrap().to_bytes();
                        Ok::<_, std::convert::Infallible>(
                            Response::builder()
                                .status(status)
                                .body(Full::new(body))
                                .unwrap(),
                        )
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });
        addr
    }

    fn test_client() -> Client<HttpConnector, Full<Bytes>> {
        Client::builder(TokioExecutor::new()).build(HttpConnector::new())
    }

    #[tokio::test]
    async fn forward_round_trips_payload_bytes() {
        let addr = spawn_echo_upstream(200).await;
        let upstream: Uri = format!("http://{addr}").parse().unwrap();
        let payload = Bytes::from_static(b"{\"ping\":1}");

        let relayed = forward(&test_client(), &upstream, payload.clone())
            .await
            .unwrap();
        assert_eq!(relayed, payload);
    }

    #[tokio::test]
    async fn forward_ignores_upstream_status() {
        let addr = spawn_echo_upstream(503).await;
        let upstream: Uri = format!("http://{addr}").parse().unwrap();
        let payload = Bytes::from_static(b"{\"x\":1}");

        // A 503 from upstream is still a successful relay
        let relayed = forward(&test_client(), &upstream, payload.clone())
            .await
            .unwrap();
        assert_eq!(relayed, payload);
    }

    #[tokio::test]
    async fn forward_reports_unreachable_upstream() {
        // Nothing listens on the discard port
        let upstream: Uri = "http://127.0.0.1:9".parse().unwrap();
        let err = forward(&test_client(), &upstream, Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ForwardError::Connect(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn content_length_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_content_length(&headers), None);

        headers.insert("content-length", "42".parse().unwrap());
        assert_eq!(parse_content_length(&headers), Some(42));

        headers.insert("content-length", "not-a-number".parse().unwrap());
        assert_eq!(parse_content_length(&headers), None);
    }
}
