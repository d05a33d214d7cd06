// Application state module
// Per-process state shared by every connection task

use std::sync::atomic::AtomicBool;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Uri;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use super::types::Config;

/// Application state
///
/// Replaces per-request globals: the upstream target and the outbound client
/// are constructed once and handed to handlers by `Arc`, so tests can point
/// an instance at a mock upstream.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Parsed upstream endpoint, validated at startup
    pub upstream_uri: Uri,
    /// Outbound HTTP client for relayed requests
    pub client: Client<HttpConnector, Full<Bytes>>,
    /// Cached access-log flag for lock-free reads on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Build shared state from a loaded configuration.
    ///
    /// Fails when the configured upstream URL does not parse; request
    /// handling never sees an invalid target.
    pub fn new(config: Config) -> Result<Self, String> {
        let upstream_uri: Uri = config
            .upstream
            .url
            .parse()
            .map_err(|e| format!("Invalid upstream URL '{}': {e}", config.upstream.url))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Ok(Self {
            config,
            upstream_uri,
            client,
            cached_access_log,
        })
    }
}
