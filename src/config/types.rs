// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub http: HttpConfig,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Upstream endpoint configuration
///
/// A single fixed target; every relayed request goes here.
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub url: String,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Largest request body accepted on the relay route, in bytes
    pub max_body_size: u64,
}

/// Static file fallback configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    /// Serving root, relative paths resolve against the working directory
    pub root: String,
    /// Candidates tried when a request path resolves to a directory
    pub index_files: Vec<String>,
    /// Generate an HTML listing when a directory has no index file
    pub directory_listing: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}
