// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, ServerConfig, StaticFilesConfig, UpstreamConfig,
};

impl Config {
    /// Load configuration from `relay.toml` (if present), `RELAY_`-prefixed
    /// environment variables, and built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("relay")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("RELAY"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("upstream.url", "http://127.0.0.1:8229")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("static_files.root", ".")?
            .set_default("static_files.index_files", vec!["index.html", "index.htm"])?
            .set_default("static_files.directory_listing", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let cfg = Config::load_from("nonexistent-relay-config").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.upstream.url, "http://127.0.0.1:8229");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert_eq!(cfg.static_files.root, ".");
        assert!(cfg.static_files.directory_listing);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.logging.access_log_file.is_none());
    }

    #[test]
    fn socket_addr_from_defaults() {
        let cfg = Config::load_from("nonexistent-relay-config").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let mut cfg = Config::load_from("nonexistent-relay-config").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
