//! Access log format module
//!
//! Supports the `combined` (Apache/Nginx) format, `json` structured
//! logging, and custom patterns with `$variable` substitution.

use chrono::Local;

/// Access log entry containing request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub duration_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            duration_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Apache/Nginx Combined Log Format
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent "$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/1.1\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": &self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": &self.method,
            "path": &self.path,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": &self.referer,
            "user_agent": &self.user_agent,
            "duration_us": self.duration_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr` - Client IP address
    /// - `$time_local` - Local time in Common Log Format
    /// - `$request_method` - HTTP method
    /// - `$request_uri` - Request URI path
    /// - `$status` - Response status code
    /// - `$body_bytes_sent` - Response body size
    /// - `$http_referer` - Referer header
    /// - `$http_user_agent` - User-Agent header
    /// - `$duration_us` - Request processing time in microseconds
    fn format_custom(&self, pattern: &str) -> String {
        // Longer variables first to avoid partial replacement
        let mut line = pattern.to_string();
        line = line.replace("$remote_addr", &self.remote_addr);
        line = line.replace(
            "$time_local",
            &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
        );
        line = line.replace("$request_method", &self.method);
        line = line.replace("$request_uri", &self.path);
        line = line.replace("$status", &self.status.to_string());
        line = line.replace("$body_bytes_sent", &self.body_bytes.to_string());
        line = line.replace("$http_referer", self.referer.as_deref().unwrap_or("-"));
        line = line.replace(
            "$http_user_agent",
            self.user_agent.as_deref().unwrap_or("-"),
        );
        line = line.replace("$duration_us", &self.duration_us.to_string());
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "POST".to_string(),
            "/proxy".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = 58;
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.duration_us = 1500;
        entry
    }

    #[test]
    fn combined_format() {
        let entry = create_test_entry();
        let log = entry.format("combined");
        assert!(log.contains("192.168.1.1"));
        assert!(log.contains("POST /proxy HTTP/1.1"));
        assert!(log.contains("200 58"));
        assert!(log.contains("Mozilla/5.0"));
        // No referer recorded
        assert!(log.contains("\"-\""));
    }

    #[test]
    fn json_format() {
        let entry = create_test_entry();
        let log = entry.format("json");
        let parsed: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(parsed["remote_addr"], "192.168.1.1");
        assert_eq!(parsed["method"], "POST");
        assert_eq!(parsed["status"], 200);
        assert_eq!(parsed["body_bytes"], 58);
        assert_eq!(parsed["referer"], serde_json::Value::Null);
    }

    #[test]
    fn custom_format() {
        let entry = create_test_entry();
        let log = entry.format("$remote_addr $status $duration_us");
        assert_eq!(log, "192.168.1.1 200 1500");
    }
}
