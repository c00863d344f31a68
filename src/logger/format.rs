//! Access log format module
//!
//! Supports multiple log formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)

use chrono::Local;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// User-Agent header
    pub user_agent: Option<String>,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    #[must_use]
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            user_agent: None,
        }
    }

    /// Format the log entry according to the specified format
    #[must_use]
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// Apache/Nginx Combined Log Format (referer is never captured, logged as `-`)
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {} \"-\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.http_version,
            self.status,
            self.body_bytes,
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        let user_agent_json = self
            .user_agent
            .as_ref()
            .map_or_else(|| "null".to_string(), |u| format!("\"{}\"", escape_json(u)));

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","http_version":"{}","status":{},"body_bytes":{},"user_agent":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.format("%Y-%m-%dT%H:%M:%S%z"),
            escape_json(&self.method),
            escape_json(&self.path),
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            user_agent_json,
        )
    }
}

/// Escape a string for embedding in a JSON value
fn escape_json(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => "\\\"".chars().collect::<Vec<_>>(),
            '\\' => "\\\\".chars().collect(),
            '\n' => "\\n".chars().collect(),
            '\r' => "\\r".chars().collect(),
            '\t' => "\\t".chars().collect(),
            c => vec![c],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AccessLogEntry {
        let mut e = AccessLogEntry::new(
            "127.0.0.1".to_string(),
            "GET".to_string(),
            "/index.html".to_string(),
        );
        e.status = 200;
        e.body_bytes = 12;
        e
    }

    #[test]
    fn test_common_format() {
        let line = entry().format("common");
        assert!(line.starts_with("127.0.0.1 - - ["));
        assert!(line.contains("\"GET /index.html HTTP/1.1\" 200 12"));
    }

    #[test]
    fn test_combined_format_defaults_user_agent() {
        let line = entry().format("combined");
        assert!(line.ends_with("\"-\" \"-\""));
    }

    #[test]
    fn test_json_format_escapes_quotes() {
        let mut e = entry();
        e.path = "/a\"b".to_string();
        let line = e.format("json");
        assert!(line.contains(r#""path":"/a\"b""#));
    }

    #[test]
    fn test_unknown_format_falls_back_to_common() {
        let line = entry().format("whatever");
        assert!(line.contains("\"GET /index.html HTTP/1.1\" 200 12"));
    }
}
