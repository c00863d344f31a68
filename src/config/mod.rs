// Configuration module entry point
// Manages application configuration and shared runtime state

mod types;

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::atomic::AtomicBool;

// Re-export public types
pub use types::{Config, ContentConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" (optional) plus
    /// `DEMO_`-prefixed environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DEMO"))
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8000)?
            .set_default("content.root_dir", ".")?
            .set_default("content.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve `host:port` to a socket address.
    ///
    /// Hostnames like `localhost` go through the system resolver; an
    /// unresolvable host is a startup error.
    pub fn socket_addr(&self) -> std::io::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    format!("host '{}' did not resolve to any address", self.server.host),
                )
            })
    }
}

/// Shared application state, one per process
pub struct AppState {
    pub config: Config,

    // Cached config value for lock-free access on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            cached_access_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        assert_eq!(cfg.server.host, "localhost");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.content.root_dir, ".");
        assert_eq!(cfg.content.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
    }

    #[test]
    fn test_socket_addr_resolves_localhost() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        let addr = cfg.socket_addr().expect("localhost should resolve");
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_socket_addr_unresolvable_host() {
        let mut cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        cfg.server.host = "no-such-host.invalid".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
