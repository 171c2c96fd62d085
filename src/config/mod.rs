// Configuration module entry point
// Layers built-in defaults, an optional config file, and environment variables

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from the default `config.toml` location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; defaults reproduce the reference behavior
    /// of serving the working directory on port 9000.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DEVSERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9000)?
            .set_default("server.root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.directory_listing", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.root, ".");
        assert_eq!(cfg.server.workers, None);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.http.directory_listing);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_socket_addr_rejects_bad_host() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
