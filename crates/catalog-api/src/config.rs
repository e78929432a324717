//! Service Configuration
//!
//! Layered from built-in defaults, an optional TOML file and environment
//! variables such as `CATALOG_SERVER__GRPC_PORT=9090`.

use std::path::Path;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// gRPC listener
    #[serde(default = "default_grpc_port")]
    pub grpc_port: u16,

    /// Health and metrics listener
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            grpc_port: default_grpc_port(),
            http_port: default_http_port(),
        }
    }
}

impl ServerConfig {
    pub fn grpc_addr(&self) -> String {
        format!("{}:{}", self.host, self.grpc_port)
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Matches buffered between the store scan and the response stream
    /// before the scan blocks
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stream_buffer: default_stream_buffer(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::Message(format!("invalid log level: {}", self.level)))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_grpc_port() -> u16 {
    8080
}

fn default_http_port() -> u16 {
    8081
}

fn default_stream_buffer() -> usize {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CatalogConfig {
    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.stream_buffer == 0 {
            return Err(ConfigError::Message(
                "search.stream_buffer must be greater than 0".to_string(),
            ));
        }

        if self.server.grpc_port == self.server.http_port {
            return Err(ConfigError::Message(format!(
                "server.grpc_port and server.http_port must differ (both {})",
                self.server.grpc_port
            )));
        }

        self.logging.max_level()?;
        Ok(())
    }
}

/// Load configuration from `path` (if it exists) and the environment
pub fn load<P: AsRef<Path>>(path: P) -> Result<CatalogConfig, ConfigError> {
    let config: CatalogConfig = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(
            Environment::with_prefix("CATALOG")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    // Env vars are process-wide; every test that calls `load` holds this
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("catalog-config-{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.grpc_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.http_addr(), "0.0.0.0:8081");
        assert_eq!(config.search.stream_buffer, 16);
    }

    #[test]
    fn test_zero_stream_buffer_rejected() {
        let mut config = CatalogConfig::default();
        config.search.stream_buffer = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_port_clash_rejected() {
        let mut config = CatalogConfig::default();
        config.server.http_port = config.server.grpc_port;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = CatalogConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let _guard = env_lock();
        let config = load("/nonexistent/catalog.toml").unwrap();
        assert_eq!(config.server.grpc_port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let _guard = env_lock();
        let path = write_config(
            "file",
            "[server]\ngrpc_port = 9090\n\n[search]\nstream_buffer = 4\n\n[logging]\njson = true",
        );

        let config = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.grpc_port, 9090);
        assert_eq!(config.server.http_port, 8081);
        assert_eq!(config.search.stream_buffer, 4);
        assert!(config.logging.json);
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let _guard = env_lock();
        let path = write_config(
            "env",
            "[server]\ngrpc_port = 9090\n\n[search]\nstream_buffer = 4",
        );

        std::env::set_var("CATALOG_SERVER__GRPC_PORT", "9191");
        std::env::set_var("CATALOG_SEARCH__STREAM_BUFFER", "3");
        let result = load(&path);
        std::env::remove_var("CATALOG_SERVER__GRPC_PORT");
        std::env::remove_var("CATALOG_SEARCH__STREAM_BUFFER");
        std::fs::remove_file(&path).ok();

        let config = result.unwrap();
        assert_eq!(config.server.grpc_port, 9191);
        assert_eq!(config.search.stream_buffer, 3);
        assert_eq!(config.server.http_port, 8081);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_value_is_validated() {
        let _guard = env_lock();

        std::env::set_var("CATALOG_SEARCH__STREAM_BUFFER", "0");
        let result = load("/nonexistent/catalog.toml");
        std::env::remove_var("CATALOG_SEARCH__STREAM_BUFFER");

        assert!(result.is_err());
    }
}
