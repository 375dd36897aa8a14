//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides. The
//! structures themselves are plain serde types so the browser UI can build
//! them too; file and environment loading is native only.

use serde::{Deserialize, Serialize};
#[cfg(feature = "native")]
use std::path::{Path, PathBuf};

use crate::client::{resolve_base, DEFAULT_DEV_ORIGIN};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Explicit backend base URL; wins over every other rule
    #[serde(default)]
    pub base_url: Option<String>,

    /// Backend origin used when the page is not served over http(s)
    #[serde(default = "default_dev_origin")]
    pub dev_origin: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_dev_origin() -> String {
    DEFAULT_DEV_ORIGIN.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            dev_origin: default_dev_origin(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Base URL for backend requests.
    ///
    /// `page_protocol` is the protocol of the page hosting the client, or
    /// `None` outside a browser (which behaves like a `file:` page).
    pub fn resolved_base(&self, page_protocol: Option<&str>) -> String {
        resolve_base(self.base_url.as_deref(), page_protocol, &self.dev_origin)
    }
}

/// Widget behaviour
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Raise a notice for failed widget loads instead of only logging them
    #[serde(default)]
    pub surface_read_errors: bool,

    /// Maximum customer table rows, 0 for no limit
    #[serde(default)]
    pub customer_limit: usize,
}

impl DashboardConfig {
    pub fn customer_limit(&self) -> Option<usize> {
        match self.customer_limit {
            0 => None,
            n => Some(n),
        }
    }
}

/// Static dashboard server configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built browser UI
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Allowed CORS origins, empty to allow any
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_static_dir() -> String {
    "churn-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[cfg(feature = "native")]
impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("churn-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/churn-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("CHURN_API_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(origin) = var("CHURN_DEV_ORIGIN") {
            self.api.dev_origin = origin;
        }
        if let Some(timeout) = var("CHURN_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        // Dashboard overrides
        if let Some(surface) = var("CHURN_SURFACE_READ_ERRORS") {
            self.dashboard.surface_read_errors =
                matches!(surface.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        // Server overrides
        if let Some(host) = var("CHURN_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("CHURN_SERVER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(dir) = var("CHURN_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // Logging overrides
        if let Some(level) = var("CHURN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CHURN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[cfg(feature = "native")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Churn Dashboard Configuration
#
# Environment variables override these settings:
# - CHURN_API_URL
# - CHURN_DEV_ORIGIN
# - CHURN_API_TIMEOUT_SECS
# - CHURN_SURFACE_READ_ERRORS
# - CHURN_SERVER_HOST
# - CHURN_SERVER_PORT
# - CHURN_STATIC_DIR
# - CHURN_LOG_LEVEL
# - CHURN_LOG_FORMAT

[api]
# Backend base URL. When unset, a page served over http(s) uses its own
# origin and anything else uses dev_origin.
# base_url = "http://127.0.0.1:8000"

# Backend origin for pages opened from disk
dev_origin = "http://127.0.0.1:8000"

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Show a notification when a widget fails to load (failures are always logged)
surface_read_errors = false

# Maximum rows in the customer table, 0 for no limit
customer_limit = 0

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8084

# Directory with the built browser UI
static_dir = "churn-ui/dist"

# Allowed CORS origins, empty to allow any
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://churn.internal:8000\"\n\n[dashboard]\ncustomer_limit = 10"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://churn.internal:8000")
        );
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.dashboard.customer_limit(), Some(10));
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url =").unwrap();
        assert!(matches!(
            Config::load(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHURN_API_URL", "https://churn.example.com"),
            ("CHURN_API_TIMEOUT_SECS", "5"),
            ("CHURN_SURFACE_READ_ERRORS", "true"),
            ("CHURN_SERVER_PORT", "not-a-port"),
            ("CHURN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.resolved_base(None), "https://churn.example.com");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert!(config.dashboard.surface_read_errors);
        // Unparsable values are ignored
        assert_eq!(config.server.port, 8084);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_resolved_base_without_override() {
        let api = ApiConfig::default();
        assert_eq!(api.resolved_base(None), DEFAULT_DEV_ORIGIN);
        assert_eq!(api.resolved_base(Some("file:")), DEFAULT_DEV_ORIGIN);
        assert_eq!(api.resolved_base(Some("https:")), "");
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        assert_eq!(DashboardConfig::default().customer_limit(), None);
    }
}
