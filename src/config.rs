//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which gateway implementation to talk to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// In-process mock, optionally backed by a JSON file
    Mock,
    /// Remote REST API
    Http,
}

impl std::str::FromStr for GatewayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(GatewayMode::Mock),
            "http" => Ok(GatewayMode::Http),
            other => Err(format!("unknown gateway mode: {}", other)),
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_mode")]
    pub mode: GatewayMode,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Artificial delay applied to every mock call
    #[serde(default)]
    pub mock_latency_ms: u64,

    #[serde(default = "default_mock_data_file")]
    pub mock_data_file: Option<String>,
}

fn default_gateway_mode() -> GatewayMode {
    GatewayMode::Mock
}

fn default_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("healthlog"))
        .unwrap_or_else(|| PathBuf::from("./healthlog_data"))
}

fn default_mock_data_file() -> Option<String> {
    Some(
        default_data_dir()
            .join("mock_api.json")
            .to_string_lossy()
            .to_string(),
    )
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: default_gateway_mode(),
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
            mock_latency_ms: 0,
            mock_data_file: default_mock_data_file(),
        }
    }
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    default_data_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
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
            dirs::config_dir().map(|p| p.join("healthlog").join("config.toml")),
            Some(PathBuf::from("./healthlog.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(mode) = std::env::var("HEALTHLOG_GATEWAY_MODE") {
            match mode.parse() {
                Ok(m) => self.gateway.mode = m,
                Err(e) => tracing::warn!("Ignoring HEALTHLOG_GATEWAY_MODE: {}", e),
            }
        }
        if let Ok(url) = std::env::var("HEALTHLOG_API_URL") {
            self.gateway.base_url = url;
        }
        if let Ok(file) = std::env::var("HEALTHLOG_MOCK_DATA_FILE") {
            self.gateway.mock_data_file = if file.is_empty() { None } else { Some(file) };
        }

        if let Ok(file) = std::env::var("HEALTHLOG_SESSION_FILE") {
            self.session.file = file;
        }

        if let Ok(level) = std::env::var("HEALTHLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HEALTHLOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Healthlog Configuration
#
# Environment variables override these settings:
# - HEALTHLOG_GATEWAY_MODE
# - HEALTHLOG_API_URL
# - HEALTHLOG_MOCK_DATA_FILE
# - HEALTHLOG_SESSION_FILE
# - HEALTHLOG_LOG_LEVEL
# - HEALTHLOG_LOG_FORMAT

[gateway]
# "mock" keeps everything local, "http" talks to base_url
mode = "mock"

# REST API base URL (http mode)
base_url = "http://localhost:4000/api"

# Request timeout in milliseconds
request_timeout_ms = 10000

# Simulated latency for the mock gateway (ms)
mock_latency_ms = 0

# File the mock gateway persists accounts and entries to
# mock_data_file = "~/.local/share/healthlog/mock_api.json"

[session]
# File holding the remembered session token
# file = "~/.local/share/healthlog/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
