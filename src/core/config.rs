//! Configuration management for the MCP server.
//!
//! All settings are read once from environment variables (a `.env` file is
//! honoured) when the process starts.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default Housecall Pro API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.housecallpro.com";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Housecall Pro API access.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Housecall Pro API settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer token. Required; the server refuses to start without it.
    pub api_key: Option<String>,

    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Whole-request timeout in seconds. `None` means no timeout.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "housecall-pro".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix, API settings the
    /// `HOUSECALL_PRO_` prefix. A missing API key is not an error here; it
    /// is rejected when the API client is built.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.parse().unwrap_or(true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var("HOUSECALL_PRO_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                config.api.api_key = Some(key);
                info!("Housecall Pro API key loaded from environment");
            }
            _ => warn!("HOUSECALL_PRO_API_KEY is not set"),
        }

        if let Ok(base_url) = std::env::var("HOUSECALL_PRO_BASE_URL") {
            info!("Using Housecall Pro base URL override: {}", base_url);
            config.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("HOUSECALL_PRO_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.api.timeout_secs = Some(secs),
                Err(_) => warn!("Ignoring invalid HOUSECALL_PRO_TIMEOUT_SECS: {}", timeout),
            }
        }

        config
    }
}
