// Server configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;

use gemini_client::{ClientError, GeminiConfig};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Request bodies carry two base64 images, so the limit is well above the JSON overhead
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error(transparent)]
    Gemini(#[from] ClientError),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    pub format: LogFormat,

    /// Directory for daily rolling log files; console only when unset
    pub dir: Option<PathBuf>,
}

impl LogSettings {
    /// Read `LOG_FORMAT` and `LOG_DIR`
    pub fn from_env() -> Self {
        let format = match std::env::var("LOG_FORMAT") {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        let dir = std::env::var("LOG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self { format, dir }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    /// Read `API_BIND_ADDR`, `MAX_BODY_BYTES` and the Gemini client settings
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env_or("API_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "API_BIND_ADDR",
                value: bind_addr.clone(),
            })?;

        let max_body_bytes = match std::env::var("MAX_BODY_BYTES") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "MAX_BODY_BYTES",
                    value,
                })?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            max_body_bytes,
            gemini: GeminiConfig::from_env()?,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
