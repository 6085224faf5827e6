use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },

    #[error("{key} must be a boolean, got {value}")]
    InvalidBool { key: &'static str, value: String },
}

/// Process configuration, taken from `.env` and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Enables a daily rolling log file in this directory.
    pub log_dir: Option<PathBuf>,
    pub debug_mode: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is normal outside local development
        let _ = dotenvy::dotenv();
        let kv: HashMap<String, String> = std::env::vars().collect();
        Self::from_kv(&kv)
    }

    pub fn from_kv(kv: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_addr = match non_empty(kv, "MESHGRAPH_BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidAddr {
                key: "MESHGRAPH_BIND_ADDR",
                value: raw.to_string(),
            })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidAddr {
                    key: "MESHGRAPH_BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let log_level = non_empty(kv, "MESHGRAPH_LOG_LEVEL")
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string();

        let log_dir = non_empty(kv, "MESHGRAPH_LOG_DIR").map(PathBuf::from);

        let debug_mode = match non_empty(kv, "MESHGRAPH_DEBUG_MODE") {
            Some(raw) => parse_bool(raw).ok_or_else(|| ConfigError::InvalidBool {
                key: "MESHGRAPH_DEBUG_MODE",
                value: raw.to_string(),
            })?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            log_level,
            log_dir,
            debug_mode,
        })
    }
}

fn non_empty<'a>(kv: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    kv.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
