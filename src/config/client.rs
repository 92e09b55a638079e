//! Chat client configuration loaded from TOML files
//!
//! The terminal client needs to know where the proxy lives and where to
//! write its logs, since it owns the terminal it would otherwise log to.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Root chat client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatClientConfig {
    /// Proxy endpoint settings
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Log output settings
    #[serde(default)]
    pub log: LogConfig,
}

impl ChatClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: ChatClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `DEBATER_CHAT_CONFIG` if set, then apply `DEBATER_PROXY_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var("DEBATER_CHAT_CONFIG").ok().map(PathBuf::from);
        let proxy_url = env::var("DEBATER_PROXY_URL").ok();
        Self::load(path.as_deref(), proxy_url)
    }

    pub fn load(path: Option<&Path>, proxy_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(url) = proxy_url {
            config.proxy.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.proxy.url.trim().is_empty() {
            return Err(ConfigError::Validation("proxy.url must not be empty".into()));
        }
        Ok(())
    }

    /// Where the client writes its log
    pub fn log_path(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("debater-chat.log"))
    }
}

/// Proxy endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Full URL of the debate endpoint
    #[serde(default = "default_proxy_url")]
    pub url: String,
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:3000/api/debate".to_string()
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            url: default_proxy_url(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file; defaults to `debater-chat.log` in the temp directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "debater=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_filter(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
