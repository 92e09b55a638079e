//! Application configuration

pub mod client;

use std::env;

use serde::{Deserialize, Serialize};

pub use client::{ChatClientConfig, ConfigError};

/// Remote debate service the proxy forwards to.
pub const DEFAULT_UPSTREAM_URL: &str = "https://philbate.onrender.com/debate/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            upstream_url: env::var("DEBATE_UPSTREAM_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.into()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
        }
    }
}
