//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Site owner, also used as the author of posts that do not name one
    pub author: String,

    // Content
    pub content_dir: String,
    pub extensions: Vec<String>,
    pub exclude_prefix: String,
    pub words_per_minute: usize,

    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Devblog".to_string(),
            author: "Anonymous".to_string(),

            content_dir: "posts".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            exclude_prefix: "_".to_string(),
            words_per_minute: 200,

            gate: GateConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Private-post gate configuration
///
/// The secret itself never lives here; only the name of the environment
/// variable that carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub secret_env: String,
    pub confirm_delay_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            secret_env: "PRIVATE_POST_SECRET".to_string(),
            confirm_delay_ms: 1000,
        }
    }
}

impl GateConfig {
    /// Delay between a successful unlock and revealing the post
    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_delay_ms)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}
