//! Configuration management for multifetch.
//!
//! Configuration is read from `~/.config/multifetch/config.toml` at startup,
//! or from the path given with `--config`. If the default file doesn't exist,
//! a default configuration with comments is created.

use std::fs;
use std::io::Write;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::ResponseFormat;
use crate::fetcher::http_fetcher::DEFAULT_USER_AGENT;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8085";
pub const DEFAULT_VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub fetcher: FetcherConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub listen: String,
    /// Wire format of `/multi-fetch` responses when the request doesn't ask
    pub response_format: ResponseFormat,
    /// Upstream document served by `/versions`
    pub versions_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            response_format: ResponseFormat::default(),
            versions_url: DEFAULT_VERSIONS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Upper bound on in-flight fetches per batch. Unset means one task per URL.
    pub max_concurrency: Option<NonZeroUsize>,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/multifetch/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("multifetch").join("config.toml"))
    }

    /// Check values serde can't: addresses and URLs must parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;

        url::Url::parse(&self.server.versions_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "server.versions_url {:?}: {}",
                self.server.versions_url, e
            ))
        })?;

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.listen.parse().map_err(|e| {
            ConfigError::Invalid(format!("server.listen {:?}: {}", self.server.listen, e))
        })
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        format!(
            r##"# multifetch configuration

[server]
# Address the HTTP server listens on
listen = "{listen}"

# Format of /multi-fetch responses:
# - "legacy": array of strings, failed entries start with "Erreur: "
# - "tagged": array of {{ "ok": bool, "body" | "error": string }}
# Clients may override per request with ?format=legacy|tagged
response_format = "legacy"

# Document proxied by GET /versions
versions_url = "{versions_url}"

[fetcher]
# Maximum number of fetches in flight per batch.
# Leave unset to start one fetch per URL at once.
# max_concurrency = 16

user_agent = "{user_agent}"
"##,
            listen = DEFAULT_LISTEN,
            versions_url = DEFAULT_VERSIONS_URL,
            user_agent = DEFAULT_USER_AGENT,
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for {0}")]
    Invalid(String),
}
