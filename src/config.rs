// ./src/config.rs

use crate::fetcher::CacheMode;
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// The public APOD endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// Address the server binds to when none is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the APOD API key is missing or empty (set APOD_API_KEY)")]
    MissingApiKey,

    #[error("invalid endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("invalid bind address {value:?}: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("unknown cache mode {0:?} (expected \"default\" or \"bypass\")")]
    InvalidCacheMode(String),

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file: {0}")]
    Toml(#[from] toml::de::Error),
}

// ════════════════════════════════════════════════════════════
// 1. Resolved configuration
// ════════════════════════════════════════════════════════════

/// Everything the pipeline and the server need, passed in explicitly.
///
/// The pipeline never reads process state itself; only [`ApodConfig::from_env`]
/// does, and only the binary calls it.
#[derive(Clone)]
pub struct ApodConfig {
    api_key: String,
    pub endpoint: Url,
    pub bind: SocketAddr,
    /// Cache behaviour for outbound record fetches when a request doesn't pick one.
    pub cache: CacheMode,
}

impl fmt::Debug for ApodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApodConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("bind", &self.bind)
            .field("cache", &self.cache)
            .finish()
    }
}

impl ApodConfig {
    /// Builds a config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        RawConfig {
            api_key: Some(api_key.into()),
            ..RawConfig::default()
        }
        .resolve()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    /// Parses a TOML document with the keys `api_key`, `endpoint`, `bind`, `cache`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str::<RawConfig>(source)?.resolve()
    }

    /// Loads `APOD_CONFIG` (a TOML file) if set, then applies `APOD_API_KEY`,
    /// `APOD_ENDPOINT`, `APOD_BIND` and `APOD_CACHE` on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match lookup("APOD_CONFIG") {
            Some(path) => RawConfig::from_file(Path::new(&path))?,
            None => RawConfig::default(),
        };

        let env = RawConfig {
            api_key: lookup("APOD_API_KEY"),
            endpoint: lookup("APOD_ENDPOINT"),
            bind: lookup("APOD_BIND"),
            cache: lookup("APOD_CACHE"),
        };

        file.overlay(env).resolve()
    }
}

// ════════════════════════════════════════════════════════════
// 2. Unresolved layer (file or environment)
// ════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    api_key: Option<String>,
    endpoint: Option<String>,
    bind: Option<String>,
    cache: Option<String>,
}

impl RawConfig {
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&source)?)
    }

    /// Values set in `other` win.
    fn overlay(self, other: RawConfig) -> RawConfig {
        RawConfig {
            api_key: other.api_key.or(self.api_key),
            endpoint: other.endpoint.or(self.endpoint),
            bind: other.bind.or(self.bind),
            cache: other.cache.or(self.cache),
        }
    }

    fn resolve(self) -> Result<ApodConfig, ConfigError> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let endpoint = parse_endpoint(self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;

        let bind_value = self.bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;

        let cache = match self.cache {
            Some(value) => value.parse()?,
            None => CacheMode::Bypass,
        };

        Ok(ApodConfig {
            api_key,
            endpoint,
            bind,
            cache,
        })
    }
}

fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            value: value.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
