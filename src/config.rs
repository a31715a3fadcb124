//! hsdsql configuration (`hsdsql.toml`).
//!
//! ```toml
//! [api]
//! url = "https://hsdes-api.intel.com/rest/query/MetaData"
//! token = "..."
//! timeout_secs = 30
//!
//! [query]
//! namespace = "https://hsdes.intel.com/schemas/2012/Query"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::ast::QUERY_NAMESPACE;
use crate::error::ConfigError;

/// Project-local config file name.
pub const CONFIG_FILE: &str = "hsdsql.toml";

const DEFAULT_API_URL: &str = "https://hsdes-api.intel.com/rest/query/MetaData";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
}

/// Query metadata endpoint and its credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    /// Bearer token; takes precedence over basic credentials.
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            token: None,
            username: None,
            password: None,
            insecure: false,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Namespace URI of query documents.
    pub namespace: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            namespace: QUERY_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the first default location that exists.
    ///
    /// An explicit path must exist; missing default files yield the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_paths().into_iter().find(|p| p.exists()) {
            Some(found) => Self::from_file(&found),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: shown.clone(),
            source,
        })?;
        debug!(path = %shown, "loaded config");
        Ok(config)
    }

    /// `./hsdsql.toml`, then `<config dir>/hsdsql/config.toml`.
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("hsdsql").join("config.toml"));
        }
        paths
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api.url = url.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.api.token = Some(token.into());
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.api.insecure = insecure;
        self
    }
}
