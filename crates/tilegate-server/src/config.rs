use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tilegate_store::{BackingStore, FsStore, InMemoryStore, UnavailableStore};

use crate::error::{ServerError, ServerResult};

/// Server configuration, usually loaded from a TOML file.
///
/// ```toml
/// bind_addr = "0.0.0.0:8787"
/// route_prefix = "/v1/object"
/// store_timeout_ms = 5000
/// cache_max_age = 86400
///
/// [store]
/// kind = "filesystem"
/// root = "/srv/tiles"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Path prefix under which object keys are served, without a trailing slash.
    pub route_prefix: String,
    pub store: StoreConfig,
    /// Upper bound for each backing-store call.
    pub store_timeout_ms: u64,
    /// `max-age` directive of the `Cache-Control` header, in seconds.
    pub cache_max_age: u64,
    pub content_type: String,
    /// Allow cross-origin `GET`/`HEAD` from any origin.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8787)),
            route_prefix: "/v1/object".into(),
            store: StoreConfig::None,
            store_timeout_ms: 5_000,
            cache_max_age: 86_400,
            content_type: "application/octet-stream".into(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if !self.route_prefix.starts_with('/') || self.route_prefix.ends_with('/') {
            return Err(ServerError::Config(format!(
                "route_prefix must start with '/' and not end with '/': {:?}",
                self.route_prefix
            )));
        }
        if self.route_prefix.contains('*') || self.route_prefix.contains(':') {
            return Err(ServerError::Config(format!(
                "route_prefix must be a literal path: {:?}",
                self.route_prefix
            )));
        }
        if self.store_timeout_ms == 0 {
            return Err(ServerError::Config("store_timeout_ms must be positive".into()));
        }
        HeaderValue::from_str(&self.content_type).map_err(|_| {
            ServerError::Config(format!("invalid content_type: {:?}", self.content_type))
        })?;
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age)
    }
}

/// Which backing store to serve from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// No store: every object request answers 503.
    #[default]
    None,
    /// Empty in-memory store, for smoke tests.
    Memory,
    /// Files below `root`.
    Filesystem { root: PathBuf },
}

impl StoreConfig {
    pub fn build(&self) -> ServerResult<Arc<dyn BackingStore>> {
        match self {
            Self::None => Ok(Arc::new(UnavailableStore::not_configured())),
            Self::Memory => Ok(Arc::new(InMemoryStore::new())),
            Self::Filesystem { root } => {
                if !root.is_dir() {
                    return Err(ServerError::Config(format!(
                        "store root is not a directory: {}",
                        root.display()
                    )));
                }
                Ok(Arc::new(FsStore::new(root.clone())))
            }
        }
    }
}
