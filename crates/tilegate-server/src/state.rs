use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tilegate_store::BackingStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Per-process handler state.
///
/// Holds no request data. Cloned into every handler invocation; the store is
/// shared behind an `Arc` and only ever read.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BackingStore>,
    pub store_timeout: Duration,
    pub content_type: HeaderValue,
    pub cache_control: HeaderValue,
}

impl AppState {
    /// State with default headers and timeout around `store`.
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        let defaults = ServerConfig::default();
        Self {
            store,
            store_timeout: defaults.store_timeout(),
            content_type: HeaderValue::from_static("application/octet-stream"),
            cache_control: HeaderValue::from_static("public, max-age=86400"),
        }
    }

    pub fn from_config(config: &ServerConfig, store: Arc<dyn BackingStore>) -> ServerResult<Self> {
        let header = |name: &str, value: String| {
            HeaderValue::try_from(value)
                .map_err(|e| ServerError::Config(format!("invalid {name} header: {e}")))
        };
        Ok(Self {
            store,
            store_timeout: config.store_timeout(),
            content_type: header("content_type", config.content_type.clone())?,
            cache_control: header("cache_control", config.cache_control())?,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.name())
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}
