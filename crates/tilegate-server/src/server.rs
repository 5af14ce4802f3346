use std::future::Future;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Tile proxy server.
pub struct TileServer {
    config: ServerConfig,
}

impl TileServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router from the configured store (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        self.config.validate()?;
        let store = self.config.store.build()?;
        let state = AppState::from_config(&self.config, store)?;
        Ok(build_router(state, &self.config.route_prefix, self.config.cors))
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await
    }

    /// Serve until `shutdown` resolves; in-flight requests are drained.
    pub async fn serve_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            prefix = %self.config.route_prefix,
            store = ?self.config.store,
            "tilegate listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("tilegate stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[test]
    fn server_construction() {
        let server = TileServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8787".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = TileServer::new(ServerConfig::default());
        assert!(server.router().is_ok());
    }

    #[test]
    fn router_rejects_missing_root() {
        let config = ServerConfig {
            store: StoreConfig::Filesystem { root: "/definitely/not/here".into() },
            ..Default::default()
        };
        assert!(TileServer::new(config).router().is_err());
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            ..Default::default()
        };
        TileServer::new(config).serve_until(async {}).await.unwrap();
    }
}
