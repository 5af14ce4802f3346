//! HTTP server for tilegate.
//!
//! Serves objects out of a [`BackingStore`](tilegate_store::BackingStore)
//! with single-range byte-range support, entity tags, and public cache
//! headers. The server is stateless between requests: every request
//! resolves the object's metadata afresh, decides between a full and a
//! partial response, and fetches exactly the bytes it is about to send.

pub mod config;
pub mod content;
pub mod error;
pub mod handler;
pub mod resolve;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, StoreConfig};
pub use content::serve_object;
pub use error::{ServeError, ServerError, ServerResult};
pub use handler::HealthResponse;
pub use resolve::resolve;
pub use router::build_router;
pub use server::TileServer;
pub use state::AppState;
