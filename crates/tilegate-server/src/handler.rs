use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::content::serve_object;
use crate::state::AppState;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "tilegate",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store.name(),
        "store_timeout_ms": state.store_timeout.as_millis() as u64,
    }))
}

/// Object handler for `GET` and `HEAD` under the route prefix.
pub async fn object_handler(
    State(state): State<AppState>,
    method: Method,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Response {
    match serve_object(&state, &key, &method, &headers).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(%key, status = %e.status(), "object request rejected");
            e.into_response()
        }
    }
}
