use axum::extract::Request;
use axum::http::{header, HeaderName, Method};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

pub const HEALTH: &str = "/v1/health";
pub const INFO: &str = "/v1/info";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the axum router.
///
/// Objects are served at `{prefix}/*key`; `get` also answers `HEAD`.
/// Every request carries an `x-request-id`: the client's if it sent one,
/// otherwise a fresh UUID. The id is recorded on the request span and echoed
/// on the response.
pub fn build_router(state: AppState, prefix: &str, cors: bool) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let router = Router::new()
        .route(HEALTH, get(handler::health_handler))
        .route(INFO, get(handler::info_handler))
        .route(&format!("{prefix}/*key"), get(handler::object_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::new(request_id)),
        );

    if cors {
        router.layer(cors_layer())
    } else {
        router
    }
}

fn request_span(req: &Request) -> tracing::Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

/// Any origin may read objects and see the range-related headers.
fn cors_layer() -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers([header::RANGE, header::IF_NONE_MATCH, request_id.clone()])
        .expose_headers([
            header::ACCEPT_RANGES,
            header::CONTENT_LENGTH,
            header::CONTENT_RANGE,
            header::ETAG,
            request_id,
        ])
}
