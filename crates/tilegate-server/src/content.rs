//! Full-versus-partial object serving.
//!
//! Per request: metadata lookup, conditional check, `Range` interpretation,
//! fetch, response assembly. Nothing is remembered between requests; every
//! request re-resolves the object against the backing store.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use tilegate_store::{ObjectBody, StoreError};
use tilegate_types::{parse_range, ByteRange, ObjectKey, ObjectMeta, RangeOutcome};

use crate::error::ServeError;
use crate::resolve::resolve;
use crate::state::AppState;

/// Serve `raw_key` for a `GET` or `HEAD` request.
///
/// | lookup    | `Range`              | status |
/// |-----------|----------------------|--------|
/// | missing   | any                  | 404    |
/// | failed    | any                  | 503    |
/// | found     | absent / malformed   | 200    |
/// | found     | valid                | 206    |
/// | found     | unsatisfiable        | 416    |
///
/// A matching `If-None-Match` short-circuits to 304 before the range is
/// looked at. `HEAD` skips the fetch and returns headers only.
pub async fn serve_object(
    state: &AppState,
    raw_key: &str,
    method: &Method,
    headers: &HeaderMap,
) -> Result<Response, ServeError> {
    let key = ObjectKey::new(raw_key).map_err(|_| ServeError::NotFound)?;
    let meta = resolve(state.store.as_ref(), &key, state.store_timeout).await?;

    if let Some(inm) = header_str(headers, &header::IF_NONE_MATCH) {
        if meta.version_tag.matches_if_none_match(inm) {
            tracing::debug!(%key, "not modified");
            return not_modified(state, &meta);
        }
    }

    let range = match parse_range(header_str(headers, &header::RANGE), meta.size) {
        RangeOutcome::Full => None,
        RangeOutcome::Partial(r) => Some(r),
        RangeOutcome::Unsatisfiable => {
            tracing::debug!(%key, size = meta.size, "range not satisfiable");
            return Err(ServeError::UnsatisfiableRange { size: meta.size });
        }
    };

    let body = if *method == Method::HEAD {
        Bytes::new()
    } else {
        fetch(state, &key, &meta, range).await?.body
    };

    tracing::debug!(
        %key,
        size = meta.size,
        range = ?range.map(|r| r.to_string()),
        head = *method == Method::HEAD,
        "serving object"
    );
    object_response(state, &meta, range, body)
}

/// Fetch the bytes decided on, bounded by the store timeout.
///
/// The object may change between the metadata lookup and the fetch. If it
/// vanished the request is a 404; if it no longer matches the looked-up
/// size and tag the response headers would lie, so the request fails as
/// unavailable and the client may retry.
async fn fetch(
    state: &AppState,
    key: &ObjectKey,
    meta: &ObjectMeta,
    range: Option<ByteRange>,
) -> Result<ObjectBody, ServeError> {
    let store = state.store.as_ref();
    let fetched = match tokio::time::timeout(state.store_timeout, store.get(key, range)).await {
        Ok(Ok(Some(obj))) => obj,
        Ok(Ok(None)) => return Err(ServeError::NotFound),
        Ok(Err(StoreError::InvalidRange { .. })) => {
            tracing::warn!(%key, "object shrank between lookup and fetch");
            return Err(ServeError::Unavailable("object changed during request".into()));
        }
        Ok(Err(e)) => {
            tracing::warn!(store = store.name(), %key, error = %e, "fetch failed");
            return Err(ServeError::Unavailable(e.to_string()));
        }
        Err(_) => {
            tracing::warn!(store = store.name(), %key, timeout = ?state.store_timeout, "fetch timed out");
            return Err(ServeError::Unavailable("fetch timed out".into()));
        }
    };

    let expected = range.map_or(meta.size, |r| r.length());
    if fetched.version_tag != meta.version_tag || fetched.body.len() as u64 != expected {
        tracing::warn!(%key, "object changed between lookup and fetch");
        return Err(ServeError::Unavailable("object changed during request".into()));
    }
    Ok(fetched)
}

/// 200 or 206 response with the full header set.
fn object_response(
    state: &AppState,
    meta: &ObjectMeta,
    range: Option<ByteRange>,
    body: Bytes,
) -> Result<Response, ServeError> {
    let (status, length) = match range {
        Some(r) => (StatusCode::PARTIAL_CONTENT, r.length()),
        None => (StatusCode::OK, meta.size),
    };

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, state.content_type.clone())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CACHE_CONTROL, state.cache_control.clone())
        .header(header::ETAG, meta.version_tag.to_header_value())
        .header(header::CONTENT_LENGTH, length);
    if let Some(r) = range {
        builder = builder.header(header::CONTENT_RANGE, r.content_range(meta.size));
    }
    builder
        .body(Body::from(body))
        .map_err(|e| ServeError::Internal(e.to_string()))
}

fn not_modified(state: &AppState, meta: &ObjectMeta) -> Result<Response, ServeError> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CACHE_CONTROL, state.cache_control.clone())
        .header(header::ETAG, meta.version_tag.to_header_value())
        .body(Body::empty())
        .map_err(|e| ServeError::Internal(e.to_string()))
}

/// Header value as text; non-UTF-8 values are treated as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
