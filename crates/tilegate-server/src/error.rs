use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures while starting or configuring the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Outcome of a single object request that is not a successful body.
///
/// Every variant is local to one request. Responses carry an empty body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServeError {
    /// Empty key, or no object under the key.
    #[error("object not found")]
    NotFound,

    /// Backing store not configured, unreachable, failing, or too slow.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    /// The `Range` header parsed but lies outside the object.
    #[error("range not satisfiable for object of {size} bytes")]
    UnsatisfiableRange { size: u64 },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::UnsatisfiableRange { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::UnsatisfiableRange { size } => (
                status,
                [
                    (header::CONTENT_RANGE, format!("bytes */{size}")),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
            )
                .into_response(),
            _ => status.into_response(),
        }
    }
}
