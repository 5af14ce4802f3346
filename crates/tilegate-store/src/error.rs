use tilegate_types::{ByteRange, ObjectKey};

/// Errors from backing store operations.
///
/// A missing object is not an error; lookups return `Ok(None)` for it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store is not configured, unreachable, or refused the request.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    /// A ranged fetch does not fit the object as it currently exists.
    ///
    /// Happens when the object shrank between the metadata lookup and the
    /// fetch.
    #[error("range {range} does not fit {key} ({size} bytes)")]
    InvalidRange {
        key: ObjectKey,
        range: ByteRange,
        size: u64,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
