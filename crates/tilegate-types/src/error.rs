use thiserror::Error;

/// Errors produced when constructing foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("object key must not be empty")]
    EmptyKey,

    #[error("object key must not start with '/': {0:?}")]
    LeadingSlash(String),

    #[error("version tag must not be empty")]
    EmptyVersionTag,

    #[error("version tag contains a forbidden character: {0:?}")]
    InvalidVersionTag(char),
}
