//! Backing object stores for tilegate.
//!
//! The proxy never owns the objects it serves. It needs exactly two things
//! from a store: a metadata lookup that returns size and version tag without
//! moving the body, and a fetch that returns either the whole body or one
//! contiguous sub-range of it.
//!
//! # Storage Backends
//!
//! All backends implement the [`BackingStore`] trait:
//!
//! - [`InMemoryStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsStore`] -- objects are files below a root directory
//! - [`UnavailableStore`] -- stands in when no store is configured
//!
//! # Design Rules
//!
//! 1. Stores are read-only from the proxy's point of view.
//! 2. Absence is `Ok(None)`, never an error.
//! 3. Any other failure is an error; the caller decides how to surface it.
//! 4. A ranged fetch receives a validated
//!    [`ByteRange`](tilegate_types::ByteRange), never header text.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;
pub mod unavailable;
pub mod version;

pub use error::{StoreError, StoreResult};
pub use fs::FsStore;
pub use memory::InMemoryStore;
pub use traits::{BackingStore, ObjectBody};
pub use unavailable::UnavailableStore;
