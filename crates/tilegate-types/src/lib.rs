//! Foundation types for tilegate.
//!
//! Every other tilegate crate depends on `tilegate-types`. Nothing in here
//! performs I/O; the range parser in particular is a pure function of the
//! header text and the object size.
//!
//! # Key Types
//!
//! - [`ObjectKey`] -- Path-like, case-sensitive key of a stored object
//! - [`VersionTag`] -- Opaque entity tag that changes whenever an object's bytes change
//! - [`ObjectMeta`] -- Size and version tag returned by a metadata lookup
//! - [`ByteRange`] -- Validated `(offset, length)` interval within an object
//! - [`RangeOutcome`] -- Result of interpreting a `Range` header against a size

pub mod error;
pub mod key;
pub mod object;
pub mod range;

pub use error::TypeError;
pub use key::ObjectKey;
pub use object::{ObjectMeta, VersionTag};
pub use range::{parse_range, ByteRange, RangeOutcome};
