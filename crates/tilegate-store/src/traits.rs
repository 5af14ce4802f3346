use async_trait::async_trait;
use bytes::Bytes;
use tilegate_types::{ByteRange, ObjectKey, ObjectMeta, VersionTag};

use crate::error::StoreResult;

/// Bytes returned by a fetch, together with what the store knew about the
/// object when it served them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectBody {
    /// The served bytes: the whole object, or exactly `range`.
    pub body: Bytes,
    /// Total size of the object at fetch time.
    pub size: u64,
    /// Version tag at fetch time.
    pub version_tag: VersionTag,
    /// The sub-range that was served, `None` for a full fetch.
    pub range: Option<ByteRange>,
}

impl ObjectBody {
    pub fn meta(&self) -> ObjectMeta {
        ObjectMeta::new(self.size, self.version_tag.clone())
    }
}

/// Read-only object store the proxy serves from.
///
/// All implementations must satisfy these invariants:
/// - `head` never transfers the object body.
/// - A missing object is `Ok(None)`; errors mean the store itself failed.
/// - `get` with `Some(range)` returns exactly `range.length()` bytes starting
///   at `range.offset()`, or fails with `InvalidRange` if the object no
///   longer covers that interval.
/// - Concurrent calls are always safe; the proxy holds no locks around them.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Look up size and version tag for `key`.
    async fn head(&self, key: &ObjectKey) -> StoreResult<Option<ObjectMeta>>;

    /// Fetch the whole object, or one contiguous sub-range of it.
    async fn get(&self, key: &ObjectKey, range: Option<ByteRange>)
        -> StoreResult<Option<ObjectBody>>;
}
