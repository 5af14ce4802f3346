use async_trait::async_trait;
use tilegate_types::{ByteRange, ObjectKey, ObjectMeta};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BackingStore, ObjectBody};

/// Store that fails every call with [`StoreError::Unavailable`].
///
/// Installed when no backing store is configured, so the proxy still starts
/// and answers tile requests with 503 instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn not_configured() -> Self {
        Self::new("no backing store configured")
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl BackingStore for UnavailableStore {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn head(&self, _key: &ObjectKey) -> StoreResult<Option<ObjectMeta>> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn get(
        &self,
        _key: &ObjectKey,
        _range: Option<ByteRange>,
    ) -> StoreResult<Option<ObjectBody>> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}
