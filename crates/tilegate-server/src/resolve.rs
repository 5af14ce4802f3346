//! Metadata lookup against the backing store.

use std::time::Duration;

use tilegate_store::BackingStore;
use tilegate_types::{ObjectKey, ObjectMeta};

use crate::error::ServeError;

/// Look up size and version tag for `key` without moving its body.
///
/// Absence and store failure stay distinct: `NotFound` versus `Unavailable`.
/// A lookup that outlives `timeout` counts as `Unavailable`.
pub async fn resolve(
    store: &dyn BackingStore,
    key: &ObjectKey,
    timeout: Duration,
) -> Result<ObjectMeta, ServeError> {
    match tokio::time::timeout(timeout, store.head(key)).await {
        Ok(Ok(Some(meta))) => Ok(meta),
        Ok(Ok(None)) => Err(ServeError::NotFound),
        Ok(Err(e)) => {
            tracing::warn!(store = store.name(), %key, error = %e, "metadata lookup failed");
            Err(ServeError::Unavailable(e.to_string()))
        }
        Err(_) => {
            tracing::warn!(store = store.name(), %key, ?timeout, "metadata lookup timed out");
            Err(ServeError::Unavailable(format!("metadata lookup exceeded {timeout:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegate_store::{InMemoryStore, UnavailableStore};

    const T: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn found() {
        let store = InMemoryStore::new();
        let key = ObjectKey::new("a/b").unwrap();
        let tag = store.insert(key.clone(), vec![0u8; 42]);
        let meta = resolve(&store, &key, T).await.unwrap();
        assert_eq!(meta.size, 42);
        assert_eq!(meta.version_tag, tag);
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let store = InMemoryStore::new();
        let key = ObjectKey::new("a/b").unwrap();
        assert_eq!(resolve(&store, &key, T).await, Err(ServeError::NotFound));
    }

    #[tokio::test]
    async fn failing_store_is_unavailable() {
        let store = UnavailableStore::new("down");
        let key = ObjectKey::new("a/b").unwrap();
        assert!(matches!(
            resolve(&store, &key, T).await,
            Err(ServeError::Unavailable(_))
        ));
    }
}
