use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use tilegate_types::{ByteRange, ObjectKey, ObjectMeta, VersionTag};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BackingStore, ObjectBody};
use crate::version::tag_for_content;

#[derive(Clone)]
struct Entry {
    data: Bytes,
    tag: VersionTag,
}

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. Objects are held behind a `RwLock`;
/// bodies are `Bytes`, so reads are reference-counted slices rather than
/// copies. The version tag is a content digest computed once on insert.
pub struct InMemoryStore {
    objects: RwLock<HashMap<ObjectKey, Entry>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace an object. Returns its new version tag.
    pub fn insert(&self, key: ObjectKey, data: impl Into<Bytes>) -> VersionTag {
        let data = data.into();
        let tag = tag_for_content(&data);
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(key, Entry { data, tag: tag.clone() });
        tag
    }

    /// Remove an object. Returns `true` if it existed.
    pub fn remove(&self, key: &ObjectKey) -> bool {
        self.objects.write().expect("lock poisoned").remove(key).is_some()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    fn entry(&self, key: &ObjectKey) -> Option<Entry> {
        self.objects.read().expect("lock poisoned").get(key).cloned()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackingStore for InMemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn head(&self, key: &ObjectKey) -> StoreResult<Option<ObjectMeta>> {
        Ok(self
            .entry(key)
            .map(|e| ObjectMeta::new(e.data.len() as u64, e.tag)))
    }

    async fn get(
        &self,
        key: &ObjectKey,
        range: Option<ByteRange>,
    ) -> StoreResult<Option<ObjectBody>> {
        let Some(entry) = self.entry(key) else {
            return Ok(None);
        };
        let size = entry.data.len() as u64;

        let body = match range {
            None => entry.data,
            Some(r) => {
                if r.offset() + r.length() > size {
                    return Err(StoreError::InvalidRange {
                        key: key.clone(),
                        range: r,
                        size,
                    });
                }
                let span = r.as_range();
                entry.data.slice(span.start as usize..span.end as usize)
            }
        };

        Ok(Some(ObjectBody {
            body,
            size,
            version_tag: entry.tag,
            range,
        }))
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ObjectKey {
        ObjectKey::new(s).unwrap()
    }

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert(key("tiles/0/0/0.pbf"), (0u8..100).collect::<Vec<_>>());
        store
    }

    #[tokio::test]
    async fn head_reports_size_and_tag() {
        let store = seeded();
        let meta = store.head(&key("tiles/0/0/0.pbf")).await.unwrap().unwrap();
        assert_eq!(meta.size, 100);
        assert_eq!(meta.version_tag.as_str().len(), 32);
    }

    #[tokio::test]
    async fn head_missing_is_none() {
        let store = seeded();
        assert!(store.head(&key("nope")).await.unwrap().is_none());
        assert!(store.get(&key("nope"), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn full_get_returns_everything() {
        let store = seeded();
        let obj = store.get(&key("tiles/0/0/0.pbf"), None).await.unwrap().unwrap();
        assert_eq!(obj.body.len(), 100);
        assert_eq!(obj.size, 100);
        assert!(obj.range.is_none());
    }

    #[tokio::test]
    async fn ranged_get_returns_slice() {
        let store = seeded();
        let r = ByteRange::clamped(10, 5, 100).unwrap();
        let obj = store.get(&key("tiles/0/0/0.pbf"), Some(r)).await.unwrap().unwrap();
        assert_eq!(&obj.body[..], &[10, 11, 12, 13, 14]);
        assert_eq!(obj.size, 100);
        assert_eq!(obj.range, Some(r));
    }

    #[tokio::test]
    async fn range_past_shrunk_object_is_rejected() {
        let store = seeded();
        let r = ByteRange::clamped(90, 10, 100).unwrap();
        store.insert(key("tiles/0/0/0.pbf"), vec![0u8; 50]);
        let err = store.get(&key("tiles/0/0/0.pbf"), Some(r)).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRange { size: 50, .. }));
    }

    #[tokio::test]
    async fn tag_is_stable_until_content_changes() {
        let store = seeded();
        let k = key("tiles/0/0/0.pbf");
        let t1 = store.head(&k).await.unwrap().unwrap().version_tag;
        let t2 = store.get(&k, None).await.unwrap().unwrap().version_tag;
        assert_eq!(t1, t2);

        let t3 = store.insert(k.clone(), vec![1u8; 100]);
        assert_ne!(t1, t3);
    }

    #[test]
    fn insert_and_remove() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        store.insert(key("a"), b"x".to_vec());
        assert_eq!(store.len(), 1);
        assert!(store.remove(&key("a")));
        assert!(!store.remove(&key("a")));
        assert!(store.is_empty());
    }

    #[test]
    fn debug_shows_count() {
        let store = seeded();
        assert!(format!("{store:?}").contains("object_count: 1"));
    }
}
