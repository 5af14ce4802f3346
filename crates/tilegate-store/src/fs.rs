//! Local filesystem backing store.

use std::fs::Metadata;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tilegate_types::{ByteRange, ObjectKey, ObjectMeta, VersionTag};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BackingStore, ObjectBody};
use crate::version::tag_for_stat;

/// Filesystem-backed object store.
///
/// Each key segment maps to one path component below `root`:
/// ```text
/// {root}/
///   tiles/
///     3/
///       2/
///         1.pbf     # key "tiles/3/2/1.pbf"
/// ```
/// Keys that would escape `root` (`..`, `.`, empty segments, backslashes) do
/// not name any object and are reported as missing.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a key, or `None` if the key cannot name a file under `root`.
    fn key_path(&self, key: &ObjectKey) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.segments() {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains('\\')
                || segment.contains('\0')
            {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }

    async fn open(&self, key: &ObjectKey) -> StoreResult<Option<(fs::File, Metadata)>> {
        let Some(path) = self.key_path(key) else {
            return Ok(None);
        };
        let file = match fs::File::open(&path).await {
            Ok(f) => f,
            Err(e) if is_missing(&e) => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Ok(None);
        }
        Ok(Some((file, meta)))
    }
}

fn is_missing(e: &std::io::Error) -> bool {
    // a directory in place of a parent segment surfaces as NotADirectory
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

fn stat_tag(meta: &Metadata) -> VersionTag {
    let modified = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    tag_for_stat(meta.len(), modified)
}

#[async_trait]
impl BackingStore for FsStore {
    fn name(&self) -> &'static str {
        "fs"
    }

    async fn head(&self, key: &ObjectKey) -> StoreResult<Option<ObjectMeta>> {
        let Some(path) = self.key_path(key) else {
            return Ok(None);
        };
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(ObjectMeta::new(meta.len(), stat_tag(&meta)))),
            Ok(_) => Ok(None),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn get(
        &self,
        key: &ObjectKey,
        range: Option<ByteRange>,
    ) -> StoreResult<Option<ObjectBody>> {
        let Some((mut file, meta)) = self.open(key).await? else {
            return Ok(None);
        };
        let size = meta.len();
        let version_tag = stat_tag(&meta);

        let body = match range {
            None => {
                let mut buf = Vec::with_capacity(size as usize);
                file.read_to_end(&mut buf).await?;
                buf
            }
            Some(r) => {
                if r.offset() + r.length() > size {
                    return Err(StoreError::InvalidRange {
                        key: key.clone(),
                        range: r,
                        size,
                    });
                }
                file.seek(SeekFrom::Start(r.offset())).await?;
                let mut buf = vec![0u8; r.length() as usize];
                file.read_exact(&mut buf).await?;
                buf
            }
        };

        tracing::trace!(%key, bytes = body.len(), "fs store read");

        Ok(Some(ObjectBody {
            body: Bytes::from(body),
            size,
            version_tag,
            range,
        }))
    }
}
