use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Key of an object in the backing store.
///
/// Keys are opaque path-like strings such as `tiles/3/2/1.pbf`. They are
/// case-sensitive and may contain any number of `/`-separated segments. A key
/// is never empty and never starts with `/`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Build a key, rejecting the empty string and a leading `/`.
    ///
    /// The leading `/` is rejected rather than stripped, so `"/a/b"` never
    /// aliases `"a/b"`.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let key = raw.into();
        if key.is_empty() {
            return Err(TypeError::EmptyKey);
        }
        if key.starts_with('/') {
            return Err(TypeError::LeadingSlash(key));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the `/`-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObjectKey {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(ObjectKey::new(""), Err(TypeError::EmptyKey));
    }

    #[test]
    fn leading_slash_is_rejected() {
        assert_eq!(ObjectKey::new("/"), Err(TypeError::LeadingSlash("/".into())));
        assert!(matches!(
            ObjectKey::new("/tiles/3/2/1.pbf"),
            Err(TypeError::LeadingSlash(_))
        ));
        assert!(serde_json::from_str::<ObjectKey>("\"/a/b\"").is_err());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let lower = ObjectKey::new("tiles/a.pbf").unwrap();
        let upper = ObjectKey::new("tiles/A.pbf").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn segments_split_on_slash() {
        let key = ObjectKey::new("tiles/3/2/1.pbf").unwrap();
        let segs: Vec<&str> = key.segments().collect();
        assert_eq!(segs, vec!["tiles", "3", "2", "1.pbf"]);
    }

    #[test]
    fn serde_rejects_empty() {
        let ok: ObjectKey = serde_json::from_str("\"a/b\"").unwrap();
        assert_eq!(ok.as_str(), "a/b");
        assert!(serde_json::from_str::<ObjectKey>("\"\"").is_err());
    }
}
