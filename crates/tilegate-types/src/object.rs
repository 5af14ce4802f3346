use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque entity tag for a stored object.
///
/// The tag changes whenever the object's bytes change and is stable across
/// repeated lookups of unchanged content. It is stored unquoted; use
/// [`VersionTag::to_header_value`] when emitting an `ETag` header.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTag(String);

impl VersionTag {
    /// Build a tag from its unquoted form.
    ///
    /// Only visible ASCII other than `"` is allowed, so the quoted form is
    /// always a valid header value.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TypeError::EmptyVersionTag);
        }
        if let Some(bad) = raw.chars().find(|c| *c == '"' || !c.is_ascii_graphic()) {
            return Err(TypeError::InvalidVersionTag(bad));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strong `ETag` header value, e.g. `"9f2c0a"`.
    pub fn to_header_value(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// Whether an `If-None-Match` header value matches this tag.
    ///
    /// Uses weak comparison: a `W/` prefix on a listed tag is ignored.
    /// `*` matches any tag.
    pub fn matches_if_none_match(&self, header: &str) -> bool {
        let header = header.trim();
        if header == "*" {
            return true;
        }
        header
            .split(',')
            .map(str::trim)
            .map(|t| t.strip_prefix("W/").unwrap_or(t))
            .map(|t| t.trim_matches('"'))
            .any(|t| t == self.0)
    }
}

impl fmt::Debug for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionTag({})", self.0)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VersionTag {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionTag> for String {
    fn from(tag: VersionTag) -> Self {
        tag.0
    }
}

/// Result of a metadata lookup: everything the proxy needs to know about an
/// object before transferring any of its bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Total byte length of the object.
    pub size: u64,
    /// Version tag at the time of the lookup.
    pub version_tag: VersionTag,
}

impl ObjectMeta {
    pub fn new(size: u64, version_tag: VersionTag) -> Self {
        Self { size, version_tag }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> VersionTag {
        VersionTag::new(s).unwrap()
    }

    #[test]
    fn rejects_empty_and_quoted() {
        assert_eq!(VersionTag::new(""), Err(TypeError::EmptyVersionTag));
        assert_eq!(
            VersionTag::new("ab\"c"),
            Err(TypeError::InvalidVersionTag('"'))
        );
        assert!(VersionTag::new("ab\nc").is_err());
        assert!(VersionTag::new("ab c").is_err());
        assert!(VersionTag::new("äbc").is_err());
    }

    #[test]
    fn header_value_is_quoted() {
        assert_eq!(tag("abc123").to_header_value(), "\"abc123\"");
    }

    #[test]
    fn if_none_match_exact() {
        let t = tag("abc");
        assert!(t.matches_if_none_match("\"abc\""));
        assert!(!t.matches_if_none_match("\"abd\""));
    }

    #[test]
    fn if_none_match_list_and_weak() {
        let t = tag("abc");
        assert!(t.matches_if_none_match("\"x\", W/\"abc\""));
        assert!(!t.matches_if_none_match("\"x\", \"y\""));
    }

    #[test]
    fn if_none_match_star() {
        assert!(tag("anything").matches_if_none_match(" * "));
    }

    #[test]
    fn meta_empty() {
        assert!(ObjectMeta::new(0, tag("e")).is_empty());
        assert!(!ObjectMeta::new(1, tag("e")).is_empty());
    }
}
