//! Version tag derivation shared by the bundled backends.

use blake3::Hasher;
use tilegate_types::VersionTag;

const DOMAIN: &[u8] = b"tilegate-version-v1:";

/// Tag length in bytes before hex encoding.
const TAG_BYTES: usize = 16;

/// Version tag for an object whose full content is at hand.
pub fn tag_for_content(data: &[u8]) -> VersionTag {
    let mut hasher = Hasher::new();
    hasher.update(DOMAIN);
    hasher.update(b"content:");
    hasher.update(data);
    finish(hasher)
}

/// Version tag derived from file length and modification time.
///
/// Cheap enough to compute on every metadata lookup; changes whenever a
/// rewrite touches either value.
pub fn tag_for_stat(len: u64, modified_nanos: u128) -> VersionTag {
    let mut hasher = Hasher::new();
    hasher.update(DOMAIN);
    hasher.update(b"stat:");
    hasher.update(&len.to_le_bytes());
    hasher.update(&modified_nanos.to_le_bytes());
    finish(hasher)
}

fn finish(hasher: Hasher) -> VersionTag {
    let digest = hasher.finalize();
    let hex = hex::encode(&digest.as_bytes()[..TAG_BYTES]);
    VersionTag::new(hex).expect("hex digest is a valid version tag")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_tag_is_deterministic() {
        assert_eq!(tag_for_content(b"tile"), tag_for_content(b"tile"));
        assert_ne!(tag_for_content(b"tile"), tag_for_content(b"tilf"));
    }

    #[test]
    fn tag_is_32_hex_chars() {
        let t = tag_for_content(b"x");
        assert_eq!(t.as_str().len(), TAG_BYTES * 2);
        assert!(t.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn stat_tag_tracks_len_and_mtime() {
        let base = tag_for_stat(10, 1_000);
        assert_eq!(base, tag_for_stat(10, 1_000));
        assert_ne!(base, tag_for_stat(11, 1_000));
        assert_ne!(base, tag_for_stat(10, 1_001));
    }

    #[test]
    fn content_and_stat_domains_differ() {
        assert_ne!(tag_for_content(&[]), tag_for_stat(0, 0));
    }
}
