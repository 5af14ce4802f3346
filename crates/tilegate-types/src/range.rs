//! `Range` header interpretation.
//!
//! Only the single-range form is recognized:
//!
//! ```text
//! Range: bytes=<range-start>-
//! Range: bytes=<range-start>-<range-end>
//! ```
//!
//! Suffix ranges (`bytes=-<length>`) do not match the grammar. When a header
//! lists several comma-separated ranges only the first clause is read and the
//! rest are ignored; multipart responses are never produced.

use std::fmt;
use std::ops::Range;

/// A validated, non-empty byte interval of an object.
///
/// A `ByteRange` is only meaningful relative to the object size it was
/// validated against. It is produced by [`parse_range`] or
/// [`ByteRange::clamped`] and must not be reused across objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    offset: u64,
    length: u64,
}

impl ByteRange {
    /// Validate `(offset, length)` against `size`.
    ///
    /// Returns `None` when the interval is empty or does not lie entirely
    /// within `[0, size)`.
    pub fn clamped(offset: u64, length: u64, size: u64) -> Option<Self> {
        if length == 0 || offset >= size {
            return None;
        }
        let end = offset.checked_add(length)?;
        if end > size {
            return None;
        }
        Some(Self { offset, length })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Index of the last byte served, inclusive.
    pub fn end_inclusive(&self) -> u64 {
        self.offset + self.length - 1
    }

    /// Half-open `offset..offset + length` form, for slicing.
    pub fn as_range(&self) -> Range<u64> {
        self.offset..self.offset + self.length
    }

    /// `Content-Range` header value for a partial response.
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.offset, self.end_inclusive(), size)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.offset, self.end_inclusive())
    }
}

/// What a `Range` header means for an object of a given size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No usable range: the header was absent or did not match the grammar.
    /// Serve the full object.
    Full,
    /// Serve this sub-range.
    Partial(ByteRange),
    /// The header parsed but lies outside the object.
    Unsatisfiable,
}

impl RangeOutcome {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

/// Interpret an optional `Range` header against an object of `size` bytes.
///
/// An end past the last byte is clamped to `size - 1`. A start at or past
/// `size`, or a start greater than the end, is unsatisfiable.
pub fn parse_range(header: Option<&str>, size: u64) -> RangeOutcome {
    let Some((start, end)) = header.and_then(parse_clause) else {
        return RangeOutcome::Full;
    };

    if start >= size {
        return RangeOutcome::Unsatisfiable;
    }
    let last = size - 1;
    let end = end.unwrap_or(last);
    if start > end {
        return RangeOutcome::Unsatisfiable;
    }

    let length = end.min(last) - start + 1;
    match ByteRange::clamped(start, length, size) {
        Some(range) => RangeOutcome::Partial(range),
        None => RangeOutcome::Unsatisfiable,
    }
}

/// Extract `(start, end?)` from the first clause of a `bytes=` header.
fn parse_clause(header: &str) -> Option<(u64, Option<u64>)> {
    let ranges = header.trim().strip_prefix("bytes=")?;
    let first = ranges.split(',').next()?.trim();
    let (start, end) = first.split_once('-')?;

    let start = parse_int(start.trim())?;
    let end = match end.trim() {
        "" => None,
        e => Some(parse_int(e)?),
    };
    Some((start, end))
}

/// `u64::from_str` also accepts a leading `+`, which the header grammar does not.
///
/// A digit run too large for `u64` saturates: it still lies past the end of
/// any object, so the usual clamping and satisfiability rules apply.
fn parse_int(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(u64::MAX))
}
