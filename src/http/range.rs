//! HTTP Range header parsing module
//!
//! Parses single-range byte requests against a file of known size. Only the
//! `bytes` unit is supported; multi-range headers are honored for their
//! first range only and the remaining ranges are discarded without error.

use thiserror::Error;

/// A validated byte range, both bounds inclusive and zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset to serve
    pub start: u64,
    /// Last byte offset to serve (inclusive)
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes the range covers (`end - start + 1`)
    #[inline]
    pub const fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Why a `Range` header could not be honored.
///
/// The first three variants are syntax errors (map to 400); only
/// [`RangeError::NotSatisfiable`] concerns the file bounds (maps to 416).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The header value does not start with the literal `bytes=` prefix.
    #[error("invalid range header")]
    InvalidHeader,
    /// The range token carries no `-` separator.
    #[error("invalid range format")]
    InvalidFormat,
    /// A bound is present but is not a non-negative integer.
    #[error("invalid range bound")]
    InvalidBound,
    /// Bounds are numeric but fall outside the file.
    #[error("range not satisfiable")]
    NotSatisfiable,
}

/// Parse a `Range` header value against a file of `file_size` bytes.
///
/// Grammar: `bytes=<start>-<end>`, split at the first `-`, where either
/// bound may be omitted. An empty start defaults to 0 and an empty end
/// defaults to `file_size - 1`, so `bytes=-100` is read as bytes 0..=100
/// and NOT as the RFC 7233 suffix form ("the last 100 bytes"). The db
/// readers this tool serves issue absolute ranges only.
///
/// Out-of-file bounds are an error, never a clamp: `start >= file_size`,
/// `end >= file_size` or `start > end` all yield
/// [`RangeError::NotSatisfiable`].
///
/// # Examples
/// ```
/// use dbserve::http::range::{parse_range_header, ByteRange};
///
/// let range = parse_range_header("bytes=0-99", 1024).unwrap();
/// assert_eq!(range, ByteRange { start: 0, end: 99 });
/// assert_eq!(range.content_length(), 100);
///
/// // Open-ended range runs to the last byte
/// let range = parse_range_header("bytes=100-", 500).unwrap();
/// assert_eq!(range, ByteRange { start: 100, end: 499 });
/// ```
pub fn parse_range_header(header: &str, file_size: u64) -> Result<ByteRange, RangeError> {
    let Some(ranges) = header.strip_prefix("bytes=") else {
        return Err(RangeError::InvalidHeader);
    };

    // First range only; anything after a comma is dropped silently.
    let token = ranges.split_once(',').map_or(ranges, |(first, _)| first);

    let Some((start_str, end_str)) = token.split_once('-') else {
        return Err(RangeError::InvalidFormat);
    };

    let start = parse_bound(start_str)?.unwrap_or(0);
    let end = parse_bound(end_str)?.unwrap_or_else(|| file_size.saturating_sub(1));

    if start >= file_size || end >= file_size || start > end {
        return Err(RangeError::NotSatisfiable);
    }

    Ok(ByteRange { start, end })
}

/// An omitted bound parses to `None`; digits (with surrounding whitespace
/// tolerated) parse to `Some`.
fn parse_bound(bound: &str) -> Result<Option<u64>, RangeError> {
    if bound.is_empty() {
        return Ok(None);
    }
    bound
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| RangeError::InvalidBound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_range() {
        let range = parse_range_header("bytes=0-99", 1024).unwrap();
        assert_eq!(range.start, 0);
        assert_eq!(range.end, 99);
        assert_eq!(range.content_length(), 100);
    }

    #[test]
    fn test_open_ended_range() {
        let range = parse_range_header("bytes=100-", 500).unwrap();
        assert_eq!(range, ByteRange { start: 100, end: 499 });
        assert_eq!(range.content_length(), 400);
    }

    #[test]
    fn test_empty_start_defaults_to_zero() {
        // `bytes=-100` is bytes 0..=100 here, not an RFC 7233 suffix range.
        let range = parse_range_header("bytes=-100", 1024).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 100 });
        assert_eq!(range.content_length(), 101);
    }

    #[test]
    fn test_both_bounds_omitted_covers_whole_file() {
        let range = parse_range_header("bytes=-", 1024).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 1023 });
    }

    #[test]
    fn test_multi_range_honors_first_only() {
        let range = parse_range_header("bytes=0-10,20-30", 1024).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 10 });
    }

    #[test]
    fn test_wrong_unit_rejected() {
        assert_eq!(
            parse_range_header("items=0-10", 1024),
            Err(RangeError::InvalidHeader)
        );
        // Unit prefix is a literal match, no case folding
        assert_eq!(
            parse_range_header("Bytes=0-10", 1024),
            Err(RangeError::InvalidHeader)
        );
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert_eq!(
            parse_range_header("bytes=5", 1024),
            Err(RangeError::InvalidFormat)
        );
        assert_eq!(
            parse_range_header("bytes=", 1024),
            Err(RangeError::InvalidFormat)
        );
    }

    #[test]
    fn test_non_numeric_bounds_rejected() {
        assert_eq!(
            parse_range_header("bytes=a-b", 1024),
            Err(RangeError::InvalidBound)
        );
        assert_eq!(
            parse_range_header("bytes=0-x", 1024),
            Err(RangeError::InvalidBound)
        );
        // Second dash lands inside the end bound
        assert_eq!(
            parse_range_header("bytes=1-2-3", 1024),
            Err(RangeError::InvalidBound)
        );
    }

    #[test]
    fn test_whitespace_around_digits_tolerated() {
        let range = parse_range_header("bytes=0- 99", 1024).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 99 });
        let range = parse_range_header("bytes= 10 - 20 ", 1024).unwrap();
        assert_eq!(range, ByteRange { start: 10, end: 20 });
    }

    #[test]
    fn test_end_past_file_size_not_satisfiable() {
        assert_eq!(
            parse_range_header("bytes=1000-2000", 1024),
            Err(RangeError::NotSatisfiable)
        );
    }

    #[test]
    fn test_start_past_file_size_not_satisfiable() {
        assert_eq!(
            parse_range_header("bytes=1024-", 1024),
            Err(RangeError::NotSatisfiable)
        );
        assert_eq!(
            parse_range_header("bytes=2000-", 1024),
            Err(RangeError::NotSatisfiable)
        );
    }

    #[test]
    fn test_inverted_range_not_satisfiable() {
        assert_eq!(
            parse_range_header("bytes=50-10", 1024),
            Err(RangeError::NotSatisfiable)
        );
    }

    #[test]
    fn test_empty_file_never_satisfiable() {
        assert_eq!(
            parse_range_header("bytes=0-0", 0),
            Err(RangeError::NotSatisfiable)
        );
        assert_eq!(
            parse_range_header("bytes=-", 0),
            Err(RangeError::NotSatisfiable)
        );
    }

    #[test]
    fn test_boundary_offsets() {
        let range = parse_range_header("bytes=1023-1023", 1024).unwrap();
        assert_eq!(range.content_length(), 1);
        assert_eq!(
            parse_range_header("bytes=1023-1024", 1024),
            Err(RangeError::NotSatisfiable)
        );
    }
}
