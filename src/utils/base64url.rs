//! Base64URL segment encoding per RFC 4648 §5
//!
//! Thin wrapper around the `base64` crate: URL-safe alphabet, no padding on
//! output, padding characters rejected on input (they are not part of the
//! compact token alphabet).

use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes as an unpadded Base64URL segment
pub fn encode_segment(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode an unpadded Base64URL segment
///
/// Fails with [`Error::MalformedEncoding`] on characters outside the URL-safe
/// alphabet and on lengths that cannot come from a valid encoding.
pub fn decode_segment(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::MalformedEncoding(format!("Base64URL decode failed: {e}")))
}

/// Decode a segment and reject it when the decoded size exceeds `max_size`
pub(crate) fn decode_segment_bounded(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Every 4 characters decode to at most 3 bytes
    if input.len() / 4 * 3 > max_size {
        return Err(Error::MalformedEncoding(format!(
            "Segment exceeds limit: {} characters (max decoded: {max_size} bytes)",
            input.len()
        )));
    }

    let result = decode_segment(input)?;
    if result.len() > max_size {
        return Err(Error::MalformedEncoding(format!(
            "Decoded size exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}

/// Encode a string's UTF-8 bytes
pub fn encode(input: &str) -> String {
    encode_segment(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment(b""), "");
        assert_eq!(encode_segment(b"f"), "Zg");
        assert_eq!(encode_segment(b"fo"), "Zm8");
        assert_eq!(encode_segment(b"foo"), "Zm9v");
        assert_eq!(encode_segment(b"foob"), "Zm9vYg");
        assert_eq!(encode_segment(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_decode_without_padding() {
        assert_eq!(decode_segment("Zg").unwrap(), b"f");
        assert_eq!(decode_segment("Zm8").unwrap(), b"fo");
        assert_eq!(decode_segment("SGVsbG8").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(matches!(
            decode_segment("!!!"),
            Err(Error::MalformedEncoding(_))
        ));
        // Standard alphabet and padding are not Base64URL
        assert!(decode_segment("ab+/").is_err());
        assert!(decode_segment("SGVsbG8=").is_err());
        // A single trailing character can never be produced by an encoder
        assert!(decode_segment("Zm9vY").is_err());
    }

    #[test]
    fn test_url_safe_characters() {
        let encoded = encode_segment(&[0xfb, 0xff, 0xbf]);
        assert_eq!(encoded, "-_-_");
        assert_eq!(decode_segment(&encoded).unwrap(), vec![0xfb, 0xff, 0xbf]);
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_segment_bounded("SGVsbG8", 10).unwrap(), b"Hello");
        assert!(decode_segment_bounded("SGVsbG8", 3).is_err());
        assert_eq!(decode_segment_bounded("", 0).unwrap(), Vec::<u8>::new());
    }
}
