//! Base64 utilities
//!
//! Signatures travel as standard RFC 4648 base64 with padding, the same
//! alphabet used inside PEM bodies.
//!
//! ## Examples
//! ```
//! use tramite_crypto::base64;
//!
//! let encoded = base64::encode(b"Hello, World!");
//! assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
//! assert_eq!(base64::decode(&encoded).unwrap(), b"Hello, World!");
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{Error, Result};

/// Encode bytes to standard base64 string with padding
pub fn encode<T: AsRef<[u8]>>(data: T) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64 string to bytes
///
/// Surrounding whitespace and embedded line breaks are ignored so that
/// bodies copied out of wrapped text still decode.
pub fn decode<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>> {
    let compact: Vec<u8> = encoded
        .as_ref()
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|e| Error::Base64Error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roundtrip() {
        let data = b"Hello, World!";
        let encoded = encode(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        let decoded = decode("SGVsbG8s\nIFdvcmxk\r\nIQ==\n").unwrap();
        assert_eq!(decoded, b"Hello, World!");
    }

    #[test]
    fn test_invalid_input() {
        assert!(decode("not base64!!!").is_err());
        assert!(decode("SGVsbG8").is_err());
    }
}
