//! Two-segment wire codec: `base64url(content).base64url(signature)`.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{TokenError, TokenResult};

/// Compact encoded token string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedToken(String);

impl EncodedToken {
    /// Join two already-encoded segments.
    pub(crate) fn from_segments(content: &str, signature: &str) -> Self {
        let mut token = String::with_capacity(content.len() + 1 + signature.len());
        token.push_str(content);
        token.push('.');
        token.push_str(signature);
        Self(token)
    }

    /// The compact token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, yielding the compact token string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncodedToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for EncodedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base64url-encode a segment, without padding.
pub(crate) fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode one base64url segment.
pub(crate) fn decode_segment(segment: &str) -> TokenResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::decode(&e.to_string()))
}

/// Split a compact token into its content and signature segments.
///
/// # Errors
///
/// Fails unless the token is exactly two non-empty segments separated by a
/// single `.`.
pub fn split_token(token: &str) -> TokenResult<(&str, &str)> {
    let mut parts = token.split('.');
    let (Some(content), Some(signature), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TokenError::malformed(
            "expected two dot-separated segments",
        ));
    };
    if content.is_empty() || signature.is_empty() {
        return Err(TokenError::malformed("empty token segment"));
    }
    Ok((content, signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_segments() {
        let (content, signature) = split_token("abc.def").unwrap();
        assert_eq!(content, "abc");
        assert_eq!(signature, "def");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            split_token("nodotshere"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_extra_segments() {
        assert!(matches!(
            split_token("a.b.c"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(matches!(split_token(".def"), Err(TokenError::Malformed(_))));
        assert!(matches!(split_token("abc."), Err(TokenError::Malformed(_))));
        assert!(matches!(split_token("."), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn segment_codec_round_trips() {
        let encoded = encode_segment(b"{\"k\":1}");
        assert!(!encoded.contains('='));
        assert_eq!(decode_segment(&encoded).unwrap(), b"{\"k\":1}");
    }

    #[test]
    fn rejects_non_base64_segment() {
        assert!(matches!(
            decode_segment("!!!"),
            Err(TokenError::Decode(_))
        ));
    }
}
