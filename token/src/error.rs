//! Token error types.

use std::fmt;

use jw3t_keyring::KeyringError;

/// Token operation result type.
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors from building, signing or verifying tokens.
#[derive(Debug, Clone)]
pub enum TokenError {
    /// The token string does not have the two-segment dot-separated shape.
    Malformed(String),
    /// A segment failed base64/JSON decoding, or the subject address is unusable.
    Decode(String),
    /// The header text is not a valid header document.
    Header(String),
    /// The payload text is not a valid payload document.
    Payload(String),
    /// The declared algorithm is not supported.
    UnsupportedAlgorithm(String),
    /// The declared address encoding is not supported.
    UnsupportedAddressing(String),
    /// The audience claim does not match the expected audience.
    InvalidAudience,
    /// The expiration claim is in the past.
    Expired,
    /// The signature does not validate against the subject address.
    InvalidSignature,
    /// The signing capability was unavailable, refused, or failed.
    Signing(String),
    /// Content serialization failed.
    Serialization(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Malformed(msg) => write!(f, "Malformed token: {msg}"),
            TokenError::Decode(msg) => write!(f, "Token decode error: {msg}"),
            TokenError::Header(msg) => write!(f, "Invalid header: {msg}"),
            TokenError::Payload(msg) => write!(f, "Invalid payload: {msg}"),
            TokenError::UnsupportedAlgorithm(alg) => write!(f, "Unsupported algorithm: {alg}"),
            TokenError::UnsupportedAddressing(add) => {
                write!(f, "Unsupported address encoding: {add}")
            }
            TokenError::InvalidAudience => write!(f, "Invalid token audience"),
            TokenError::Expired => write!(f, "Token has expired"),
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::Signing(msg) => write!(f, "Signing error: {msg}"),
            TokenError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for TokenError {}

impl TokenError {
    /// Create a malformed token error.
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        TokenError::Malformed(msg.to_string())
    }

    /// Create a decode error.
    #[inline]
    #[must_use]
    pub fn decode(msg: &str) -> Self {
        TokenError::Decode(msg.to_string())
    }

    /// Create a header parse error.
    #[inline]
    #[must_use]
    pub fn header(msg: &str) -> Self {
        TokenError::Header(msg.to_string())
    }

    /// Create a payload parse error.
    #[inline]
    #[must_use]
    pub fn payload(msg: &str) -> Self {
        TokenError::Payload(msg.to_string())
    }

    /// Create a signing error.
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        TokenError::Signing(msg.to_string())
    }

    /// Create a serialization error.
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        TokenError::Serialization(msg.to_string())
    }
}

impl From<KeyringError> for TokenError {
    fn from(err: KeyringError) -> Self {
        match err {
            KeyringError::UnknownAlgorithm(alg) => TokenError::UnsupportedAlgorithm(alg),
            KeyringError::BadSignature => TokenError::InvalidSignature,
            KeyringError::Signing(msg) => TokenError::Signing(msg),
            other => TokenError::Decode(other.to_string()),
        }
    }
}
