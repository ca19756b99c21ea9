//! Token content model: header, payload, and the signable pair.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jw3t_keyring::Algorithm;

use crate::error::{TokenError, TokenResult};

/// Token type carried in every header.
pub const TOKEN_TYPE: &str = "JW3T";
/// Address encoding carried in every header.
pub const ADDRESS_ENCODING: &str = "ss58";
/// Audience used by the default-content factory.
pub const DEFAULT_AUDIENCE: &str = "uri:test";
/// Default token lifetime in seconds (24 hours).
pub const DEFAULT_TTL_SECS: i64 = 24 * 3600;

/// Token header: algorithm, token type and address encoding.
///
/// Fields are kept as wire strings so user-edited text parses even when it
/// declares values this implementation does not support; unsupported values
/// are rejected at sign/verify time instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signature algorithm name.
    pub alg: String,
    /// Token type, `"JW3T"`.
    pub typ: String,
    /// Address encoding, `"ss58"`.
    pub add: String,
}

impl TokenHeader {
    /// Canonical header for the given algorithm.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.to_string(),
            typ: TOKEN_TYPE.to_string(),
            add: ADDRESS_ENCODING.to_string(),
        }
    }

    /// Parse user-edited header text.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a valid header document.
    pub fn from_json_str(text: &str) -> TokenResult<Self> {
        serde_json::from_str(text).map_err(|e| TokenError::header(&e.to_string()))
    }

    /// The declared algorithm.
    ///
    /// # Errors
    ///
    /// Fails when the declared algorithm is not supported.
    pub fn algorithm(&self) -> TokenResult<Algorithm> {
        self.alg.parse().map_err(TokenError::from)
    }
}

/// Token payload: subject address plus arbitrary claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject address (SS58).
    pub add: String,
    /// Audience claim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Expiration time, unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Application-defined claims, flattened into the root object.
    #[serde(flatten)]
    pub claims: HashMap<String, Value>,
}

impl TokenPayload {
    /// Payload carrying just a subject address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            add: address.into(),
            aud: None,
            exp: None,
            claims: HashMap::new(),
        }
    }

    /// Parse user-edited payload text.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a valid payload document.
    pub fn from_json_str(text: &str) -> TokenResult<Self> {
        serde_json::from_str(text).map_err(|e| TokenError::payload(&e.to_string()))
    }
}

/// The signable header/payload pair.
///
/// Built fresh per signing attempt and never mutated after signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenContent {
    /// Token header.
    pub header: TokenHeader,
    /// Token payload.
    pub payload: TokenPayload,
}

impl TokenContent {
    /// Pair an already-built header and payload.
    #[must_use]
    pub fn new(header: TokenHeader, payload: TokenPayload) -> Self {
        Self { header, payload }
    }

    /// Canonical content for a subject address: sr25519 header, the fixed
    /// default audience, and an expiry 24 hours out.
    #[must_use]
    pub fn with_defaults(address: impl Into<String>) -> Self {
        let exp = Utc::now().timestamp() + DEFAULT_TTL_SECS;
        Self::new(
            TokenHeader::new(Algorithm::Sr25519),
            TokenPayload::new(address),
        )
        .audience(DEFAULT_AUDIENCE)
        .expiration(exp)
    }

    /// Set the audience claim.
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.payload.aud = Some(audience.into());
        self
    }

    /// Set the expiration claim, in unix seconds.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.payload.exp = Some(exp);
        self
    }
}

/// Render a value as JSON with the 4-space indentation the editable text
/// fields use.
///
/// # Errors
///
/// Fails when the value cannot be serialized.
pub fn to_pretty_json<T: Serialize>(value: &T) -> TokenResult<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| TokenError::serialization(&e.to_string()))?;
    String::from_utf8(out).map_err(|e| TokenError::serialization(&e.to_string()))
}
