//! Token verification.

use chrono::Utc;
use tracing::debug;

use jw3t_keyring::verify_signature;

use crate::error::{TokenError, TokenResult};
use crate::types::{TokenContent, ADDRESS_ENCODING, TOKEN_TYPE};
use crate::validation::ValidationOptions;
use crate::wire::{decode_segment, split_token};

/// Decodes and validates compact tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenVerifier {
    options: ValidationOptions,
}

impl TokenVerifier {
    /// Verifier with default validation options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifier with custom validation options.
    #[must_use]
    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Verify a compact token, yielding its content.
    ///
    /// The token is split into its two segments, the content segment is
    /// decoded, claims are validated, and the signature segment is checked
    /// against the public key behind the payload's subject address under
    /// the algorithm the header declares.
    ///
    /// Malformed user input never panics; every failure path comes back as
    /// an error.
    ///
    /// # Errors
    ///
    /// Fails when the token is not two non-empty segments, a segment does
    /// not decode, the token type, address encoding or algorithm is
    /// unsupported, the expiration claim is in the past, the audience does
    /// not match an expected audience, or the signature does not validate.
    #[allow(clippy::unused_async)] // verification backends may suspend
    pub async fn verify(&self, token: &str) -> TokenResult<TokenContent> {
        let (content_segment, signature_segment) = split_token(token)?;
        let content_bytes = decode_segment(content_segment)?;
        let content: TokenContent = serde_json::from_slice(&content_bytes)
            .map_err(|e| TokenError::decode(&e.to_string()))?;

        if content.header.typ != TOKEN_TYPE {
            return Err(TokenError::malformed(&format!(
                "unexpected token type {:?}",
                content.header.typ
            )));
        }
        if content.header.add != ADDRESS_ENCODING {
            return Err(TokenError::UnsupportedAddressing(
                content.header.add.clone(),
            ));
        }
        let algorithm = content.header.algorithm()?;
        if !self.options.allowed_algorithms.contains(&algorithm) {
            return Err(TokenError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        if self.options.validate_exp {
            if let Some(exp) = content.payload.exp {
                let now = Utc::now().timestamp();
                // exp is attacker-controlled; saturate instead of overflowing.
                if exp.saturating_add(self.options.leeway.num_seconds()) < now {
                    return Err(TokenError::Expired);
                }
            }
        }
        if let Some(expected) = &self.options.expected_audience {
            if content.payload.aud.as_deref() != Some(expected.as_str()) {
                return Err(TokenError::InvalidAudience);
            }
        }

        let signature = decode_segment(signature_segment)?;
        verify_signature(
            algorithm,
            &content.payload.add,
            content_segment.as_bytes(),
            &signature,
        )?;

        debug!(subject = %content.payload.add, "token verified");
        Ok(content)
    }
}
