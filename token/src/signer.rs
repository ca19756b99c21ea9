//! Token signing.

use tracing::debug;

use jw3t_keyring::SigningIdentity;

use crate::error::{TokenError, TokenResult};
use crate::types::TokenContent;
use crate::wire::{encode_segment, EncodedToken};

/// Signs token content with an account's signing capability.
pub struct TokenSigner<'a> {
    identity: &'a SigningIdentity,
}

impl<'a> TokenSigner<'a> {
    /// Signer backed by the given account.
    #[must_use]
    pub fn new(identity: &'a SigningIdentity) -> Self {
        Self { identity }
    }

    /// Produce the compact encoded token for `content`.
    ///
    /// The content is serialized and base64url-encoded, the identity's
    /// signing capability is invoked exactly once over the bytes of that
    /// encoded segment, and the two segments are joined with `.`.
    ///
    /// Output is not deterministic (sr25519 signatures are randomized), but
    /// every token produced here verifies.
    ///
    /// # Errors
    ///
    /// Fails when the header declares an algorithm the account does not
    /// sign with, when serialization fails, or when the signing capability
    /// is unavailable, refuses, or fails.
    #[allow(clippy::unused_async)] // capability providers may suspend
    pub async fn sign(&self, content: &TokenContent) -> TokenResult<EncodedToken> {
        let algorithm = content.header.algorithm()?;
        if algorithm != self.identity.algorithm() {
            return Err(TokenError::signing(&format!(
                "header declares {algorithm} but the selected account signs {}",
                self.identity.algorithm()
            )));
        }

        let json = serde_json::to_vec(content)
            .map_err(|e| TokenError::serialization(&e.to_string()))?;
        let content_segment = encode_segment(&json);
        let signature = self
            .identity
            .sign(content_segment.as_bytes())
            .map_err(|e| TokenError::signing(&e.to_string()))?;
        let signature_segment = encode_segment(&signature);

        debug!(address = %self.identity.address(), "token signed");
        Ok(EncodedToken::from_segments(
            &content_segment,
            &signature_segment,
        ))
    }
}
