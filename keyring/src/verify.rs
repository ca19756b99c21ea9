//! Raw signature verification against SS58 addresses.

use ed25519_dalek::Verifier as _;

use crate::address::ss58_decode;
use crate::algorithm::Algorithm;
use crate::error::{KeyringError, Result};
use crate::pair::SIGNING_CONTEXT;

/// Check `signature` over `message` against the public key carried by an
/// SS58 `address`, under the given algorithm.
///
/// # Errors
///
/// Fails when the address does not decode, the key bytes are not a valid
/// public key for the algorithm, or the signature does not validate.
pub fn verify_signature(
    algorithm: Algorithm,
    address: &str,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let (_prefix, public_key) = ss58_decode(address)?;
    match algorithm {
        Algorithm::Sr25519 => {
            let public = schnorrkel::PublicKey::from_bytes(&public_key)
                .map_err(|e| KeyringError::InvalidKey(e.to_string()))?;
            let signature = schnorrkel::Signature::from_bytes(signature)
                .map_err(|_| KeyringError::BadSignature)?;
            let ctx = schnorrkel::signing_context(SIGNING_CONTEXT);
            public
                .verify(ctx.bytes(message), &signature)
                .map_err(|_| KeyringError::BadSignature)
        }
        Algorithm::Ed25519 => {
            let public = ed25519_dalek::VerifyingKey::from_bytes(&public_key)
                .map_err(|e| KeyringError::InvalidKey(e.to_string()))?;
            let bytes: [u8; 64] = signature
                .try_into()
                .map_err(|_| KeyringError::BadSignature)?;
            let signature = ed25519_dalek::Signature::from_bytes(&bytes);
            public
                .verify(message, &signature)
                .map_err(|_| KeyringError::BadSignature)
        }
    }
}
