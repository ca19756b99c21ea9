//! JW3T token encoding, signing and verification.
//!
//! A JW3T is a JWT-like token bound to a blockchain-style account key pair.
//! The wire form is two base64url segments separated by a single dot:
//! `base64url(JSON(content)) + "." + base64url(signature)`, where the
//! content is a header/payload pair and the signature is checked against
//! the SS58 subject address the payload carries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod signer;
mod types;
mod validation;
mod verifier;
mod wire;

pub use error::{TokenError, TokenResult};
pub use signer::TokenSigner;
pub use types::{
    to_pretty_json, TokenContent, TokenHeader, TokenPayload, ADDRESS_ENCODING, DEFAULT_AUDIENCE,
    DEFAULT_TTL_SECS, TOKEN_TYPE,
};
pub use validation::ValidationOptions;
pub use verifier::TokenVerifier;
pub use wire::{split_token, EncodedToken};
