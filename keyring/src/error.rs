//! Error handling for account and key operations.

use thiserror::Error;

/// Keyring-specific errors.
#[derive(Debug, Error)]
pub enum KeyringError {
    /// The signing subsystem failed to become ready.
    #[error("Keyring initialization failed: {0}")]
    Initialization(String),

    /// A mnemonic phrase could not be parsed or derived from.
    #[error("Invalid mnemonic phrase: {0}")]
    Mnemonic(String),

    /// The named signing algorithm is not one this keyring supports.
    #[error("Unknown signing algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An SS58 address failed to decode.
    #[error("Invalid SS58 address: {0}")]
    InvalidAddress(String),

    /// Key material had the wrong shape for the requested algorithm.
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    /// A signing capability was unavailable or refused to sign.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// A signature did not validate against the address it claims.
    #[error("Signature verification failed")]
    BadSignature,

    /// Keystore I/O failed.
    #[error("Keystore error: {0}")]
    Keystore(#[from] std::io::Error),
}

/// Result type for keyring operations.
pub type Result<T> = std::result::Result<T, KeyringError>;
