//! Account key pairs derived from BIP-39 mnemonics.

use bip39::{Language, Mnemonic};
use ed25519_dalek::Signer as _;
use schnorrkel::{ExpansionMode, MiniSecretKey};
use zeroize::Zeroizing;

use crate::address::{self, DEFAULT_PREFIX};
use crate::algorithm::Algorithm;
use crate::error::{KeyringError, Result};
use crate::identity::SignerCapability;

/// Number of words in a freshly generated account phrase.
const MNEMONIC_WORDS: usize = 12;

/// Signing context for sr25519, shared with the wider substrate ecosystem.
pub(crate) const SIGNING_CONTEXT: &[u8] = b"substrate";

/// A key pair for one of the supported signature schemes.
#[derive(Debug)]
pub enum KeyPair {
    /// sr25519 (schnorrkel) pair.
    Sr25519(schnorrkel::Keypair),
    /// ed25519 pair.
    Ed25519(ed25519_dalek::SigningKey),
}

impl KeyPair {
    /// Generate a throwaway pair from a fresh 12-word mnemonic.
    ///
    /// # Errors
    ///
    /// Fails only when the entropy source cannot produce a mnemonic, which
    /// is fatal to the in-process keyring path.
    pub fn generate(algorithm: Algorithm) -> Result<Self> {
        let mnemonic = Mnemonic::generate_in(Language::English, MNEMONIC_WORDS)
            .map_err(|e| KeyringError::Initialization(e.to_string()))?;
        Self::from_mnemonic(algorithm, &mnemonic.to_string())
    }

    /// Derive a pair from a BIP-39 english phrase.
    ///
    /// # Errors
    ///
    /// Fails when the phrase is not a valid mnemonic or the derived seed is
    /// unusable for the requested algorithm.
    pub fn from_mnemonic(algorithm: Algorithm, phrase: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
            .map_err(|e| KeyringError::Mnemonic(e.to_string()))?;
        let seed = Zeroizing::new(mnemonic.to_seed(""));
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&seed[..32]);
        Self::from_seed(algorithm, &secret)
    }

    /// Build a pair from a raw 32-byte secret seed.
    ///
    /// # Errors
    ///
    /// Fails when the seed bytes are not a valid secret for the algorithm.
    pub fn from_seed(algorithm: Algorithm, seed: &[u8; 32]) -> Result<Self> {
        match algorithm {
            Algorithm::Sr25519 => {
                let mini = MiniSecretKey::from_bytes(seed)
                    .map_err(|e| KeyringError::InvalidKey(e.to_string()))?;
                Ok(KeyPair::Sr25519(
                    mini.expand_to_keypair(ExpansionMode::Ed25519),
                ))
            }
            Algorithm::Ed25519 => Ok(KeyPair::Ed25519(ed25519_dalek::SigningKey::from_bytes(
                seed,
            ))),
        }
    }

    /// The signature scheme of this pair.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            KeyPair::Sr25519(_) => Algorithm::Sr25519,
            KeyPair::Ed25519(_) => Algorithm::Ed25519,
        }
    }

    /// Raw 32-byte public key.
    #[must_use]
    pub fn public_key(&self) -> [u8; 32] {
        match self {
            KeyPair::Sr25519(pair) => pair.public.to_bytes(),
            KeyPair::Ed25519(key) => key.verifying_key().to_bytes(),
        }
    }

    /// SS58 address under the generic network prefix.
    #[must_use]
    pub fn address(&self) -> String {
        address::ss58_encode(DEFAULT_PREFIX, &self.public_key())
    }

    /// Sign a message, returning the 64-byte signature.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            KeyPair::Sr25519(pair) => {
                let ctx = schnorrkel::signing_context(SIGNING_CONTEXT);
                pair.sign(ctx.bytes(message)).to_bytes().to_vec()
            }
            KeyPair::Ed25519(key) => key.sign(message).to_bytes().to_vec(),
        }
    }
}

impl SignerCapability for KeyPair {
    fn algorithm(&self) -> Algorithm {
        KeyPair::algorithm(self)
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(KeyPair::sign(self, message))
    }
}
