//! Account discovery: where signing identities come from.
//!
//! Two variants, selected at startup. [`EphemeralProvider`] derives a
//! throwaway in-process account; [`KeystoreProvider`] enumerates accounts an
//! external wallet left in a keystore directory. Discovery misses are not
//! errors: a provider may legitimately return no accounts, and the caller
//! must handle that by leaving the selection unset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithm::Algorithm;
use crate::error::{KeyringError, Result};
use crate::identity::SigningIdentity;
use crate::pair::KeyPair;

/// A source of signing identities.
#[derive(Debug, Clone)]
pub enum AccountProvider {
    /// One throwaway account derived from a fresh mnemonic.
    Ephemeral(EphemeralProvider),
    /// Accounts enumerated from a keystore directory.
    Keystore(KeystoreProvider),
}

impl AccountProvider {
    /// Load whatever identities the provider can currently offer.
    ///
    /// An empty list is a valid outcome (keystore absent, nothing granted).
    ///
    /// # Errors
    ///
    /// Fails only when the signing subsystem cannot initialize at all,
    /// which is fatal to the account-loading path.
    pub async fn load_accounts(&self) -> Result<Vec<SigningIdentity>> {
        match self {
            AccountProvider::Ephemeral(provider) => provider.load_accounts(),
            AccountProvider::Keystore(provider) => provider.load_accounts().await,
        }
    }
}

/// Derives a single session-scoped account from a freshly generated mnemonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EphemeralProvider {
    algorithm: Algorithm,
}

impl EphemeralProvider {
    /// Provider deriving accounts for the given algorithm.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    fn load_accounts(&self) -> Result<Vec<SigningIdentity>> {
        let pair = KeyPair::generate(self.algorithm)?;
        let identity = SigningIdentity::from_pair(None, pair);
        debug!(address = %identity.address(), "derived ephemeral account");
        Ok(vec![identity])
    }
}

#[derive(Debug, Deserialize)]
struct KeystoreEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    algorithm: Algorithm,
    mnemonic: String,
}

/// Enumerates identities from `*.json` files in a keystore directory.
#[derive(Debug, Clone)]
pub struct KeystoreProvider {
    path: PathBuf,
}

impl KeystoreProvider {
    /// Provider reading from the given directory.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load_accounts(&self) -> Result<Vec<SigningIdentity>> {
        let mut entries = match tokio::fs::read_dir(&self.path).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "keystore unreachable, no accounts");
                return Ok(Vec::new());
            }
        };

        let mut accounts = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "keystore listing interrupted");
                    break;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::load_entry(&path).await {
                Ok(identity) => accounts.push(identity),
                Err(err) => {
                    warn!(file = %path.display(), %err, "skipping unreadable keystore entry");
                }
            }
        }

        // Directory listing order is arbitrary; keep the selection stable.
        accounts.sort_by(|a, b| a.address().cmp(b.address()));
        debug!(count = accounts.len(), "keystore accounts loaded");
        Ok(accounts)
    }

    async fn load_entry(path: &Path) -> Result<SigningIdentity> {
        let raw = tokio::fs::read_to_string(path).await?;
        let entry: KeystoreEntry =
            serde_json::from_str(&raw).map_err(|e| KeyringError::InvalidKey(e.to_string()))?;
        let pair = KeyPair::from_mnemonic(entry.algorithm, &entry.mnemonic)?;
        Ok(SigningIdentity::from_pair(entry.name, pair))
    }
}

/// Startup configuration selecting the account provider variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// In-process throwaway account.
    Ephemeral {
        /// Signature scheme for the derived account.
        #[serde(default)]
        algorithm: Algorithm,
    },
    /// External keystore directory.
    Keystore {
        /// Directory holding `*.json` keystore entries.
        path: PathBuf,
    },
}

impl ProviderConfig {
    /// Construct the configured provider.
    #[must_use]
    pub fn build(self) -> AccountProvider {
        match self {
            ProviderConfig::Ephemeral { algorithm } => {
                AccountProvider::Ephemeral(EphemeralProvider::new(algorithm))
            }
            ProviderConfig::Keystore { path } => {
                AccountProvider::Keystore(KeystoreProvider::new(path))
            }
        }
    }
}
