//! Signing identities: an address plus an opaque signing capability.

use std::fmt;
use std::sync::Arc;

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::pair::KeyPair;

/// Opaque capability able to produce a signature over arbitrary bytes.
///
/// Local key pairs implement this directly; alternative account sources can
/// plug in anything that signs, including capabilities that require outside
/// approval before returning.
pub trait SignerCapability: Send + Sync {
    /// The signature scheme this capability produces.
    fn algorithm(&self) -> Algorithm;

    /// Sign a message.
    ///
    /// # Errors
    ///
    /// Fails when the capability is unavailable, refuses, or fails.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// An account able to sign: an SS58 address, optional display metadata, and
/// the signing capability itself.
///
/// Cheap to clone; the capability is shared.
#[derive(Clone)]
pub struct SigningIdentity {
    address: String,
    name: Option<String>,
    signer: Arc<dyn SignerCapability>,
}

impl SigningIdentity {
    /// Wrap an arbitrary capability. The address is trusted as given.
    pub fn new(
        address: impl Into<String>,
        name: Option<String>,
        signer: Arc<dyn SignerCapability>,
    ) -> Self {
        Self {
            address: address.into(),
            name,
            signer,
        }
    }

    /// Build an identity owning a local key pair.
    #[must_use]
    pub fn from_pair(name: Option<String>, pair: KeyPair) -> Self {
        Self {
            address: pair.address(),
            name,
            signer: Arc::new(pair),
        }
    }

    /// The account's SS58 address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Optional display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The signature scheme this identity signs with.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.signer.algorithm()
    }

    /// Sign a message with the account's capability.
    ///
    /// # Errors
    ///
    /// Fails when the capability is unavailable, refuses, or fails.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.signer.sign(message)
    }

    /// Label for selection lists: `"(name) 5Grwva…KutQY"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.name {
            Some(name) => format!("({name}) {}", shorten(&self.address)),
            None => shorten(&self.address),
        }
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &self.address)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

/// Shorten an address-like ASCII string for display, keeping both ends.
#[must_use]
pub fn shorten(value: &str) -> String {
    const KEEP: usize = 6;
    if value.len() <= 2 * KEEP + 1 {
        value.to_string()
    } else {
        format!("{}…{}", &value[..KEEP], &value[value.len() - KEEP..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_keeps_short_values_intact() {
        assert_eq!(shorten("5Grwva"), "5Grwva");
        assert_eq!(shorten("1234567890123"), "1234567890123");
    }

    #[test]
    fn shorten_elides_the_middle() {
        assert_eq!(
            shorten("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
            "5Grwva…KutQY"
        );
    }

    #[test]
    fn display_label_includes_name_when_present() {
        let pair = KeyPair::generate(Algorithm::Sr25519).unwrap();
        let address = pair.address();
        let identity = SigningIdentity::from_pair(Some("stash".to_string()), pair);
        assert_eq!(
            identity.display_label(),
            format!("(stash) {}", shorten(&address))
        );
    }

    #[test]
    fn display_label_without_name_is_just_the_address() {
        let pair = KeyPair::generate(Algorithm::Ed25519).unwrap();
        let address = pair.address();
        let identity = SigningIdentity::from_pair(None, pair);
        assert_eq!(identity.display_label(), shorten(&address));
    }
}
