//! Signature algorithm identifiers carried in token headers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyringError;

/// Signature schemes supported for JW3T accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Schnorr signatures over Ristretto, the default substrate account scheme.
    #[default]
    Sr25519,
    /// Ed25519 signatures.
    Ed25519,
}

impl Algorithm {
    /// The lowercase wire name used in token headers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Sr25519 => "sr25519",
            Algorithm::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = KeyringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sr25519" => Ok(Algorithm::Sr25519),
            "ed25519" => Ok(Algorithm::Ed25519),
            other => Err(KeyringError::UnknownAlgorithm(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for algorithm in [Algorithm::Sr25519, Algorithm::Ed25519] {
            let parsed: Algorithm = algorithm.as_str().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "rs256".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, KeyringError::UnknownAlgorithm(name) if name == "rs256"));
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&Algorithm::Sr25519).unwrap(),
            "\"sr25519\""
        );
        let parsed: Algorithm = serde_json::from_str("\"ed25519\"").unwrap();
        assert_eq!(parsed, Algorithm::Ed25519);
    }
}
