//! SS58 address encoding.
//!
//! An address is `base58(prefix || public-key || checksum[0..2])` where the
//! checksum is the leading two bytes of the blake2b-512 digest of
//! `"SS58PRE" || prefix || public-key`. Only single-byte network prefixes
//! are handled here, which covers the generic substrate prefix the rest of
//! this workspace uses.

use base58::{FromBase58, ToBase58};
use blake2::{Blake2b512, Digest};

use crate::error::{KeyringError, Result};

/// Generic substrate network prefix.
pub const DEFAULT_PREFIX: u8 = 42;

const CHECKSUM_PREAMBLE: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const PUBLIC_KEY_LEN: usize = 32;

fn checksum(prefix: u8, public_key: &[u8; PUBLIC_KEY_LEN]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_PREAMBLE);
    hasher.update([prefix]);
    hasher.update(public_key);
    let digest = hasher.finalize();
    [digest[0], digest[1]]
}

/// Encode a 32-byte public key as an SS58 address.
#[must_use]
pub fn ss58_encode(prefix: u8, public_key: &[u8; 32]) -> String {
    let mut data = Vec::with_capacity(1 + PUBLIC_KEY_LEN + CHECKSUM_LEN);
    data.push(prefix);
    data.extend_from_slice(public_key);
    data.extend_from_slice(&checksum(prefix, public_key));
    data.to_base58()
}

/// Decode an SS58 address into its network prefix and public key.
///
/// # Errors
///
/// Fails when the input is not base58, has the wrong length, or carries a
/// checksum that does not match its key bytes.
pub fn ss58_decode(address: &str) -> Result<(u8, [u8; 32])> {
    let data = address
        .from_base58()
        .map_err(|_| KeyringError::InvalidAddress("not valid base58".to_string()))?;
    if data.len() != 1 + PUBLIC_KEY_LEN + CHECKSUM_LEN {
        return Err(KeyringError::InvalidAddress(format!(
            "unexpected length {}",
            data.len()
        )));
    }
    let prefix = data[0];
    let mut public_key = [0u8; PUBLIC_KEY_LEN];
    public_key.copy_from_slice(&data[1..=PUBLIC_KEY_LEN]);
    if checksum(prefix, &public_key) != data[1 + PUBLIC_KEY_LEN..] {
        return Err(KeyringError::InvalidAddress(
            "checksum mismatch".to_string(),
        ));
    }
    Ok((prefix, public_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // The well-known substrate dev account "Alice".
    const ALICE_PUBLIC: [u8; 32] =
        hex!("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d");
    const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn encodes_known_key() {
        assert_eq!(ss58_encode(DEFAULT_PREFIX, &ALICE_PUBLIC), ALICE_ADDRESS);
    }

    #[test]
    fn decodes_known_address() {
        let (prefix, public_key) = ss58_decode(ALICE_ADDRESS).unwrap();
        assert_eq!(prefix, DEFAULT_PREFIX);
        assert_eq!(public_key, ALICE_PUBLIC);
    }

    #[test]
    fn round_trips_arbitrary_keys() {
        let key = [7u8; 32];
        let address = ss58_encode(DEFAULT_PREFIX, &key);
        let (prefix, decoded) = ss58_decode(&address).unwrap();
        assert_eq!(prefix, DEFAULT_PREFIX);
        assert_eq!(decoded, key);
    }

    #[test]
    fn rejects_corrupted_address() {
        let mut corrupted = ALICE_ADDRESS.to_string();
        // Swap the last character for a different base58 character.
        corrupted.pop();
        corrupted.push('Z');
        assert!(matches!(
            ss58_decode(&corrupted),
            Err(KeyringError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            ss58_decode("5Grwva"),
            Err(KeyringError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_non_base58_input() {
        assert!(matches!(
            ss58_decode("not an address!"),
            Err(KeyringError::InvalidAddress(_))
        ));
    }
}
