//! The 32-byte value a signature commits to.
//!
//! Bitcoin tooling usually displays hashes byte-reversed (txids, sighashes),
//! while ECDSA reads the digest as a big-endian integer. `Digest` always
//! stores the big-endian form; `from_hex_reversed` accepts the display form.

use std::fmt;
use std::str::FromStr;

use crate::hash::sha256d;
use crate::SigCheckError;

/// Size of a digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A precomputed message digest, treated as an opaque big-endian integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }

    /// Create a Digest from a byte slice of exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigCheckError> {
        if bytes.len() != DIGEST_SIZE {
            return Err(SigCheckError::InvalidDigest(format!(
                "invalid digest length of {}, want {}",
                bytes.len(),
                DIGEST_SIZE
            )));
        }
        let mut arr = [0u8; DIGEST_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Digest(arr))
    }

    /// Parse a big-endian hex digest (64 hex characters).
    pub fn from_hex(hex_str: &str) -> Result<Self, SigCheckError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Parse a digest written in Bitcoin's byte-reversed display order.
    pub fn from_hex_reversed(hex_str: &str) -> Result<Self, SigCheckError> {
        let mut digest = Self::from_hex(hex_str)?;
        digest.0.reverse();
        Ok(digest)
    }

    /// Digest a raw message the way Bitcoin does: SHA-256d.
    pub fn from_message(message: &[u8]) -> Self {
        Digest(sha256d(message))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Hex string in big-endian order.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = SigCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX_DIGEST: &str = "dd37695b7387fb2198d0ed977411264e9841bf9e2322a9b6975c31aa44d8e405";

    #[test]
    fn test_from_hex_round_trip() {
        let digest = Digest::from_hex(TX_DIGEST).unwrap();
        assert_eq!(digest.as_bytes()[0], 0xdd);
        assert_eq!(digest.as_bytes()[31], 0x05);
        assert_eq!(digest.to_string(), TX_DIGEST);
        assert_eq!(TX_DIGEST.parse::<Digest>().unwrap(), digest);
    }

    #[test]
    fn test_from_hex_reversed() {
        let forward = Digest::from_hex(TX_DIGEST).unwrap();
        let mut reversed_bytes = *forward.as_bytes();
        reversed_bytes.reverse();
        let reversed_hex = hex::encode(reversed_bytes);

        assert_eq!(Digest::from_hex_reversed(&reversed_hex).unwrap(), forward);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            Digest::from_hex(&TX_DIGEST[..62]),
            Err(SigCheckError::InvalidDigest(_))
        ));
        assert!(Digest::from_hex(&format!("{}00", TX_DIGEST)).is_err());
        assert!(Digest::from_hex("").is_err());
    }

    #[test]
    fn test_bad_hex_rejected() {
        let err = Digest::from_hex(&"g".repeat(64)).unwrap_err();
        assert!(matches!(err, SigCheckError::InvalidHex(_)));
    }

    #[test]
    fn test_from_message_is_sha256d() {
        assert_eq!(
            Digest::from_message(b"").to_hex(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }
}
