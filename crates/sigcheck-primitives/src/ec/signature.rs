//! ECDSA signature built from raw (r, s) components.
//!
//! Assembly produces the fixed-width layout `r || s`, each component
//! zero-padded big-endian to the byte length of the group order. No DER
//! handling and no low-S enforcement.

use num_bigint::BigUint;

use crate::curve::{to_be_bytes32, to_be_padded, SECP256K1};
use crate::SigCheckError;

/// Length of the compact `r || s` encoding for secp256k1.
pub const COMPACT_LEN: usize = 64;

/// Encode r and s into the fixed-width `r || s` layout for a group of order `order`.
///
/// Each component is left-padded to the byte length of `order`.
///
/// # Returns
/// `Err(InvalidSignatureComponent)` if either component is 0 or `>= order`.
pub fn encode_components(
    r: &BigUint,
    s: &BigUint,
    order: &BigUint,
) -> Result<Vec<u8>, SigCheckError> {
    check_component("r", r, order)?;
    check_component("s", s, order)?;

    let width = order.bits().div_ceil(8) as usize;
    let mut out = Vec::with_capacity(width * 2);
    out.extend_from_slice(&to_be_padded(r, width));
    out.extend_from_slice(&to_be_padded(s, width));
    Ok(out)
}

fn check_component(name: &str, value: &BigUint, order: &BigUint) -> Result<(), SigCheckError> {
    if value.bits() == 0 {
        return Err(SigCheckError::InvalidSignatureComponent(format!(
            "signature {} is zero",
            name
        )));
    }
    if value >= order {
        return Err(SigCheckError::InvalidSignatureComponent(format!(
            "signature {} is >= curve.N",
            name
        )));
    }
    Ok(())
}

/// An ECDSA signature with both components in `[1, n-1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Create a signature from its components.
    ///
    /// # Returns
    /// `Err(InvalidSignatureComponent)` if r or s is outside `[1, n-1]`.
    pub fn new(r: BigUint, s: BigUint) -> Result<Self, SigCheckError> {
        let n = &SECP256K1.n;
        check_component("r", &r, n)?;
        check_component("s", &s, n)?;
        Ok(Signature { r, s })
    }

    /// Parse r and s from big-endian hex strings.
    ///
    /// Leading zeros may be omitted; values wider than 32 bytes are rejected
    /// by the range check.
    pub fn from_hex(r_hex: &str, s_hex: &str) -> Result<Self, SigCheckError> {
        let r = parse_component_hex(r_hex)?;
        let s = parse_component_hex(s_hex)?;
        Self::new(r, s)
    }

    /// Parse the 64-byte `r || s` layout produced by [`Signature::to_compact`].
    pub fn from_compact(bytes: &[u8]) -> Result<Self, SigCheckError> {
        if bytes.len() != COMPACT_LEN {
            return Err(SigCheckError::InvalidSignatureComponent(format!(
                "invalid compact signature size {}, want {}",
                bytes.len(),
                COMPACT_LEN
            )));
        }
        Self::new(
            BigUint::from_bytes_be(&bytes[..32]),
            BigUint::from_bytes_be(&bytes[32..]),
        )
    }

    pub fn from_compact_hex(hex_str: &str) -> Result<Self, SigCheckError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_compact(&bytes)
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    pub(crate) fn r_bytes(&self) -> [u8; 32] {
        to_be_bytes32(&self.r)
    }

    pub(crate) fn s_bytes(&self) -> [u8; 32] {
        to_be_bytes32(&self.s)
    }

    /// Assemble `r || s` against the secp256k1 group order.
    pub fn to_compact(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(COMPACT_LEN);
        out.extend_from_slice(&self.r_bytes());
        out.extend_from_slice(&self.s_bytes());
        out
    }

    /// Whether s lies in the upper half of the order.
    ///
    /// Informational only, high-S signatures still verify.
    pub fn is_high_s(&self) -> bool {
        self.s > (&SECP256K1.n >> 1)
    }
}

fn parse_component_hex(hex_str: &str) -> Result<BigUint, SigCheckError> {
    let trimmed = hex_str.trim();
    let padded = if trimmed.len() % 2 != 0 {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    };
    let bytes = hex::decode(&padded)?;
    if bytes.is_empty() {
        return Err(SigCheckError::InvalidSignatureComponent(
            "empty signature component".to_string(),
        ));
    }
    Ok(BigUint::from_bytes_be(&bytes))
}
