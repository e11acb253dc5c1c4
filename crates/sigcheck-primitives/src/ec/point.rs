//! Compressed public keys and affine curve points.
//!
//! A compressed SEC1 key carries only the x-coordinate and a parity flag for
//! y. Decompression recovers y with a single modular exponentiation, since
//! for p ≡ 3 (mod 4) a square root of a residue `a` is `a^((p+1)/4) mod p`.

use std::fmt;

use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint};
use num_bigint::BigUint;

use crate::curve::{to_be_bytes32, SECP256K1};
use crate::digest::Digest;
use crate::ec::signature::Signature;
use crate::ec::verify::verify_digest;
use crate::SigCheckError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;
const PREFIX_UNCOMPRESSED: u8 = 0x04;

/// Which of the two square roots a compressed key selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Parity of an integer.
    pub fn of(value: &BigUint) -> Self {
        if value.bit(0) {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    /// Decode a SEC1 compressed prefix byte.
    pub fn from_prefix(prefix: u8) -> Result<Self, SigCheckError> {
        match prefix {
            PREFIX_EVEN => Ok(Parity::Even),
            PREFIX_ODD => Ok(Parity::Odd),
            PREFIX_UNCOMPRESSED => Err(SigCheckError::InvalidPublicKey(
                "uncompressed keys are not accepted, expected prefix 0x02 or 0x03".to_string(),
            )),
            other => Err(SigCheckError::InvalidPublicKey(format!(
                "invalid prefix byte 0x{:02x}",
                other
            ))),
        }
    }

    /// The SEC1 prefix byte for this parity.
    pub fn prefix(self) -> u8 {
        match self {
            Parity::Even => PREFIX_EVEN,
            Parity::Odd => PREFIX_ODD,
        }
    }
}

/// A public key in compressed form: parity of y plus the x-coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedPublicKey {
    parity: Parity,
    x: BigUint,
}

impl CompressedPublicKey {
    /// Create a compressed key from its parts.
    ///
    /// # Returns
    /// An error if `x` is not a field element.
    pub fn new(parity: Parity, x: BigUint) -> Result<Self, SigCheckError> {
        if x >= SECP256K1.p {
            return Err(SigCheckError::InvalidPublicKey(
                "x-coordinate is not less than the field prime".to_string(),
            ));
        }
        Ok(CompressedPublicKey { parity, x })
    }

    /// Parse a 33-byte SEC1 compressed key.
    ///
    /// # Arguments
    /// * `bytes` - `0x02` or `0x03` followed by the 32-byte big-endian x-coordinate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigCheckError> {
        if bytes.len() != COMPRESSED_LEN {
            return Err(SigCheckError::InvalidKeyLength {
                expected: COMPRESSED_LEN,
                got: bytes.len(),
            });
        }
        let parity = Parity::from_prefix(bytes[0])?;
        Self::new(parity, BigUint::from_bytes_be(&bytes[1..]))
    }

    /// Parse a hex-encoded compressed key (66 hex characters).
    pub fn from_hex(hex_str: &str) -> Result<Self, SigCheckError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_bytes(&bytes)
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Serialize back to the 33-byte SEC1 form.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_LEN] {
        let mut out = [0u8; COMPRESSED_LEN];
        out[0] = self.parity.prefix();
        out[1..].copy_from_slice(&to_be_bytes32(&self.x));
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Recover the full curve point.
    ///
    /// Computes `y = (x³ + 7)^((p+1)/4) mod p`, confirms `y² ≡ x³ + 7`, then
    /// takes `p - y` if the parity of `y` disagrees with the requested flag.
    ///
    /// # Returns
    /// `Err(InvalidPublicKey)` when `x³ + 7` has no square root mod p, i.e. no
    /// point with this x-coordinate exists.
    pub fn decompress(&self) -> Result<CurvePoint, SigCheckError> {
        let curve = &*SECP256K1;
        let alpha = curve.curve_rhs(&self.x);
        let mut y = alpha.modpow(&curve.sqrt_exponent, &curve.p);

        if (&y * &y) % &curve.p != alpha {
            tracing::debug!(x = %self.to_hex(), "x^3 + 7 is not a quadratic residue");
            return Err(SigCheckError::InvalidPublicKey(
                "x-coordinate is not on the curve".to_string(),
            ));
        }

        if Parity::of(&y) != self.parity {
            y = (&curve.p - &y) % &curve.p;
        }
        tracing::trace!(parity = ?self.parity, "decompressed public key");

        Ok(CurvePoint {
            x: self.x.clone(),
            y,
        })
    }
}

impl fmt::Display for CompressedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// An affine point `(x, y)` satisfying `y² ≡ x³ + 7 (mod p)`.
///
/// The point at infinity is never represented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    x: BigUint,
    y: BigUint,
}

impl CurvePoint {
    /// Create a point, checking the curve equation.
    pub fn new(x: BigUint, y: BigUint) -> Result<Self, SigCheckError> {
        if !SECP256K1.is_on_curve(&x, &y) {
            return Err(SigCheckError::InvalidPublicKey(
                "point not on curve".to_string(),
            ));
        }
        Ok(CurvePoint { x, y })
    }

    pub(crate) fn from_trusted(x: BigUint, y: BigUint) -> Self {
        CurvePoint { x, y }
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Drop y down to its parity bit.
    pub fn compress(&self) -> CompressedPublicKey {
        CompressedPublicKey {
            parity: Parity::of(&self.y),
            x: self.x.clone(),
        }
    }

    /// Serialize in uncompressed SEC1 format: `0x04 || x || y`.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out[0] = PREFIX_UNCOMPRESSED;
        out[1..33].copy_from_slice(&to_be_bytes32(&self.x));
        out[33..].copy_from_slice(&to_be_bytes32(&self.y));
        out
    }

    /// Verify an ECDSA signature over `digest` with this point as public key.
    ///
    /// # Returns
    /// `Ok(true)` if the signature is valid, `Ok(false)` if the equation does
    /// not hold.
    pub fn verify(&self, digest: &Digest, sig: &Signature) -> Result<bool, SigCheckError> {
        verify_digest(self, sig, digest)
    }

    /// Convert to a k256 `AffinePoint` for group arithmetic.
    pub(crate) fn to_affine(&self) -> Result<AffinePoint, SigCheckError> {
        let encoded = EncodedPoint::from_bytes(self.to_uncompressed())
            .map_err(|e| SigCheckError::InvalidPublicKey(e.to_string()))?;
        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or_else(|| SigCheckError::InvalidPublicKey("point not on curve".to_string()))
    }
}
