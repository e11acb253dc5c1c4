//! secp256k1 domain parameters.
//!
//! The curve is `y² = x³ + 7` over the prime field `p`, with generator `G`
//! of prime order `n`. Parameters are decoded once into [`SECP256K1`] and
//! shared read-only for the lifetime of the process.

use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::ec::point::CurvePoint;

/// The field prime p = 2^256 - 2^32 - 977.
const FIELD_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
    0xFC, 0x2F,
];

/// The group order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

const GENERATOR_X: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B,
    0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8,
    0x17, 0x98,
];

const GENERATOR_Y: [u8; 32] = [
    0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08,
    0xA8, 0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10,
    0xD4, 0xB8,
];

/// The curve coefficient b in y² = x³ + ax + b. For secp256k1, a = 0.
const CURVE_B: u32 = 7;

/// Process-wide secp256k1 parameters.
pub static SECP256K1: LazyLock<CurveParams> = LazyLock::new(CurveParams::secp256k1);

/// Domain parameters of a short Weierstrass curve with a = 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    /// Field prime.
    pub p: BigUint,
    /// Constant term of the curve equation.
    pub b: BigUint,
    /// Order of the generator.
    pub n: BigUint,
    /// Generator x-coordinate.
    pub gx: BigUint,
    /// Generator y-coordinate.
    pub gy: BigUint,
    /// (p + 1) / 4, the square root exponent. Valid because p ≡ 3 (mod 4).
    pub sqrt_exponent: BigUint,
}

impl CurveParams {
    fn secp256k1() -> Self {
        let p = BigUint::from_bytes_be(&FIELD_PRIME);
        let sqrt_exponent = (&p + 1u32) >> 2;
        CurveParams {
            b: BigUint::from(CURVE_B),
            n: BigUint::from_bytes_be(&CURVE_ORDER),
            gx: BigUint::from_bytes_be(&GENERATOR_X),
            gy: BigUint::from_bytes_be(&GENERATOR_Y),
            sqrt_exponent,
            p,
        }
    }

    /// Right-hand side of the curve equation, `x³ + b mod p`.
    pub fn curve_rhs(&self, x: &BigUint) -> BigUint {
        (x.modpow(&BigUint::from(3u32), &self.p) + &self.b) % &self.p
    }

    /// Check that `(x, y)` lies on the curve with both coordinates in the field.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        if x >= &self.p || y >= &self.p {
            return false;
        }
        (y * y) % &self.p == self.curve_rhs(x)
    }

    /// Check that `v` is a valid nonzero scalar, i.e. `1 <= v < n`.
    pub fn is_valid_scalar(&self, v: &BigUint) -> bool {
        !v.is_zero() && v < &self.n
    }

    /// Byte length of the group order, the width of each signature component.
    pub fn order_byte_len(&self) -> usize {
        self.n.bits().div_ceil(8) as usize
    }

    /// Byte length of a field element.
    pub fn field_byte_len(&self) -> usize {
        self.p.bits().div_ceil(8) as usize
    }

    /// The generator point G.
    pub fn generator(&self) -> CurvePoint {
        CurvePoint::from_trusted(self.gx.clone(), self.gy.clone())
    }
}

/// Encode `value` big-endian, left-padded with zeros to `len` bytes.
///
/// Callers guarantee `value` fits in `len` bytes.
pub(crate) fn to_be_padded(value: &BigUint, len: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(raw.len())];
    out.extend_from_slice(&raw);
    out
}

/// Encode `value` as a 32-byte big-endian array.
pub(crate) fn to_be_bytes32(value: &BigUint) -> [u8; 32] {
    let padded = to_be_padded(value, 32);
    let mut out = [0u8; 32];
    out.copy_from_slice(&padded[padded.len() - 32..]);
    out
}
