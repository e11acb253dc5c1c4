/// Elliptic curve operations on secp256k1.
///
/// Provides compressed public key decompression, raw signature assembly
/// and ECDSA verification of precomputed digests.

pub mod point;
pub mod signature;
pub mod verify;

pub use point::{CompressedPublicKey, CurvePoint, Parity};
pub use signature::Signature;
pub use verify::{check_signature, verify_digest};
