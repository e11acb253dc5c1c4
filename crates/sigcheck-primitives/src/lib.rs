/// secp256k1 signature checking primitives.
///
/// This crate provides the building blocks for validating a single ECDSA
/// signature the way Bitcoin transaction signing produces it:
/// - Curve parameters for secp256k1, loaded once and never mutated
/// - Compressed public key parsing and point decompression
/// - Raw (r, s) signature assembly into the fixed-width `r || s` layout
/// - ECDSA verification of a precomputed 32-byte digest
/// - SHA-256 / SHA-256d digests

pub mod curve;
pub mod digest;
pub mod ec;
pub mod hash;

mod error;
pub use error::SigCheckError;
