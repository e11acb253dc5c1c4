#![deny(missing_docs)]

//! Single-signature secp256k1 checker.
//!
//! Re-exports the curve primitives and wires them into one pipeline:
//! decompress the public key, assemble the signature, verify the digest,
//! report the outcome.

pub use sigcheck_primitives as primitives;

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{CheckConfig, DigestSource, SignatureSource};
pub use pipeline::{check, run};
pub use report::Outcome;
