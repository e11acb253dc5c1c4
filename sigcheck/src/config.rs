//! Inputs for a signature check.
//!
//! Every input starts life as a string (from the command line or the bundled
//! transaction vector) and is parsed once into [`CheckConfig`].

use sigcheck_primitives::digest::Digest;
use sigcheck_primitives::ec::{CompressedPublicKey, Signature};
use sigcheck_primitives::SigCheckError;

/// Digest of the bundled transaction input, big-endian.
pub const DEFAULT_DIGEST: &str =
    "dd37695b7387fb2198d0ed977411264e9841bf9e2322a9b6975c31aa44d8e405";

/// R component of the bundled transaction signature.
pub const DEFAULT_R: &str = "642a1672db4db1fb8b9f7bf855614b59369d55bc4028d3b3e85b616cdc1ad348";

/// S component of the bundled transaction signature.
pub const DEFAULT_S: &str = "864145195db039847de1f4b0561202b7b03756a1cfedd63636bfda82d18a43e8";

/// Compressed public key from the bundled transaction's scriptSig.
pub const DEFAULT_PUBKEY: &str =
    "0362a0a96e44ce7ea433cce33feba1410d2c3d3153e5892d17cb553948317214c6";

/// Where the 32-byte digest comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DigestSource {
    /// Big-endian hex.
    Hex(String),
    /// Hex in Bitcoin's byte-reversed display order.
    HexReversed(String),
    /// Hex-encoded raw message, digested with SHA-256d.
    Message(String),
}

impl Default for DigestSource {
    fn default() -> Self {
        DigestSource::Hex(DEFAULT_DIGEST.to_string())
    }
}

impl DigestSource {
    /// Parse into a [`Digest`].
    pub fn resolve(&self) -> Result<Digest, SigCheckError> {
        match self {
            DigestSource::Hex(h) => Digest::from_hex(h),
            DigestSource::HexReversed(h) => Digest::from_hex_reversed(h),
            DigestSource::Message(m) => {
                let message = hex::decode(m.trim())?;
                Ok(Digest::from_message(&message))
            }
        }
    }
}

/// Where the (r, s) pair comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureSource {
    /// Separate big-endian hex components.
    Components {
        /// R component.
        r: String,
        /// S component.
        s: String,
    },
    /// 64-byte `r || s` as hex.
    Compact(String),
}

impl Default for SignatureSource {
    fn default() -> Self {
        SignatureSource::Components {
            r: DEFAULT_R.to_string(),
            s: DEFAULT_S.to_string(),
        }
    }
}

impl SignatureSource {
    /// Parse into a range-checked [`Signature`].
    pub fn resolve(&self) -> Result<Signature, SigCheckError> {
        match self {
            SignatureSource::Components { r, s } => Signature::from_hex(r, s),
            SignatureSource::Compact(h) => Signature::from_compact_hex(h),
        }
    }
}

/// Fully parsed inputs for one check. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Digest the signature commits to.
    pub digest: Digest,
    /// Signature components.
    pub signature: Signature,
    /// Signer's public key, still compressed.
    pub public_key: CompressedPublicKey,
}

impl CheckConfig {
    /// Parse every source, failing on the first malformed input.
    pub fn from_sources(
        digest: &DigestSource,
        signature: &SignatureSource,
        public_key: &str,
    ) -> Result<Self, SigCheckError> {
        Ok(CheckConfig {
            digest: digest.resolve()?,
            signature: signature.resolve()?,
            public_key: CompressedPublicKey::from_hex(public_key)?,
        })
    }

    /// The transaction input this tool was first written to check.
    pub fn bundled() -> Result<Self, SigCheckError> {
        Self::from_sources(
            &DigestSource::default(),
            &SignatureSource::default(),
            DEFAULT_PUBKEY,
        )
    }
}
