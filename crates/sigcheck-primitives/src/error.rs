/// Unified error type for signature checking.
///
/// Malformed inputs (bad key, out of range component, bad hex) are kept apart
/// from `VerificationFailed`, which means the inputs were well formed but the
/// ECDSA equation did not hold.
#[derive(Debug, thiserror::Error)]
pub enum SigCheckError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature component: {0}")]
    InvalidSignatureComponent(String),

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
}

impl SigCheckError {
    /// Whether this error describes bad input rather than a failed equation.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, SigCheckError::VerificationFailed)
    }
}

impl From<hex::FromHexError> for SigCheckError {
    fn from(e: hex::FromHexError) -> Self {
        SigCheckError::InvalidHex(e.to_string())
    }
}
