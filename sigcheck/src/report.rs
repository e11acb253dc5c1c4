//! Human-readable pass/fail reporting.

use std::fmt;

use sigcheck_primitives::SigCheckError;

/// Result of a single signature check.
#[derive(Debug)]
pub enum Outcome {
    /// The signature satisfies the ECDSA equation.
    Valid,
    /// The signature did not verify, or the inputs were malformed.
    Invalid(SigCheckError),
}

impl Outcome {
    /// Whether the signature verified.
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }

    /// Process exit code: 0 valid, 1 verification failed, 2 malformed input.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Valid => 0,
            Outcome::Invalid(e) if e.is_malformed_input() => 2,
            Outcome::Invalid(_) => 1,
        }
    }
}

impl From<Result<(), SigCheckError>> for Outcome {
    fn from(result: Result<(), SigCheckError>) -> Self {
        match result {
            Ok(()) => Outcome::Valid,
            Err(e) => Outcome::Invalid(e),
        }
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        // Errors compare by message.
        match (self, other) {
            (Outcome::Valid, Outcome::Valid) => true,
            (Outcome::Invalid(a), Outcome::Invalid(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Valid => write!(f, "signature is valid"),
            Outcome::Invalid(e) => write!(f, "signature does not match: {}", e),
        }
    }
}
