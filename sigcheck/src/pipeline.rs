//! The check itself: decompress, verify, classify.

use sigcheck_primitives::ec::check_signature;
use sigcheck_primitives::SigCheckError;

use crate::config::CheckConfig;
use crate::report::Outcome;

/// Decompress the public key and verify the signature over the digest.
///
/// # Returns
/// `Ok(())` if the signature is valid, `Err(VerificationFailed)` if the
/// equation does not hold, or the input error that stopped the check.
pub fn check(config: &CheckConfig) -> Result<(), SigCheckError> {
    let point = config.public_key.decompress()?;
    tracing::debug!(
        pubkey = %config.public_key,
        digest = %config.digest,
        high_s = config.signature.is_high_s(),
        "checking signature"
    );
    check_signature(&point, &config.signature, &config.digest)
}

/// Run [`check`] and turn its result into a reportable [`Outcome`].
pub fn run(config: &CheckConfig) -> Outcome {
    let outcome = Outcome::from(check(config));
    tracing::info!(valid = outcome.is_valid(), "signature check finished");
    outcome
}
