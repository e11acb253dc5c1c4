//! ECDSA verification of a precomputed digest.
//!
//! For public point Q, signature (r, s) and digest z reduced mod n:
//!
//! ```text
//! w  = s⁻¹ mod n
//! u1 = z·w mod n,  u2 = r·w mod n
//! R  = u1·G + u2·Q
//! valid iff R ≠ O and R.x mod n == r
//! ```

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, ProjectivePoint, Scalar, U256};

use crate::digest::Digest;
use crate::ec::point::CurvePoint;
use crate::ec::signature::Signature;
use crate::SigCheckError;

/// Verify `sig` over `digest` against the public point `point`.
///
/// # Returns
/// `Ok(true)` if the verification equation holds, `Ok(false)` if it does not
/// (including when R is the point at infinity). `Err` is reserved for inputs
/// that cannot be interpreted at all.
pub fn verify_digest(
    point: &CurvePoint,
    sig: &Signature,
    digest: &Digest,
) -> Result<bool, SigCheckError> {
    let q = ProjectivePoint::from(point.to_affine()?);
    let r = scalar_from_bytes("r", sig.r_bytes())?;
    let s = scalar_from_bytes("s", sig.s_bytes())?;
    let z = <Scalar as Reduce<U256>>::reduce(U256::from_be_slice(digest.as_bytes()));

    let w = Option::<Scalar>::from(s.invert()).ok_or_else(|| {
        SigCheckError::InvalidSignatureComponent("signature s has no inverse".to_string())
    })?;
    let u1 = z * w;
    let u2 = r * w;

    let big_r = ProjectivePoint::GENERATOR * u1 + q * u2;
    if big_r == ProjectivePoint::IDENTITY {
        tracing::debug!(digest = %digest, "u1*G + u2*Q is the point at infinity");
        return Ok(false);
    }

    let x = big_r.to_affine().x();
    let x_mod_n = <Scalar as Reduce<U256>>::reduce(U256::from_be_slice(&x));
    let valid = x_mod_n == r;
    tracing::debug!(digest = %digest, valid, "verified ECDSA equation");
    Ok(valid)
}

/// Verify and fold a failed equation into [`SigCheckError::VerificationFailed`].
pub fn check_signature(
    point: &CurvePoint,
    sig: &Signature,
    digest: &Digest,
) -> Result<(), SigCheckError> {
    if verify_digest(point, sig, digest)? {
        Ok(())
    } else {
        Err(SigCheckError::VerificationFailed)
    }
}

fn scalar_from_bytes(name: &str, bytes: [u8; 32]) -> Result<Scalar, SigCheckError> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(bytes))).ok_or_else(|| {
        SigCheckError::InvalidSignatureComponent(format!("signature {} is >= curve.N", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{to_be_bytes32, SECP256K1};
    use crate::ec::point::{CompressedPublicKey, Parity};
    use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
    use num_bigint::BigUint;

    const TX_DIGEST: &str = "dd37695b7387fb2198d0ed977411264e9841bf9e2322a9b6975c31aa44d8e405";
    const TX_R: &str = "642a1672db4db1fb8b9f7bf855614b59369d55bc4028d3b3e85b616cdc1ad348";
    const TX_S: &str = "864145195db039847de1f4b0561202b7b03756a1cfedd63636bfda82d18a43e8";
    const TX_PUBKEY: &str = "0362a0a96e44ce7ea433cce33feba1410d2c3d3153e5892d17cb553948317214c6";

    fn tx_inputs() -> (CurvePoint, Signature, Digest) {
        let point = CompressedPublicKey::from_hex(TX_PUBKEY)
            .unwrap()
            .decompress()
            .unwrap();
        let sig = Signature::from_hex(TX_R, TX_S).unwrap();
        let digest = Digest::from_hex(TX_DIGEST).unwrap();
        (point, sig, digest)
    }

    /// Sign `digest` with a fresh random key, returning the public point and signature.
    fn sign_random(digest: &Digest) -> (CurvePoint, Signature) {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        let (k256_sig, _recovery_id): (k256::ecdsa::Signature, RecoveryId) = signing_key
            .sign_prehash_recoverable(digest.as_bytes())
            .unwrap();
        let sig = Signature::from_compact(&k256_sig.to_bytes()).unwrap();

        let encoded = VerifyingKey::from(&signing_key).to_encoded_point(true);
        let point = CompressedPublicKey::from_bytes(encoded.as_bytes())
            .unwrap()
            .decompress()
            .unwrap();
        (point, sig)
    }

    fn flip_bit(value: &BigUint, bit: u64) -> BigUint {
        value ^ (BigUint::from(1u32) << bit)
    }

    #[test]
    fn test_transaction_signature_verifies() {
        let (point, sig, digest) = tx_inputs();
        assert!(verify_digest(&point, &sig, &digest).unwrap());
        assert!(point.verify(&digest, &sig).unwrap());
        assert!(check_signature(&point, &sig, &digest).is_ok());
    }

    #[test]
    fn test_transaction_signature_fails_with_even_parity() {
        let (point, sig, digest) = tx_inputs();
        let negated = CompressedPublicKey::new(Parity::Even, point.x().clone())
            .unwrap()
            .decompress()
            .unwrap();
        assert!(SECP256K1.is_on_curve(negated.x(), negated.y()));

        assert!(!verify_digest(&negated, &sig, &digest).unwrap());
        assert!(matches!(
            check_signature(&negated, &sig, &digest),
            Err(SigCheckError::VerificationFailed)
        ));
    }

    #[test]
    fn test_vectors() {
        let vectors_json = include_str!("testdata/verify.vectors.json");
        let vectors: Vec<serde_json::Value> = serde_json::from_str(vectors_json).unwrap();

        for (i, v) in vectors.iter().enumerate() {
            let digest = Digest::from_hex(v["digest"].as_str().unwrap())
                .unwrap_or_else(|e| panic!("vector #{}: parse digest: {}", i + 1, e));
            let message = hex::decode(v["message"].as_str().unwrap()).unwrap();
            assert_eq!(
                Digest::from_message(&message),
                digest,
                "vector #{}: digest is SHA-256d of the message",
                i + 1
            );

            let sig = Signature::from_hex(v["r"].as_str().unwrap(), v["s"].as_str().unwrap())
                .unwrap_or_else(|e| panic!("vector #{}: parse signature: {}", i + 1, e));
            assert_eq!(sig.is_high_s(), v["highS"].as_bool().unwrap(), "vector #{}", i + 1);

            let key = CompressedPublicKey::from_hex(v["publicKey"].as_str().unwrap())
                .unwrap_or_else(|e| panic!("vector #{}: parse pub key: {}", i + 1, e));
            let point = key.decompress().unwrap();
            assert_eq!(
                hex::encode(point.to_uncompressed()),
                v["uncompressed"].as_str().unwrap(),
                "vector #{}: decompressed point mismatch",
                i + 1
            );

            assert!(
                verify_digest(&point, &sig, &digest).unwrap(),
                "vector #{}: signature should verify",
                i + 1
            );
        }
    }

    #[test]
    fn test_random_signatures_verify() {
        for i in 0..16u8 {
            let digest = Digest::from_message(&[i; 8]);
            let (point, sig) = sign_random(&digest);
            assert!(verify_digest(&point, &sig, &digest).unwrap());
        }
    }

    #[test]
    fn test_single_bit_flips_fail() {
        let (point, sig, digest) = tx_inputs();

        for bit in (0..256u64).step_by(7) {
            let r = flip_bit(sig.r(), bit);
            if let Ok(bad) = Signature::new(r, sig.s().clone()) {
                assert!(!verify_digest(&point, &bad, &digest).unwrap(), "r bit {}", bit);
            }

            let s = flip_bit(sig.s(), bit);
            if let Ok(bad) = Signature::new(sig.r().clone(), s) {
                assert!(!verify_digest(&point, &bad, &digest).unwrap(), "s bit {}", bit);
            }

            let mut bytes = *digest.as_bytes();
            bytes[31 - (bit / 8) as usize] ^= 1 << (bit % 8);
            let bad_digest = Digest::new(bytes);
            assert!(!verify_digest(&point, &sig, &bad_digest).unwrap(), "digest bit {}", bit);
        }
    }

    #[test]
    fn test_digest_reduced_mod_order() {
        let mut small = [0u8; 32];
        small[31] = 5;
        let digest = Digest::new(small);
        let (point, sig) = sign_random(&digest);

        // 5 + n still fits in 32 bytes and is congruent to 5.
        let wrapped = Digest::new(to_be_bytes32(&(&SECP256K1.n + 5u32)));
        assert!(verify_digest(&point, &sig, &wrapped).unwrap());
    }

    #[test]
    fn test_point_at_infinity_is_invalid() {
        // With Q = G and z = n - r, u1·G + u2·G = (z + r)·w·G = O.
        let g = SECP256K1.generator();
        let r = BigUint::from(0x1234_5678u32);
        let sig = Signature::new(r.clone(), BigUint::from(3u32)).unwrap();
        let digest = Digest::new(to_be_bytes32(&(&SECP256K1.n - &r)));

        assert!(!verify_digest(&g, &sig, &digest).unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let digest = Digest::from_message(b"wrong key");
        let (_, sig) = sign_random(&digest);
        let (other, _) = sign_random(&digest);
        assert!(!verify_digest(&other, &sig, &digest).unwrap());
    }
}
