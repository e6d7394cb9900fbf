//! The AOS ring signer.
//!
//! Implements the Abe–Ohkubo–Suzuki construction: starting at the real
//! signer's position, walk the ring computing decoy commitments and
//! challenges, then close the loop at the signer using the secret scalar.

use crate::challenge;
use crate::curve::group::GeP3;
use crate::curve::scalar::Scalar;
use crate::error::RingSigError;
use crate::keys::secret::SecretKey;
use crate::ring::Ring;
use crate::rng::Rng;
use crate::signature::Signature;

/// Produces an AOS ring signature over `message` for `ring`, using `secret`.
///
/// `secret`'s public key must be present in `ring`, and must not be a
/// small-order point (claiming knowledge of a small-order point's discrete
/// log is meaningless, so it is rejected even though small-order points are
/// permitted as decoys). Every nonce drawn during the walk comes from `rng`;
/// a failure there is surfaced as [`RingSigError::RngFailure`] rather than
/// falling back to a weaker source.
pub(crate) fn prove(
    ring: &Ring,
    message: &[u8],
    secret: &SecretKey,
    rng: &mut Rng,
) -> Result<Signature, RingSigError> {
    if secret.public().point().is_small_order() {
        return Err(RingSigError::InvalidPoint);
    }

    let signer_index = ring
        .position_of(secret.public())
        .ok_or(RingSigError::SignerNotInRing)?;

    let n = ring.len();
    let ring_bytes = ring.ring_bytes();
    let base = GeP3::base_point();

    let zero = Scalar::from_bytes([0u8; 32]);
    let mut challenges = vec![zero; n];
    let mut responses = vec![zero; n];

    let nonce = rng.random_scalar()?;
    let commitment = base.scalar_mul(&nonce);

    let mut index = (signer_index + 1) % n;
    challenges[index] = challenge::chain(&ring_bytes, message, &commitment.to_bytes());

    while index != signer_index {
        let response = rng.random_scalar()?;
        responses[index] = response;

        let member = ring.get(index).point().negate();
        let commitment = member.double_scalar_mul_vartime(&challenges[index], &response);

        index = (index + 1) % n;
        challenges[index] = challenge::chain(&ring_bytes, message, &commitment.to_bytes());
    }

    responses[signer_index] = Scalar::from_mul_sum(challenges[signer_index], secret.scalar(), nonce);

    Ok(Signature {
        c0: challenges[0],
        responses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify;

    #[test]
    fn prove_then_verify_accepts_single_member_ring() {
        let secret = SecretKey::from_seed_for_test([7u8; 32]);
        let line = secret.public().encode_line();
        let ring = Ring::parse(&[line.clone()]).unwrap();
        let mut rng = Rng::new();

        let sig = prove(&ring, b"", &secret, &mut rng).unwrap();
        assert_eq!(sig.to_hex().len(), 64 * 2);

        let ring2 = Ring::parse(&[line]).unwrap();
        assert!(verify(&sig.to_hex(), &ring2, b"").is_ok());
    }

    #[test]
    fn signer_not_in_ring_is_rejected() {
        let secret = SecretKey::from_seed_for_test([9u8; 32]);
        let decoy = SecretKey::from_seed_for_test([11u8; 32]);
        let ring = Ring::parse(&[decoy.public().encode_line()]).unwrap();
        let mut rng = Rng::new();

        let err = prove(&ring, b"", &secret, &mut rng).unwrap_err();
        assert_eq!(err, RingSigError::SignerNotInRing);
    }
}
