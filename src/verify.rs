//! The AOS ring verifier.
//!
//! Recomputes the challenge chain from the signature's responses and the
//! supplied ring and message, and accepts iff the chain closes back to the
//! embedded starting challenge `c_0`.

use crate::error::RingSigError;
use crate::ring::Ring;
use crate::signature::Signature;

/// Verifies `proof` against `ring` and `message`.
///
/// Returns `Ok(())` on acceptance, or the specific [`RingSigError`] reason
/// for rejection. The loop below always walks every ring member — no
/// partial-match short-circuit — only the final equality check may return
/// early.
pub(crate) fn verify(proof: &str, ring: &Ring, message: &[u8]) -> Result<(), RingSigError> {
    let signature = Signature::from_hex(proof)?;

    if signature.ring_size() != ring.len() {
        return Err(RingSigError::ParseSig(
            "ring size does not match the supplied ring".into(),
        ));
    }

    let n = ring.len();
    let ring_bytes = ring.ring_bytes();

    let mut running = signature.c0;
    for index in 0..n {
        let member = ring.get(index).point().negate();
        let commitment = member.double_scalar_mul_vartime(&running, &signature.responses[index]);
        running = crate::challenge::chain(&ring_bytes, message, &commitment.to_bytes());
    }

    if running.to_bytes() == signature.c0.to_bytes() {
        Ok(())
    } else {
        Err(RingSigError::SigMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::secret::SecretKey;
    use crate::prove::prove;
    use crate::rng::Rng;

    #[test]
    fn accepts_valid_signature_over_multi_member_ring() {
        let signer = SecretKey::from_seed_for_test([1u8; 32]);
        let decoy_a = SecretKey::from_seed_for_test([2u8; 32]);
        let decoy_b = SecretKey::from_seed_for_test([3u8; 32]);

        let lines = [
            decoy_a.public().encode_line(),
            signer.public().encode_line(),
            decoy_b.public().encode_line(),
        ];
        let ring = Ring::parse(&lines).unwrap();
        let mut rng = Rng::new();

        let sig = prove(&ring, b"hello", &signer, &mut rng).unwrap();
        assert!(verify(&sig.to_hex(), &ring, b"hello").is_ok());
    }

    #[test]
    fn rejects_flipped_message_bit() {
        let signer = SecretKey::from_seed_for_test([4u8; 32]);
        let ring = Ring::parse(&[signer.public().encode_line()]).unwrap();
        let mut rng = Rng::new();

        let sig = prove(&ring, b"hello", &signer, &mut rng).unwrap();
        let err = verify(&sig.to_hex(), &ring, b"hellp").unwrap_err();
        assert_eq!(err, RingSigError::SigMismatch);
    }

    #[test]
    fn rejects_reordered_ring() {
        let signer = SecretKey::from_seed_for_test([5u8; 32]);
        let other = SecretKey::from_seed_for_test([6u8; 32]);

        let original = [signer.public().encode_line(), other.public().encode_line()];
        let ring = Ring::parse(&original).unwrap();
        let mut rng = Rng::new();
        let sig = prove(&ring, b"hello", &signer, &mut rng).unwrap();

        let swapped = [original[1].clone(), original[0].clone()];
        let reordered_ring = Ring::parse(&swapped).unwrap();

        let err = verify(&sig.to_hex(), &reordered_ring, b"hello").unwrap_err();
        assert_eq!(err, RingSigError::SigMismatch);
    }

    #[test]
    fn rejects_ring_size_mismatch() {
        let signer = SecretKey::from_seed_for_test([8u8; 32]);
        let ring = Ring::parse(&[signer.public().encode_line()]).unwrap();
        let mut rng = Rng::new();
        let sig = prove(&ring, b"hello", &signer, &mut rng).unwrap();

        let bigger_ring = Ring::parse(&[
            signer.public().encode_line(),
            signer.public().encode_line(),
        ])
        .unwrap();

        let err = verify(&sig.to_hex(), &bigger_ring, b"hello").unwrap_err();
        assert!(matches!(err, RingSigError::ParseSig(_)));
    }

    #[test]
    fn rejects_flipped_signature_bit() {
        let signer = SecretKey::from_seed_for_test([10u8; 32]);
        let ring = Ring::parse(&[signer.public().encode_line()]).unwrap();
        let mut rng = Rng::new();
        let sig = prove(&ring, b"hello", &signer, &mut rng).unwrap();

        let mut hex_text = sig.to_hex().into_bytes();
        // flip one hex nibble in the final response
        let last = hex_text.len() - 1;
        hex_text[last] = if hex_text[last] == b'0' { b'1' } else { b'0' };
        let mangled = String::from_utf8(hex_text).unwrap();

        let err = verify(&mangled, &ring, b"hello").unwrap_err();
        assert_eq!(err, RingSigError::SigMismatch);
    }
}
