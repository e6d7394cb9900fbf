//! Hash-to-scalar transcript function.
//!
//! `H(data) = SHA-512(data) mod ℓ`. The AOS ring signer and verifier both
//! hash the fixed transcript `ring_bytes ‖ message ‖ R_i` to produce the
//! chained challenge scalars; that transcript assembly lives here so
//! [`crate::prove`] and [`crate::verify`] cannot drift apart on framing.

use crate::curve::scalar::Scalar;
use crate::hash::sha512::sha512;

/// `H(data) = SHA-512(data) mod ℓ`, as a canonical scalar.
fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::reduce(sha512(data))
}

/// Computes `c = H(ring_bytes ‖ message ‖ commitment)`.
///
/// `ring_bytes` binds the signature to a specific ring (and, by inclusion,
/// to ring order); `message` is placed between the ring and the commitment
/// so the ring acts as a domain separator without needing an explicit
/// length prefix on `message`.
pub(crate) fn chain(ring_bytes: &[u8], message: &[u8], commitment: &[u8; 32]) -> Scalar {
    let mut transcript = Vec::with_capacity(ring_bytes.len() + message.len() + 32);
    transcript.extend_from_slice(ring_bytes);
    transcript.extend_from_slice(message);
    transcript.extend_from_slice(commitment);

    hash_to_scalar(&transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_is_deterministic() {
        let ring_bytes = [1u8; 32];
        let message = b"hello";
        let commitment = [2u8; 32];

        let a = chain(&ring_bytes, message, &commitment);
        let b = chain(&ring_bytes, message, &commitment);
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn chain_is_sensitive_to_message() {
        let ring_bytes = [1u8; 32];
        let commitment = [2u8; 32];

        let a = chain(&ring_bytes, b"hello", &commitment);
        let b = chain(&ring_bytes, b"hellp", &commitment);
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn chain_is_sensitive_to_ring_bytes() {
        let message = b"hello";
        let commitment = [2u8; 32];

        let a = chain(&[1u8; 32], message, &commitment);
        let b = chain(&[3u8; 32], message, &commitment);
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn result_is_canonical() {
        let scalar = chain(&[0u8; 32], b"", &[0u8; 32]);
        assert!(scalar.is_canonical());
    }
}
