//! Random number generation.
//!
//! The AOS prover needs a fresh, uniformly random [`Scalar`](crate::curve::scalar::Scalar)
//! for the signer's commitment nonce and for every decoy response. Unlike a
//! deterministic primitive such as [`crate::hash::sha512`], entropy
//! collection can fail at runtime (the OS entropy source can be unavailable
//! or refuse to serve), so this module wraps the platform RNG in a fallible
//! interface instead of assuming infallibility the way `rand`'s `Rng` trait
//! does by default.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::curve::scalar::Scalar;
use crate::error::RingSigError;

/// A cryptographically secure source of randomness.
///
/// Backed by [`OsRng`], the operating system's CSPRNG. Every byte this type
/// produces is treated as secret-adjacent: callers are expected to wide-reduce
/// it into a [`Scalar`] immediately rather than retain raw output.
pub(crate) struct Rng {
    inner: OsRng,
}

impl Rng {
    pub(crate) fn new() -> Self {
        Self { inner: OsRng }
    }

    /// Fills `dest` with random bytes, surfacing any entropy-source failure
    /// as [`RingSigError::RngFailure`] rather than silently falling back to
    /// a weaker source.
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<(), RingSigError> {
        self.inner
            .try_fill_bytes(dest)
            .map_err(|err| RingSigError::RngFailure(err.to_string()))
    }

    /// Draws a uniformly random scalar in ℤ/ℓ.
    ///
    /// Requests 64 bytes of entropy and wide-reduces them modulo the group
    /// order rather than requesting 32 bytes and masking, so that the result
    /// is statistically uniform over ℤ/ℓ rather than merely over the 32-byte
    /// encoding space.
    pub(crate) fn random_scalar(&mut self) -> Result<Scalar, RingSigError> {
        let mut wide = [0u8; 64];
        self.try_fill(&mut wide)?;
        Ok(Scalar::reduce(wide))
    }

    /// Draws a fresh 32-byte Ed25519 seed.
    pub(crate) fn random_seed(&mut self) -> Result<[u8; 32], RingSigError> {
        let mut seed = [0u8; 32];
        self.try_fill(&mut seed)?;
        Ok(seed)
    }

    /// Draws the check-integer pair an OpenSSH private key container embeds
    /// to let a parser confirm decryption succeeded. The value carries no
    /// security meaning under cipher "none"; it only needs to be the same
    /// 32 bits written twice.
    pub(crate) fn random_check_value(&mut self) -> Result<u32, RingSigError> {
        let mut bytes = [0u8; 4];
        self.try_fill(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_scalar_is_canonical() {
        let mut rng = Rng::new();
        let scalar = rng.random_scalar().unwrap();
        assert!(scalar.is_canonical());
    }

    #[test]
    fn successive_scalars_differ() {
        let mut rng = Rng::new();
        let a = rng.random_scalar().unwrap();
        let b = rng.random_scalar().unwrap();
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn successive_seeds_differ() {
        let mut rng = Rng::new();
        let a = rng.random_seed().unwrap();
        let b = rng.random_seed().unwrap();
        assert_ne!(a, b);
    }
}
