//! Closed error taxonomy for the ring-signature core.
//!
//! Every fallible operation in this crate resolves to one of the variants
//! below; nothing here ever panics its way out to a caller. Entry points
//! additionally expose these as plain strings (see [`crate::prove`] and
//! [`crate::verify`]) so hosts that prefer a `(value, error)` pair over a
//! `Result` are not forced to depend on this type.

use thiserror::Error;

/// The closed set of failures this crate can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RingSigError {
    /// A one-line `ssh-ed25519` public key string could not be decoded.
    #[error("malformed ssh-ed25519 public key: {0}")]
    ParsePubkey(String),

    /// An OpenSSH private key PEM block was malformed, absent, or encrypted.
    #[error("malformed or encrypted OpenSSH private key: {0}")]
    ParseSeckey(String),

    /// A 32-byte string did not decode to a point on the curve, or decoded
    /// to a non-canonical encoding.
    #[error("invalid curve point encoding")]
    InvalidPoint,

    /// The signer's public key is not present in the supplied ring.
    #[error("signer's public key is not a member of the ring")]
    SignerNotInRing,

    /// A hex-encoded signature failed to parse: bad hex, wrong length, or a
    /// non-canonical scalar.
    #[error("malformed signature encoding: {0}")]
    ParseSig(String),

    /// The ring-closure equation did not hold.
    #[error("signature does not verify against the supplied ring and message")]
    SigMismatch,

    /// The platform's cryptographically secure RNG failed to produce output.
    #[error("random number generator failure: {0}")]
    RngFailure(String),
}

impl RingSigError {
    /// Renders this error the way the public entrypoints surface it: a
    /// short, human-readable, non-empty string.
    pub(crate) fn as_wire_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_non_empty() {
        let variants = [
            RingSigError::ParsePubkey("bad prefix".into()),
            RingSigError::ParseSeckey("not openssh-key-v1".into()),
            RingSigError::InvalidPoint,
            RingSigError::SignerNotInRing,
            RingSigError::ParseSig("odd length hex".into()),
            RingSigError::SigMismatch,
            RingSigError::RngFailure("os entropy source unavailable".into()),
        ];

        for variant in variants {
            assert!(!variant.as_wire_message().is_empty());
        }
    }
}
