//! The ring: an ordered, caller-supplied set of public keys a signature is
//! accountable to.
//!
//! Ordering is significant and is preserved exactly as the caller presents
//! it — reordering the ring invalidates any signature produced against it,
//! since the ring's byte concatenation is bound into every challenge hash.

use crate::error::RingSigError;
use crate::keys::ssh::PublicKey;

/// An ordered, non-empty sequence of ring members.
pub(crate) struct Ring {
    members: Vec<PublicKey>,
}

impl Ring {
    /// Parses a ring from one-line `ssh-ed25519` strings, in the order given.
    pub(crate) fn parse(lines: &[String]) -> Result<Self, RingSigError> {
        let members = lines
            .iter()
            .map(|line| PublicKey::parse(line))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { members })
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn get(&self, index: usize) -> &PublicKey {
        &self.members[index % self.members.len()]
    }

    /// Position of `target` in the ring, comparing canonical encodings.
    pub(crate) fn position_of(&self, target: &PublicKey) -> Option<usize> {
        self.members
            .iter()
            .position(|member| member.encoded() == target.encoded())
    }

    /// The concatenation of every member's canonical 32-byte encoding, in
    /// ring order — the domain separator bound into every challenge hash.
    pub(crate) fn ring_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.members.len() * 32);
        for member in &self.members {
            bytes.extend_from_slice(&member.encoded());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::group::GeP3;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;

    /// Builds a valid one-line `ssh-ed25519` key around the base point, so
    /// tests exercise real wire framing and curve decompression instead of a
    /// hand-typed base64 blob.
    fn sample_pubkey_line() -> String {
        let key = GeP3::base_point().to_bytes();

        let mut wire = Vec::new();
        wire.extend_from_slice(&11u32.to_be_bytes());
        wire.extend_from_slice(b"ssh-ed25519");
        wire.extend_from_slice(&32u32.to_be_bytes());
        wire.extend_from_slice(&key);

        format!("ssh-ed25519 {}", STANDARD.encode(wire))
    }

    #[test]
    fn parses_single_member_ring() {
        let line = sample_pubkey_line();
        let ring = Ring::parse(&[line]).unwrap();
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn ring_bytes_length_matches_member_count() {
        let line = sample_pubkey_line();
        let ring = Ring::parse(&[line.clone(), line]).unwrap();
        assert_eq!(ring.ring_bytes().len(), 64);
    }

    #[test]
    fn position_of_finds_matching_member() {
        let line = sample_pubkey_line();
        let ring = Ring::parse(&[line.clone()]).unwrap();
        let target = PublicKey::parse(&line).unwrap();
        assert_eq!(ring.position_of(&target), Some(0));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Ring::parse(&["not a key".to_string()]).is_err());
    }
}
