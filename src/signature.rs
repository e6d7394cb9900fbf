//! The signature wire codec.
//!
//! Layout: `c_0 ‖ s_0 ‖ s_1 ‖ … ‖ s_{n-1}`, each component 32 little-endian
//! bytes, total `32·(n+1)` bytes, hex-encoded (lower-case, no whitespace)
//! for transport. No ring-size field is embedded — `n` is derived from the
//! decoded length and must match the ring supplied at verify time.

use crate::curve::scalar::Scalar;
use crate::error::RingSigError;

/// An AOS ring signature: a starting challenge and one response per ring
/// member.
pub(crate) struct Signature {
    pub(crate) c0: Scalar,
    pub(crate) responses: Vec<Scalar>,
}

impl Signature {
    /// Hex-encodes this signature as `c_0 ‖ s_0 ‖ … ‖ s_{n-1}`.
    pub(crate) fn to_hex(&self) -> String {
        let mut bytes = Vec::with_capacity(32 * (self.responses.len() + 1));
        bytes.extend_from_slice(&self.c0.to_bytes());
        for response in &self.responses {
            bytes.extend_from_slice(&response.to_bytes());
        }
        hex::encode(bytes)
    }

    /// Decodes a hex signature. Rejects hex that doesn't decode, lengths
    /// that aren't a positive multiple of 32, and any non-canonical scalar.
    pub(crate) fn from_hex(text: &str) -> Result<Self, RingSigError> {
        let bytes =
            hex::decode(text).map_err(|err| RingSigError::ParseSig(format!("bad hex: {err}")))?;

        if bytes.is_empty() || bytes.len() % 32 != 0 {
            return Err(RingSigError::ParseSig(
                "decoded length is not a positive multiple of 32".into(),
            ));
        }

        let mut chunks = bytes.chunks_exact(32);

        let c0 = decode_canonical_scalar(chunks.next().unwrap())?;

        let responses = chunks
            .map(decode_canonical_scalar)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { c0, responses })
    }

    /// The ring size this signature was produced against.
    pub(crate) fn ring_size(&self) -> usize {
        self.responses.len()
    }
}

fn decode_canonical_scalar(bytes: &[u8]) -> Result<Scalar, RingSigError> {
    let array: [u8; 32] = bytes.try_into().expect("chunks_exact(32) guarantees length");
    let scalar = Scalar::from_bytes(array);
    if !scalar.is_canonical() {
        return Err(RingSigError::ParseSig("non-canonical scalar".into()));
    }
    Ok(scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_scalar() -> Scalar {
        Scalar::from_bytes([0u8; 32])
    }

    #[test]
    fn roundtrips_through_hex() {
        let sig = Signature {
            c0: zero_scalar(),
            responses: vec![zero_scalar(), zero_scalar()],
        };
        let hex_text = sig.to_hex();
        let parsed = Signature::from_hex(&hex_text).unwrap();
        assert_eq!(parsed.c0.to_bytes(), sig.c0.to_bytes());
        assert_eq!(parsed.ring_size(), 2);
    }

    #[test]
    fn size_matches_spec_s1_scenario() {
        let sig = Signature {
            c0: zero_scalar(),
            responses: vec![zero_scalar()],
        };
        assert_eq!(sig.to_hex().len(), 64 * 2);
    }

    #[test]
    fn rejects_length_not_multiple_of_32() {
        let bad = hex::encode([0u8; 33]);
        assert!(Signature::from_hex(&bad).is_err());
    }

    #[test]
    fn rejects_empty_hex() {
        assert!(Signature::from_hex("").is_err());
    }

    #[test]
    fn rejects_non_canonical_scalar() {
        let mut bytes = [0u8; 64];
        // L itself, little-endian, is non-canonical.
        bytes[32..].copy_from_slice(&[
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ]);
        let bad = hex::encode(bytes);
        assert!(Signature::from_hex(&bad).is_err());
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Signature::from_hex("not hex at all!!").is_err());
    }
}
