//! Edwards25519 group operations.
//!
//! Implements group arithmetic for the twisted Edwards curve used by
//! Ed25519:
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²
//! ```
//!
//! over 𝔽ₚ with `p = 2²⁵⁵ − 19`.
//!
//! ## Coordinate systems
//!
//! - **GeP3** — extended `(X : Y : Z : T)`, the primary working form,
//!   supporting complete addition formulas without inversions.
//! - **GeP1** — transient intermediate result of an addition or doubling.
//! - **GeP2** — projective `(X : Y : Z)`, used for doubling.
//! - **GeCached** — precomputed `(Y+X, Y-X, Z, 2dT)`, optimized for reuse
//!   as the second operand of repeated additions.
//!
//! ## Scalar multiplication
//!
//! This module does not carry a precomputed windowed multiplication table,
//! so both fixed-base (`a·B`) and variable-base (`a·P + b·B`) multiplication
//! are plain double-and-add over the formulas above: asymptotically slower
//! than a windowed method, but built entirely from arithmetic verifiable by
//! inspection in this crate.

use crate::curve::field::FieldElement;
use crate::curve::scalar::Scalar;

/// Edwards curve constant `d = -121665/121666 mod p`.
const D: FieldElement = FieldElement([
    -10913610, 13857413, -15372611, 6949391, 114729, -8787816, -6275908, -3247719, -18696448,
    -12055116,
]);

/// A square root of `-1` mod p, used in point decompression.
const SQRTM1: FieldElement = FieldElement([
    -32595792, -7943725, 9377950, 3500415, 12389472, -272473, -25146209, -2005654, 326686,
    11406482,
]);

/// Canonical encoding of the Ed25519 base point `B` (`y = 4/5`, `x` even).
const BASEPOINT_BYTES: [u8; 32] = [
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
];

/// Group element in transient extended coordinates, the output of an
/// addition or doubling before being folded back into `GeP2`/`GeP3`.
pub(crate) struct GeP1 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl GeP1 {
    /// `a + b` via the standard Edwards mixed-addition formula.
    pub(crate) fn from_sum(a: &GeP3, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yplusx;
        let mut t = b.t2d * a.t;

        y = y * b.yminusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx + t;
        t = sumx - t;

        Self { x, y, z, t }
    }

    /// `a - b`, reusing the addition formula with `b`'s `(Y+X)`/`(Y-X)` swapped.
    pub(crate) fn from_difference(a: &GeP3, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yminusx;
        let mut t = b.t2d * a.t;

        y = y * b.yplusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx - t;
        t = sumx + t;

        Self { x, y, z, t }
    }
}

/// A point in projective coordinates `(X : Y : Z)`, used mainly for doubling.
pub(crate) struct GeP2 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl GeP2 {
    /// The identity element `(0, 1)`.
    pub(crate) const ONE: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
    };

    pub(crate) fn from_gep3(g: &GeP3) -> Self {
        GeP2 {
            x: g.x,
            y: g.y,
            z: g.z,
        }
    }

    /// `2 * self`.
    pub(crate) fn double(&self) -> GeP1 {
        let mut x = self.x.square();
        let mut z = self.y.square();
        let mut t = self.z.double_square();
        let mut y = self.x + self.y;
        let ysquare = y.square();

        y = z + x;
        z = z - x;
        x = ysquare - y;
        t = t - z;

        GeP1 { x, y, z, t }
    }

    /// Compressed 32-byte Edwards encoding: affine `y`, sign of `x` in the top bit.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let recip = self.z.invert();
        let x = self.x * recip;
        let y = self.y * recip;

        let mut output = y.to_bytes();
        output[31] ^= (x.is_negative() as u8) << 7;
        output
    }
}

/// A point in extended coordinates `(X : Y : Z : T)`, the primary
/// representation used throughout this crate.
#[derive(Clone, Copy)]
pub(crate) struct GeP3 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl GeP3 {
    /// The identity element `(0, 1)`.
    pub(crate) const ONE: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    /// The standard Ed25519 base point `B`.
    pub(crate) fn base_point() -> Self {
        // BASEPOINT_BYTES is a valid encoding; decompress cannot fail here.
        let (point, status) = Self::decompress(&BASEPOINT_BYTES);
        debug_assert_eq!(status, 0);
        point
    }

    #[inline(always)]
    pub(crate) fn double(&self) -> GeP1 {
        GeP2::from_gep3(self).double()
    }

    pub(crate) fn from_gep1(g: &GeP1) -> Self {
        Self {
            x: g.x * g.t,
            y: g.y * g.z,
            z: g.z * g.t,
            t: g.x * g.y,
        }
    }

    /// Compressed 32-byte Edwards encoding.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let recip = self.z.invert();
        let x = self.x * recip;
        let y = self.y * recip;

        let mut output = y.to_bytes();
        output[31] ^= (x.is_negative() as u8) << 7;
        output
    }

    /// Decompresses a point from its 32-byte Edwards encoding.
    ///
    /// Solves `x² ≡ (y²-1)·(d·y²+1)⁻¹ (mod p)` via exponentiation by
    /// `(p-5)/8`, tries the `SQRTM1`-twisted alternative if the first
    /// candidate fails, and enforces the sign bit in `s[31]`.
    ///
    /// Returns `(point, 0)` on success, `(_, -1)` if `s` does not encode a
    /// point on the curve, or encodes `y` non-canonically (`y >= p`) (the
    /// point value is then unspecified).
    pub(crate) fn decompress(s: &[u8; 32]) -> (Self, i32) {
        if !crate::curve::field::is_canonical_y_encoding(s) {
            return (Self::ONE, -1);
        }

        let mut h = Self {
            x: FieldElement::ZERO,
            y: FieldElement::from_bytes(s),
            z: FieldElement::ONE,
            t: FieldElement::ZERO,
        };

        let mut u = h.y.square();
        let mut v = u * D;
        u = u - h.z;
        v = v + h.z;

        let v3 = v.square() * v;

        h.x = v3.square();
        h.x = h.x * v;
        h.x = h.x * u;
        h.x = h.x.pow22523();
        h.x = h.x * v3;
        h.x = h.x * u;

        let vxx = h.x.square() * v;
        let mut check = vxx - u;

        if check.is_non_zero() == 1 {
            check = vxx + u;

            if check.is_non_zero() == 1 {
                return (h, -1);
            }

            h.x = h.x * SQRTM1;
        }

        let sign = (s[31] >> 7) as i32;
        if h.x.is_negative() == sign {
            h.x = -h.x;
        }

        h.t = h.x * h.y;

        (h, 0)
    }

    /// `a * self`, plain double-and-add, most-significant bit first.
    ///
    /// Walks every bit of `a` with no secret-dependent branch: each step
    /// doubles the accumulator and unconditionally adds either `self` or the
    /// identity depending on the bit, so the sequence of field operations is
    /// independent of `a`.
    pub(crate) fn scalar_mul(&self, a: &Scalar) -> GeP3 {
        let bytes = a.to_bytes();
        let cached_self = GeCached::from_p3(self);
        let cached_zero = GeCached::from_p3(&GeP3::ONE);

        let mut acc = GeP3::ONE;
        for bit_index in (0..256).rev() {
            let doubled = acc.double();
            acc = GeP3::from_gep1(&doubled);

            let bit = ((bytes[bit_index >> 3] >> (bit_index & 7)) & 1) as u32;
            let mut addend = GeCached::ZERO;
            addend.conditional_move(&cached_zero, 1 - bit);
            addend.conditional_move(&cached_self, bit);

            acc = GeP3::from_gep1(&GeP1::from_sum(&acc, &addend));
        }

        acc
    }

    /// `a * self + b * B`, computed as two independent double-and-add chains
    /// combined at the end. `self` and `B` need not be secret; this routine
    /// is not constant-time (suitable for signature verification only).
    pub(crate) fn double_scalar_mul_vartime(&self, a: &Scalar, b: &Scalar) -> GeP2 {
        let base = GeP3::base_point();
        let left = self.scalar_mul_vartime(a);
        let right = base.scalar_mul_vartime(b);

        let cached_right = GeCached::from_p3(&right);
        GeP2::from_gep3(&GeP3::from_gep1(&GeP1::from_sum(&left, &cached_right)))
    }

    /// `a * self`, double-and-add without the constant-time addend masking
    /// used by [`scalar_mul`](Self::scalar_mul). Used only on public points.
    fn scalar_mul_vartime(&self, a: &Scalar) -> GeP3 {
        let bytes = a.to_bytes();
        let cached_self = GeCached::from_p3(self);

        let mut acc = GeP3::ONE;
        for bit_index in (0..256).rev() {
            acc = GeP3::from_gep1(&acc.double());

            let bit = (bytes[bit_index >> 3] >> (bit_index & 7)) & 1;
            if bit == 1 {
                acc = GeP3::from_gep1(&GeP1::from_sum(&acc, &cached_self));
            }
        }

        acc
    }

    /// Negates this point: `(x, y, z, t) -> (-x, y, z, -t)`.
    pub(crate) fn negate(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// Returns `true` if this point has order dividing the curve's cofactor
    /// `8` (i.e. `8·self == identity`). Such points carry no discrete-log
    /// knowledge: harmless as ring decoys, but meaningless as a claimed
    /// signer key.
    pub(crate) fn is_small_order(&self) -> bool {
        let mut acc = GeP2::from_gep3(self);
        for _ in 0..3 {
            acc = GeP2::from_gep3(&GeP3::from_gep1(&acc.double()));
        }
        acc.to_bytes() == GeP3::ONE.to_bytes()
    }
}

/// Cached form of a `GeP3` point, precomputing `(Y+X, Y-X, Z, 2dT)` to speed
/// up repeated use as the second operand of an addition.
pub(crate) struct GeCached {
    pub(crate) yplusx: FieldElement,
    pub(crate) yminusx: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

impl GeCached {
    pub(crate) const ZERO: Self = Self {
        yplusx: FieldElement::ZERO,
        yminusx: FieldElement::ZERO,
        z: FieldElement::ZERO,
        t2d: FieldElement::ZERO,
    };

    pub(crate) fn from_p3(g: &GeP3) -> GeCached {
        GeCached {
            yplusx: g.y + g.x,
            yminusx: g.y - g.x,
            z: g.z,
            t2d: g.t * (D + D),
        }
    }

    /// Constant-time conditional move: replaces `self` with `rhs` when
    /// `condition == 1`.
    pub(crate) fn conditional_move(&mut self, rhs: &Self, condition: u32) {
        self.yplusx.conditional_move(&rhs.yplusx, condition);
        self.yminusx.conditional_move(&rhs.yminusx, condition);
        self.z.conditional_move(&rhs.z, condition);
        self.t2d.conditional_move(&rhs.t2d, condition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_point_roundtrips_through_compression() {
        let b = GeP3::base_point();
        assert_eq!(b.to_bytes(), BASEPOINT_BYTES);
    }

    #[test]
    fn identity_decompresses_to_identity_encoding() {
        let encoded = GeP3::ONE.to_bytes();
        let (point, status) = GeP3::decompress(&encoded);
        assert_eq!(status, 0);
        assert_eq!(point.to_bytes(), encoded);
    }

    #[test]
    fn scalar_mul_by_zero_is_identity() {
        let zero = Scalar::from_bytes([0u8; 32]);
        let b = GeP3::base_point();
        let result = b.scalar_mul(&zero);
        assert_eq!(result.to_bytes(), GeP3::ONE.to_bytes());
    }

    #[test]
    fn scalar_mul_by_one_is_self() {
        let mut one = [0u8; 32];
        one[0] = 1;
        let one = Scalar::from_bytes(one);
        let b = GeP3::base_point();
        let result = b.scalar_mul(&one);
        assert_eq!(result.to_bytes(), b.to_bytes());
    }

    #[test]
    fn scalar_mul_matches_vartime_variant() {
        let mut k = [0u8; 32];
        k[0] = 42;
        k[5] = 7;
        let scalar = Scalar::from_bytes(k);
        let b = GeP3::base_point();
        assert_eq!(
            b.scalar_mul(&scalar).to_bytes(),
            b.scalar_mul_vartime(&scalar).to_bytes()
        );
    }

    #[test]
    fn double_scalar_mul_with_zero_b_matches_plain_mul() {
        let mut a = [0u8; 32];
        a[0] = 9;
        let a = Scalar::from_bytes(a);
        let zero = Scalar::from_bytes([0u8; 32]);
        let b = GeP3::base_point();

        let direct = b.scalar_mul(&a).to_bytes();
        let combined = b.double_scalar_mul_vartime(&a, &zero).to_bytes();
        assert_eq!(direct, combined);
    }

    #[test]
    fn non_canonical_y_is_rejected() {
        let mut bytes = [0xffu8; 32];
        bytes[0] = 0xed;
        bytes[31] = 0x7f;
        let (_, status) = GeP3::decompress(&bytes);
        assert_eq!(status, -1);
    }

    #[test]
    fn identity_is_small_order() {
        assert!(GeP3::ONE.is_small_order());
    }

    #[test]
    fn base_point_is_not_small_order() {
        assert!(!GeP3::base_point().is_small_order());
    }

    #[test]
    fn negate_then_add_is_identity() {
        let b = GeP3::base_point();
        let neg = b.negate();
        let sum = GeP3::from_gep1(&GeP1::from_sum(&b, &GeCached::from_p3(&neg)));
        assert_eq!(sum.to_bytes(), GeP3::ONE.to_bytes());
    }
}
