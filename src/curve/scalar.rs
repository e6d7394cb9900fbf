//! Scalar arithmetic modulo the Ed25519 group order.
//!
//! ```text
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! Scalars are stored as 32 little-endian bytes with no implicit clamping or
//! reduction; callers normalize explicitly via [`Scalar::reduce`] or
//! [`Scalar::from_mul_sum`]. This mirrors the Ed25519 reference
//! implementation's radix-2²¹ reduction algorithm.

use crate::curve::field::{load_3, load_4};

/// The group order `ℓ`, little-endian.
const L: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// An integer modulo `ℓ`, encoded as 32 little-endian bytes.
#[derive(Clone, Copy)]
pub(crate) struct Scalar(pub [u8; 32]);

impl Scalar {
    pub(crate) fn from_bytes(bytes: [u8; 32]) -> Self {
        Scalar(bytes)
    }

    pub(crate) fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if `self` is the strict canonical representative, i.e.
    /// `self < ℓ`. Used to reject malleable/non-canonical signature scalars.
    ///
    /// Not constant-time: scalars checked here (signature components) are
    /// public values, not secret key material.
    pub(crate) fn is_canonical(&self) -> bool {
        for index in (0..32).rev() {
            if self.0[index] < L[index] {
                return true;
            }
            if self.0[index] > L[index] {
                return false;
            }
        }
        false
    }

    /// Reduces a 64-byte wide integer modulo `ℓ`, following the ref10
    /// radix-2²¹ reduction algorithm.
    pub(crate) fn reduce(wide: [u8; 64]) -> Self {
        let mask = 0x1f_ffffi64;

        let mut s = [
            (load_3(&wide[0..]) as i64) & mask,
            ((load_4(&wide[2..]) >> 5) as i64) & mask,
            ((load_3(&wide[5..]) >> 2) as i64) & mask,
            ((load_4(&wide[7..]) >> 7) as i64) & mask,
            ((load_4(&wide[10..]) >> 4) as i64) & mask,
            ((load_3(&wide[13..]) >> 1) as i64) & mask,
            ((load_4(&wide[15..]) >> 6) as i64) & mask,
            ((load_3(&wide[18..]) >> 3) as i64) & mask,
            (load_3(&wide[21..]) as i64) & mask,
            ((load_4(&wide[23..]) >> 5) as i64) & mask,
            ((load_3(&wide[26..]) >> 2) as i64) & mask,
            ((load_4(&wide[28..]) >> 7) as i64) & mask,
            ((load_4(&wide[31..]) >> 4) as i64) & mask,
            ((load_3(&wide[34..]) >> 1) as i64) & mask,
            ((load_4(&wide[36..]) >> 6) as i64) & mask,
            ((load_3(&wide[39..]) >> 3) as i64) & mask,
            (load_3(&wide[42..]) as i64) & mask,
            ((load_4(&wide[44..]) >> 5) as i64) & mask,
            ((load_3(&wide[47..]) >> 2) as i64) & mask,
            ((load_4(&wide[49..]) >> 7) as i64) & mask,
            ((load_4(&wide[52..]) >> 4) as i64) & mask,
            ((load_3(&wide[55..]) >> 1) as i64) & mask,
            ((load_4(&wide[57..]) >> 6) as i64) & mask,
            (load_4(&wide[60..]) >> 3) as i64,
        ];

        let coeffs = [666643, 470296, 654183, -997805, 136657, -683901];

        for index in (18..=23).rev() {
            for j in 0..6 {
                s[index - 12 + j] += s[index] * coeffs[j];
            }
        }

        for &index in &[6, 8, 10, 12, 14, 16] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[7, 9, 11, 13, 15] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for index in (12..=17).rev() {
            for j in 0..6 {
                s[index - 12 + j] += s[index] * coeffs[j];
            }
        }
        s[12] = 0;

        for &index in &[0, 2, 4, 6, 8, 10] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[1, 3, 5, 7, 9, 11] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let s12 = s[12];
        for (sx, coeff) in s.iter_mut().take(6).zip(coeffs.iter()) {
            *sx = s12 * coeff;
        }
        s[12] = 0;

        for index in 0..11 {
            let carry = s[index] >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let carry = s[11] >> 21;
        s[12] += carry;
        s[11] -= carry << 21;

        let s12 = s[12];
        for (sx, coeff) in s.iter_mut().take(6).zip(coeffs.iter()) {
            *sx = s12 * coeff;
        }

        for index in 0..11 {
            let carry = s[index] >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        Scalar(pack21(&s))
    }

    /// Computes `a * b + c (mod ℓ)`. Used to compute AOS responses `s = u + c*a`
    /// via `from_mul_sum(c, a, u)`.
    pub(crate) fn from_mul_sum(a: Scalar, b: Scalar, c: Scalar) -> Self {
        let mask = 0x1f_ffffi64;

        let load_a = |data: &[u8; 32]| -> [i64; 12] {
            [
                (load_3(&data[0..]) as i64) & mask,
                ((load_4(&data[2..]) >> 5) as i64) & mask,
                ((load_3(&data[5..]) >> 2) as i64) & mask,
                ((load_4(&data[7..]) >> 7) as i64) & mask,
                ((load_4(&data[10..]) >> 4) as i64) & mask,
                ((load_3(&data[13..]) >> 1) as i64) & mask,
                ((load_4(&data[15..]) >> 6) as i64) & mask,
                ((load_3(&data[18..]) >> 3) as i64) & mask,
                (load_3(&data[21..]) as i64) & mask,
                ((load_4(&data[23..]) >> 5) as i64) & mask,
                ((load_3(&data[26..]) >> 2) as i64) & mask,
                (load_4(&data[28..]) >> 7) as i64,
            ]
        };

        let a_limbs = load_a(&a.0);
        let b_limbs = load_a(&b.0);
        let c_limbs = load_a(&c.0);

        let mut s = [0i64; 24];

        for index in 0..12 {
            s[index] = c_limbs[index];
            for j in 0..=index.min(11) {
                if index - j < 12 {
                    s[index] += a_limbs[j] * b_limbs[index - j];
                }
            }
        }

        for index in 12..23 {
            for j in (index - 11)..12 {
                if index - j < 12 {
                    s[index] += a_limbs[j] * b_limbs[index - j];
                }
            }
        }

        s[23] = 0;

        for &index in &[0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let coeffs = [666643i64, 470296, 654183, -997805, 136657, -683901];

        for index in (18..=23).rev() {
            for j in 0..6 {
                s[index - 12 + j] += s[index] * coeffs[j];
            }
        }

        for &index in &[6, 8, 10, 12, 14, 16] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[7, 9, 11, 13, 15] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for index in (12..=17).rev() {
            for j in 0..6 {
                s[index - 12 + j] += s[index] * coeffs[j];
            }
        }
        s[12] = 0;

        for &index in &[0, 2, 4, 6, 8, 10] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[1, 3, 5, 7, 9, 11] {
            let carry = (s[index] + (1 << 20)) >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let s12 = s[12];
        for (sx, coeff) in s.iter_mut().take(6).zip(coeffs.iter()) {
            *sx += s12 * coeff;
        }
        s[12] = 0;

        for index in 0..11 {
            let carry = s[index] >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let carry = s[11] >> 21;
        s[12] += carry;
        s[11] -= carry << 21;

        let s12 = s[12];
        for (sx, coeff) in s.iter_mut().take(6).zip(coeffs.iter()) {
            *sx += s12 * coeff;
        }

        for index in 0..11 {
            let carry = s[index] >> 21;
            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        Scalar(pack21(&s))
    }
}

/// Packs the low 12 reduced 21-bit limbs (`s[0..12]`) into 32 canonical bytes.
fn pack21(s: &[i64]) -> [u8; 32] {
    [
        s[0] as u8,
        (s[0] >> 8) as u8,
        ((s[0] >> 16) | (s[1] << 5)) as u8,
        (s[1] >> 3) as u8,
        (s[1] >> 11) as u8,
        ((s[1] >> 19) | (s[2] << 2)) as u8,
        (s[2] >> 6) as u8,
        ((s[2] >> 14) | (s[3] << 7)) as u8,
        (s[3] >> 1) as u8,
        (s[3] >> 9) as u8,
        ((s[3] >> 17) | (s[4] << 4)) as u8,
        (s[4] >> 4) as u8,
        (s[4] >> 12) as u8,
        ((s[4] >> 20) | (s[5] << 1)) as u8,
        (s[5] >> 7) as u8,
        ((s[5] >> 15) | (s[6] << 6)) as u8,
        (s[6] >> 2) as u8,
        (s[6] >> 10) as u8,
        ((s[6] >> 18) | (s[7] << 3)) as u8,
        (s[7] >> 5) as u8,
        (s[7] >> 13) as u8,
        s[8] as u8,
        (s[8] >> 8) as u8,
        ((s[8] >> 16) | (s[9] << 5)) as u8,
        (s[9] >> 3) as u8,
        (s[9] >> 11) as u8,
        ((s[9] >> 19) | (s[10] << 2)) as u8,
        (s[10] >> 6) as u8,
        ((s[10] >> 14) | (s[11] << 7)) as u8,
        (s[11] >> 1) as u8,
        (s[11] >> 9) as u8,
        (s[11] >> 17) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_of_zero_is_zero() {
        let s = Scalar::reduce([0u8; 64]);
        assert_eq!(s.to_bytes(), [0u8; 32]);
    }

    #[test]
    fn l_itself_is_not_canonical() {
        assert!(!Scalar::from_bytes(L).is_canonical());
    }

    #[test]
    fn zero_is_canonical() {
        assert!(Scalar::from_bytes([0u8; 32]).is_canonical());
    }

    #[test]
    fn from_mul_sum_matches_zero_product_plus_c() {
        let zero = Scalar::from_bytes([0u8; 32]);
        let mut c = [0u8; 32];
        c[0] = 7;
        let c_scalar = Scalar::from_bytes(c);
        let result = Scalar::from_mul_sum(zero, zero, c_scalar);
        assert_eq!(result.to_bytes()[0], 7);
        assert!(result.to_bytes()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn reduce_is_idempotent_on_already_small_value() {
        let mut wide = [0u8; 64];
        wide[0] = 5;
        let reduced = Scalar::reduce(wide);
        assert_eq!(reduced.to_bytes()[0], 5);
    }
}
