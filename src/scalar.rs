//! Scalar helpers: uniform sampling and signed base-(-3) digits.

use crate::bigint::BigInt256;
use crate::elliptic_curve::{CurveConfig, Point};
use rand::Rng;
use std::cmp::Ordering;

/// Uniform scalar in `[1, order − 1]`.
///
/// Rejection-samples below `order − 1` (masked to its bit length) and shifts
/// by one, so zero is never returned.
///
/// # Panics
/// Panics if `order < 2`.
pub fn random_scalar<R: Rng>(rng: &mut R, order: &BigInt256) -> BigInt256 {
    let (bound, borrow) = order.sub_with_borrow(&BigInt256::one());
    assert!(!borrow && !bound.is_zero(), "group order must be at least 2");
    let bits = bound.bit_length();

    loop {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let word: u64 = rng.random();
            *limb = match bits.saturating_sub(i * 64) {
                0 => 0,
                r if r >= 64 => word,
                r => word & ((1u64 << r) - 1),
            };
        }
        let candidate = BigInt256::from_limbs(limbs);
        if candidate.compare(&bound) == Ordering::Less {
            return candidate.add_with_carry(&BigInt256::one()).0;
        }
    }
}

/// Signed digits of `scalar` in base −3, least significant first.
///
/// Every digit is in `{-1, 0, 1}` and `scalar == Σ dᵢ·(−3)ⁱ`. Zero is `[0]`.
pub fn neg3_base_le(scalar: u64) -> Vec<i8> {
    if scalar == 0 {
        return vec![0];
    }

    let mut digits = Vec::new();
    let mut n = scalar as i128;
    while n != 0 {
        let digit = match n.rem_euclid(3) {
            0 => 0,
            1 => 1,
            _ => {
                n += 1;
                -1
            }
        };
        digits.push(digit);
        n = -n.div_euclid(3);
    }
    digits
}

impl<C: CurveConfig> Point<C> {
    /// `[scalar]P` by Horner evaluation of the base-(−3) digits:
    /// `acc ← −3·acc + dᵢ·P` from the most significant digit down.
    pub fn mul_neg3(&self, scalar: u64) -> Self {
        let negated = self.negate();
        let mut acc = Point::Identity;

        for &digit in neg3_base_le(scalar).iter().rev() {
            acc = acc.add(&acc).add(&acc).negate();
            match digit {
                1 => acc = acc.add(self),
                -1 => acc = acc.add(&negated),
                _ => {}
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_curves::PrimeOrderCurve;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn evaluate(digits: &[i8]) -> i128 {
        digits
            .iter()
            .rev()
            .fold(0i128, |acc, &d| acc * -3 + d as i128)
    }

    #[test]
    fn test_neg3_small_values() {
        assert_eq!(neg3_base_le(0), vec![0]);
        assert_eq!(neg3_base_le(1), vec![1]);
        assert_eq!(neg3_base_le(2), vec![-1, -1]);
        assert_eq!(neg3_base_le(3), vec![0, -1]);
        assert_eq!(neg3_base_le(5), vec![-1, 1, 1]);
    }

    #[test]
    fn test_neg3_reconstructs_scalar() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..1000 {
            let scalar: u64 = rng.random_range(0..100_000);
            let digits = neg3_base_le(scalar);
            assert!(digits.iter().all(|d| (-1..=1).contains(d)));
            assert_eq!(evaluate(&digits), scalar as i128);
        }
        assert_eq!(evaluate(&neg3_base_le(u64::MAX)), u64::MAX as i128);
    }

    #[test]
    fn test_mul_neg3_matches_scalar_mul() {
        let g = Point::<PrimeOrderCurve>::generator();
        for k in [0u64, 1, 2, 3, 5, 42, 96, 97, 1000] {
            assert_eq!(g.mul_neg3(k), g.scalar_mul(k as i64), "k = {}", k);
        }
        assert_eq!(Point::<PrimeOrderCurve>::identity().mul_neg3(17), Point::identity());
    }

    #[test]
    fn test_random_scalar_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let order = BigInt256::from_u64(5);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let k = random_scalar(&mut rng, &order);
            let v = k.limbs()[0] as usize;
            assert!((1..5).contains(&v));
            seen[v] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }
}
