//! The `FieldElement` trait
//!
//! Provides a unified interface for field arithmetic. The curve, polynomial,
//! rational-function and function-field layers are all generic over it.

use crate::bigint::BigInt;
use crate::error::Result;
use rand::Rng;
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

/// Trait defining the interface for finite field elements
///
/// # Laws
/// Field elements must satisfy:
/// - Additive identity: `a + zero() = a`
/// - Multiplicative identity: `a * one() = a`
/// - Additive inverse: `a + (-a) = zero()`
/// - Multiplicative inverse: `a * a.inverse()? = one()` (for non-zero a)
///
/// Division is not an operator: dividing by zero is an error, so it goes
/// through [`FieldElement::checked_div`] and returns a `Result`.
///
/// `Ord` and `Hash` follow the canonical representative, which lets points
/// and divisors use field elements as map keys.
pub trait FieldElement:
    Sized
    + Clone
    + PartialEq
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Returns the additive identity (zero) of the field
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) of the field
    fn one() -> Self;

    /// Checks if this element is the additive identity (zero)
    fn is_zero(&self) -> bool;

    /// Lifts an integer into the field (reduced modulo the characteristic)
    fn from_u64(val: u64) -> Self;

    /// Lifts a signed integer into the field; negative values map to `-|val|`
    fn from_i64(val: i64) -> Self {
        let magnitude = Self::from_u64(val.unsigned_abs());
        if val < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Samples a uniformly random element
    fn random<R: Rng>(rng: &mut R) -> Self;

    /// Computes the multiplicative inverse of this element
    ///
    /// # Errors
    /// [`Error::DivisionByZero`](crate::error::Error::DivisionByZero) for the
    /// zero element.
    fn inverse(&self) -> Result<Self>;

    /// `self / rhs`, failing with `DivisionByZero` iff `rhs` is zero
    fn checked_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self.clone() * rhs.inverse()?)
    }

    fn square(&self) -> Self {
        self.clone() * self.clone()
    }

    fn double(&self) -> Self {
        self.clone() + self.clone()
    }

    /// Computes `self^exp` by square-and-multiply over the bits of the exponent,
    /// most significant bit first
    ///
    /// # Special cases
    /// - `a.pow(0) = Self::one()`
    /// - `Self::zero().pow(exp) = Self::zero()` for exp > 0
    fn pow(&self, exp: u64) -> Self {
        let mut acc = Self::one();
        for i in (0..(64 - exp.leading_zeros())).rev() {
            acc = acc.square();
            if (exp >> i) & 1 == 1 {
                acc = acc * self.clone();
            }
        }
        acc
    }

    /// Same as [`FieldElement::pow`] for a multi-limb exponent
    fn pow_bigint<const M: usize>(&self, exp: &BigInt<M>) -> Self {
        let mut acc = Self::one();
        for i in (0..exp.bit_length()).rev() {
            acc = acc.square();
            if exp.get_bit(i) {
                acc = acc * self.clone();
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // Simple test implementation: integers mod 7 for testing the default methods
    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct Mod7(u64);

    impl Mod7 {
        fn new(val: u64) -> Self {
            Mod7(val % 7)
        }
    }

    impl Add for Mod7 {
        type Output = Self;
        fn add(self, other: Self) -> Self {
            Mod7((self.0 + other.0) % 7)
        }
    }

    impl Sub for Mod7 {
        type Output = Self;
        fn sub(self, other: Self) -> Self {
            Mod7((self.0 + 7 - other.0) % 7)
        }
    }

    impl Mul for Mod7 {
        type Output = Self;
        fn mul(self, other: Self) -> Self {
            Mod7((self.0 * other.0) % 7)
        }
    }

    impl Neg for Mod7 {
        type Output = Self;
        fn neg(self) -> Self {
            Mod7((7 - self.0) % 7)
        }
    }

    impl FieldElement for Mod7 {
        fn zero() -> Self {
            Mod7(0)
        }

        fn one() -> Self {
            Mod7(1)
        }

        fn is_zero(&self) -> bool {
            self.0 == 0
        }

        fn from_u64(val: u64) -> Self {
            Mod7::new(val)
        }

        fn random<R: Rng>(rng: &mut R) -> Self {
            Mod7(rng.random_range(0..7))
        }

        fn inverse(&self) -> Result<Self> {
            if self.is_zero() {
                return Err(Error::DivisionByZero);
            }
            // a^(p-2) = a^(-1)
            Ok(self.pow(5))
        }
    }

    #[test]
    fn test_from_i64() {
        assert_eq!(Mod7::from_i64(-1), Mod7::new(6));
        assert_eq!(Mod7::from_i64(-15), Mod7::new(6));
        assert_eq!(Mod7::from_i64(10), Mod7::new(3));
    }

    #[test]
    fn test_division() {
        let quot = Mod7::new(6).checked_div(&Mod7::new(2)).unwrap();
        assert_eq!(quot, Mod7::new(3));
        assert_eq!(
            Mod7::new(6).checked_div(&Mod7::zero()),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn test_exponentiation() {
        let a = Mod7::new(3);
        assert_eq!(a.pow(0), Mod7::one());
        assert_eq!(a.pow(1), a);
        // 3^100 = (3^6)^16 * 3^4 = 81 = 4 (mod 7)
        assert_eq!(a.pow(100), Mod7::new(4));
        assert_eq!(a.pow_bigint(&BigInt::<2>::from_u64(100)), Mod7::new(4));
        assert_eq!(Mod7::zero().pow(5), Mod7::zero());
    }

    #[test]
    fn test_inverse() {
        for v in 1..7 {
            let a = Mod7::new(v);
            assert_eq!(a.clone() * a.inverse().unwrap(), Mod7::one());
        }
    }
}
