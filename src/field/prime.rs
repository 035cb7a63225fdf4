//! Prime field F_p implementation
//!
//! This module implements elements of prime fields F_p, where p is prime.
//! All arithmetic is performed modulo p; products and powers go through the
//! configuration's Montgomery context.

use super::config::FieldConfig;
use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::field_trait::FieldElement;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

/// Element of a prime field F_p
///
/// # Type Parameters
/// - `C`: Field configuration (defines p via `FieldConfig` trait)
/// - `N`: Number of limbs for BigInt representation
///
/// The stored value is always the canonical representative in `[0, p)`, so
/// equality, ordering and hashing all work on it directly.
pub struct PrimeField<C: FieldConfig<N>, const N: usize> {
    value: BigInt<N>,
    _config: PhantomData<C>,
}

impl<C: FieldConfig<N>, const N: usize> PrimeField<C, N> {
    /// Creates a prime field element, reducing `value` modulo p.
    pub fn new(value: BigInt<N>) -> Self {
        let modulus = C::modulus();
        let reduced = if value.compare(modulus) == Ordering::Less {
            value
        } else {
            value.modulo(modulus)
        };
        Self::from_reduced(reduced)
    }

    const fn from_reduced(value: BigInt<N>) -> Self {
        Self {
            value,
            _config: PhantomData,
        }
    }

    /// Parses a big-endian hex string; `None` if it is not valid hex.
    pub fn from_hex(hex: &str) -> Option<Self> {
        BigInt::from_hex(hex).map(Self::new)
    }

    pub fn value(&self) -> &BigInt<N> {
        &self.value
    }
}

impl<C: FieldConfig<N>, const N: usize> Clone for PrimeField<C, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: FieldConfig<N>, const N: usize> Copy for PrimeField<C, N> {}

impl<C: FieldConfig<N>, const N: usize> PartialEq for PrimeField<C, N> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<C: FieldConfig<N>, const N: usize> Eq for PrimeField<C, N> {}

impl<C: FieldConfig<N>, const N: usize> PartialOrd for PrimeField<C, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: FieldConfig<N>, const N: usize> Ord for PrimeField<C, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.compare(&other.value)
    }
}

impl<C: FieldConfig<N>, const N: usize> Hash for PrimeField<C, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

// a + b (mod p)
impl<C: FieldConfig<N>, const N: usize> Add for PrimeField<C, N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_reduced(self.value.mod_add(&other.value, C::modulus()))
    }
}

// -a = p - a (mod p)
impl<C: FieldConfig<N>, const N: usize> Neg for PrimeField<C, N> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.value.is_zero() {
            return self;
        }
        Self::from_reduced(C::modulus().sub_with_borrow(&self.value).0)
    }
}

// a - b (mod p)
impl<C: FieldConfig<N>, const N: usize> Sub for PrimeField<C, N> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_reduced(self.value.mod_sub(&other.value, C::modulus()))
    }
}

// a * b (mod p)
impl<C: FieldConfig<N>, const N: usize> Mul for PrimeField<C, N> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::from_reduced(C::montgomery().mul(&self.value, &other.value))
    }
}

impl<C: FieldConfig<N>, const N: usize> FieldElement for PrimeField<C, N> {
    fn zero() -> Self {
        Self::from_reduced(BigInt::zero())
    }

    fn one() -> Self {
        Self::from_reduced(BigInt::one())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn from_u64(val: u64) -> Self {
        Self::new(BigInt::from_u64(val))
    }

    /// Samples a uniform element of `[0, p)` by rejection sampling.
    fn random<R: Rng>(rng: &mut R) -> Self {
        let modulus = C::modulus();
        let bits = modulus.bit_length();

        loop {
            let mut limbs = [0u64; N];
            for (i, limb) in limbs.iter_mut().enumerate() {
                let word: u64 = rng.random();
                let remaining = bits.saturating_sub(i * 64);
                *limb = match remaining {
                    0 => 0,
                    r if r >= 64 => word,
                    r => word & ((1u64 << r) - 1),
                };
            }

            let candidate = BigInt::from_limbs(limbs);
            if candidate.compare(modulus) == Ordering::Less {
                return Self::from_reduced(candidate);
            }
        }
    }

    /// Multiplicative inverse by Fermat's little theorem: a^(p-2) = a^(-1)
    fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let exponent = C::modulus().sub_with_borrow(&BigInt::from_u64(2)).0;
        Ok(Self::from_reduced(
            C::montgomery().pow(&self.value, &exponent),
        ))
    }

    fn pow_bigint<const M: usize>(&self, exp: &BigInt<M>) -> Self {
        let ctx = C::montgomery();
        let one = ctx.to_mont(&BigInt::one());
        let base = ctx.to_mont(&self.value);

        let mut acc = one;
        for i in (0..exp.bit_length()).rev() {
            acc = ctx.mont_mul(&acc, &acc);
            if exp.get_bit(i) {
                acc = ctx.mont_mul(&acc, &base);
            }
        }
        Self::from_reduced(ctx.from_mont(&acc))
    }
}

impl<C: FieldConfig<N>, const N: usize> fmt::Debug for PrimeField<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<C: FieldConfig<N>, const N: usize> fmt::Display for PrimeField<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
