//! Fixed-width big integers
//!
//! `BigInt<N>` is an unsigned integer made of N 64-bit limbs. The field and
//! curve layers only need a handful of operations on it: carry-aware add and
//! subtract, comparison, long division for reductions, and bit access for
//! exponentiation and scalar multiplication.
//!
//! Limbs are stored little-endian (limbs[0] is least significant); hex and
//! byte conversions are big-endian.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// A big integer with N 64-bit limbs (N * 64 bits total)
///
/// # Examples
/// ```
/// use divisor_witness::bigint::BigInt;
/// let a = BigInt::<4>::from_u64(42);
/// let b = BigInt::<4>::from_u64(100);
/// assert_eq!((a + b).limbs()[0], 142);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigInt<const N: usize> {
    limbs: [u64; N],
}

impl<const N: usize> BigInt<N> {
    /// Number of bits this BigInt can represent
    pub const BITS: usize = N * 64;

    #[inline]
    pub const fn zero() -> Self {
        Self { limbs: [0; N] }
    }

    #[inline]
    pub const fn one() -> Self {
        let mut limbs = [0; N];
        limbs[0] = 1;
        Self { limbs }
    }

    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        let mut limbs = [0; N];
        limbs[0] = val;
        Self { limbs }
    }

    /// Creates a BigInt from little-endian limbs.
    pub const fn from_limbs(limbs: [u64; N]) -> Self {
        Self { limbs }
    }

    /// Parses a big-endian hexadecimal string, with or without `0x` prefix.
    ///
    /// Returns `None` on a non-hex character or a value wider than N limbs.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        let digits = hex.trim_start_matches('0');
        if digits.len() > N * 16 {
            return None;
        }

        let mut limbs = [0u64; N];
        for (i, c) in digits.chars().rev().enumerate() {
            let nibble = c.to_digit(16)? as u64;
            limbs[i / 16] |= nibble << ((i % 16) * 4);
        }
        Some(Self { limbs })
    }

    #[inline]
    pub const fn limbs(&self) -> &[u64; N] {
        &self.limbs
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&limb| limb == 0)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.limbs[0] == 1 && self.limbs[1..].iter().all(|&limb| limb == 0)
    }

    /// Position of the highest set bit plus one; 0 for zero.
    pub fn bit_length(&self) -> usize {
        for i in (0..N).rev() {
            if self.limbs[i] != 0 {
                let leading_zeros = self.limbs[i].leading_zeros() as usize;
                return (i + 1) * 64 - leading_zeros;
            }
        }
        0
    }

    /// Bit `idx`, counting from the least significant bit.
    pub fn get_bit(&self, idx: usize) -> bool {
        if idx >= Self::BITS {
            return false;
        }
        (self.limbs[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Uppercase hex without leading zeros ("0" for zero).
    pub fn to_hex(&self) -> String {
        let Some(start) = (0..N).rev().find(|&i| self.limbs[i] != 0) else {
            return "0".to_string();
        };

        let mut hex = format!("{:X}", self.limbs[start]);
        for i in (0..start).rev() {
            hex.push_str(&format!("{:016X}", self.limbs[i]));
        }
        hex
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        for i in (0..N).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Returns (result, overflow) where overflow is true if addition overflowed
    pub fn add_with_carry(&self, other: &Self) -> (Self, bool) {
        let mut result = Self::zero();
        let mut carry = false;

        for i in 0..N {
            let (sum1, overflow1) = self.limbs[i].overflowing_add(other.limbs[i]);
            let (sum2, overflow2) = sum1.overflowing_add(carry as u64);
            result.limbs[i] = sum2;
            carry = overflow1 || overflow2;
        }

        (result, carry)
    }

    /// Returns (result, underflow) where underflow is true if subtraction underflowed
    pub fn sub_with_borrow(&self, other: &Self) -> (Self, bool) {
        let mut result = Self::zero();
        let mut borrow = false;

        for i in 0..N {
            let (diff1, underflow1) = self.limbs[i].overflowing_sub(other.limbs[i]);
            let (diff2, underflow2) = diff1.overflowing_sub(borrow as u64);
            result.limbs[i] = diff2;
            borrow = underflow1 || underflow2;
        }

        (result, borrow)
    }

    /// Shift left by one bit, dropping the top bit.
    fn shl1(&self) -> Self {
        let mut result = Self::zero();
        let mut carry = 0u64;
        for i in 0..N {
            result.limbs[i] = (self.limbs[i] << 1) | carry;
            carry = self.limbs[i] >> 63;
        }
        result
    }

    /// Division with remainder using bitwise long division.
    ///
    /// # Panics
    /// Panics if dividing by zero
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "Division by zero");

        if self.compare(divisor) == Ordering::Less {
            return (Self::zero(), *self);
        }
        if divisor.is_one() {
            return (*self, Self::zero());
        }

        let mut quotient = Self::zero();
        let mut remainder = Self::zero();

        for i in (0..self.bit_length()).rev() {
            // remainder can reach 2 * divisor before the subtraction below, so
            // keep the bit that falls off the top.
            let overflow = remainder.limbs[N - 1] >> 63 == 1;
            remainder = remainder.shl1();
            if self.get_bit(i) {
                remainder.limbs[0] |= 1;
            }

            if overflow || remainder.compare(divisor) != Ordering::Less {
                remainder = remainder.sub_with_borrow(divisor).0;
                quotient.limbs[i / 64] |= 1u64 << (i % 64);
            }
        }

        (quotient, remainder)
    }

    pub fn modulo(&self, modulus: &Self) -> Self {
        self.div_rem(modulus).1
    }

    /// (self + other) mod modulus, assuming self < modulus and other < modulus
    pub fn mod_add(&self, other: &Self, modulus: &Self) -> Self {
        let (sum, carry) = self.add_with_carry(other);
        if carry || sum.compare(modulus) != Ordering::Less {
            sum.sub_with_borrow(modulus).0
        } else {
            sum
        }
    }

    /// (self - other) mod modulus, assuming self < modulus and other < modulus
    pub fn mod_sub(&self, other: &Self, modulus: &Self) -> Self {
        let (diff, borrow) = self.sub_with_borrow(other);
        if borrow {
            diff.add_with_carry(modulus).0
        } else {
            diff
        }
    }
}

impl<const N: usize> PartialOrd for BigInt<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for BigInt<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

// Wrapping addition
impl<const N: usize> Add for BigInt<N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_with_carry(&other).0
    }
}

// Wrapping subtraction
impl<const N: usize> Sub for BigInt<N> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.sub_with_borrow(&other).0
    }
}

impl<const N: usize> fmt::Debug for BigInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt<{}>(0x", N)?;
        for &limb in self.limbs.iter().rev() {
            write!(f, "{:016x}", limb)?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> fmt::Display for BigInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex().to_lowercase())
    }
}

/// 256-bit big integer (4 limbs x 64 bits)
pub type BigInt256 = BigInt<4>;
