//! Quotients of two polynomials.
//!
//! Values are never reduced to lowest terms; arithmetic just combines
//! numerators and denominators.

use crate::error::{Error, Result};
use crate::field_trait::FieldElement;
use crate::polynomial::Polynomial;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Result of evaluating a rational function: a field value, or `Pole` where
/// the denominator vanishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation<F> {
    Value(F),
    Pole,
}

impl<F> Evaluation<F> {
    pub fn is_pole(&self) -> bool {
        matches!(self, Evaluation::Pole)
    }

    pub fn value(self) -> Option<F> {
        match self {
            Evaluation::Value(v) => Some(v),
            Evaluation::Pole => None,
        }
    }
}

/// `num(X) / den(X)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction<F: FieldElement> {
    num: Polynomial<F>,
    den: Polynomial<F>,
}

impl<F: FieldElement> RationalFunction<F> {
    pub fn new(num: Polynomial<F>, den: Polynomial<F>) -> Self {
        Self { num, den }
    }

    pub fn from_polynomial(num: Polynomial<F>) -> Self {
        Self::new(num, Polynomial::one())
    }

    pub fn constant(value: F) -> Self {
        Self::from_polynomial(Polynomial::constant(value))
    }

    pub fn numerator(&self) -> &Polynomial<F> {
        &self.num
    }

    pub fn denominator(&self) -> &Polynomial<F> {
        &self.den
    }

    pub fn evaluate(&self, x: &F) -> Evaluation<F> {
        let den = self.den.evaluate(x);
        match self.num.evaluate(x).checked_div(&den) {
            Ok(value) => Evaluation::Value(value),
            Err(_) => Evaluation::Pole,
        }
    }

    /// `self / rhs`, i.e. `self * (rhs.den / rhs.num)`
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if `rhs` has a zero numerator.
    pub fn checked_div<T: Into<Self>>(&self, rhs: T) -> Result<Self> {
        let rhs = rhs.into();
        if rhs.num.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::new(&self.num * &rhs.den, &self.den * &rhs.num))
    }

    /// The polynomial congruent to `num / den` modulo `modulus`.
    ///
    /// The denominator is inverted modulo `modulus` with the extended Euclidean
    /// algorithm.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if the denominator shares a factor with the
    /// modulus (or is zero), or if the modulus is zero.
    pub fn reduce_mod(&self, modulus: &Polynomial<F>) -> Result<Polynomial<F>> {
        if modulus.is_zero() || self.den.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (den_inv, _, gcd) = Polynomial::xgcd(&self.den, modulus)?;
        if gcd.degree() != 0 {
            return Err(Error::DivisionByZero);
        }
        (&self.num * &den_inv).modulo(modulus)
    }
}

impl<F: FieldElement> From<F> for RationalFunction<F> {
    fn from(value: F) -> Self {
        Self::constant(value)
    }
}

impl<F: FieldElement> From<u64> for RationalFunction<F> {
    fn from(value: u64) -> Self {
        Self::constant(F::from_u64(value))
    }
}

impl<F: FieldElement> From<i64> for RationalFunction<F> {
    fn from(value: i64) -> Self {
        Self::constant(F::from_i64(value))
    }
}

impl<F: FieldElement> From<Polynomial<F>> for RationalFunction<F> {
    fn from(poly: Polynomial<F>) -> Self {
        Self::from_polynomial(poly)
    }
}

impl<F: FieldElement, T: Into<RationalFunction<F>>> Add<T> for RationalFunction<F> {
    type Output = Self;

    fn add(self, other: T) -> Self {
        let other = other.into();
        Self::new(
            &(&self.num * &other.den) + &(&self.den * &other.num),
            &self.den * &other.den,
        )
    }
}

impl<F: FieldElement, T: Into<RationalFunction<F>>> Sub<T> for RationalFunction<F> {
    type Output = Self;

    fn sub(self, other: T) -> Self {
        let other: Self = other.into();
        self + (-other)
    }
}

impl<F: FieldElement, T: Into<RationalFunction<F>>> Mul<T> for RationalFunction<F> {
    type Output = Self;

    fn mul(self, other: T) -> Self {
        let other = other.into();
        Self::new(&self.num * &other.num, &self.den * &other.den)
    }
}

impl<F: FieldElement> Neg for RationalFunction<F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.num, self.den)
    }
}

impl<F: FieldElement> fmt::Display for RationalFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_curves::{f, F97};

    fn poly(coeffs: &[i64]) -> Polynomial<F97> {
        Polynomial::new(coeffs.iter().map(|&c| f(c)).collect())
    }

    #[test]
    fn test_evaluate_value_and_pole() {
        // (X + 1) / (X - 3)
        let r = RationalFunction::new(poly(&[1, 1]), poly(&[-3, 1]));
        assert_eq!(r.evaluate(&f(5)), Evaluation::Value(f(3)));
        assert_eq!(r.evaluate(&f(3)), Evaluation::Pole);
        assert!(r.evaluate(&f(3)).is_pole());
        assert_eq!(r.evaluate(&f(4)).value(), Some(f(5)));
    }

    #[test]
    fn test_arithmetic_with_lifted_operands() {
        let r = RationalFunction::new(poly(&[1, 1]), poly(&[-3, 1]));
        let x = f(10);
        let at = |q: &RationalFunction<F97>| q.evaluate(&x).value().unwrap();
        let base = at(&r);

        assert_eq!(at(&(r.clone() + f(2))), base + f(2));
        assert_eq!(at(&(r.clone() * f(3))), base * f(3));
        assert_eq!(at(&(r.clone() - poly(&[0, 1]))), base - x);
        assert_eq!(at(&(r.clone() * r.clone())), base * base);
        assert_eq!(at(&(r.clone() + r.clone())), base + base);
        assert_eq!(at(&-r.clone()), -base);

        // integers lift through the field
        assert_eq!(at(&(r.clone() + 5u64)), base + f(5));
        assert_eq!(at(&(r.clone() * -2i64)), base * f(-2));
        assert_eq!(at(&(r.clone() - 100u64)), base - f(3));
        let lifted: RationalFunction<F97> = (-1i64).into();
        assert_eq!(lifted.evaluate(&x), Evaluation::Value(f(96)));
    }

    #[test]
    fn test_checked_div() {
        let r = RationalFunction::new(poly(&[1, 1]), poly(&[-3, 1]));
        let q = r.checked_div(poly(&[2, 0, 1])).unwrap();
        assert_eq!(q.numerator(), &poly(&[1, 1]));
        assert_eq!(q.denominator(), &(&poly(&[-3, 1]) * &poly(&[2, 0, 1])));
        assert_eq!(r.checked_div(F97::zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_reduce_mod() {
        // 1 / (X + 1) modulo (X - 2)^2
        let modulus = poly(&[-2, 1]).pow(2);
        let r = RationalFunction::new(Polynomial::one(), poly(&[1, 1]));
        let reduced = r.reduce_mod(&modulus).unwrap();
        assert!(reduced.degree() < 2);

        let check = (&reduced * &poly(&[1, 1])).modulo(&modulus).unwrap();
        assert_eq!(check, Polynomial::one());

        // denominator sharing a root with the modulus
        let bad = RationalFunction::new(Polynomial::one(), poly(&[-2, 1]));
        assert_eq!(bad.reduce_mod(&modulus), Err(Error::DivisionByZero));
    }
}
