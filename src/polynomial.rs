//! Univariate polynomials over a field
//!
//! Coefficients are stored from lowest to highest degree and trailing zeros
//! are trimmed on construction, so the zero polynomial is the empty vector and
//! equality is plain coefficient-wise comparison.

use crate::error::{Error, Result};
use crate::field_trait::FieldElement;
use rand::Rng;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Polynomial with coefficients in a field F
/// `[a0, a1, a2, ...] = a0 + a1*X + a2*X^2 + ...`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<F: FieldElement> {
    coeffs: Vec<F>,
}

impl<F: FieldElement> Polynomial<F> {
    /// Create a new polynomial from coefficients (trailing zeros are dropped)
    pub fn new(coeffs: Vec<F>) -> Self {
        let mut poly = Polynomial { coeffs };
        poly.normalize();
        poly
    }

    pub fn zero() -> Self {
        Polynomial { coeffs: vec![] }
    }

    pub fn one() -> Self {
        Polynomial::constant(F::one())
    }

    pub fn constant(coeff: F) -> Self {
        Polynomial::new(vec![coeff])
    }

    /// The indeterminate `X`
    pub fn x() -> Self {
        Polynomial::monomial(F::one(), 1)
    }

    /// `coeff * X^degree`
    pub fn monomial(coeff: F, degree: usize) -> Self {
        let mut coeffs = vec![F::zero(); degree + 1];
        coeffs[degree] = coeff;
        Polynomial::new(coeffs)
    }

    /// `X - root`
    pub fn linear_factor(root: &F) -> Self {
        Polynomial::new(vec![-root.clone(), F::one()])
    }

    /// Degree of the polynomial (-1 for zero polynomial)
    pub fn degree(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    /// Trimmed coefficient list, lowest degree first
    pub fn get_coeffs(&self) -> Vec<F> {
        self.coeffs.clone()
    }

    /// Coefficient of `X^index` (zero past the degree)
    pub fn coeff(&self, index: usize) -> F {
        self.coeffs.get(index).cloned().unwrap_or_else(F::zero)
    }

    pub fn leading_coefficient(&self) -> Option<&F> {
        self.coeffs.last()
    }

    /// Remove leading zero coefficients
    fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    /// Multiply every coefficient by `factor`
    pub fn scale(&self, factor: &F) -> Self {
        Polynomial::new(
            self.coeffs
                .iter()
                .map(|c| c.clone() * factor.clone())
                .collect(),
        )
    }

    fn add_poly(&self, other: &Self) -> Self {
        let max_len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..max_len)
            .map(|i| match (self.coeffs.get(i), other.coeffs.get(i)) {
                (Some(a), Some(b)) => a.clone() + b.clone(),
                (Some(a), None) => a.clone(),
                (None, Some(b)) => b.clone(),
                (None, None) => unreachable!(),
            })
            .collect();
        Polynomial::new(coeffs)
    }

    fn neg_poly(&self) -> Self {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -c.clone()).collect(),
        }
    }

    fn mul_poly(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let mut result = vec![F::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }
        Polynomial::new(result)
    }

    /// Polynomial division with remainder
    ///
    /// Returns `(quotient, remainder)` with `self = quotient * divisor + remainder`
    /// and `deg(remainder) < deg(divisor)`.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        let divisor_lead = divisor.leading_coefficient().ok_or(Error::DivisionByZero)?;

        if self.degree() < divisor.degree() {
            return Ok((Polynomial::zero(), self.clone()));
        }

        let divisor_lead_inv = divisor_lead.inverse()?;
        let divisor_len = divisor.coeffs.len();
        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![F::zero(); self.coeffs.len() - divisor_len + 1];

        for shift in (0..quotient.len()).rev() {
            let lead = remainder[shift + divisor_len - 1].clone();
            if lead.is_zero() {
                continue;
            }
            let coeff = lead * divisor_lead_inv.clone();
            for (i, d) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] = remainder[shift + i].clone() - coeff.clone() * d.clone();
            }
            quotient[shift] = coeff;
        }

        remainder.truncate(divisor_len - 1);
        Ok((Polynomial::new(quotient), Polynomial::new(remainder)))
    }

    /// Division that must leave no remainder
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] for a zero divisor, [`Error::InexactDivision`]
    /// if the remainder is non-zero.
    pub fn exact_div(&self, divisor: &Self) -> Result<Self> {
        let (quotient, remainder) = self.div_rem(divisor)?;
        if !remainder.is_zero() {
            return Err(Error::InexactDivision);
        }
        Ok(quotient)
    }

    /// Remainder of the division by `divisor`
    pub fn modulo(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem(divisor)?.1)
    }

    /// Formal derivative; zero for constants
    pub fn derivative(&self) -> Self {
        Polynomial::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| F::from_u64(i as u64) * c.clone())
                .collect(),
        )
    }

    /// Evaluate at `point` by accumulating `c_i * point^i`
    pub fn evaluate(&self, point: &F) -> F {
        let mut xi = F::one();
        let mut value = F::zero();
        for c in &self.coeffs {
            value = value + c.clone() * xi.clone();
            xi = xi * point.clone();
        }
        value
    }

    pub fn evaluate_domain(&self, domain: &[F]) -> Vec<F> {
        domain.iter().map(|d| self.evaluate(d)).collect()
    }

    /// `self^exponent` by square-and-multiply, most significant bit first.
    /// The zero polynomial stays zero for every exponent, `0` included.
    pub fn pow(&self, exponent: u64) -> Self {
        if self.is_zero() {
            return Polynomial::zero();
        }

        let mut acc = Polynomial::one();
        for i in (0..(64 - exponent.leading_zeros())).rev() {
            acc = &acc * &acc;
            if (exponent >> i) & 1 == 1 {
                acc = &acc * self;
            }
        }
        acc
    }

    /// Extended Euclidean algorithm
    ///
    /// Returns `(s, t, g)` with `s*x + t*y = g` and `g` the monic gcd. All
    /// three outputs are divided by the leading coefficient of the last
    /// non-zero remainder.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] when both inputs are zero (there is no gcd
    /// to normalize).
    pub fn xgcd(x: &Self, y: &Self) -> Result<(Self, Self, Self)> {
        let (mut old_r, mut r) = (x.clone(), y.clone());
        let (mut old_s, mut s) = (Polynomial::one(), Polynomial::zero());
        let (mut old_t, mut t) = (Polynomial::zero(), Polynomial::one());

        while !r.is_zero() {
            let (quotient, remainder) = old_r.div_rem(&r)?;
            old_r = std::mem::replace(&mut r, remainder);
            let next_s = &old_s - &(&quotient * &s);
            old_s = std::mem::replace(&mut s, next_s);
            let next_t = &old_t - &(&quotient * &t);
            old_t = std::mem::replace(&mut t, next_t);
        }

        let lc_inv = old_r
            .leading_coefficient()
            .ok_or(Error::DivisionByZero)?
            .inverse()?;

        Ok((
            old_s.scale(&lc_inv),
            old_t.scale(&lc_inv),
            old_r.scale(&lc_inv),
        ))
    }

    fn lagrange_basis(domain: &[F], i: usize) -> Result<Self> {
        let mut basis = Polynomial::one();
        for (j, xj) in domain.iter().enumerate() {
            if j == i {
                continue;
            }
            let denominator = (domain[i].clone() - xj.clone()).inverse()?;
            basis = (&basis * &Polynomial::linear_factor(xj)).scale(&denominator);
        }
        Ok(basis)
    }

    /// Unique polynomial of degree `< domain.len()` through `(domain[i], values[i])`
    ///
    /// # Errors
    /// - [`Error::InvalidInterpolation`] for mismatched lengths or an empty domain
    /// - [`Error::DivisionByZero`] if the domain repeats a point
    pub fn lagrange_interpolation(domain: &[F], values: &[F]) -> Result<Self> {
        if domain.len() != values.len() {
            return Err(Error::InvalidInterpolation(
                "number of elements in domain does not match number of values",
            ));
        }
        if domain.is_empty() {
            return Err(Error::InvalidInterpolation(
                "cannot interpolate between zero points",
            ));
        }

        let mut acc = Polynomial::zero();
        for (i, value) in values.iter().enumerate() {
            acc = &acc + &Self::lagrange_basis(domain, i)?.scale(value);
        }
        Ok(acc)
    }

    /// Minimal-degree polynomial matching `values[i]` and first derivative
    /// `derivatives[i]` at every `points[i]`
    ///
    /// Each node contributes `l_i² · (v_i + (X − x_i)(d_i − (l_i²)'(x_i)·v_i))`
    /// with `l_i` its Lagrange basis polynomial.
    pub fn hermite_interpolation(points: &[F], values: &[F], derivatives: &[F]) -> Result<Self> {
        if values.len() != points.len() || derivatives.len() != points.len() {
            return Err(Error::InvalidInterpolation("lengths of inputs must be equal"));
        }
        if points.is_empty() {
            return Err(Error::InvalidInterpolation(
                "cannot interpolate between zero points",
            ));
        }

        let mut acc = Polynomial::zero();
        for (i, xi) in points.iter().enumerate() {
            let li = Self::lagrange_basis(points, i)?;
            let qi = &li * &li;
            let slope = qi.derivative().evaluate(xi);
            let correction =
                Polynomial::constant(derivatives[i].clone() - slope * values[i].clone());
            let pi = &Polynomial::constant(values[i].clone())
                + &(&Polynomial::linear_factor(xi) * &correction);
            acc = &acc + &(&qi * &pi);
        }
        Ok(acc)
    }

    /// `Π (X − d)` over the domain; the constant `1` for an empty domain
    pub fn zerofier_domain(domain: &[F]) -> Self {
        domain.iter().fold(Polynomial::one(), |acc, d| {
            &acc * &Polynomial::linear_factor(d)
        })
    }

    /// Whether the points `(x, y)` lie on one non-horizontal line, i.e. their
    /// interpolating polynomial has degree exactly 1
    pub fn is_collinear(points: &[(F, F)]) -> Result<bool> {
        let (domain, values): (Vec<F>, Vec<F>) = points.iter().cloned().unzip();
        Ok(Self::lagrange_interpolation(&domain, &values)?.degree() == 1)
    }

    /// Random polynomial with between 1 and `max_degree + 1` coefficients
    pub fn random<R: Rng>(rng: &mut R, max_degree: usize) -> Self {
        let len = rng.random_range(1..=max_degree + 1);
        Polynomial::new((0..len).map(|_| F::random(rng)).collect())
    }
}

impl<F: FieldElement> Add for Polynomial<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_poly(&other)
    }
}

impl<F: FieldElement> Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: &Polynomial<F>) -> Polynomial<F> {
        self.add_poly(other)
    }
}

impl<F: FieldElement> Sub for Polynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add_poly(&other.neg_poly())
    }
}

impl<F: FieldElement> Sub for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: &Polynomial<F>) -> Polynomial<F> {
        self.add_poly(&other.neg_poly())
    }
}

impl<F: FieldElement> Mul for Polynomial<F> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.mul_poly(&other)
    }
}

impl<F: FieldElement> Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, other: &Polynomial<F>) -> Polynomial<F> {
        self.mul_poly(other)
    }
}

impl<F: FieldElement> Neg for Polynomial<F> {
    type Output = Self;

    fn neg(self) -> Self {
        self.neg_poly()
    }
}

impl<F: FieldElement> Neg for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        self.neg_poly()
    }
}

impl<F: FieldElement> fmt::Display for Polynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let one = F::one();
        let mut terms = Vec::new();
        for (i, coeff) in self.coeffs.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }

            let term = match i {
                0 => format!("{:?}", coeff),
                1 if *coeff == one => "X".to_string(),
                1 => format!("{:?}*X", coeff),
                _ if *coeff == one => format!("X^{}", i),
                _ => format!("{:?}*X^{}", coeff, i),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}
