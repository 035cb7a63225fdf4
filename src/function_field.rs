//! Function field of the curve and Mumford witnesses
//!
//! An element `f(x, y) = a(x) − y·b(x)` is reduced modulo the curve relation
//! `y² = x³ + ax + b`, so two polynomials in `x` describe it completely.
//!
//! [`mumford_witness`] multiplies one elementary witness per point: each
//! finite point `P` with multiplicity `m` contributes `g − y·t`, where
//! `(s, t, g) = xgcd((x − x_P)^m, v)` and `v` is the expansion of `y` around
//! `P` to precision `m`. Since `v` is invertible modulo `(x − x_P)^m`, `g = 1`
//! and `t ≡ v⁻¹`, so `1 − y·t ≡ 1 − v·v⁻¹ ≡ 0` to order `m` at `P`. For
//! `m = 1` the contribution is simply `1 − y/y_P`, which also vanishes at
//! the other points with `y = y_P`. The product therefore has the zeros of
//! the divisor plus extra ones.
//!
//! [`reduced_witness`] returns the function whose zero divisor is exactly
//! the finite part of the divisor: the local expansions are glued by CRT
//! into `V mod U`, `U = Π (x − x_i)^{m_i}`, and `a ≡ V·b (mod U)` is solved
//! with `deg a ≤ n/2` by stopping the Euclidean algorithm on `(U, V)` early.

use crate::divisor::Divisor;
use crate::elliptic_curve::{CurveConfig, Point};
use crate::error::{Error, Result};
use crate::field_trait::FieldElement;
use crate::polynomial::Polynomial;
use crate::rational_function::RationalFunction;
use rand::Rng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Mul;
use tracing::{debug, trace, warn};

type Poly<C> = Polynomial<<C as CurveConfig>::BaseField>;

/// `x³ + ax + b`, the polynomial `y²` is replaced by
pub fn curve_polynomial<C: CurveConfig>() -> Poly<C> {
    Polynomial::new(vec![
        C::b(),
        C::a(),
        C::BaseField::zero(),
        C::BaseField::one(),
    ])
}

/// `f(x, y) = a(x) − y·b(x)`
#[derive(Clone, Debug)]
pub struct FunctionFieldElement<C: CurveConfig> {
    a: Poly<C>,
    b: Poly<C>,
}

impl<C: CurveConfig> FunctionFieldElement<C> {
    pub fn new(a: Poly<C>, b: Poly<C>) -> Self {
        Self { a, b }
    }

    /// Multiplicative identity `1 − y·0`
    pub fn one() -> Self {
        Self::new(Polynomial::one(), Polynomial::zero())
    }

    pub fn a(&self) -> &Poly<C> {
        &self.a
    }

    pub fn b(&self) -> &Poly<C> {
        &self.b
    }

    /// `N(f) = f(x, y)·f(x, −y) = a² − (x³ + ax + b)·b²`
    pub fn norm(&self) -> Poly<C> {
        &(&self.a * &self.a) - &(&curve_polynomial::<C>() * &(&self.b * &self.b))
    }

    /// `a(x_P) − y_P·b(x_P)`
    ///
    /// # Errors
    /// [`Error::IdentityHasNoCoordinates`] at the point at infinity.
    pub fn evaluate(&self, point: &Point<C>) -> Result<C::BaseField> {
        let (x, y) = point.coordinates()?;
        Ok(self.a.evaluate(x) - y.clone() * self.b.evaluate(x))
    }

    /// Product with `y²` substituted by the curve polynomial:
    ///
    /// ```text
    /// (a − y·b)(a' − y·b') = (a·a' + (x³ + ax + b)·b·b') − y·(a·b' + b·a')
    /// ```
    pub fn mul(&self, other: &Self) -> Self {
        let a = &(&self.a * &other.a) + &(&curve_polynomial::<C>() * &(&self.b * &other.b));
        let b = &(&self.a * &other.b) + &(&self.b * &other.a);
        Self::new(a, b)
    }

    /// Random element whose polynomials have at most `max_degree + 1`
    /// coefficients each
    pub fn random<R: Rng>(rng: &mut R, max_degree: usize) -> Self {
        let a = Polynomial::random(rng, max_degree);
        let b = Polynomial::random(rng, max_degree);
        Self::new(a, b)
    }
}

impl<C: CurveConfig> PartialEq for FunctionFieldElement<C> {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl<C: CurveConfig> Eq for FunctionFieldElement<C> {}

impl<C: CurveConfig> Mul for &FunctionFieldElement<C> {
    type Output = FunctionFieldElement<C>;

    fn mul(self, other: &FunctionFieldElement<C>) -> FunctionFieldElement<C> {
        FunctionFieldElement::mul(self, other)
    }
}

impl<C: CurveConfig> fmt::Display for FunctionFieldElement<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) - y*({})", self.a, self.b)
    }
}

/// Expansion of `y` around `point` modulo `(x − x_P)^multiplicity`.
///
/// Starting from `v = y_P`, each round doubles the precision `k` with a
/// Newton step on `v² = x³ + ax + b`:
///
/// ```text
/// r = (v² − (x³ + ax + b)) / (x − x_P)^k
/// q = −r / (2v)  mod (x − x_P)^k
/// v ← v + (x − x_P)^k · q
/// ```
///
/// After every round `v² − (x³ + ax + b)` must be divisible by
/// `(x − x_P)^{2k}`; the result is `v mod (x − x_P)^multiplicity`.
///
/// # Errors
/// - [`Error::UnsupportedMultiplicity`] for a multiplicity below 1, or above 1
///   at a point with `y = 0` (where `2v` is not invertible)
/// - [`Error::IdentityHasNoCoordinates`] / [`Error::NotOnCurve`] for a bad point
/// - [`Error::HenselLiftFailed`] if a round misses its target precision
pub fn hensel_lift<C: CurveConfig>(point: &Point<C>, multiplicity: i64) -> Result<Poly<C>> {
    if multiplicity < 1 {
        return Err(Error::UnsupportedMultiplicity(multiplicity));
    }
    let (xp, yp) = point.coordinates()?;
    if !point.on_curve() {
        return Err(Error::NotOnCurve);
    }

    let mut v = Polynomial::constant(yp.clone());
    if multiplicity == 1 {
        return Ok(v);
    }
    if yp.is_zero() {
        return Err(Error::UnsupportedMultiplicity(multiplicity));
    }

    let m = multiplicity as u64;
    let rhs = curve_polynomial::<C>();
    let u = Polynomial::linear_factor(xp);
    let two = C::BaseField::from_u64(2);

    let mut k = 1u64;
    let mut r = (&(&v * &v) - &rhs)
        .exact_div(&u)
        .map_err(|_| Error::HenselLiftFailed(k))?;

    while k < m {
        let uk = u.pow(k);
        let q = RationalFunction::new(-r, v.scale(&two)).reduce_mod(&uk)?;
        v = &v + &(&uk * &q);
        k *= 2;
        r = (&(&v * &v) - &rhs)
            .exact_div(&u.pow(k))
            .map_err(|_| Error::HenselLiftFailed(k))?;
        trace!(precision = k, degree = v.degree(), "hensel lifting stage");
    }

    v.modulo(&u.pow(m))
}

/// The element vanishing to order `multiplicity` at `point`
fn elementary_witness<C: CurveConfig>(
    point: &Point<C>,
    multiplicity: i64,
) -> Result<FunctionFieldElement<C>> {
    let (xp, _) = point.coordinates()?;
    let u = Polynomial::linear_factor(xp).pow(multiplicity as u64);
    let v = hensel_lift(point, multiplicity)?;
    let (_, t, g) = Polynomial::xgcd(&u, &v)?;
    Ok(FunctionFieldElement::new(g, t))
}

/// Product of the elementary witnesses of the points of `divisor`.
///
/// The identity entry (degree balance only) and zero multiplicities are
/// skipped; every other point contributes an elementary witness, and the
/// contributions are multiplied together. The result vanishes to order `m`
/// at each point of `divisor`, but its zero divisor is larger than
/// `divisor`: `norm()` has degree `3·Σm` for simple points instead of `Σm`.
/// [`reduced_witness`] has exactly the zeros of `divisor`.
///
/// # Errors
/// - [`Error::NonPrincipalDivisor`] unless `divisor.is_principal()`
/// - [`Error::NegativeMultiplicityAtFinitePoint`] for a negative finite entry
/// - anything [`hensel_lift`] reports for multiplicities above 1
pub fn mumford_witness<C: CurveConfig>(divisor: &Divisor<C>) -> Result<FunctionFieldElement<C>> {
    if !divisor.is_principal() {
        return Err(Error::NonPrincipalDivisor);
    }
    debug!(entries = divisor.len(), "computing mumford witness");

    let mut witness = FunctionFieldElement::one();
    for (point, multiplicity) in divisor.iter() {
        if point.is_identity() {
            debug!(multiplicity, "skipping point at infinity");
            continue;
        }
        if multiplicity < 0 {
            return Err(Error::NegativeMultiplicityAtFinitePoint(multiplicity));
        }
        if multiplicity == 0 {
            continue;
        }

        debug!(%point, multiplicity, "adding elementary witness");
        witness = witness.mul(&elementary_witness(point, multiplicity)?);
    }

    debug!(
        deg_a = witness.a.degree(),
        deg_b = witness.b.degree(),
        "mumford witness done"
    );
    Ok(witness)
}

/// Witnesses for independent divisors, computed in parallel
pub fn batch_mumford_witness<C: CurveConfig>(
    divisors: &[Divisor<C>],
) -> Vec<Result<FunctionFieldElement<C>>> {
    divisors.par_iter().map(|d| mumford_witness(d)).collect()
}

/// Finite points with positive multiplicity
fn finite_entries<C: CurveConfig>(divisor: &Divisor<C>) -> Result<Vec<(&Point<C>, i64)>> {
    let mut entries = Vec::new();
    for (point, multiplicity) in divisor.iter() {
        if point.is_identity() || multiplicity == 0 {
            continue;
        }
        if multiplicity < 0 {
            return Err(Error::NegativeMultiplicityAtFinitePoint(multiplicity));
        }
        entries.push((point, multiplicity));
    }
    Ok(entries)
}

/// The function whose divisor is exactly `divisor`, up to a constant factor.
///
/// A pair `P`, `−P` in the support shares the vertical line `x − x_P`, which
/// is split off first. The remaining points have distinct x-coordinates;
/// with `n = Σm` the witness `a − y·b` satisfies `a ≡ V·b (mod U)`,
/// `deg a ≤ n/2`, and its norm is `c·U`.
///
/// # Errors
/// As [`mumford_witness`].
pub fn reduced_witness<C: CurveConfig>(divisor: &Divisor<C>) -> Result<FunctionFieldElement<C>> {
    if !divisor.is_principal() {
        return Err(Error::NonPrincipalDivisor);
    }
    let mut remaining: BTreeMap<Point<C>, i64> = finite_entries(divisor)?
        .into_iter()
        .map(|(point, multiplicity)| (point.clone(), multiplicity))
        .collect();

    let paired: Vec<Point<C>> = remaining
        .keys()
        .filter(|p| {
            let opposite = p.negate();
            **p < opposite && remaining.contains_key(&opposite)
        })
        .cloned()
        .collect();

    let mut vertical = Polynomial::one();
    for point in paired {
        let opposite = point.negate();
        let shared = remaining
            .get(&point)
            .copied()
            .unwrap_or(0)
            .min(remaining.get(&opposite).copied().unwrap_or(0));
        let (x, _) = point.coordinates()?;
        vertical = &vertical * &Polynomial::linear_factor(x).pow(shared as u64);
        for p in [point, opposite] {
            if let Some(m) = remaining.get_mut(&p) {
                *m -= shared;
            }
        }
    }

    // V ≡ v_i (mod (x − x_i)^{m_i}) for every remaining point
    let mut modulus = Polynomial::one();
    let mut expansion = Polynomial::zero();
    for (point, &multiplicity) in remaining.iter().filter(|(_, m)| **m > 0) {
        let (x, _) = point.coordinates()?;
        let local_modulus = Polynomial::linear_factor(x).pow(multiplicity as u64);
        let local = hensel_lift(point, multiplicity)?;
        let correction = RationalFunction::new(&local - &expansion, modulus.clone())
            .reduce_mod(&local_modulus)?;
        expansion = &expansion + &(&modulus * &correction);
        modulus = &modulus * &local_modulus;
    }

    let n = modulus.degree();
    let (a, b) = if n == 0 {
        (Polynomial::one(), Polynomial::zero())
    } else {
        let bound = n / 2 + 1;
        let (mut r0, mut r1) = (modulus, expansion);
        let (mut t0, mut t1) = (Polynomial::zero(), Polynomial::one());
        while r1.degree() >= bound {
            let (quotient, remainder) = r0.div_rem(&r1)?;
            r0 = std::mem::replace(&mut r1, remainder);
            let next_t = &t0 - &(&quotient * &t1);
            t0 = std::mem::replace(&mut t1, next_t);
        }
        (r1, t1)
    };

    debug!(
        degree = n,
        deg_a = a.degree(),
        deg_b = b.degree(),
        "reduced witness done"
    );
    Ok(FunctionFieldElement::new(&vertical * &a, &vertical * &b))
}

/// Checks that `f` vanishes at every finite point of `divisor` with positive
/// multiplicity.
///
/// Only the existence of a root is checked; see [`test_witness_order`] for the
/// vanishing order.
///
/// # Errors
/// [`Error::NegativeMultiplicityAtFinitePoint`] for a negative finite entry.
pub fn test_witness<C: CurveConfig>(
    f: &FunctionFieldElement<C>,
    divisor: &Divisor<C>,
) -> Result<bool> {
    for (point, multiplicity) in divisor.iter() {
        if point.is_identity() {
            continue;
        }
        if multiplicity < 0 {
            return Err(Error::NegativeMultiplicityAtFinitePoint(multiplicity));
        }
        if multiplicity == 0 {
            continue;
        }
        if !f.evaluate(point)?.is_zero() {
            warn!(%point, multiplicity, "witness does not vanish");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Like [`test_witness`], but also checks that `f` vanishes to at least the
/// given multiplicity: `a − v·b ≡ 0 (mod (x − x_P)^m)` with `v` the expansion
/// of `y` at `P` to precision `m`.
///
/// # Errors
/// As [`test_witness`], plus whatever [`hensel_lift`] reports.
pub fn test_witness_order<C: CurveConfig>(
    f: &FunctionFieldElement<C>,
    divisor: &Divisor<C>,
) -> Result<bool> {
    for (point, multiplicity) in divisor.iter() {
        if point.is_identity() {
            continue;
        }
        if multiplicity < 0 {
            return Err(Error::NegativeMultiplicityAtFinitePoint(multiplicity));
        }
        if multiplicity == 0 {
            continue;
        }

        let (xp, _) = point.coordinates()?;
        let v = hensel_lift(point, multiplicity)?;
        let local = &f.a - &(&v * &f.b);
        let modulus = Polynomial::linear_factor(xp).pow(multiplicity as u64);
        if !local.modulo(&modulus)?.is_zero() {
            warn!(%point, multiplicity, "witness vanishes to lower order");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Checks that the zero divisor of `f` is exactly the finite part of
/// `divisor`: `norm(f) = c·Π (x − x_i)^{m_i}` for a non-zero constant `c`,
/// and `f` vanishes to order `m_i` at each `P_i`.
///
/// # Errors
/// As [`test_witness_order`].
pub fn test_witness_divisor<C: CurveConfig>(
    f: &FunctionFieldElement<C>,
    divisor: &Divisor<C>,
) -> Result<bool> {
    let mut zeros = Polynomial::one();
    for (point, multiplicity) in finite_entries(divisor)? {
        let (x, _) = point.coordinates()?;
        zeros = &zeros * &Polynomial::linear_factor(x).pow(multiplicity as u64);
    }

    let norm = f.norm();
    if norm.degree() != zeros.degree() {
        warn!(
            norm_degree = norm.degree(),
            expected = zeros.degree(),
            "witness has zeros outside the divisor"
        );
        return Ok(false);
    }
    let (_, remainder) = norm.div_rem(&zeros)?;
    if !remainder.is_zero() {
        warn!("witness norm does not match the divisor");
        return Ok(false);
    }
    test_witness_order(f, divisor)
}
