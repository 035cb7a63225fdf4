//! Elliptic Curve Groups over Finite Fields
//!
//! Curves in short Weierstrass form y² = x³ + ax + b (characteristic > 3).
//! Curve parameters live in a [`CurveConfig`] type, so a [`Point`] carries its
//! curve in its type and the group law needs no curve object at run time.

use crate::bigint::{BigInt, BigInt256};
use crate::error::{Error, Result};
use crate::field_trait::FieldElement;
use crate::scalar::random_scalar;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};

/// Compile-time parameters of a short Weierstrass curve
pub trait CurveConfig: 'static + Sized + Clone + fmt::Debug + Send + Sync {
    /// Field the coordinates live in
    type BaseField: FieldElement;

    /// Coefficient `a` of y² = x³ + ax + b
    fn a() -> Self::BaseField;

    /// Coefficient `b` of y² = x³ + ax + b
    fn b() -> Self::BaseField;

    /// Fixed generator of the group used for sampling
    fn generator() -> Point<Self>;

    /// Order of [`CurveConfig::generator`]
    fn order() -> &'static BigInt256;

    /// Right-hand side of the curve equation at `x`: x³ + ax + b
    fn rhs(x: &Self::BaseField) -> Self::BaseField {
        x.square() * x.clone() + Self::a() * x.clone() + Self::b()
    }

    /// Checks the discriminant condition 4a³ + 27b² ≠ 0
    fn is_nonsingular() -> bool {
        let a = Self::a();
        let b = Self::b();
        let four = Self::BaseField::from_u64(4);
        let twenty_seven = Self::BaseField::from_u64(27);
        let discriminant = four * a.square() * a + twenty_seven * b.square();
        !discriminant.is_zero()
    }
}

/// A point on the curve `C`
pub enum Point<C: CurveConfig> {
    /// The point at infinity (identity element)
    Identity,
    /// A point with affine coordinates (x, y)
    Affine {
        x: C::BaseField,
        y: C::BaseField,
    },
}

// Written by hand: derive would demand `C: PartialEq` and friends.
impl<C: CurveConfig> Clone for Point<C> {
    fn clone(&self) -> Self {
        match self {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: y.clone(),
            },
        }
    }
}

impl<C: CurveConfig> PartialEq for Point<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Point::Identity, Point::Identity) => true,
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                x1 == x2 && y1 == y2
            }
            _ => false,
        }
    }
}

impl<C: CurveConfig> Eq for Point<C> {}

impl<C: CurveConfig> PartialOrd for Point<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The identity sorts first, affine points by `(x, y)`.
impl<C: CurveConfig> Ord for Point<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Point::Identity, Point::Identity) => Ordering::Equal,
            (Point::Identity, Point::Affine { .. }) => Ordering::Less,
            (Point::Affine { .. }, Point::Identity) => Ordering::Greater,
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                x1.cmp(x2).then_with(|| y1.cmp(y2))
            }
        }
    }
}

impl<C: CurveConfig> Hash for Point<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Point::Identity => state.write_u8(0),
            Point::Affine { x, y } => {
                state.write_u8(1);
                x.hash(state);
                y.hash(state);
            }
        }
    }
}

impl<C: CurveConfig> Point<C> {
    pub fn identity() -> Self {
        Point::Identity
    }

    /// Checked constructor: fails with [`Error::NotOnCurve`] unless
    /// y² = x³ + ax + b.
    pub fn new(x: C::BaseField, y: C::BaseField) -> Result<Self> {
        let p = Point::Affine { x, y };
        if p.on_curve() {
            Ok(p)
        } else {
            Err(Error::NotOnCurve)
        }
    }

    pub fn generator() -> Self {
        C::generator()
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    pub fn x(&self) -> Option<&C::BaseField> {
        match self {
            Point::Identity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&C::BaseField> {
        match self {
            Point::Identity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    /// Affine coordinates, or [`Error::IdentityHasNoCoordinates`] for the
    /// point at infinity.
    pub fn coordinates(&self) -> Result<(&C::BaseField, &C::BaseField)> {
        match self {
            Point::Identity => Err(Error::IdentityHasNoCoordinates),
            Point::Affine { x, y } => Ok((x, y)),
        }
    }

    pub fn on_curve(&self) -> bool {
        match self {
            Point::Identity => true,
            Point::Affine { x, y } => y.square() == C::rhs(x),
        }
    }

    pub fn negate(&self) -> Self {
        match self {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: -y.clone(),
            },
        }
    }

    /// Tangent-line doubling.
    ///
    /// A point with y = 0 has a vertical tangent; doubling it directly is
    /// rejected with [`Error::UndefinedGroupOperation`]. (`p.add(&p)` returns
    /// the identity for such points, since there `p == -p`.)
    pub fn double(&self) -> Result<Self> {
        match self {
            Point::Identity => Ok(Point::Identity),
            Point::Affine { x, y } => {
                if y.is_zero() {
                    return Err(Error::UndefinedGroupOperation);
                }
                Ok(Self::tangent(x, y))
            }
        }
    }

    /// Group addition.
    ///
    /// Cases in priority order: an identity operand yields the other operand;
    /// equal x with y₁ = −y₂ yields the identity; equal points are doubled;
    /// anything else takes the chord.
    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Point::Identity, _) => other.clone(),
            (_, Point::Identity) => self.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                if x1 == x2 && *y1 == -y2.clone() {
                    return Point::Identity;
                }
                if x1 == x2 {
                    // y1 == y2 != 0 here
                    return Self::tangent(x1, y1);
                }
                let lambda = div_nonzero(y2.clone() - y1.clone(), &(x2.clone() - x1.clone()));
                Self::third_point(lambda, x1, y1, x2)
            }
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    fn tangent(x: &C::BaseField, y: &C::BaseField) -> Self {
        let three = C::BaseField::from_u64(3);
        let numerator = three * x.square() + C::a();
        let lambda = div_nonzero(numerator, &y.double());
        Self::third_point(lambda, x, y, x)
    }

    // x3 = λ² − x1 − x2, y3 = λ(x1 − x3) − y1
    fn third_point(
        lambda: C::BaseField,
        x1: &C::BaseField,
        y1: &C::BaseField,
        x2: &C::BaseField,
    ) -> Self {
        let x3 = lambda.square() - x1.clone() - x2.clone();
        let y3 = lambda * (x1.clone() - x3.clone()) - y1.clone();
        Point::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication by a machine integer.
    ///
    /// `0` gives the identity; a negative scalar multiplies the negated point
    /// by `|k|`.
    pub fn scalar_mul(&self, k: i64) -> Self {
        let magnitude = BigInt::<1>::from_u64(k.unsigned_abs());
        if k < 0 {
            self.negate().mul_bigint(&magnitude)
        } else {
            self.mul_bigint(&magnitude)
        }
    }

    /// Double-and-add over the bits of `k`, least significant bit first.
    pub fn mul_bigint<const M: usize>(&self, k: &BigInt<M>) -> Self {
        let mut result = Point::Identity;
        let mut addend = self.clone();
        let bits = k.bit_length();

        for i in 0..bits {
            if k.get_bit(i) {
                result = result.add(&addend);
            }
            if i + 1 < bits {
                addend = addend.add(&addend);
            }
        }
        result
    }

    /// Uniformly random multiple `[k]G`, `k` in `[1, order − 1]`, using the
    /// thread-local generator.
    pub fn random_point() -> Self {
        Self::random_point_with(&mut rand::rng())
    }

    /// Same as [`Point::random_point`] with a caller-supplied generator.
    pub fn random_point_with<R: Rng>(rng: &mut R) -> Self {
        let k = random_scalar(rng, C::order());
        C::generator().mul_bigint(&k)
    }
}

// The denominators reaching this are non-zero by construction: the chord
// needs x1 != x2 and the tangent y != 0.
fn div_nonzero<F: FieldElement>(numerator: F, denominator: &F) -> F {
    match denominator.inverse() {
        Ok(inv) => numerator * inv,
        Err(_) => unreachable!("slope denominator is zero"),
    }
}

impl<C: CurveConfig> Add<&Point<C>> for &Point<C> {
    type Output = Point<C>;
    fn add(self, other: &Point<C>) -> Point<C> {
        Point::add(self, other)
    }
}

impl<C: CurveConfig> Sub<&Point<C>> for &Point<C> {
    type Output = Point<C>;
    fn sub(self, other: &Point<C>) -> Point<C> {
        Point::sub(self, other)
    }
}

impl<C: CurveConfig> Neg for Point<C> {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: CurveConfig> fmt::Debug for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Identity => write!(f, "Identity"),
            Point::Affine { x, y } => write!(f, "Affine({:?}, {:?})", x, y),
        }
    }
}

impl<C: CurveConfig> fmt::Display for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Identity => write!(f, "O (point at infinity)"),
            Point::Affine { x, y } => write!(f, "({:?}, {:?})", x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_curves::{f, pt, PrimeOrderCurve, TorsionCurve, F97};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type P = Point<PrimeOrderCurve>;
    type T = Point<TorsionCurve>;

    #[test]
    fn test_curves_are_nonsingular() {
        assert!(PrimeOrderCurve::is_nonsingular());
        assert!(TorsionCurve::is_nonsingular());
    }

    #[test]
    fn test_checked_constructor() {
        assert_eq!(P::new(f(0), f(1)), Ok(pt(0, 1)));
        assert_eq!(P::new(f(0), f(2)), Err(Error::NotOnCurve));
        assert!(P::generator().on_curve());
        assert!(T::generator().on_curve());
    }

    #[test]
    #[should_panic]
    fn test_point_helper_rejects_off_curve_coordinates() {
        let _ = pt(0, 2);
    }

    #[test]
    fn test_coordinates() {
        let g = P::generator();
        assert_eq!(g.x(), Some(&f(0)));
        assert_eq!(g.y(), Some(&f(1)));
        assert_eq!(P::identity().x(), None);
        assert_eq!(
            P::identity().coordinates(),
            Err(Error::IdentityHasNoCoordinates)
        );
    }

    #[test]
    fn test_known_multiples() {
        let g = P::generator();
        assert_eq!(g.add(&g), pt(73, 11));
        assert_eq!(g.double(), Ok(pt(73, 11)));
        assert_eq!(g.scalar_mul(3), pt(72, 29));
        assert_eq!(g.scalar_mul(4), pt(50, 55));
        assert_eq!(g.scalar_mul(5), pt(82, 54));
        assert_eq!(pt(73, 11).add(&pt(73, 11)), pt(50, 55));
    }

    #[test]
    fn test_group_law_sanity() {
        let g = P::generator();
        let p = g.scalar_mul(7);
        let q = g.scalar_mul(11);

        // identity
        assert_eq!(p.add(&P::identity()), p);
        assert_eq!(P::identity().add(&p), p);

        // inverse
        assert_eq!(p.add(&p.negate()), P::identity());
        assert_eq!(&p - &p, P::identity());
        assert_eq!(-P::identity(), P::identity());

        // commutativity and closure
        assert_eq!(&p + &q, &q + &p);
        assert!((&p + &q).on_curve());
        assert_eq!(p.add(&q), g.scalar_mul(18));

        // associativity
        let r = g.scalar_mul(40);
        assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
    }

    #[test]
    fn test_scalar_mul_edge_cases() {
        let g = P::generator();
        assert_eq!(g.scalar_mul(0), P::identity());
        assert_eq!(g.scalar_mul(1), g);
        assert_eq!(g.scalar_mul(97), P::identity());
        assert_eq!(g.scalar_mul(98), g);
        assert_eq!(g.scalar_mul(-3), g.scalar_mul(3).negate());
        assert_eq!(P::identity().scalar_mul(12345), P::identity());
        assert_eq!(P::identity().scalar_mul(-5), P::identity());
    }

    #[test]
    fn test_mul_bigint_matches_scalar_mul() {
        let g = P::generator();
        for k in [0u64, 1, 2, 45, 96, 200] {
            assert_eq!(g.mul_bigint(&BigInt256::from_u64(k)), g.scalar_mul(k as i64));
        }
    }

    #[test]
    fn test_two_torsion() {
        let p = T::new(F97::from_u64(30), F97::zero()).unwrap();

        assert_eq!(p.double(), Err(Error::UndefinedGroupOperation));
        assert_eq!(p.add(&p), T::identity());
        assert_eq!(p.negate(), p);
        assert_eq!(p.scalar_mul(2), T::identity());
        assert_eq!(p.scalar_mul(3), p);

        // the three 2-torsion points sum to the identity
        let q = T::new(F97::from_u64(68), F97::zero()).unwrap();
        let r = T::new(F97::from_u64(96), F97::zero()).unwrap();
        assert_eq!(p.add(&q), r);
        assert_eq!(p.add(&q).add(&r), T::identity());
    }

    #[test]
    fn test_generator_order() {
        let g = T::generator();
        assert_eq!(g.scalar_mul(5), T::identity());
        assert_ne!(g.scalar_mul(4), T::identity());
    }

    #[test]
    fn test_random_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let p = P::random_point_with(&mut rng);
            assert!(p.on_curve());
            assert!(!p.is_identity());
        }
        assert!(P::random_point().on_curve());
    }

    #[test]
    fn test_ordering_puts_identity_first() {
        let mut points = vec![pt(73, 11), P::identity(), pt(0, 1)];
        points.sort();
        assert_eq!(points, vec![P::identity(), pt(0, 1), pt(73, 11)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(P::identity().to_string(), "O (point at infinity)");
        assert_eq!(pt(0, 1).to_string(), "(0x0, 0x1)");
    }
}
