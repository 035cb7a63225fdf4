//! Small curves over F_97 shared by the unit tests.

use crate::bigint::{BigInt, BigInt256};
use crate::elliptic_curve::{CurveConfig, Point};
use crate::field::{FieldConfig, FieldElement, PrimeField};
use crate::montgomery::MontgomeryCtx;
use once_cell::sync::Lazy;

#[derive(Clone, Debug)]
pub struct F97Config;

static F97_MODULUS: BigInt256 = BigInt::from_u64(97);
static F97_MONT: Lazy<MontgomeryCtx<4>> = Lazy::new(|| {
    MontgomeryCtx::new(F97_MODULUS).expect("97 is odd")
});

impl FieldConfig<4> for F97Config {
    fn modulus() -> &'static BigInt256 {
        &F97_MODULUS
    }

    fn montgomery() -> &'static MontgomeryCtx<4> {
        &F97_MONT
    }
}

pub type F97 = PrimeField<F97Config, 4>;

pub fn f(v: i64) -> F97 {
    F97::from_i64(v)
}

/// y² = x³ + x + 1 over F_97, a cyclic group of prime order 97.
#[derive(Clone, Debug)]
pub struct PrimeOrderCurve;

static PRIME_ORDER: BigInt256 = BigInt::from_u64(97);

impl CurveConfig for PrimeOrderCurve {
    type BaseField = F97;

    fn a() -> F97 {
        F97::one()
    }

    fn b() -> F97 {
        F97::one()
    }

    fn generator() -> Point<Self> {
        Point::Affine {
            x: F97::zero(),
            y: F97::one(),
        }
    }

    fn order() -> &'static BigInt256 {
        &PRIME_ORDER
    }
}

/// y² = x³ + 2x + 3 over F_97: 100 points, including the 2-torsion points
/// (30, 0), (68, 0) and (96, 0). The generator (3, 6) has order 5.
#[derive(Clone, Debug)]
pub struct TorsionCurve;

static TORSION_GEN_ORDER: BigInt256 = BigInt::from_u64(5);

impl CurveConfig for TorsionCurve {
    type BaseField = F97;

    fn a() -> F97 {
        F97::from_u64(2)
    }

    fn b() -> F97 {
        F97::from_u64(3)
    }

    fn generator() -> Point<Self> {
        Point::Affine {
            x: F97::from_u64(3),
            y: F97::from_u64(6),
        }
    }

    fn order() -> &'static BigInt256 {
        &TORSION_GEN_ORDER
    }
}

/// Point on [`PrimeOrderCurve`]; panics if `(x, y)` is off the curve.
pub fn pt(x: i64, y: i64) -> Point<PrimeOrderCurve> {
    Point::new(f(x), f(y)).unwrap()
}
