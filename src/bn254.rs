//! BN254 (alt_bn128) G1: y² = x³ + 3 over the 254-bit base field.

use crate::bigint::{BigInt, BigInt256};
use crate::divisor::Divisor;
use crate::elliptic_curve::{CurveConfig, Point};
use crate::field::{FieldConfig, FieldElement, PrimeField};
use crate::function_field::FunctionFieldElement;
use crate::montgomery::MontgomeryCtx;
use once_cell::sync::Lazy;

/// Base field modulus
/// P = 0x30644E72E131A029B85045B68181585D97816A916871CA8D3C208C16D87CFD47
pub static FQ_MODULUS: BigInt256 = BigInt::from_limbs([
    0x3c208c16d87cfd47,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

/// Order of G1
/// N = 0x30644E72E131A029B85045B68181585D2833E84879B9709143E1F593F0000001
pub static G1_ORDER: BigInt256 = BigInt::from_limbs([
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

static FQ_MONT: Lazy<MontgomeryCtx<4>> = Lazy::new(|| {
    MontgomeryCtx::new(FQ_MODULUS).expect("BN254 modulus is odd and below R/4")
});

#[derive(Clone, Debug)]
pub struct Bn254FqConfig;

impl FieldConfig<4> for Bn254FqConfig {
    fn modulus() -> &'static BigInt256 {
        &FQ_MODULUS
    }

    fn montgomery() -> &'static MontgomeryCtx<4> {
        &FQ_MONT
    }
}

/// Element of the BN254 base field
pub type Fq = PrimeField<Bn254FqConfig, 4>;

/// G1 curve parameters: a = 0, b = 3, generator (1, 2).
#[derive(Clone, Debug)]
pub struct Bn254;

impl CurveConfig for Bn254 {
    type BaseField = Fq;

    fn a() -> Fq {
        Fq::zero()
    }

    fn b() -> Fq {
        Fq::from_u64(3)
    }

    fn generator() -> Point<Self> {
        Point::Affine {
            x: Fq::one(),
            y: Fq::from_u64(2),
        }
    }

    fn order() -> &'static BigInt256 {
        &G1_ORDER
    }
}

pub type G1Point = Point<Bn254>;
pub type G1Divisor = Divisor<Bn254>;
pub type G1FunctionFieldElement = FunctionFieldElement<Bn254>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulus_matches_hex() {
        let hex = "30644E72E131A029B85045B68181585D97816A916871CA8D3C208C16D87CFD47";
        assert_eq!(BigInt256::from_hex(hex), Some(FQ_MODULUS));
        assert_eq!(FQ_MODULUS.to_hex(), hex);
        assert_eq!(
            G1_ORDER.to_hex(),
            "30644E72E131A029B85045B68181585D2833E84879B9709143E1F593F0000001"
        );
    }

    #[test]
    fn test_field_wraps_at_modulus() {
        let p_minus_one = Fq::new(FQ_MODULUS.sub_with_borrow(&BigInt::one()).0);
        assert_eq!(p_minus_one, -Fq::one());
        assert_eq!(p_minus_one + Fq::one(), Fq::zero());
        assert_eq!(p_minus_one * p_minus_one, Fq::one());
        assert_eq!(Fq::new(FQ_MODULUS), Fq::zero());
    }

    #[test]
    fn test_inverse_large_element() {
        let a = Fq::from_hex("1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF")
            .unwrap();
        assert_eq!(a * a.inverse().unwrap(), Fq::one());
    }

    #[test]
    fn test_generator() {
        assert!(Bn254::is_nonsingular());
        let g = G1Point::generator();
        assert!(g.on_curve());
        assert_eq!(G1Point::new(Fq::one(), Fq::from_u64(2)), Ok(g.clone()));
        assert!(!g.double().unwrap().is_identity());
    }

    #[test]
    fn test_generator_has_group_order() {
        let g = G1Point::generator();
        assert_eq!(g.mul_bigint(&G1_ORDER), G1Point::identity());

        let n_minus_one = G1_ORDER.sub_with_borrow(&BigInt::one()).0;
        assert_eq!(g.mul_bigint(&n_minus_one), g.negate());
    }
}
