//! Divisor Witness Library
//!
//! This library computes, for a principal divisor on an elliptic curve, a
//! function-field element ("witness") vanishing at its points. The product
//! of per-point Mumford witnesses vanishes to the right order at every point;
//! the reduced witness has exactly the divisor's zeros. The layers
//! build on each other: prime fields, the curve group, polynomials, rational
//! functions, divisors and finally function-field witnesses. The concrete
//! instantiation is the G1 group of BN254.

/// Big integer arithmetic module for finite field implementation
pub mod bigint;
/// BN254 base field and G1 curve parameters
pub mod bn254;
/// Formal sums of curve points
pub mod divisor;
/// Elliptic curve groups in short Weierstrass form
pub mod elliptic_curve;
/// Error type shared by all layers
pub mod error;
/// Finite field implementations (F_p)
pub mod field;
/// Re-export field trait module from field namespace
pub use field::field_trait;
/// Function-field elements and Mumford witnesses
pub mod function_field;
/// Montgomery modular arithmetic context
pub mod montgomery;
/// Univariate polynomial ring over a field
pub mod polynomial;
/// Quotients of polynomials
pub mod rational_function;
/// Signed base-(-3) scalar digits
pub mod scalar;

#[cfg(test)]
pub(crate) mod test_curves;

pub use bn254::{Bn254, Fq, G1Divisor, G1FunctionFieldElement, G1Point};
pub use divisor::Divisor;
pub use elliptic_curve::{CurveConfig, Point};
pub use error::{Error, Result};
pub use function_field::{
    batch_mumford_witness, hensel_lift, mumford_witness, reduced_witness, test_witness,
    test_witness_divisor, test_witness_order, FunctionFieldElement,
};
pub use polynomial::Polynomial;
pub use rational_function::{Evaluation, RationalFunction};
