//! Error types shared by every layer of the crate.

use thiserror::Error;

/// Failures of the algebraic operations.
///
/// All of them are deterministic: retrying the same call with the same inputs
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Inverting the additive identity, or dividing by the zero polynomial.
    #[error("division by zero")]
    DivisionByZero,

    /// Exact polynomial division left a non-zero remainder.
    #[error("inexact division: remainder is not zero")]
    InexactDivision,

    /// Doubling a point whose tangent is vertical (y = 0).
    #[error("undefined group operation: doubling a point with y = 0")]
    UndefinedGroupOperation,

    /// Coordinates that do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// The point at infinity was used where affine coordinates are required.
    #[error("the point at infinity has no affine coordinates")]
    IdentityHasNoCoordinates,

    /// Witness construction on a divisor that is not principal.
    #[error("divisor is not principal")]
    NonPrincipalDivisor,

    /// A finite point of the divisor carries a negative multiplicity.
    #[error("negative multiplicity {0} at a finite point")]
    NegativeMultiplicityAtFinitePoint(i64),

    /// The local expansion cannot be built for this point and multiplicity.
    #[error("unsupported multiplicity {0}")]
    UnsupportedMultiplicity(i64),

    /// Interpolation inputs of mismatched or zero length.
    #[error("invalid interpolation input: {0}")]
    InvalidInterpolation(&'static str),

    /// A Hensel lifting stage produced a square root of the wrong precision.
    #[error("hensel lifting failed at precision {0}")]
    HenselLiftFailed(u64),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
