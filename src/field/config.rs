//! Field configuration trait
//!
//! Defines the `FieldConfig` trait used to specify field parameters
//! at compile time, enabling type-safe field arithmetic.

use crate::bigint::BigInt;
use crate::montgomery::MontgomeryCtx;
use std::fmt;

/// Configuration trait for defining prime field parameters at compile time
///
/// Types implementing this trait define the prime modulus p. The Rust type
/// system ensures that field elements with different configurations cannot be
/// mixed.
///
/// Both accessors hand out `'static` data: the modulus is usually a `static`
/// constant and the Montgomery context a `once_cell::sync::Lazy` built on
/// first use and read-only afterwards.
///
/// # Example
/// ```
/// use divisor_witness::bigint::BigInt;
/// use divisor_witness::field::FieldConfig;
/// use divisor_witness::montgomery::MontgomeryCtx;
/// use once_cell::sync::Lazy;
///
/// #[derive(Clone, Debug)]
/// struct F97Config;
///
/// static F97_MODULUS: BigInt<4> = BigInt::from_u64(97);
/// static F97_MONT: Lazy<MontgomeryCtx<4>> = Lazy::new(|| {
///     MontgomeryCtx::new(F97_MODULUS).expect("97 is odd")
/// });
///
/// impl FieldConfig<4> for F97Config {
///     fn modulus() -> &'static BigInt<4> {
///         &F97_MODULUS
///     }
///
///     fn montgomery() -> &'static MontgomeryCtx<4> {
///         &F97_MONT
///     }
/// }
/// ```
pub trait FieldConfig<const N: usize>: 'static + Sized + Clone + fmt::Debug + Send + Sync {
    /// Returns the prime modulus p of the field
    fn modulus() -> &'static BigInt<N>;

    /// Returns the Montgomery context for `modulus()`
    fn montgomery() -> &'static MontgomeryCtx<N>;
}
