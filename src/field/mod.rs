//! Prime field arithmetic
//!
//! - [`FieldElement`](field_trait::FieldElement): the operations every layer
//!   above (curve, polynomials, function field) is written against
//! - [`FieldConfig`]: compile-time field parameters (modulus and its
//!   Montgomery context)
//! - [`PrimeField`]: residues modulo the configured prime
//!
//! Elements of fields with different configurations are different types, so
//! mixing them is a compile error rather than a runtime check.

pub mod config;
pub mod field_trait;
pub mod prime;

pub use config::FieldConfig;
pub use field_trait::FieldElement;
pub use prime::PrimeField;
