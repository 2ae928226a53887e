//! Genotype-indexed probabilities and their arithmetic.

mod allele_combo_probability;
mod genetic_probability;
mod ops;

pub use allele_combo_probability::AlleleComboProbability;
pub use genetic_probability::GeneticProbability;

/// Tolerance used when comparing probability values for equality.
pub const VALUE_TOLERANCE: f64 = f32::EPSILON as f64;

#[inline]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= VALUE_TOLERANCE
}
