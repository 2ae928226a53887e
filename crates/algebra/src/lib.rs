//! # Algebra Crate
//!
//! The `algebra` crate implements a sparse, genotype-indexed probability
//! algebra. A [`GeneticProbability`](probability::GeneticProbability) attaches
//! scalar modifiers to wildcarded sets of diploid genotypes
//! ([`AlleleCombo`](combo::AlleleCombo)) and combines them with ordinary
//! arithmetic without ever enumerating the genotype space.
//!
//! Combos are interned per thread, so equal combos share one allocation and
//! compare by handle.

pub mod base;
pub mod catalog;
pub mod combo;
pub mod errors;
pub mod prelude;
pub mod probability;
pub mod storage;

pub use base::{Genotype, SpeciesIndex};
pub use combo::AlleleCombo;
pub use probability::{AlleleComboProbability, GeneticProbability};
