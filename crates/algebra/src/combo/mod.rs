//! Wildcarded genotype regions and their per-thread interner.

mod allele_combo;
mod interner;

pub use allele_combo::{specificity_order, AlleleCombo};
pub use interner::live_combos;
