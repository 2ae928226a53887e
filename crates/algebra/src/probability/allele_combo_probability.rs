use serde::{Deserialize, Serialize};

use super::approx_eq;
use crate::base::{Genotype, SpeciesIndex};
use crate::catalog::AlleleCatalog;
use crate::combo::AlleleCombo;

/// A scalar value attached to every genotype in an [`AlleleCombo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlleleComboProbability {
    allele_combo: AlleleCombo,
    value: f64,
}

impl AlleleComboProbability {
    pub fn new(allele_combo: AlleleCombo, value: f64) -> Self {
        Self {
            allele_combo,
            value,
        }
    }

    /// Attach `value` to exactly one genotype.
    pub fn from_genotype(species_index: SpeciesIndex, genotype: Genotype, value: f64) -> Self {
        Self::new(AlleleCombo::from_genotype(species_index, genotype), value)
    }

    #[inline]
    pub fn species_index(&self) -> SpeciesIndex {
        self.allele_combo.species_index()
    }

    #[inline]
    pub fn allele_combo(&self) -> &AlleleCombo {
        &self.allele_combo
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub fn render<C: AlleleCatalog + ?Sized>(&self, catalog: &C) -> String {
        format!(
            "{} = {}",
            self.allele_combo.render(catalog).trim_end(),
            self.value
        )
    }
}

impl PartialEq for AlleleComboProbability {
    fn eq(&self, other: &Self) -> bool {
        self.allele_combo == other.allele_combo && approx_eq(self.value, other.value)
    }
}
