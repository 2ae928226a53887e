//! The locus/allele catalog seam.
//!
//! Combos store raw bit patterns. Translating allele names into those
//! patterns, and back again for messages, is the job of a catalog that knows
//! the genes configured for one species.

use crate::base::{AlleleIndex, Genotype, LocusIndex};

/// Token that matches every allele at a locus.
pub const WILDCARD: &str = "*";

/// Bit mask and expanded patterns produced from user allele combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboPatterns {
    pub bit_mask: u64,
    pub possible_genomes: Vec<u64>,
}

/// Resolves allele names to locus/allele indices for one species.
pub trait AlleleCatalog {
    type Error: std::error::Error;

    /// Number of loci defined, including the gender locus.
    fn num_loci(&self) -> usize;

    /// Name of `allele` at `locus`, if defined.
    fn allele_name(&self, locus: LocusIndex, allele: AlleleIndex) -> Option<&str>;

    /// Every valid allele token, including [`WILDCARD`].
    fn defined_allele_names(&self) -> Vec<String>;

    /// Convert `[allele, allele]` pairs into a bit mask and the set of
    /// admissible masked genotypes.
    ///
    /// Implementations expand wildcards and both gamete orders, and reject
    /// unknown names or loci used twice. `param_name` is used in messages.
    fn convert_allele_combinations(
        &self,
        param_name: &str,
        combinations: &[Vec<String>],
    ) -> Result<ComboPatterns, Self::Error>;

    /// Render `genotype` as `a-b:a-b`, printing `*` for loci outside `mask`.
    fn render_genotype(&self, genotype: Genotype, mask: u64) -> String {
        let mask = Genotype::from_bits(mask);
        let gamete = |paternal: bool| {
            let pick = |(mom, dad): (AlleleIndex, AlleleIndex)| if paternal { dad } else { mom };
            (0..self.num_loci())
                .map(|locus| {
                    if pick(mask.locus(locus)) == 0 {
                        return WILDCARD.to_string();
                    }
                    let allele = pick(genotype.locus(locus));
                    self.allele_name(locus, allele)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("#{allele}"))
                })
                .collect::<Vec<_>>()
                .join("-")
        };
        format!("{}:{}", gamete(false), gamete(true))
    }
}
