use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::interner::{self, ComboData};
use crate::base::{count_loci, Genotype, SpeciesIndex, ALL_BITS};
use crate::catalog::AlleleCatalog;
use crate::errors::ComboError;

/// A wildcarded region of genotype space for one species.
///
/// A genotype belongs to the region when its bits under `bit_mask` equal one
/// of the `possible_genomes`. Loci outside the mask are unconstrained.
///
/// `AlleleCombo` is a handle to interned data: cloning is a reference-count
/// bump, and two handles to equal content always point at the same
/// allocation on a given thread.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "AlleleComboRecord", try_from = "AlleleComboRecord")]
pub struct AlleleCombo(Rc<ComboData>);

impl AlleleCombo {
    /// Create a combo from a mask and its admissible masked patterns.
    ///
    /// Patterns are taken as given (wildcards and gamete order already
    /// expanded), then sorted and deduplicated.
    pub fn new(
        species_index: SpeciesIndex,
        bit_mask: u64,
        possible_genomes: impl Into<Vec<u64>>,
    ) -> Result<Self, ComboError> {
        let possible_genomes = possible_genomes.into();
        if bit_mask == 0 {
            return Err(ComboError::EmptyMask { species_index });
        }
        if possible_genomes.is_empty() {
            return Err(ComboError::NoPossibleGenomes { species_index });
        }
        if let Some(&pattern) = possible_genomes.iter().find(|&&p| p & !bit_mask != 0) {
            return Err(ComboError::PatternOutsideMask {
                pattern,
                mask: bit_mask,
            });
        }
        Ok(Self::from_parts(species_index, bit_mask, possible_genomes))
    }

    /// The most specific combo possible: exactly one genotype.
    pub fn from_genotype(species_index: SpeciesIndex, genotype: Genotype) -> Self {
        Self::from_parts(species_index, ALL_BITS, vec![genotype.bits()])
    }

    fn from_parts(species_index: SpeciesIndex, bit_mask: u64, mut possible_genomes: Vec<u64>) -> Self {
        possible_genomes.sort_unstable();
        possible_genomes.dedup();
        Self(interner::intern(ComboData {
            species_index,
            bit_mask,
            num_loci: count_loci(bit_mask),
            possible_genomes: possible_genomes.into_boxed_slice(),
        }))
    }

    #[inline]
    pub fn species_index(&self) -> SpeciesIndex {
        self.0.species_index
    }

    #[inline]
    pub fn bit_mask(&self) -> u64 {
        self.0.bit_mask
    }

    #[inline]
    pub fn possible_genomes(&self) -> &[u64] {
        &self.0.possible_genomes
    }

    /// Number of loci constrained by this combo.
    #[inline]
    pub fn num_loci(&self) -> usize {
        self.0.num_loci
    }

    /// True when the combo pins down every bit of a single genotype.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.0.bit_mask == ALL_BITS
    }

    /// Test whether `genotype` of species `species_index` lies in this region.
    pub fn is_match(&self, species_index: SpeciesIndex, genotype: Genotype) -> bool {
        species_index == self.0.species_index
            && self
                .0
                .possible_genomes
                .binary_search(&genotype.masked(self.0.bit_mask))
                .is_ok()
    }

    /// Region where both combos hold, or `None` when they are disjoint.
    ///
    /// Patterns that agree on the shared loci are merged with `|`; the mask
    /// is the union of both masks.
    pub fn intersect(&self, other: &AlleleCombo) -> Option<AlleleCombo> {
        if self.species_index() != other.species_index() {
            return None;
        }
        let common = self.bit_mask() & other.bit_mask();
        let mut genomes = Vec::with_capacity(self.possible_genomes().len());
        for &left in self.possible_genomes() {
            for &right in other.possible_genomes() {
                if left & common == right & common {
                    genomes.push(left | right);
                }
            }
        }
        if genomes.is_empty() {
            return None;
        }
        Some(Self::from_parts(
            self.species_index(),
            self.bit_mask() | other.bit_mask(),
            genomes,
        ))
    }

    /// True when every genotype of `other` is also in this combo.
    ///
    /// `other` has to constrain at least the loci this combo constrains, and
    /// each of its patterns, cut down to this combo's mask, has to be one of
    /// this combo's patterns.
    pub fn contains(&self, other: &AlleleCombo) -> bool {
        if self.species_index() != other.species_index()
            || self.bit_mask() & other.bit_mask() != self.bit_mask()
        {
            return false;
        }
        other
            .possible_genomes()
            .iter()
            .all(|&pattern| self.possible_genomes().binary_search(&(pattern & self.bit_mask())).is_ok())
    }

    /// Render one line per possible genome using allele names from `catalog`.
    pub fn render<C: AlleleCatalog + ?Sized>(&self, catalog: &C) -> String {
        let lines: Vec<String> = self
            .possible_genomes()
            .iter()
            .map(|&bits| catalog.render_genotype(Genotype::from_bits(bits), self.bit_mask()))
            .collect();
        let mut rendered = lines.join(", \n");
        rendered.push('\n');
        rendered
    }
}

/// Ordering used to keep combo lists from least to most specific.
///
/// Fewer loci sort first. Among equal loci, combos with more possible genomes
/// are less specific and sort first. Remaining ties fall back to the pattern
/// content so the order is total.
pub fn specificity_order(a: &AlleleCombo, b: &AlleleCombo) -> Ordering {
    a.num_loci()
        .cmp(&b.num_loci())
        .then_with(|| b.possible_genomes().len().cmp(&a.possible_genomes().len()))
        .then_with(|| a.possible_genomes().cmp(b.possible_genomes()))
        .then_with(|| a.bit_mask().cmp(&b.bit_mask()))
}

impl PartialEq for AlleleCombo {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for AlleleCombo {}

impl Hash for AlleleCombo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for AlleleCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlleleCombo")
            .field("species_index", &self.0.species_index)
            .field("bit_mask", &format_args!("{:#018x}", self.0.bit_mask))
            .field("possible_genomes", &self.0.possible_genomes.len())
            .finish()
    }
}

/// Archived form of an [`AlleleCombo`].
#[derive(Serialize, Deserialize)]
struct AlleleComboRecord {
    species_index: SpeciesIndex,
    bit_mask: u64,
    possible_genomes: Vec<u64>,
}

impl From<AlleleCombo> for AlleleComboRecord {
    fn from(combo: AlleleCombo) -> Self {
        Self {
            species_index: combo.species_index(),
            bit_mask: combo.bit_mask(),
            possible_genomes: combo.possible_genomes().to_vec(),
        }
    }
}

impl TryFrom<AlleleComboRecord> for AlleleCombo {
    type Error = ComboError;

    fn try_from(record: AlleleComboRecord) -> Result<Self, Self::Error> {
        AlleleCombo::new(record.species_index, record.bit_mask, record.possible_genomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{locus_mask, locus_pattern};

    fn a_combo(pairs: &[(u8, u8)]) -> AlleleCombo {
        let genomes: Vec<u64> = pairs.iter().map(|&(m, d)| locus_pattern(1, m, d)).collect();
        AlleleCombo::new(0, locus_mask(1), genomes).unwrap()
    }

    fn ab_combo(pairs: &[((u8, u8), (u8, u8))]) -> AlleleCombo {
        let genomes: Vec<u64> = pairs
            .iter()
            .map(|&((am, ad), (bm, bd))| locus_pattern(1, am, ad) | locus_pattern(2, bm, bd))
            .collect();
        AlleleCombo::new(0, locus_mask(1) | locus_mask(2), genomes).unwrap()
    }

    #[test]
    fn test_new_rejects_malformed_input() {
        assert_eq!(
            AlleleCombo::new(3, 0, vec![0]),
            Err(ComboError::EmptyMask { species_index: 3 })
        );
        assert_eq!(
            AlleleCombo::new(3, locus_mask(1), Vec::new()),
            Err(ComboError::NoPossibleGenomes { species_index: 3 })
        );
        assert!(matches!(
            AlleleCombo::new(0, locus_mask(1), vec![locus_pattern(2, 1, 1)]),
            Err(ComboError::PatternOutsideMask { .. })
        ));
    }

    #[test]
    fn test_equal_content_is_interned() {
        let a = a_combo(&[(1, 0), (0, 1)]);
        let b = a_combo(&[(0, 1), (1, 0), (0, 1)]);
        assert!(Rc::ptr_eq(&a.0, &b.0));
        assert_eq!(a, b);
        assert_eq!(a.possible_genomes().len(), 2);
    }

    #[test]
    fn test_species_is_part_of_identity() {
        let a = AlleleCombo::new(0, locus_mask(1), vec![locus_pattern(1, 1, 1)]).unwrap();
        let b = AlleleCombo::new(1, locus_mask(1), vec![locus_pattern(1, 1, 1)]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_match() {
        let het = a_combo(&[(0, 1), (1, 0)]);
        assert!(het.is_match(0, Genotype::new().with_locus(1, 0, 1).with_locus(2, 3, 3)));
        assert!(het.is_match(0, Genotype::new().with_locus(1, 1, 0)));
        assert!(!het.is_match(0, Genotype::new().with_locus(1, 1, 1)));
        assert!(!het.is_match(1, Genotype::new().with_locus(1, 0, 1)));
    }

    #[test]
    fn test_intersect_disjoint_loci() {
        let a2a2 = a_combo(&[(1, 1)]);
        let b = AlleleCombo::new(0, locus_mask(2), vec![locus_pattern(2, 0, 0)]).unwrap();

        let both = a2a2.intersect(&b).unwrap();
        assert_eq!(both.bit_mask(), locus_mask(1) | locus_mask(2));
        assert_eq!(both.num_loci(), 2);
        assert_eq!(
            both.possible_genomes(),
            &[locus_pattern(1, 1, 1) | locus_pattern(2, 0, 0)]
        );
    }

    #[test]
    fn test_intersect_same_locus() {
        let a1_any = a_combo(&[(1, 0), (0, 1), (1, 1)]);
        let a0_any = a_combo(&[(0, 0), (0, 1), (1, 0)]);
        let het = a1_any.intersect(&a0_any).unwrap();
        assert_eq!(het, a_combo(&[(0, 1), (1, 0)]));

        let homo0 = a_combo(&[(0, 0)]);
        let homo1 = a_combo(&[(1, 1)]);
        assert!(homo0.intersect(&homo1).is_none());
    }

    #[test]
    fn test_contains() {
        let a1_any = a_combo(&[(1, 0), (0, 1), (1, 1)]);
        let a1a1 = a_combo(&[(1, 1)]);
        let a1a1_b0b0 = ab_combo(&[((1, 1), (0, 0))]);

        assert!(a1a1.contains(&a1a1_b0b0));
        assert!(a1_any.contains(&a1a1_b0b0));
        assert!(!a1a1_b0b0.contains(&a1a1));
        assert!(a1a1.contains(&a1a1));

        // a1a0 and a0a1 fall outside the homozygote
        assert!(!a1a1.contains(&a1_any));

        let exact = AlleleCombo::from_genotype(0, Genotype::new().with_locus(1, 1, 1));
        assert!(a1_any.contains(&exact));
        assert!(!exact.contains(&a1a1));
        assert!(!AlleleCombo::from_genotype(1, Genotype::new().with_locus(1, 1, 1)).contains(&a1a1));
    }

    #[test]
    fn test_specificity_order() {
        let a_any = a_combo(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let a1a1 = a_combo(&[(1, 1)]);
        let a1a1_b0b0 = ab_combo(&[((1, 1), (0, 0))]);
        let exact = AlleleCombo::from_genotype(0, Genotype::new());

        let mut combos = vec![exact.clone(), a1a1_b0b0.clone(), a1a1.clone(), a_any.clone()];
        combos.sort_by(specificity_order);
        assert_eq!(combos, vec![a_any, a1a1, a1a1_b0b0, exact]);
    }
}
