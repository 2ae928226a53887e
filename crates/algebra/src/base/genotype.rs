use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of loci in a genome, including the gender locus.
pub const MAX_LOCI: usize = 10;
/// Maximum number of alleles at a single locus.
pub const MAX_ALLELES: usize = 8;
/// Number of bits used to store one allele index.
pub const BITS_PER_LOCUS: u32 = 3;
/// Width of one gamete inside the packed genotype.
pub const GAMETE_BITS: u32 = 32;
/// Mask selecting every bit of a genotype. Combos with this mask describe
/// exactly one genotype.
pub const ALL_BITS: u64 = u64::MAX;

const ALLELE_MASK: u32 = (1 << BITS_PER_LOCUS) - 1;

/// One haploid half of a genotype, `BITS_PER_LOCUS` bits per locus.
pub type Gamete = u32;
pub type AlleleIndex = u8;
pub type LocusIndex = usize;
pub type SpeciesIndex = usize;

/// A packed diploid genotype.
///
/// The maternal gamete occupies the low 32 bits and the paternal gamete the
/// high 32 bits. Locus `i` uses bits `3*i..3*i+3` of each gamete.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Genotype(u64);

impl Genotype {
    /// A genotype with allele 0 on both gametes at every locus.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub fn from_gametes(mom: Gamete, dad: Gamete) -> Self {
        Self(u64::from(mom) | (u64::from(dad) << GAMETE_BITS))
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn mom(self) -> Gamete {
        self.0 as Gamete
    }

    #[inline]
    pub const fn dad(self) -> Gamete {
        (self.0 >> GAMETE_BITS) as Gamete
    }

    /// Set the maternal and paternal allele at `locus`.
    ///
    /// # Panics
    /// Panics if `locus >= MAX_LOCI` or either allele is `>= MAX_ALLELES`.
    pub fn set_locus(&mut self, locus: LocusIndex, mom: AlleleIndex, dad: AlleleIndex) {
        assert!(locus < MAX_LOCI, "locus {locus} out of range");
        assert!(
            usize::from(mom) < MAX_ALLELES && usize::from(dad) < MAX_ALLELES,
            "allele index out of range ({mom}, {dad})"
        );
        self.0 = (self.0 & !locus_mask(locus)) | locus_pattern(locus, mom, dad);
    }

    /// Builder form of [`Genotype::set_locus`].
    #[inline]
    pub fn with_locus(mut self, locus: LocusIndex, mom: AlleleIndex, dad: AlleleIndex) -> Self {
        self.set_locus(locus, mom, dad);
        self
    }

    /// Return the (maternal, paternal) allele pair at `locus`.
    #[inline]
    pub fn locus(self, locus: LocusIndex) -> (AlleleIndex, AlleleIndex) {
        let shift = locus as u32 * BITS_PER_LOCUS;
        (
            ((self.mom() >> shift) & ALLELE_MASK) as AlleleIndex,
            ((self.dad() >> shift) & ALLELE_MASK) as AlleleIndex,
        )
    }

    /// Apply a combo bit mask to this genotype.
    #[inline]
    pub const fn masked(self, mask: u64) -> u64 {
        self.0 & mask
    }
}

impl fmt::Debug for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genotype({:#018x})", self.0)
    }
}

impl From<u64> for Genotype {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

/// Bits of a single gamete covering `locus`.
#[inline]
pub fn gamete_locus_mask(locus: LocusIndex) -> Gamete {
    ALLELE_MASK << (locus as u32 * BITS_PER_LOCUS)
}

/// Mask covering `locus` on both gametes.
#[inline]
pub fn locus_mask(locus: LocusIndex) -> u64 {
    let gamete = u64::from(gamete_locus_mask(locus));
    gamete | (gamete << GAMETE_BITS)
}

/// Packed bits for allele pair (`mom`, `dad`) at `locus`.
#[inline]
pub fn locus_pattern(locus: LocusIndex, mom: AlleleIndex, dad: AlleleIndex) -> u64 {
    let shift = locus as u32 * BITS_PER_LOCUS;
    (u64::from(mom) << shift) | (u64::from(dad) << (shift + GAMETE_BITS))
}

/// Number of loci touched by `mask`.
pub fn count_loci(mask: u64) -> usize {
    let mom = mask as Gamete;
    (0..MAX_LOCI)
        .filter(|&locus| mom & gamete_locus_mask(locus) != 0)
        .count()
}
