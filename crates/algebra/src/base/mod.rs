//! Base types for genotype representation.
//!
//! This module provides the packed diploid genotype key and the bit layout
//! helpers shared by combos and catalogs.

mod genotype;

pub use genotype::{
    count_loci, gamete_locus_mask, locus_mask, locus_pattern, AlleleIndex, Gamete, Genotype,
    LocusIndex, SpeciesIndex, ALL_BITS, BITS_PER_LOCUS, GAMETE_BITS, MAX_ALLELES, MAX_LOCI,
};
