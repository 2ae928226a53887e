//! Shared fixtures for the integration tests: a small two-species catalog
//! and helpers for building combos and genotypes from allele names.

#![allow(dead_code)]

use allelic_algebra::prelude::*;
use allelic_algebra::base::{locus_mask, locus_pattern};
use std::fmt;

pub const GAMBIAE: SpeciesIndex = 0;
pub const FUNESTUS: SpeciesIndex = 1;

#[derive(Debug)]
pub struct UnknownAllele(pub String);

impl fmt::Display for UnknownAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown allele '{}'", self.0)
    }
}

impl std::error::Error for UnknownAllele {}

/// Loci of one species; locus 0 is gender.
pub struct TestCatalog {
    loci: Vec<Vec<&'static str>>,
}

impl TestCatalog {
    /// Genes `a` (a1 a2), `b` (b1..b4) and `c` (c1..c3).
    pub fn gambiae() -> Self {
        Self {
            loci: vec![
                vec!["X", "Y"],
                vec!["a1", "a2"],
                vec!["b1", "b2", "b3", "b4"],
                vec!["c1", "c2", "c3"],
            ],
        }
    }

    /// Genes `d` (d1 d2) and `e` (e1 e2).
    pub fn funestus() -> Self {
        Self {
            loci: vec![vec!["X", "Y"], vec!["d1", "d2"], vec!["e1", "e2"]],
        }
    }

    fn find(&self, name: &str) -> Option<(LocusIndex, AlleleIndex)> {
        self.loci.iter().enumerate().find_map(|(locus, alleles)| {
            alleles
                .iter()
                .position(|&a| a == name)
                .map(|allele| (locus, allele as AlleleIndex))
        })
    }

    fn options(&self, locus: LocusIndex, name: &str) -> Vec<AlleleIndex> {
        if name == WILDCARD {
            (0..self.loci[locus].len() as AlleleIndex).collect()
        } else {
            self.find(name).map(|(_, a)| vec![a]).unwrap_or_default()
        }
    }
}

impl AlleleCatalog for TestCatalog {
    type Error = UnknownAllele;

    fn num_loci(&self) -> usize {
        self.loci.len()
    }

    fn allele_name(&self, locus: LocusIndex, allele: AlleleIndex) -> Option<&str> {
        self.loci.get(locus)?.get(usize::from(allele)).copied()
    }

    fn defined_allele_names(&self) -> Vec<String> {
        self.loci
            .iter()
            .flatten()
            .map(|s| s.to_string())
            .chain(std::iter::once(WILDCARD.to_string()))
            .collect()
    }

    fn convert_allele_combinations(
        &self,
        _param_name: &str,
        combinations: &[Vec<String>],
    ) -> Result<ComboPatterns, Self::Error> {
        let mut bit_mask = 0;
        let mut patterns = vec![0u64];
        for pair in combinations {
            let named = pair
                .iter()
                .find(|n| n.as_str() != WILDCARD)
                .ok_or_else(|| UnknownAllele(WILDCARD.into()))?;
            let (locus, _) = self.find(named).ok_or_else(|| UnknownAllele(named.clone()))?;
            bit_mask |= locus_mask(locus);

            let mut pairs = Vec::new();
            for m in self.options(locus, &pair[0]) {
                for d in self.options(locus, &pair[1]) {
                    pairs.push(locus_pattern(locus, m, d));
                    pairs.push(locus_pattern(locus, d, m));
                }
            }
            patterns = patterns
                .iter()
                .flat_map(|&p| pairs.iter().map(move |&q| p | q))
                .collect();
        }
        Ok(ComboPatterns {
            bit_mask,
            possible_genomes: patterns,
        })
    }
}

/// Build a combo for `species` from `[mom, dad]` name pairs.
pub fn combo(species: SpeciesIndex, catalog: &TestCatalog, pairs: &[[&str; 2]]) -> AlleleCombo {
    let combinations: Vec<Vec<String>> = pairs
        .iter()
        .map(|p| p.iter().map(|s| s.to_string()).collect())
        .collect();
    let patterns = catalog
        .convert_allele_combinations("TestAlleleCombo", &combinations)
        .expect("known alleles");
    AlleleCombo::new(species, patterns.bit_mask, patterns.possible_genomes).expect("valid combo")
}

pub fn gambiae_combo(pairs: &[[&str; 2]]) -> AlleleCombo {
    combo(GAMBIAE, &TestCatalog::gambiae(), pairs)
}

/// Female genotype from per-locus allele indices of each gamete.
pub fn genome(mom: &[AlleleIndex], dad: &[AlleleIndex]) -> Genotype {
    mom.iter()
        .zip(dad)
        .enumerate()
        .fold(Genotype::new(), |g, (i, (&m, &d))| g.with_locus(i + 1, m, d))
}

/// `1.0` scaled by a single combo override, the usual resistance shape.
pub fn resistance(allele_combo: AlleleCombo, resistance: f64, efficacy: f64) -> GeneticProbability {
    let mut gp = GeneticProbability::new(1.0);
    gp.insert(AlleleComboProbability::new(allele_combo, resistance));
    efficacy * gp
}

#[track_caller]
pub fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
