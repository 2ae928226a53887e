use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::trace;

use super::{approx_eq, AlleleComboProbability};
use crate::base::{Genotype, SpeciesIndex};
use crate::catalog::AlleleCatalog;
use crate::combo::{specificity_order, AlleleCombo};

/// A scalar-valued function over the genotypes of every species.
///
/// A `GeneticProbability` is a default value plus, per species, a list of
/// [`AlleleComboProbability`] entries kept from least to most specific. The
/// value at a genotype is the value of the most specific entry whose combo
/// matches it, or the default when none does.
///
/// Arithmetic between probabilities (see the `std::ops` impls) merges the
/// entry lists so that the value at every genotype equals the arithmetic on
/// the operands' values at that genotype.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    into = "GeneticProbabilityRecord",
    from = "GeneticProbabilityRecord"
)]
pub struct GeneticProbability {
    default_value: f64,
    combos_per_species: BTreeMap<SpeciesIndex, Vec<AlleleComboProbability>>,
}

impl GeneticProbability {
    /// A probability that is `default_value` for every genotype.
    pub fn new(default_value: f64) -> Self {
        Self {
            default_value,
            combos_per_species: BTreeMap::new(),
        }
    }

    /// `value` for exactly one genotype of one species, zero elsewhere.
    pub fn from_genotype(species_index: SpeciesIndex, genotype: Genotype, value: f64) -> Self {
        Self::from(AlleleComboProbability::from_genotype(
            species_index,
            genotype,
            value,
        ))
    }

    #[inline]
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// True when no combo-specific entries exist.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.combos_per_species.is_empty()
    }

    /// Total number of entries across all species.
    pub fn num_allele_combo_probabilities(&self) -> usize {
        self.combos_per_species.values().map(Vec::len).sum()
    }

    /// Entries for `species_index`, least specific first.
    pub fn allele_combo_probabilities(&self, species_index: SpeciesIndex) -> &[AlleleComboProbability] {
        self.combos_per_species
            .get(&species_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Species that have at least one entry.
    pub fn species(&self) -> impl Iterator<Item = SpeciesIndex> + '_ {
        self.combos_per_species.keys().copied()
    }

    /// Insert `acp` in specificity order.
    ///
    /// This is the configuration-time accumulator: no arithmetic is applied,
    /// and for genotypes matched by several entries the most specific entry
    /// wins during lookup.
    pub fn insert(&mut self, acp: AlleleComboProbability) {
        let entries = self
            .combos_per_species
            .entry(acp.species_index())
            .or_default();
        entries.push(acp);
        sort_entries(entries);
    }

    /// Value at `genotype` for `species_index`.
    pub fn value(&self, species_index: SpeciesIndex, genotype: Genotype) -> f64 {
        self.allele_combo_probabilities(species_index)
            .iter()
            .rev()
            .find(|acp| acp.allele_combo().is_match(species_index, genotype))
            .map_or(self.default_value, AlleleComboProbability::value)
    }

    /// Combos of `expected` that have no identical combo in `self`.
    ///
    /// `self` is the merged result of a configuration and `expected` is the
    /// arithmetic sum of the raw configured entries. A combo present in
    /// `expected` but not in `self` marks a region covered by more than one
    /// configured entry that the user never gave a value of its own.
    pub fn find_missing_allele_combos(&self, expected: &GeneticProbability) -> Vec<AlleleCombo> {
        expected
            .combos_per_species
            .iter()
            .flat_map(|(&species_index, expected_entries)| {
                let present = self.allele_combo_probabilities(species_index);
                expected_entries
                    .iter()
                    .map(AlleleComboProbability::allele_combo)
                    .filter(move |combo| !present.iter().any(|acp| acp.allele_combo() == *combo))
                    .cloned()
            })
            .collect()
    }

    /// Sum of the default and every entry value.
    pub fn sum(&self) -> f64 {
        self.combos_per_species
            .values()
            .flatten()
            .fold(self.default_value, |acc, acp| acc + acp.value())
    }

    /// Convert rates into per-step probabilities: `1 - exp(-dt * v)` for the
    /// default and every entry.
    pub fn expcdf(&self, dt: f64) -> GeneticProbability {
        let mut result = self.clone();
        result.map_values(|v| 1.0 - (-dt * v).exp());
        result
    }

    /// Overwrite the default and every entry with `value`, keeping the combos.
    pub fn fill(&mut self, value: f64) {
        self.map_values(|_| value);
    }

    /// Human-readable listing of the entries for one species.
    pub fn render<C: AlleleCatalog + ?Sized>(&self, species_index: SpeciesIndex, catalog: &C) -> String {
        let mut rendered = format!("Default={}\n", self.default_value);
        for acp in self.allele_combo_probabilities(species_index) {
            rendered.push_str(&format!("{}\n", acp.render(catalog)));
        }
        rendered
    }

    /// Apply `f` to the default and every entry value.
    pub(crate) fn map_values(&mut self, f: impl Fn(f64) -> f64) {
        self.default_value = f(self.default_value);
        for acp in self.combos_per_species.values_mut().flatten() {
            acp.set_value(f(acp.value()));
        }
    }

    /// `self = self ⊕ right`, merging entry lists species by species.
    pub(crate) fn combine_assign(&mut self, right: &GeneticProbability, op: impl Fn(f64, f64) -> f64) {
        if self.is_scalar() && right.is_scalar() {
            self.default_value = op(self.default_value, right.default_value);
            return;
        }

        let species: BTreeSet<SpeciesIndex> = self.species().chain(right.species()).collect();
        for species_index in species {
            let lefts = self.allele_combo_probabilities(species_index);
            let merged = merge_species(
                lefts,
                right.allele_combo_probabilities(species_index),
                self.default_value,
                right.default_value,
                &op,
            );
            trace!(
                species_index,
                before = lefts.len(),
                after = merged.len(),
                "merged allele combo probabilities"
            );
            self.combos_per_species.insert(species_index, merged);
        }

        self.default_value = op(self.default_value, right.default_value);
    }

    /// `self ⊕ right` as a new value.
    pub(crate) fn combine(&self, right: &GeneticProbability, op: impl Fn(f64, f64) -> f64) -> GeneticProbability {
        let mut result = self.clone();
        result.combine_assign(right, op);
        result
    }
}

/// Merge the entries of one species.
///
/// The result has one entry per overlay region: every combo of either side,
/// plus every intersection that takes at least one combo from each side.
/// That set holds, for any genotype, the intersection of all combos matching
/// it, which sorts after every other matching region. Each region gets `op`
/// of the values both sides assign to it, so lookup in the result agrees
/// with `op` of the lookups in the operands.
fn merge_species(
    lefts: &[AlleleComboProbability],
    rights: &[AlleleComboProbability],
    left_default: f64,
    right_default: f64,
    op: &impl Fn(f64, f64) -> f64,
) -> Vec<AlleleComboProbability> {
    let mut merged: Vec<AlleleComboProbability> = overlay_regions(lefts, rights)
        .into_iter()
        .map(|region| {
            let value = op(
                region_value(lefts, &region, left_default),
                region_value(rights, &region, right_default),
            );
            AlleleComboProbability::new(region, value)
        })
        .collect();
    sort_entries(&mut merged);
    merged
}

fn overlay_regions(lefts: &[AlleleComboProbability], rights: &[AlleleComboProbability]) -> Vec<AlleleCombo> {
    let operands: Vec<&AlleleCombo> = lefts
        .iter()
        .chain(rights)
        .map(AlleleComboProbability::allele_combo)
        .collect();

    let mut seen: HashSet<AlleleCombo> = HashSet::new();
    let mut regions: Vec<AlleleCombo> = Vec::new();
    for &combo in &operands {
        if seen.insert(combo.clone()) {
            regions.push(combo.clone());
        }
    }

    let mut pending: Vec<AlleleCombo> = lefts
        .iter()
        .flat_map(|left| {
            rights
                .iter()
                .filter_map(move |right| left.allele_combo().intersect(right.allele_combo()))
        })
        .collect();
    let mut overlaps: HashSet<AlleleCombo> = HashSet::new();
    while let Some(overlap) = pending.pop() {
        if !overlaps.insert(overlap.clone()) {
            continue;
        }
        pending.extend(operands.iter().filter_map(|combo| overlap.intersect(combo)));
        if seen.insert(overlap.clone()) {
            regions.push(overlap);
        }
    }
    regions
}

/// Value `entries` give every genotype of `region`: the most specific entry
/// containing the whole region, else `default`.
fn region_value(entries: &[AlleleComboProbability], region: &AlleleCombo, default: f64) -> f64 {
    entries
        .iter()
        .rev()
        .find(|acp| acp.allele_combo().contains(region))
        .map_or(default, AlleleComboProbability::value)
}

fn sort_entries(entries: &mut [AlleleComboProbability]) {
    entries.sort_by(|a, b| specificity_order(a.allele_combo(), b.allele_combo()));
}

impl From<f64> for GeneticProbability {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<AlleleComboProbability> for GeneticProbability {
    /// `acp.value()` inside the combo, zero elsewhere.
    fn from(acp: AlleleComboProbability) -> Self {
        let mut gp = Self::new(0.0);
        gp.insert(acp);
        gp
    }
}

impl PartialEq for GeneticProbability {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.default_value, other.default_value)
            && self.combos_per_species == other.combos_per_species
    }
}

impl PartialEq<f64> for GeneticProbability {
    fn eq(&self, other: &f64) -> bool {
        self.is_scalar() && approx_eq(self.default_value, *other)
    }
}

/// Archived form of a [`GeneticProbability`]: entries flattened species by
/// species in stored order.
#[derive(Serialize, Deserialize)]
struct GeneticProbabilityRecord {
    default_value: f64,
    allele_combos: Vec<AlleleComboProbability>,
}

impl From<GeneticProbability> for GeneticProbabilityRecord {
    fn from(gp: GeneticProbability) -> Self {
        Self {
            default_value: gp.default_value,
            allele_combos: gp.combos_per_species.into_values().flatten().collect(),
        }
    }
}

impl From<GeneticProbabilityRecord> for GeneticProbability {
    fn from(record: GeneticProbabilityRecord) -> Self {
        let mut gp = Self::new(record.default_value);
        for acp in record.allele_combos {
            gp.insert(acp);
        }
        gp
    }
}
