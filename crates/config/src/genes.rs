//! Genes of one species and the catalog that maps allele names to indices.
//!
//! Locus 0 is always the gender gene. Female alleles use indices 0..4 and
//! male alleles 4..8, so bit 2 of the allele marks a Y chromosome. User genes
//! follow at loci 1..N with their alleles indexed in name order.

use crate::errors::{ConfigurationError, Result};
use allelic_algebra::base::{locus_mask, locus_pattern, ALL_BITS, MAX_ALLELES, MAX_LOCI};
use allelic_algebra::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const GENDER_LOCUS: LocusIndex = 0;
pub const FEMALE_ALLELE: &str = "X";
pub const MALE_ALLELE: &str = "Y";

const X_INDEX: AlleleIndex = 0;
const Y_INDEX: AlleleIndex = 4;
const FREQUENCY_TOLERANCE: f64 = 1e-6;

/// One allele as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlleleConfig {
    pub name: String,
    pub initial_allele_frequency: f64,
}

/// One gene (locus) as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneConfig {
    pub alleles: Vec<AlleleConfig>,
}

impl GeneConfig {
    /// Gene whose alleles share the frequency equally.
    pub fn uniform<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let frequency = 1.0 / names.len().max(1) as f64;
        Self {
            alleles: names
                .into_iter()
                .map(|name| AlleleConfig {
                    name,
                    initial_allele_frequency: frequency,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct Gene {
    /// `(index, name)` ordered by index.
    alleles: Vec<(AlleleIndex, String)>,
}

impl Gene {
    fn gender() -> Self {
        Self {
            alleles: vec![
                (X_INDEX, FEMALE_ALLELE.to_string()),
                (Y_INDEX, MALE_ALLELE.to_string()),
            ],
        }
    }

    fn from_config(gene_number: usize, config: &GeneConfig) -> Result<Self> {
        let count = config.alleles.len();
        if count < 2 {
            return Err(ConfigurationError::TooFewAlleles {
                gene: gene_number,
                count,
            });
        }
        if count > MAX_ALLELES {
            return Err(ConfigurationError::TooManyAlleles {
                names: config.alleles.iter().map(|a| a.name.clone()).collect(),
                max: MAX_ALLELES,
            });
        }

        for allele in &config.alleles {
            if allele.name.is_empty() {
                return Err(ConfigurationError::EmptyAlleleName);
            }
            if [FEMALE_ALLELE, MALE_ALLELE, WILDCARD].contains(&allele.name.as_str()) {
                return Err(ConfigurationError::ReservedAlleleName(allele.name.clone()));
            }
            if !(0.0..=1.0).contains(&allele.initial_allele_frequency) {
                return Err(ConfigurationError::FrequencyOutOfRange {
                    name: allele.name.clone(),
                    frequency: allele.initial_allele_frequency,
                });
            }
        }

        let total: f64 = config.alleles.iter().map(|a| a.initial_allele_frequency).sum();
        if (total - 1.0).abs() > FREQUENCY_TOLERANCE {
            let listing = config
                .alleles
                .iter()
                .map(|a| format!("'{}' = {}\n", a.name, a.initial_allele_frequency))
                .collect();
            return Err(ConfigurationError::FrequenciesDoNotSumToOne { listing, total });
        }

        // Index by name so input order never changes results.
        let mut names: Vec<&str> = config.alleles.iter().map(|a| a.name.as_str()).collect();
        names.sort_unstable();
        Ok(Self {
            alleles: names
                .into_iter()
                .enumerate()
                .map(|(i, name)| (i as AlleleIndex, name.to_string()))
                .collect(),
        })
    }

    fn describe(&self) -> String {
        let quoted: Vec<String> = self.alleles.iter().map(|(_, n)| format!("'{n}'")).collect();
        format!("[{}]", quoted.join(","))
    }
}

fn is_male(locus: LocusIndex, allele: AlleleIndex) -> bool {
    locus == GENDER_LOCUS && allele >= Y_INDEX
}

/// Put an allele pair on (mom, dad), keeping Y off the maternal gamete.
/// Returns `None` when that is impossible.
fn place(locus: LocusIndex, mom: AlleleIndex, dad: AlleleIndex) -> Option<(AlleleIndex, AlleleIndex)> {
    match (is_male(locus, mom), is_male(locus, dad)) {
        (true, true) => None,
        (true, false) => Some((dad, mom)),
        _ => Some((mom, dad)),
    }
}

/// The genes of one species.
#[derive(Debug, Clone)]
pub struct GeneCollection {
    genes: Vec<Gene>,
    lookup: BTreeMap<String, (LocusIndex, AlleleIndex)>,
}

impl GeneCollection {
    /// Validate `configs` and index their alleles. The gender gene is added
    /// in front.
    pub fn from_config(configs: &[GeneConfig]) -> Result<Self> {
        if configs.len() + 1 > MAX_LOCI {
            return Err(ConfigurationError::TooManyGenes {
                count: configs.len(),
                max: MAX_LOCI - 1,
            });
        }

        let mut genes = vec![Gene::gender()];
        for (i, config) in configs.iter().enumerate() {
            genes.push(Gene::from_config(i + 1, config)?);
        }

        let mut lookup = BTreeMap::new();
        for (locus, gene) in genes.iter().enumerate() {
            for (index, name) in &gene.alleles {
                if lookup.insert(name.clone(), (locus, *index)).is_some() {
                    return Err(ConfigurationError::DuplicateAlleleName(name.clone()));
                }
            }
        }

        debug!(loci = genes.len(), alleles = lookup.len(), "configured genes");
        Ok(Self { genes, lookup })
    }

    /// Locus and allele index of `name`.
    pub fn find(&self, name: &str) -> Option<(LocusIndex, AlleleIndex)> {
        self.lookup.get(name).copied()
    }

    /// Allele names of `locus` in index order.
    pub fn locus_alleles(&self, locus: LocusIndex) -> Vec<&str> {
        self.genes
            .get(locus)
            .map(|g| g.alleles.iter().map(|(_, n)| n.as_str()).collect())
            .unwrap_or_default()
    }

    /// Full genome name such as `X-a1-b0:Y-a0-b0`.
    pub fn genome_name(&self, genotype: Genotype) -> String {
        self.render_genotype(genotype, ALL_BITS)
    }

    /// Build an exact genotype from one `[allele, allele]` pair per locus,
    /// gender first. Wildcards are not allowed.
    pub fn create_genome(&self, param_name: &str, pairs: &[Vec<String>]) -> Result<Genotype> {
        if pairs.len() != self.genes.len() {
            return Err(ConfigurationError::IncompleteGenome {
                param: param_name.to_string(),
                pairs: pairs.len(),
                genes: self.genes.len() - 1,
            });
        }

        let mut used = BTreeSet::new();
        let mut genotype = Genotype::new();
        for (i, pair) in pairs.iter().enumerate() {
            let wildcard = || ConfigurationError::WildcardInGenome {
                param: param_name.to_string(),
                pair: i + 1,
            };
            // Even a wildcard with a single placement, like ["Y", "*"].
            if pair.iter().any(|name| name == WILDCARD) {
                return Err(wildcard());
            }
            let (locus, placements) = self.resolve_pair(param_name, i + 1, &used, pair)?;
            let &[(mom, dad)] = placements.as_slice() else {
                return Err(wildcard());
            };
            genotype.set_locus(locus, mom, dad);
            used.insert(locus);
        }
        Ok(genotype)
    }

    /// Inverse of [`GeneCollection::genome_name`].
    pub fn parse_genome_name(&self, name: &str) -> Result<Genotype> {
        let malformed = || ConfigurationError::MalformedGenomeName(name.to_string());
        let (mom, dad) = name.split_once(':').ok_or_else(malformed)?;
        let moms: Vec<&str> = mom.split('-').collect();
        let dads: Vec<&str> = dad.split('-').collect();
        if moms.len() != dads.len() {
            return Err(malformed());
        }
        let pairs: Vec<Vec<String>> = moms
            .iter()
            .zip(&dads)
            .map(|(m, d)| vec![m.to_string(), d.to_string()])
            .collect();
        self.create_genome(name, &pairs)
    }

    fn describe_genes(&self) -> String {
        self.genes.iter().map(|g| format!("{}\n", g.describe())).collect()
    }

    /// Resolve one `[allele, allele]` pair to its locus and the (mom, dad)
    /// placements it stands for, before gamete-order reversal.
    fn resolve_pair(
        &self,
        param_name: &str,
        pair_number: usize,
        used: &BTreeSet<LocusIndex>,
        pair: &[String],
    ) -> Result<(LocusIndex, Vec<(AlleleIndex, AlleleIndex)>)> {
        let param = || param_name.to_string();
        let [first, second] = pair else {
            return Err(ConfigurationError::PairLength {
                param: param(),
                pair: pair_number,
                len: pair.len(),
            });
        };

        for name in [first, second] {
            if name != WILDCARD && self.find(name).is_none() {
                return Err(ConfigurationError::UnknownAllele {
                    param: param(),
                    pair: pair_number,
                    allele: name.clone(),
                });
            }
        }

        let (locus, placements) = match (self.find(first), self.find(second)) {
            (None, None) => {
                return Err(ConfigurationError::DoubleWildcard {
                    param: param(),
                    pair: pair_number,
                })
            }
            (Some((locus, a1)), Some((locus_2, a2))) => {
                if locus != locus_2 {
                    return Err(ConfigurationError::MixedGenes {
                        param: param(),
                        pair: pair_number,
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
                let placed = place(locus, a1, a2).ok_or_else(|| ConfigurationError::DoubleY {
                    param: param(),
                    pair: pair_number,
                })?;
                (locus, vec![placed])
            }
            (Some((locus, known)), None) => {
                let placements = self.genes[locus]
                    .alleles
                    .iter()
                    .filter_map(|&(other, _)| place(locus, known, other))
                    .collect();
                (locus, placements)
            }
            (None, Some((locus, known))) => {
                let placements = self.genes[locus]
                    .alleles
                    .iter()
                    .filter_map(|&(other, _)| place(locus, other, known))
                    .collect();
                (locus, placements)
            }
        };

        if used.contains(&locus) {
            return Err(ConfigurationError::LocusReused {
                param: param(),
                pair: pair_number,
                first: first.clone(),
                second: second.clone(),
            });
        }
        Ok((locus, placements))
    }
}

impl AlleleCatalog for GeneCollection {
    type Error = ConfigurationError;

    fn num_loci(&self) -> usize {
        self.genes.len()
    }

    fn allele_name(&self, locus: LocusIndex, allele: AlleleIndex) -> Option<&str> {
        self.genes
            .get(locus)?
            .alleles
            .iter()
            .find(|(index, _)| *index == allele)
            .map(|(_, name)| name.as_str())
    }

    fn defined_allele_names(&self) -> Vec<String> {
        self.lookup
            .keys()
            .cloned()
            .chain(std::iter::once(WILDCARD.to_string()))
            .collect()
    }

    fn convert_allele_combinations(
        &self,
        param_name: &str,
        combinations: &[Vec<String>],
    ) -> Result<ComboPatterns> {
        if combinations.is_empty() {
            return Err(ConfigurationError::NoCombinations {
                param: param_name.to_string(),
            });
        }
        if combinations.len() > self.genes.len() {
            return Err(ConfigurationError::TooManyCombinations {
                param: param_name.to_string(),
                count: combinations.len(),
                genes: self.describe_genes(),
            });
        }

        let mut used = BTreeSet::new();
        let mut bit_mask = 0;
        let mut patterns = vec![0u64];
        for (i, pair) in combinations.iter().enumerate() {
            let (locus, placements) = self.resolve_pair(param_name, i + 1, &used, pair)?;
            used.insert(locus);
            bit_mask |= locus_mask(locus);

            let mut ordered = Vec::with_capacity(placements.len() * 2);
            for (mom, dad) in placements {
                ordered.push((mom, dad));
                // Y never moves onto the maternal gamete.
                if mom != dad && !is_male(locus, dad) {
                    ordered.push((dad, mom));
                }
            }

            patterns = ordered
                .iter()
                .flat_map(|&(mom, dad)| {
                    patterns
                        .iter()
                        .map(move |&p| p | locus_pattern(locus, mom, dad))
                })
                .collect();
        }

        Ok(ComboPatterns {
            bit_mask,
            possible_genomes: patterns,
        })
    }
}
