//! Resistance channels: allele-combo modifiers for the four insecticide
//! effects.

use crate::errors::{ConfigurationError, Result};
use crate::species::SpeciesCollection;
use crate::validator;
use allelic_algebra::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// The insecticide effect a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResistanceType {
    LarvalKilling,
    Repelling,
    Blocking,
    Killing,
}

impl ResistanceType {
    pub const ALL: [ResistanceType; 4] = [
        ResistanceType::LarvalKilling,
        ResistanceType::Repelling,
        ResistanceType::Blocking,
        ResistanceType::Killing,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResistanceType::LarvalKilling => "LARVAL_KILLING",
            ResistanceType::Repelling => "REPELLING",
            ResistanceType::Blocking => "BLOCKING",
            ResistanceType::Killing => "KILLING",
        }
    }
}

impl fmt::Display for ResistanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResistanceType {
    type Err = ConfigurationError;

    /// Accepts `KILLING`, `killing`, `larval-killing` and similar spellings.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ResistanceType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::UnknownResistanceType(s.to_string()))
    }
}

fn default_modifier() -> f64 {
    1.0
}

/// One entry of `Insecticides[].resistances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlleleComboProbabilityConfig {
    /// Name of a configured species.
    pub species: String,

    /// `[allele, allele]` pairs, at most one per locus. `*` matches any allele.
    pub allele_combinations: Vec<Vec<String>>,

    /// Multiplier on larval killing for matching genotypes.
    #[serde(default = "default_modifier")]
    pub larval_killing_modifier: f64,

    /// Multiplier on repelling for matching genotypes.
    #[serde(default = "default_modifier")]
    pub repelling_modifier: f64,

    /// Multiplier on blocking for matching genotypes.
    #[serde(default = "default_modifier")]
    pub blocking_modifier: f64,

    /// Multiplier on killing for matching genotypes.
    #[serde(default = "default_modifier")]
    pub killing_modifier: f64,
}

impl AlleleComboProbabilityConfig {
    /// Config with every modifier at 1.0.
    pub fn new(species: impl Into<String>, allele_combinations: Vec<Vec<String>>) -> Self {
        Self {
            species: species.into(),
            allele_combinations,
            larval_killing_modifier: default_modifier(),
            repelling_modifier: default_modifier(),
            blocking_modifier: default_modifier(),
            killing_modifier: default_modifier(),
        }
    }

    pub fn modifier(&self, rt: ResistanceType) -> f64 {
        match rt {
            ResistanceType::LarvalKilling => self.larval_killing_modifier,
            ResistanceType::Repelling => self.repelling_modifier,
            ResistanceType::Blocking => self.blocking_modifier,
            ResistanceType::Killing => self.killing_modifier,
        }
    }

    pub fn with_modifier(mut self, rt: ResistanceType, value: f64) -> Self {
        let slot = match rt {
            ResistanceType::LarvalKilling => &mut self.larval_killing_modifier,
            ResistanceType::Repelling => &mut self.repelling_modifier,
            ResistanceType::Blocking => &mut self.blocking_modifier,
            ResistanceType::Killing => &mut self.killing_modifier,
        };
        *slot = value;
        self
    }

    fn check_modifiers(&self) -> Result<()> {
        for rt in ResistanceType::ALL {
            let value = self.modifier(rt);
            if !(0.0..=f64::from(f32::MAX)).contains(&value) {
                return Err(ConfigurationError::ModifierOutOfRange {
                    name: modifier_param(rt),
                    value,
                });
            }
            if value > 1.0 {
                warn!(
                    species = %self.species,
                    modifier = modifier_param(rt),
                    value,
                    "resistance modifier above 1.0 strengthens the insecticide"
                );
            }
        }
        Ok(())
    }

    /// Convert the allele combinations through the species' catalog and
    /// attach each channel's modifier to the resulting combo.
    pub fn resolve(&self, species: &SpeciesCollection) -> Result<ResistanceEntry> {
        self.check_modifiers()?;
        let species = species.get(&self.species)?;
        let patterns = species
            .genes()
            .convert_allele_combinations("Allele_Combinations", &self.allele_combinations)?;
        let combo = AlleleCombo::new(species.index(), patterns.bit_mask, patterns.possible_genomes)?;
        Ok(ResistanceEntry {
            probabilities: ResistanceType::ALL
                .map(|rt| AlleleComboProbability::new(combo.clone(), self.modifier(rt))),
        })
    }
}

fn modifier_param(rt: ResistanceType) -> &'static str {
    match rt {
        ResistanceType::LarvalKilling => "larval_killing_modifier",
        ResistanceType::Repelling => "repelling_modifier",
        ResistanceType::Blocking => "blocking_modifier",
        ResistanceType::Killing => "killing_modifier",
    }
}

/// A resolved resistance config: one probability per channel, all sharing
/// the same combo.
#[derive(Debug, Clone)]
pub struct ResistanceEntry {
    probabilities: [AlleleComboProbability; 4],
}

impl ResistanceEntry {
    pub fn probability(&self, rt: ResistanceType) -> &AlleleComboProbability {
        &self.probabilities[rt.index()]
    }

    pub fn allele_combo(&self) -> &AlleleCombo {
        self.probabilities[0].allele_combo()
    }
}

/// Every resistance configured for one insecticide, folded into one
/// [`GeneticProbability`] per channel.
#[derive(Debug, Clone)]
pub struct AlleleComboProbabilityConfigCollection {
    entries: Vec<ResistanceEntry>,
    probabilities: [GeneticProbability; 4],
}

impl AlleleComboProbabilityConfigCollection {
    /// Resolve `configs` and check the result. Without any config each
    /// channel is a flat 1.0.
    pub fn from_config(configs: &[AlleleComboProbabilityConfig], species: &SpeciesCollection) -> Result<Self> {
        let entries = configs
            .iter()
            .map(|config| config.resolve(species))
            .collect::<Result<Vec<_>>>()?;
        let mut collection = Self {
            entries,
            probabilities: std::array::from_fn(|_| GeneticProbability::new(1.0)),
        };
        collection.check_configuration(species)?;
        Ok(collection)
    }

    /// Rebuild the channel probabilities from the entries and reject
    /// configurations whose overlapping combos leave genotypes without a value
    /// of their own.
    pub fn check_configuration(&mut self, species: &SpeciesCollection) -> Result<()> {
        self.probabilities = std::array::from_fn(|_| GeneticProbability::new(1.0));
        let mut expected = GeneticProbability::new(0.0);
        for entry in &self.entries {
            for rt in ResistanceType::ALL {
                let acp = entry.probability(rt).clone();
                if rt == ResistanceType::Blocking {
                    expected += GeneticProbability::from(acp.clone());
                }
                self.probabilities[rt.index()].insert(acp);
            }
        }
        debug!(
            entries = self.entries.len(),
            expected = expected.num_allele_combo_probabilities(),
            "checking resistance combos"
        );

        validator::check_ambiguity(
            species,
            self.probability(ResistanceType::Blocking),
            &expected,
        )
    }

    pub fn probability(&self, rt: ResistanceType) -> &GeneticProbability {
        &self.probabilities[rt.index()]
    }

    pub fn entries(&self) -> &[ResistanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_probabilities(self) -> [GeneticProbability; 4] {
        self.probabilities
    }
}
