//! Insecticides and the genotype-dependent resistance to them.

use crate::errors::{ConfigurationError, Result};
use crate::resistance::{AlleleComboProbabilityConfig, AlleleComboProbabilityConfigCollection, ResistanceType};
use crate::species::SpeciesCollection;
use allelic_algebra::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// One insecticide as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsecticideConfig {
    pub name: String,
    #[serde(default)]
    pub resistances: Vec<AlleleComboProbabilityConfig>,
}

#[derive(Debug, Clone)]
pub struct Insecticide {
    name: String,
    resistances: [GeneticProbability; 4],
}

impl Insecticide {
    pub fn from_config(config: &InsecticideConfig, species: &SpeciesCollection) -> Result<Self> {
        if config.name.is_empty() {
            return Err(ConfigurationError::EmptyInsecticideName);
        }
        let collection = AlleleComboProbabilityConfigCollection::from_config(&config.resistances, species)?;
        debug!(insecticide = %config.name, resistances = collection.len(), "configured insecticide");
        Ok(Self {
            name: config.name.clone(),
            resistances: collection.into_probabilities(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modifier on the `rt` effect for every genotype.
    pub fn resistance(&self, rt: ResistanceType) -> &GeneticProbability {
        &self.resistances[rt.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct InsecticideCollection {
    insecticides: Vec<Insecticide>,
}

impl InsecticideCollection {
    pub fn from_config(configs: &[InsecticideConfig], species: &SpeciesCollection) -> Result<Self> {
        let insecticides = configs
            .iter()
            .map(|config| Insecticide::from_config(config, species))
            .collect::<Result<Vec<_>>>()?;

        let unique: BTreeSet<&str> = insecticides.iter().map(Insecticide::name).collect();
        if unique.len() != insecticides.len() {
            return Err(ConfigurationError::DuplicateInsecticideName(
                insecticides.iter().map(|i| i.name.clone()).collect(),
            ));
        }
        Ok(Self { insecticides })
    }

    pub fn insecticide(&self, name: &str) -> Result<&Insecticide> {
        self.insecticides
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| ConfigurationError::UnknownInsecticide {
                name: name.to_string(),
                defined: self.insecticides.iter().map(|i| i.name.clone()).collect(),
            })
    }

    /// Insecticide names in sorted order.
    pub fn insecticide_names(&self) -> BTreeSet<String> {
        self.insecticides.iter().map(|i| i.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.insecticides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insecticides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Insecticide> {
        self.insecticides.iter()
    }
}
