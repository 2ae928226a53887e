//! Vector species and their gene catalogs.

use crate::errors::{ConfigurationError, Result};
use crate::genes::{GeneCollection, GeneConfig};
use allelic_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// One species as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeciesConfig {
    pub name: String,
    /// Genes besides the gender gene, which is always present.
    #[serde(default)]
    pub genes: Vec<GeneConfig>,
}

/// A configured species. `index` is its position in the configuration and
/// is the species index used by combos.
#[derive(Debug, Clone)]
pub struct Species {
    name: String,
    index: SpeciesIndex,
    genes: GeneCollection,
}

impl Species {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> SpeciesIndex {
        self.index
    }

    pub fn genes(&self) -> &GeneCollection {
        &self.genes
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesCollection {
    species: Vec<Species>,
}

impl SpeciesCollection {
    pub fn from_config(configs: &[SpeciesConfig]) -> Result<Self> {
        let mut species: Vec<Species> = Vec::with_capacity(configs.len());
        for (index, config) in configs.iter().enumerate() {
            if config.name.is_empty() {
                return Err(ConfigurationError::EmptySpeciesName);
            }
            if species.iter().any(|s| s.name == config.name) {
                return Err(ConfigurationError::DuplicateSpeciesName(config.name.clone()));
            }
            species.push(Species {
                name: config.name.clone(),
                index,
                genes: GeneCollection::from_config(&config.genes)?,
            });
        }
        Ok(Self { species })
    }

    /// Look up a species by name.
    pub fn get(&self, name: &str) -> Result<&Species> {
        self.species
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigurationError::UnknownSpecies {
                name: name.to_string(),
                defined: self.names(),
            })
    }

    pub fn by_index(&self, index: SpeciesIndex) -> Option<&Species> {
        self.species.get(index)
    }

    pub fn names(&self) -> Vec<String> {
        self.species.iter().map(|s| s.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str) -> SpeciesConfig {
        SpeciesConfig {
            name: name.to_string(),
            genes: vec![GeneConfig::uniform(["a0", "a1"])],
        }
    }

    #[test]
    fn test_species_indexed_in_order() {
        let species = SpeciesCollection::from_config(&[config("arabiensis"), config("funestus")]).unwrap();
        assert_eq!(2, species.len());
        assert_eq!(1, species.get("funestus").unwrap().index());
        assert_eq!("arabiensis", species.by_index(0).unwrap().name());
        assert_eq!(2, species.get("arabiensis").unwrap().genes().num_loci());
    }

    #[test]
    fn test_unknown_species_lists_names() {
        let species = SpeciesCollection::from_config(&[config("arabiensis"), config("funestus")]).unwrap();
        let err = species.get("gambiae").unwrap_err();
        assert_eq!(
            "'gambiae' is an unknown species name.\nValid species names are:\narabiensis\nfunestus\n",
            err.to_string()
        );
    }

    #[test]
    fn test_species_names_must_be_unique_and_set() {
        assert!(matches!(
            SpeciesCollection::from_config(&[config("a"), config("a")]),
            Err(ConfigurationError::DuplicateSpeciesName(_))
        ));
        assert!(matches!(
            SpeciesCollection::from_config(&[config("")]),
            Err(ConfigurationError::EmptySpeciesName)
        ));
    }
}
