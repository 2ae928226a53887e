//! Top-level scenario document: species plus insecticides.
//!
//! # Example
//!
//! ```
//! use allelic_config::prelude::*;
//!
//! let scenario = Scenario::from_json(r#"{
//!     "species": [{
//!         "name": "arabiensis",
//!         "genes": [{"alleles": [
//!             {"name": "a0", "initial_allele_frequency": 0.5},
//!             {"name": "a1", "initial_allele_frequency": 0.5}
//!         ]}]
//!     }],
//!     "insecticides": [{
//!         "name": "pyrethroid",
//!         "resistances": [{
//!             "species": "arabiensis",
//!             "allele_combinations": [["a1", "a1"]],
//!             "killing_modifier": 0.25
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let genes = scenario.species().get("arabiensis").unwrap().genes();
//! let genome = genes.parse_genome_name("X-a1:X-a1").unwrap();
//! let killing = scenario.insecticides().insecticide("pyrethroid").unwrap()
//!     .resistance(ResistanceType::Killing);
//! assert_eq!(killing.value(0, genome), 0.25);
//! ```

use crate::errors::{ConfigurationError, Result};
use crate::insecticide::{InsecticideCollection, InsecticideConfig};
use crate::species::{SpeciesCollection, SpeciesConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub species: Vec<SpeciesConfig>,
    #[serde(default)]
    pub insecticides: Vec<InsecticideConfig>,
}

/// Validated species and insecticides.
#[derive(Debug, Clone)]
pub struct Scenario {
    species: SpeciesCollection,
    insecticides: InsecticideCollection,
}

impl Scenario {
    /// Read, parse and validate a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: ScenarioConfig = serde_json::from_str(text)?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let species = SpeciesCollection::from_config(&config.species)?;
        let insecticides = InsecticideCollection::from_config(&config.insecticides, &species)?;
        info!(
            species = species.len(),
            insecticides = insecticides.len(),
            "scenario configured"
        );
        Ok(Self {
            species,
            insecticides,
        })
    }

    pub fn species(&self) -> &SpeciesCollection {
        &self.species
    }

    pub fn insecticides(&self) -> &InsecticideCollection {
        &self.insecticides
    }
}
