//! Ambiguity check for overlapping resistance combos.
//!
//! When two configured combos overlap, the merged channel probability only
//! keeps the more specific entry at each genotype. If the overlap itself was
//! never configured, the arithmetic sum of the raw entries contains a combo
//! the merged result lacks. Every such combo is reported in one error,
//! grouped by species.

use crate::errors::{ConfigurationError, Result};
use crate::species::SpeciesCollection;
use allelic_algebra::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Fail with [`ConfigurationError::Ambiguous`] if `expected` has combos that
/// `configured` lacks.
pub fn check_ambiguity(
    species: &SpeciesCollection,
    configured: &GeneticProbability,
    expected: &GeneticProbability,
) -> Result<()> {
    let missing = configured.find_missing_allele_combos(expected);
    if missing.is_empty() {
        return Ok(());
    }
    debug!(missing = missing.len(), "ambiguous resistance combos");

    let mut grouped: BTreeMap<SpeciesIndex, Vec<AlleleCombo>> = BTreeMap::new();
    for combo in missing {
        grouped.entry(combo.species_index()).or_default().push(combo);
    }

    let mut message = String::from(
        "The 'Insecticides' configuration is invalid.\n\
         The following genomes are ambiguous and need to be configured:\n",
    );
    for (index, combos) in grouped {
        let species = species
            .by_index(index)
            .ok_or_else(|| ConfigurationError::UnknownSpecies {
                name: format!("#{index}"),
                defined: species.names(),
            })?;
        message.push_str(&format!("For species '{}':\n", species.name()));
        for combo in combos {
            message.push_str(&combo.render(species.genes()));
            message.push('\n');
        }
    }
    Err(ConfigurationError::Ambiguous(message))
}
