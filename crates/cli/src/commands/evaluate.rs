use anyhow::{Context, Result};
use std::path::Path;

use super::{channel, load_scenario};
use crate::args::ChannelArgs;

pub fn evaluate_genome(path: &Path, selection: &ChannelArgs, species: &str, genome: &str) -> Result<()> {
    let scenario = load_scenario(path)?;
    let probability = channel(&scenario, selection)?;
    let species = scenario.species().get(species)?;
    let genotype = species
        .genes()
        .parse_genome_name(genome)
        .with_context(|| format!("Invalid genome for species '{}'", species.name()))?;

    let value = probability.value(species.index(), genotype);
    println!(
        "{} {} modifier for '{}' ({}): {value}",
        selection.insecticide,
        selection.resistance,
        species.genes().genome_name(genotype),
        species.name()
    );
    Ok(())
}
