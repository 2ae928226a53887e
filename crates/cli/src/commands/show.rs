use anyhow::Result;
use std::path::Path;

use super::{channel, load_scenario};
use crate::args::ChannelArgs;

pub fn show_probability(path: &Path, selection: &ChannelArgs, species: &str) -> Result<()> {
    let scenario = load_scenario(path)?;
    let probability = channel(&scenario, selection)?;
    let species = scenario.species().get(species)?;

    println!(
        "📋 {} {} for species '{}'",
        selection.insecticide,
        selection.resistance,
        species.name()
    );
    print!("{}", probability.render(species.index(), species.genes()));
    Ok(())
}
