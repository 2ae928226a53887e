pub mod evaluate;
pub mod export;
pub mod show;
pub mod validate;

use allelic_algebra::GeneticProbability;
use allelic_config::Scenario;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::args::ChannelArgs;

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    debug!(path = %path.display(), "loading scenario");
    Scenario::load(path).with_context(|| format!("Failed to load scenario '{}'", path.display()))
}

/// The channel probability selected by `channel`.
pub fn channel<'a>(scenario: &'a Scenario, channel: &ChannelArgs) -> Result<&'a GeneticProbability> {
    let insecticide = scenario.insecticides().insecticide(&channel.insecticide)?;
    Ok(insecticide.resistance(channel.resistance))
}
