use allelic_algebra::storage::{self, ArchiveFormat};
use anyhow::{Context, Result};
use std::path::Path;

use super::{channel, load_scenario};
use crate::args::ChannelArgs;

pub fn export_probability(path: &Path, selection: &ChannelArgs, output: &Path, format: ArchiveFormat) -> Result<()> {
    println!(
        "📤 Exporting {} {} from '{}'",
        selection.insecticide,
        selection.resistance,
        path.display()
    );

    let scenario = load_scenario(path)?;
    let probability = channel(&scenario, selection)?;
    storage::save(output, probability, format)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    println!(
        "✓ {} allele combos exported to: {}",
        probability.num_allele_combo_probabilities(),
        output.display()
    );
    Ok(())
}
