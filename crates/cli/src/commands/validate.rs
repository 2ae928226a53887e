use allelic_algebra::prelude::AlleleCatalog;
use allelic_config::resistance::ResistanceType;
use allelic_config::Scenario;
use anyhow::Result;
use std::path::Path;

pub fn validate_scenario(path: &Path) -> Result<()> {
    println!("🔍 Validating scenario: {}", path.display());

    let scenario = match Scenario::load(path) {
        Ok(scenario) => scenario,
        Err(e) => {
            println!("✗ {e}");
            anyhow::bail!("Scenario '{}' is invalid", path.display());
        }
    };

    println!("✓ Species: {}", scenario.species().len());
    for species in scenario.species().iter() {
        let genes = species.genes();
        let loci: Vec<String> = (0..genes.num_loci())
            .map(|locus| genes.locus_alleles(locus).join("/"))
            .collect();
        println!("  • {}: {}", species.name(), loci.join(", "));
    }

    println!("✓ Insecticides: {}", scenario.insecticides().len());
    for insecticide in scenario.insecticides().iter() {
        let combos = insecticide
            .resistance(ResistanceType::Blocking)
            .num_allele_combo_probabilities();
        println!("  • {}: {combos} allele combos", insecticide.name());
    }

    println!("\n✓ Scenario is valid");
    Ok(())
}
