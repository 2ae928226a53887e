//! Archive adapters.
//!
//! Any `serde` value, and in particular a
//! [`GeneticProbability`](crate::probability::GeneticProbability), can be
//! written as pretty JSON or as packed `bincode`. Combos are re-interned on
//! load, so a decoded value shares combo data with live values on the same
//! thread.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ArchiveError;

/// Encoding used for an archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    #[default]
    Json,
    Binary,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, ArchiveError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, ArchiveError> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_binary<T: Serialize>(value: &T) -> Result<Vec<u8>, ArchiveError> {
    Ok(bincode::serialize(value)?)
}

pub fn from_binary<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ArchiveError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Write `value` to `path` in the given format.
pub fn save<T: Serialize>(path: &Path, value: &T, format: ArchiveFormat) -> Result<(), ArchiveError> {
    let bytes = match format {
        ArchiveFormat::Json => to_json(value)?.into_bytes(),
        ArchiveFormat::Binary => to_binary(value)?,
    };
    fs::write(path, &bytes)?;
    debug!(path = %path.display(), ?format, bytes = bytes.len(), "saved archive");
    Ok(())
}

/// Read a value previously written with [`save`].
pub fn load<T: DeserializeOwned>(path: &Path, format: ArchiveFormat) -> Result<T, ArchiveError> {
    let bytes = fs::read(path)?;
    match format {
        ArchiveFormat::Json => Ok(serde_json::from_slice(&bytes)?),
        ArchiveFormat::Binary => from_binary(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{locus_mask, locus_pattern, Genotype};
    use crate::probability::{AlleleComboProbability, GeneticProbability};
    use crate::AlleleCombo;

    fn sample() -> GeneticProbability {
        let a2a2 = AlleleCombo::new(0, locus_mask(1), vec![locus_pattern(1, 1, 1)]).unwrap();
        let b1 = AlleleCombo::new(
            1,
            locus_mask(2),
            vec![locus_pattern(2, 0, 1), locus_pattern(2, 1, 0)],
        )
        .unwrap();
        let genotype = Genotype::new().with_locus(1, 1, 0).with_locus(2, 2, 2);

        (GeneticProbability::from(AlleleComboProbability::new(a2a2, 0.2)) + 0.1)
            * (GeneticProbability::from(AlleleComboProbability::new(b1, 0.75)) + 1.0)
            + GeneticProbability::from_genotype(0, genotype, 0.05)
    }

    #[test]
    fn test_json_binary_json_is_identical() {
        let original = sample();
        let text = to_json(&original).unwrap();

        let from_text: GeneticProbability = from_json(&text).unwrap();
        let bytes = to_binary(&from_text).unwrap();
        let from_bytes: GeneticProbability = from_binary(&bytes).unwrap();

        assert_eq!(to_json(&from_bytes).unwrap(), text);
        assert_eq!(from_bytes, original);
    }

    #[test]
    fn test_json_layout() {
        let text = to_json(&sample()).unwrap();
        assert!(text.contains("\"default_value\""));
        assert!(text.contains("\"allele_combos\""));
        assert!(text.contains("\"possible_genomes\""));
        assert!(text.contains("18446744073709551615"));
    }

    #[test]
    fn test_malformed_combo_is_rejected() {
        let text = r#"{"default_value":0.0,"allele_combos":[
            {"allele_combo":{"species_index":0,"bit_mask":7,"possible_genomes":[]},"value":1.0}
        ]}"#;
        let result: Result<GeneticProbability, _> = from_json(text);
        assert!(matches!(result, Err(ArchiveError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let original = sample();

        for format in [ArchiveFormat::Json, ArchiveFormat::Binary] {
            let path = dir.path().join(format!("gp.{format:?}"));
            save(&path, &original, format).unwrap();
            let loaded: GeneticProbability = load(&path, format).unwrap();
            assert_eq!(loaded, original);
        }
    }
}
