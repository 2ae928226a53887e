use thiserror::Error;

/// Errors raised when an allele combo is built from malformed masks or
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboError {
    #[error("Allele combo for species {species_index} has an empty bit mask")]
    EmptyMask { species_index: usize },

    #[error("Allele combo for species {species_index} has no possible genomes")]
    NoPossibleGenomes { species_index: usize },

    #[error("Possible genome {pattern:#018x} sets bits outside of mask {mask:#018x}")]
    PatternOutsideMask { pattern: u64, mask: u64 },
}

/// Error type for archive encoding and decoding.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("JSON archive error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary archive error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
