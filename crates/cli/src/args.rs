use allelic_algebra::storage::ArchiveFormat;
use allelic_config::resistance::ResistanceType;
use clap::{Args, ValueEnum};

/// Selects one resistance channel of one insecticide.
#[derive(Args, Debug)]
pub struct ChannelArgs {
    /// Insecticide name
    #[arg(short, long)]
    pub insecticide: String,

    /// Resistance channel (larval-killing, repelling, blocking, killing)
    #[arg(short, long)]
    pub resistance: ResistanceType,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Packed bincode
    Binary,
}

impl From<ExportFormat> for ArchiveFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => ArchiveFormat::Json,
            ExportFormat::Binary => ArchiveFormat::Binary,
        }
    }
}
