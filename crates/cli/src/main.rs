mod args;
mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use args::{ChannelArgs, ExportFormat};
use commands::{evaluate, export, show, validate};

/// Allelic: genotype-dependent insecticide resistance
///
/// Validates vector species and insecticide scenarios and inspects the
/// resistance modifiers they assign to each genome.
#[derive(Parser, Debug)]
#[command(name = "allelic")]
#[command(author, version, about = "Genotype-dependent insecticide resistance", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a scenario file.
    ///
    /// Loads the species and insecticides and reports every configuration
    /// error, including ambiguous allele combinations.
    Validate {
        /// Scenario JSON file
        scenario: PathBuf,
    },

    /// Print the resistance modifier for one genome.
    Evaluate {
        /// Scenario JSON file
        scenario: PathBuf,

        #[command(flatten)]
        channel: ChannelArgs,

        /// Species name
        #[arg(short, long)]
        species: String,

        /// Genome name, e.g. "X-a1-b0:Y-a0-b0"
        #[arg(short, long)]
        genome: String,
    },

    /// Print every allele combo of a resistance channel for one species.
    Show {
        /// Scenario JSON file
        scenario: PathBuf,

        #[command(flatten)]
        channel: ChannelArgs,

        /// Species name
        #[arg(short, long)]
        species: String,
    },

    /// Write a resistance channel as an archive.
    Export {
        /// Scenario JSON file
        scenario: PathBuf,

        #[command(flatten)]
        channel: ChannelArgs,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Archive format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Validate { scenario } => {
            validate::validate_scenario(&scenario)?;
        }
        Commands::Evaluate {
            scenario,
            channel,
            species,
            genome,
        } => {
            evaluate::evaluate_genome(&scenario, &channel, &species, &genome)?;
        }
        Commands::Show {
            scenario,
            channel,
            species,
        } => {
            show::show_probability(&scenario, &channel, &species)?;
        }
        Commands::Export {
            scenario,
            channel,
            output,
            format,
        } => {
            export::export_probability(&scenario, &channel, &output, format.into())?;
        }
    }

    Ok(())
}
