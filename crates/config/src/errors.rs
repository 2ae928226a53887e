use allelic_algebra::errors::ComboError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Combo(#[from] ComboError),

    // genes
    #[error("{count} vector genes have been defined and the maximum is {max} (plus the gender gene)")]
    TooManyGenes { count: usize, max: usize },

    #[error("Gene #{gene} defines {count} allele(s); each gene needs at least two.")]
    TooFewAlleles { gene: usize, count: usize },

    #[error("The gene/locus has too many alleles defined ({}).\nThere is a maximum of {max} allele per gene.\nThe alleles defined are:\n{}", .names.len(), lines(.names))]
    TooManyAlleles { names: Vec<String>, max: usize },

    #[error("'Name' of an allele is empty string.\nAllele names must be defined and unique for the entire species.")]
    EmptyAlleleName,

    #[error("Allele name '{0}' is reserved.\n'X' and 'Y' belong to the gender gene and '*' matches any allele.")]
    ReservedAlleleName(String),

    #[error("There is more than one allele with the name '{0}'.\nAllele names must be unique.")]
    DuplicateAlleleName(String),

    #[error("Allele '{name}' has initial frequency {frequency}, which is outside [0, 1].")]
    FrequencyOutOfRange { name: String, frequency: f64 },

    #[error("Genes[x].Alleles frequencies do not sum to one.  The frequencies are:\n{listing}Total Frequency = {total}")]
    FrequenciesDoNotSumToOne { listing: String, total: f64 },

    // allele combinations
    #[error("The parameter '{param}' has no combinations.\nYou must define at least one combination.")]
    NoCombinations { param: String },

    #[error("The parameter '{param}' has too many combinations ({count}).\nThe following genes/loci and their alleles are defined:\n{genes}'{param}' can define at most one allele pair per locus.")]
    TooManyCombinations {
        param: String,
        count: usize,
        genes: String,
    },

    #[error("The parameter '{param}' has the allele pair #{pair} with\n{len} elements instead of two.")]
    PairLength { param: String, pair: usize, len: usize },

    #[error("The parameter '{param}' has the allele pair #{pair} with\n'{allele}' that is not an allele in one of the 'Genes'.")]
    UnknownAllele {
        param: String,
        pair: usize,
        allele: String,
    },

    #[error("The parameter '{param}' has the allele pair #{pair} with\n'*' and '*'.  You can only use the '*' for one allele of the pair.")]
    DoubleWildcard { param: String, pair: usize },

    #[error("The parameter '{param}' has the allele pair #{pair} with\nallele '{first}' and '{second}' and they are not from the same Gene.")]
    MixedGenes {
        param: String,
        pair: usize,
        first: String,
        second: String,
    },

    #[error("The parameter '{param}' has the allele pair #{pair} with\nallele 'Y' and 'Y'.  The gender locus must have one 'X'.")]
    DoubleY { param: String, pair: usize },

    #[error("The parameter '{param}' has the allele pair #{pair} with\nalleles ['{first}','{second}'] from a Gene already defined.")]
    LocusReused {
        param: String,
        pair: usize,
        first: String,
        second: String,
    },

    #[error("The parameter '{param}' has the allele pair #{pair} with\n'*' in one of the pair.  You cannot use the '*' symbol in this parameter.")]
    WildcardInGenome { param: String, pair: usize },

    #[error("The parameter '{param}' does not have an allele pair for each gene/loci.\nThe parameter has {pairs} pairs and there are {genes} defined plus the gender gene.")]
    IncompleteGenome {
        param: String,
        pairs: usize,
        genes: usize,
    },

    #[error("'{0}' is not a genome name of the form 'X-a1-b1:Y-a2-b1'.")]
    MalformedGenomeName(String),

    // species
    #[error("'Name' of a species is empty string.")]
    EmptySpeciesName,

    #[error("Duplicate species name '{0}'.\nSpecies names must be unique.")]
    DuplicateSpeciesName(String),

    #[error("'{name}' is an unknown species name.\nValid species names are:\n{}", lines(.defined))]
    UnknownSpecies { name: String, defined: Vec<String> },

    // resistances
    #[error("'{name}' = {value} is out of range; it must be in [0, {}].", f32::MAX)]
    ModifierOutOfRange { name: &'static str, value: f64 },

    #[error("{0}")]
    Ambiguous(String),

    #[error("'{0}' is not a resistance type.\nValid types are LARVAL_KILLING, REPELLING, BLOCKING and KILLING.")]
    UnknownResistanceType(String),

    // insecticides
    #[error("'Insecticides.Name' cannot be empty string.")]
    EmptyInsecticideName,

    #[error("Duplicate insecticide name.\nThe names of the insecticides in 'Insecticides' must be unique.\nThe following names are defined:\n{}", lines(.0))]
    DuplicateInsecticideName(Vec<String>),

    #[error("'{name}' is an unknown insecticide name.\nValid insecticide names are:\n{}", quoted_lines(.defined))]
    UnknownInsecticide { name: String, defined: Vec<String> },
}

fn lines(names: &[String]) -> String {
    names.iter().map(|n| format!("{n}\n")).collect()
}

fn quoted_lines(names: &[String]) -> String {
    names.iter().map(|n| format!("'{n}'\n")).collect()
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
