//! # Config Crate
//!
//! The `config` crate turns JSON scenario documents into validated runtime
//! objects: per-species gene catalogs, and insecticides whose resistance
//! modifiers are [`GeneticProbability`](allelic_algebra::GeneticProbability)
//! values keyed by allele combinations.
//!
//! Collections are passed by reference; nothing is read from global state.

pub mod errors;
pub mod genes;
pub mod insecticide;
pub mod prelude;
pub mod resistance;
pub mod scenario;
pub mod species;
pub mod validator;

pub use errors::{ConfigurationError, Result};
pub use scenario::{Scenario, ScenarioConfig};
