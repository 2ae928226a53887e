//! Commonly used imports for convenience.

pub use crate::errors::ConfigurationError;
pub use crate::genes::{AlleleConfig, GeneCollection, GeneConfig};
pub use crate::insecticide::{Insecticide, InsecticideCollection, InsecticideConfig};
pub use crate::resistance::{
    AlleleComboProbabilityConfig, AlleleComboProbabilityConfigCollection, ResistanceType,
};
pub use crate::scenario::{Scenario, ScenarioConfig};
pub use crate::species::{Species, SpeciesCollection, SpeciesConfig};
pub use allelic_algebra::prelude::*;
