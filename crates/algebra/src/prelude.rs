//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use allelic_algebra::prelude::*;
//!
//! let genotype = Genotype::new().with_locus(1, 1, 1);
//! let combo = AlleleCombo::from_genotype(0, genotype);
//! let gp = GeneticProbability::from(AlleleComboProbability::new(combo, 0.5)) + 0.25;
//!
//! assert_eq!(gp.value(0, genotype), 0.75);
//! assert_eq!(gp.value(0, Genotype::new()), 0.25);
//! ```

pub use crate::base::{AlleleIndex, Genotype, LocusIndex, SpeciesIndex};
pub use crate::catalog::{AlleleCatalog, ComboPatterns, WILDCARD};
pub use crate::combo::AlleleCombo;
pub use crate::errors::{ArchiveError, ComboError};
pub use crate::probability::{AlleleComboProbability, GeneticProbability};
