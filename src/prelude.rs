//! Commonly used imports for convenience.
//!
//! This prelude module provides a convenient way to import the most commonly
//! used types in the demevo library.
//!
//! # Example
//!
//! ```
//! use demevo::prelude::*;
//!
//! let gt = GenotypeMatrix::from_counts(2, &[vec![0, 1], vec![2, 2]]).unwrap();
//! let pop = Population::new(vec![0, 0], vec![0, 0], gt).unwrap();
//! assert_eq!(pop.size(), 2);
//! ```

pub use crate::base::{weighted_index, Genotype, GenotypeMatrix};
pub use crate::evolution::{
    EpistaticEffect, IntensityModel, PhenotypeModel, RandomIntensity, SelectionConfig,
    StabilizingSelection, StepwiseMutation,
};
pub use crate::simulation::{
    DispersalMatrix, MatingConfig, MortalitySchedule, Population, Simulation, SimulationBuilder,
    SimulationConfig, SimulationOutcome,
};
