//! Evolutionary operators: mutation, phenotype, selection, inheritance.
//!
//! Each operator is a small model struct with a validated constructor and a
//! single apply method. Stochastic operators take a caller-supplied RNG so
//! that a seeded run reproduces an exact trajectory.

pub mod inheritance;
pub mod mutation;
pub mod phenotype;
pub mod selection;

pub use inheritance::recruit_genotypes;
pub use mutation::StepwiseMutation;
pub use phenotype::{EpistaticEffect, PhenotypeModel};
pub use selection::{IntensityModel, RandomIntensity, SelectionConfig, StabilizingSelection};
