//! Core value types for genotypes and stochastic sampling.

pub mod genotype;
pub mod sampling;

pub use genotype::{Genotype, GenotypeMatrix};
pub use sampling::weighted_index;
