//! Genotype-to-phenotype mapping.
//!
//! The quantitative phenotype is the sum of per-locus contributions: the
//! full additive effect for a derived homozygote, the dominance-scaled
//! effect for a heterozygote, and zero for an ancestral homozygote. An
//! optional epistatic extension lets one locus's genotype shift another
//! locus's contribution by a fixed magnitude (dominance-scaled when the
//! modulating locus is heterozygous).
//!
//! The mapping is purely functional — no randomness is involved — so the
//! per-individual pass runs in parallel.

use crate::base::{Genotype, GenotypeMatrix};
use crate::errors::ShapeError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One directed epistatic interaction between two loci.
///
/// The `modulating` locus's genotype adds `magnitude` (derived homozygote)
/// or `magnitude × dominance[modulating]` (heterozygote) to the `modulated`
/// locus's contribution. Locus indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpistaticEffect {
    /// Locus whose contribution is adjusted.
    pub modulated: usize,
    /// Locus whose genotype drives the adjustment.
    pub modulating: usize,
    /// Additive adjustment at full (homozygous) expression.
    pub magnitude: f64,
}

/// Additive/dominance phenotype model, with optional epistasis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhenotypeModel {
    locus_effects: Vec<f64>,
    dominance: Vec<f64>,
    epistasis: Vec<EpistaticEffect>,
}

impl PhenotypeModel {
    /// Create a purely additive/dominance model.
    ///
    /// # Errors
    /// Returns an error if the effect and dominance vectors differ in length.
    pub fn new(locus_effects: Vec<f64>, dominance: Vec<f64>) -> Result<Self, ShapeError> {
        if locus_effects.len() != dominance.len() {
            return Err(ShapeError::EffectLengthMismatch {
                loci: locus_effects.len(),
                effects: dominance.len(),
            });
        }
        Ok(Self {
            locus_effects,
            dominance,
            epistasis: Vec::new(),
        })
    }

    /// Create a model with epistatic adjustments.
    ///
    /// # Errors
    /// Returns an error if the vectors differ in length or any epistatic
    /// triple references a locus outside the model.
    pub fn with_epistasis(
        locus_effects: Vec<f64>,
        dominance: Vec<f64>,
        epistasis: Vec<EpistaticEffect>,
    ) -> Result<Self, ShapeError> {
        let mut model = Self::new(locus_effects, dominance)?;
        let loci = model.num_loci();
        for (index, effect) in epistasis.iter().enumerate() {
            for locus in [effect.modulated, effect.modulating] {
                if locus >= loci {
                    return Err(ShapeError::EpistaticLocusOutOfRange { index, locus, loci });
                }
            }
        }
        model.epistasis = epistasis;
        Ok(model)
    }

    /// Number of loci the model covers.
    #[inline]
    pub fn num_loci(&self) -> usize {
        self.locus_effects.len()
    }

    /// True if the model carries epistatic adjustments.
    #[inline]
    pub fn has_epistasis(&self) -> bool {
        !self.epistasis.is_empty()
    }

    /// Per-locus additive effects.
    pub fn locus_effects(&self) -> &[f64] {
        &self.locus_effects
    }

    /// Per-locus dominance coefficients.
    pub fn dominance(&self) -> &[f64] {
        &self.dominance
    }

    /// Compute one phenotype value per genotype row.
    ///
    /// The genotype table's locus count must match the model; the engine
    /// validates this once at initialization.
    pub fn phenotypes(&self, genotypes: &GenotypeMatrix) -> Vec<f64> {
        debug_assert_eq!(genotypes.loci(), self.num_loci());
        (0..genotypes.rows())
            .into_par_iter()
            .map(|row| self.phenotype_of(genotypes.row(row)))
            .collect()
    }

    /// Phenotype of a single genotype row.
    pub fn phenotype_of(&self, row: &[Genotype]) -> f64 {
        if self.epistasis.is_empty() {
            return row
                .iter()
                .enumerate()
                .map(|(locus, &g)| self.contribution(g, locus))
                .sum();
        }

        // Epistatic path: materialize per-locus contributions, adjust, sum.
        let mut contributions: Vec<f64> = row
            .iter()
            .enumerate()
            .map(|(locus, &g)| self.contribution(g, locus))
            .collect();

        for effect in &self.epistasis {
            let adjustment = match row[effect.modulating] {
                Genotype::HomDerived => effect.magnitude,
                Genotype::Heterozygous => effect.magnitude * self.dominance[effect.modulating],
                Genotype::HomAncestral => continue,
            };
            contributions[effect.modulated] += adjustment;
        }

        contributions.iter().sum()
    }

    #[inline]
    fn contribution(&self, g: Genotype, locus: usize) -> f64 {
        match g {
            Genotype::HomDerived => self.locus_effects[locus],
            Genotype::Heterozygous => self.locus_effects[locus] * self.dominance[locus],
            Genotype::HomAncestral => 0.0,
        }
    }
}
