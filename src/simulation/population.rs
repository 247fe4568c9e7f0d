//! Population state: the demographic and genotype tables, kept aligned.
//!
//! An individual has no identity object; it is one row position shared by
//! the demographic table (deme, age) and the genotype table. Both tables are
//! rebuilt together every step, so a row's lifetime is exactly one step.
//! Holding them in a single aggregate makes desynchronizing them impossible
//! during merges.

use crate::base::{Genotype, GenotypeMatrix};
use crate::errors::ShapeError;
use serde::{Deserialize, Serialize};

/// A metapopulation snapshot: deme membership, age, and genotype per row.
///
/// Zero-row populations are legal and flow through every operator (an
/// extinct metapopulation simply stays empty unless recruits arrive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    demes: Vec<usize>,
    ages: Vec<u32>,
    genotypes: GenotypeMatrix,
}

impl Population {
    /// Create a population from demographic `(deme, age)` rows and a
    /// genotype table.
    ///
    /// # Errors
    /// Returns an error if the two tables disagree on the row count.
    pub fn new(
        demes: Vec<usize>,
        ages: Vec<u32>,
        genotypes: GenotypeMatrix,
    ) -> Result<Self, ShapeError> {
        if demes.len() != genotypes.rows() || ages.len() != genotypes.rows() {
            return Err(ShapeError::RowCountMismatch {
                demographic: demes.len().min(ages.len()),
                genotype: genotypes.rows(),
            });
        }
        Ok(Self {
            demes,
            ages,
            genotypes,
        })
    }

    /// Create a founder population filled to each deme's carrying capacity:
    /// `capacity[d]` individuals in deme `d`, all age 0, every genotype set
    /// to `fill`.
    pub fn founders(capacity: &[usize], loci: usize, fill: Genotype) -> Self {
        let total: usize = capacity.iter().sum();
        let mut demes = Vec::with_capacity(total);
        for (deme, &k) in capacity.iter().enumerate() {
            demes.extend(std::iter::repeat(deme).take(k));
        }
        Self {
            demes,
            ages: vec![0; total],
            genotypes: GenotypeMatrix::filled(total, loci, fill),
        }
    }

    /// Number of living individuals.
    #[inline]
    pub fn size(&self) -> usize {
        self.demes.len()
    }

    /// True if no individuals are alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.demes.is_empty()
    }

    /// Number of loci per genotype row.
    #[inline]
    pub fn num_loci(&self) -> usize {
        self.genotypes.loci()
    }

    /// Deme membership of individual `row`.
    #[inline]
    pub fn deme(&self, row: usize) -> usize {
        self.demes[row]
    }

    /// Age (in steps) of individual `row`.
    #[inline]
    pub fn age(&self, row: usize) -> u32 {
        self.ages[row]
    }

    /// Deme membership of every individual, in row order.
    pub fn demes(&self) -> &[usize] {
        &self.demes
    }

    /// Age of every individual, in row order.
    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    /// The genotype table.
    pub fn genotypes(&self) -> &GenotypeMatrix {
        &self.genotypes
    }

    /// Mutable access to the genotype table (the mutation pass works in
    /// place on the owned table).
    pub fn genotypes_mut(&mut self) -> &mut GenotypeMatrix {
        &mut self.genotypes
    }

    /// Count the individuals living in each of `num_demes` demes.
    pub fn deme_counts(&self, num_demes: usize) -> Vec<usize> {
        let mut counts = vec![0usize; num_demes];
        for &deme in &self.demes {
            counts[deme] += 1;
        }
        counts
    }

    /// Build the next generation's population.
    ///
    /// Recruits come first (their given demes, age 0), followed by every
    /// survivor (death flag unset) with its age incremented by one. Both
    /// tables are rebuilt in the same pass, so they cannot fall out of
    /// alignment.
    pub fn advance(
        &self,
        deaths: &[bool],
        recruit_demes: &[usize],
        recruit_genotypes: GenotypeMatrix,
    ) -> Population {
        debug_assert_eq!(deaths.len(), self.size());
        debug_assert_eq!(recruit_demes.len(), recruit_genotypes.rows());

        let survivors = deaths.iter().filter(|&&dead| !dead).count();
        let total = recruit_demes.len() + survivors;

        let mut demes = Vec::with_capacity(total);
        let mut ages = Vec::with_capacity(total);
        let mut genotypes = recruit_genotypes;

        demes.extend_from_slice(recruit_demes);
        ages.resize(recruit_demes.len(), 0);

        for row in 0..self.size() {
            if !deaths[row] {
                demes.push(self.demes[row]);
                ages.push(self.ages[row] + 1);
                genotypes.push_row(self.genotypes.row(row));
            }
        }

        Population {
            demes,
            ages,
            genotypes,
        }
    }
}
